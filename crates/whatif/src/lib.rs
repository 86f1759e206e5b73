//! What-if analysis front end
//!
//! Loads a scenario file, turns its business levers into input overrides,
//! runs the `whatif_core` pipeline end to end and serializes the report.

// ============================================================================
// Modules
// ============================================================================

pub mod logging;
pub mod report;
pub mod scenario;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use logging::init_logging;
pub use report::{OutputFormat, Report, run_analysis};
pub use scenario::{ScenarioError, ScenarioFile, ScenarioParams};
