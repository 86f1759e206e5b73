//! Explainability: turns raw sensitivities and simulation output into ranked
//! drivers, segment rollups, bridge attributions, citations and prose.
//!
//! ```ignore
//! use whatif_core::explain::{MemoOptions, analyze_drivers, create_memo};
//!
//! let drivers = analyze_drivers(&sensitivity);
//! let memo = create_memo(
//!     &SimulationSummary::new(&mc, p_fail),
//!     &drivers,
//!     Some(&stress_results),
//!     Some(&sensitivity),
//!     &MemoOptions::default(),
//! );
//! ```

mod drivers;
mod evidence;
pub mod format;
mod memo;
mod narrative;

pub use drivers::*;
pub use evidence::*;
pub use memo::*;
pub use narrative::*;
