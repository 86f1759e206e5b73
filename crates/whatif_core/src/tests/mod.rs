//! Scenario tests for the decision-analysis engine
//!
//! Tests are organized by topic:
//! - `simulation` - Deterministic projection, overrides, constraints, Monte Carlo
//! - `risk` - Sensitivity, break-even points, stress presets, failure probability
//! - `explainability` - Driver ranking, segments, bridges, trade-offs
//! - `pipeline` - End-to-end analysis from baseline to memo

mod pipeline;
