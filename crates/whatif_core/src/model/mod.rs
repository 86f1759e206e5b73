mod inputs;
mod memo;
mod results;

pub use inputs::{Constraints, EffectiveInputs, InputField, Inputs};
pub use memo::{Evidence, Memo, Narrative, SimulationSummary};
pub use results::{
    BreakpointMap, BridgeData, BridgeStep, CASH_FLOW, DeterministicResult, Direction, Driver,
    MonteCarloResult, ScenarioResults, SegmentImpact, SensitivityMap,
};
