use std::fmt;

/// Errors raised by the simulation model and the risk analyzer
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A field required by the cash-flow formula is absent from the effective inputs
    MissingField { field: &'static str },
    /// An out-of-domain parameter, rejected before any sampling work begins
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// The baseline metric is exactly zero, so a relative change is undefined
    DivisionByZero { metric: String },
    /// The requested metric is not produced by the model
    UnknownMetric(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::MissingField { field } => {
                write!(f, "required field '{field}' is missing from the inputs")
            }
            AnalysisError::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid parameter {name}={value}: {reason}"),
            AnalysisError::DivisionByZero { metric } => {
                write!(
                    f,
                    "baseline {metric} is zero; relative sensitivity is undefined"
                )
            }
            AnalysisError::UnknownMetric(name) => write!(f, "unknown metric '{name}'"),
        }
    }
}

impl std::error::Error for AnalysisError {}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let missing = AnalysisError::MissingField { field: "revenue" };
        assert_eq!(
            missing.to_string(),
            "required field 'revenue' is missing from the inputs"
        );

        let invalid = AnalysisError::InvalidParameter {
            name: "iterations",
            value: 0.0,
            reason: "must be at least 1",
        };
        assert_eq!(
            invalid.to_string(),
            "invalid parameter iterations=0: must be at least 1"
        );

        let zero = AnalysisError::DivisionByZero {
            metric: "cash_flow".to_string(),
        };
        assert!(zero.to_string().contains("cash_flow"));
    }
}
