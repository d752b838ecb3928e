//! Error types for curve construction, composition and evaluation.

use serde::{Deserialize, Serialize};

/// Comprehensive error type for curve operations.
///
/// Every variant is a precondition violation: the crate is a correctness
/// oracle, so invalid input fails immediately instead of being tolerated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CurveError {
    /// Segment duration below the negative tolerance
    #[error("invalid duration: {duration}")]
    InvalidDuration { duration: String },

    /// Evaluation time outside the tolerated range of the segment or curve
    #[error("time {time} is out of range [0, {duration}]")]
    TimeOutOfRange { time: String, duration: String },

    /// Multi-DOF construction from curves whose durations cannot be reconciled
    #[error("curve {index} has duration {duration}, expected {expected} within tolerance")]
    DurationMismatch {
        index: usize,
        duration: String,
        expected: String,
    },

    /// Trim request exceeding the curve or its last segment
    #[error("cannot trim {delta} from a curve of duration {duration}")]
    UntrimmableCurve { delta: String, duration: String },

    /// Append between collections of differing degree-of-freedom counts
    #[error("degree-of-freedom mismatch: expected {expected}, got {actual}")]
    DofMismatch { expected: usize, actual: usize },

    /// Value that cannot be converted to the working decimal type
    #[error("invalid scalar: {reason}")]
    InvalidScalar { reason: String },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl CurveError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } | Self::InvalidScalar { .. } => "validation",
            Self::TimeOutOfRange { .. } => "evaluation",
            Self::DurationMismatch { .. }
            | Self::UntrimmableCurve { .. }
            | Self::DofMismatch { .. } => "composition",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
