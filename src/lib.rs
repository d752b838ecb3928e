//! High-precision piecewise-parabolic motion curves.
//!
//! A reference implementation used to verify the output of trajectory
//! smoothing: a trajectory is an ordered sequence of constant-acceleration
//! segments, evaluated in arbitrary-precision decimal arithmetic with a fixed
//! operation order so that results are reproducible bit for bit.

pub mod config;
pub mod curve;
pub mod curve_nd;
pub mod error;
pub mod math;
pub mod ramp;
pub mod sampling;

// Re-export common types for convenience
pub use config::PrecisionConfig;
pub use curve::ParabolicCurve;
pub use curve_nd::ParabolicCurvesNd;
pub use error::CurveError;
pub use math::{Decimal, IntoDecimal};
pub use ramp::{Ramp, RampDescriptor, ScalarInput};
pub use sampling::{SampleStatistics, SampledDof, SampledProfile};

/// Curve operation result type
pub type Result<T> = core::result::Result<T, CurveError>;
