//! Precision configuration shared by every arithmetic and comparison step.

use bigdecimal::Zero;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::math::{Decimal, IntoDecimal};

/// Digits of headroom the working precision must keep beyond the tolerance.
const TOLERANCE_MARGIN_DIGITS: u64 = 100;

/// Working precision and comparison tolerance for one family of curves.
///
/// Passed by reference into every operation that rounds or compares; there is
/// no global state, so the same curve logic can be exercised at several
/// tolerance levels side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionConfig {
    /// Significant decimal digits kept by multi-term sums and products.
    pub working_digits: u64,
    /// Tolerance used in place of exact equality for all comparisons.
    pub epsilon: Decimal,
}

impl Default for PrecisionConfig {
    /// 500 significant digits with a comparison tolerance of 1e-100.
    fn default() -> Self {
        Self {
            working_digits: 500,
            epsilon: "1e-100".parse().expect("valid decimal literal"),
        }
    }
}

impl PrecisionConfig {
    /// Create a validated configuration.
    pub fn new(working_digits: u64, epsilon: impl IntoDecimal) -> Result<Self, CurveError> {
        let config = Self {
            working_digits,
            epsilon: epsilon.into_decimal()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// A much tighter tolerance for stress-testing comparison-sensitive paths.
    pub fn strict() -> Self {
        Self {
            working_digits: 1000,
            epsilon: "1e-200".parse().expect("valid decimal literal"),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.working_digits == 0 {
            return Err(CurveError::InvalidScalar {
                reason: "working precision must be at least one digit".to_string(),
            });
        }

        if self.epsilon <= Decimal::zero() || self.epsilon >= Decimal::from(1) {
            return Err(CurveError::InvalidScalar {
                reason: format!("tolerance must be in (0, 1), got {}", self.epsilon),
            });
        }

        // The working precision must resolve values TOLERANCE_MARGIN_DIGITS
        // digits finer than the tolerance itself.
        let floor = Decimal::new(
            1.into(),
            self.working_digits.saturating_sub(TOLERANCE_MARGIN_DIGITS) as i64,
        );
        if self.epsilon < floor {
            return Err(CurveError::InvalidScalar {
                reason: format!(
                    "tolerance {} is finer than {} working digits can support",
                    self.epsilon, self.working_digits
                ),
            });
        }

        Ok(())
    }

    /// Whether `x` is indistinguishable from zero at this tolerance.
    #[inline]
    pub fn is_negligible(&self, x: &Decimal) -> bool {
        x.abs() < self.epsilon
    }

    /// Whether `a` and `b` are equal within the tolerance.
    #[inline]
    pub fn approx_eq(&self, a: &Decimal, b: &Decimal) -> bool {
        self.is_negligible(&(a - b))
    }
}
