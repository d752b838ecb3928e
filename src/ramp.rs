//! A single constant-acceleration trajectory segment.

use bigdecimal::Zero;
use serde::{Deserialize, Serialize};

use crate::config::PrecisionConfig;
use crate::error::CurveError;
use crate::math::{self, Decimal, IntoDecimal};
use crate::Result;

/// One constant-acceleration segment of a trajectory.
///
/// The final velocity `v1` and the net displacement `d` are derived from the
/// other fields and recomputed whenever the duration changes. The initial
/// position `x0` is rewritten by an owning curve on append, which is why
/// ramps are owned values, never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    x0: Decimal,
    v0: Decimal,
    a: Decimal,
    duration: Decimal,
    v1: Decimal,
    d: Decimal,
}

impl Ramp {
    /// Create a new ramp from its initial conditions.
    ///
    /// The duration must stay above `-epsilon`.
    pub fn new(
        v0: impl IntoDecimal,
        a: impl IntoDecimal,
        duration: impl IntoDecimal,
        x0: impl IntoDecimal,
        config: &PrecisionConfig,
    ) -> Result<Self> {
        let duration = duration.into_decimal()?;
        if duration <= -&config.epsilon {
            return Err(CurveError::InvalidDuration {
                duration: duration.to_string(),
            });
        }

        let mut ramp = Self {
            x0: x0.into_decimal()?,
            v0: v0.into_decimal()?,
            a: a.into_decimal()?,
            duration,
            v1: Decimal::zero(),
            d: Decimal::zero(),
        };
        ramp.recompute(config);
        Ok(ramp)
    }

    /// Recompute the derived final velocity and net displacement.
    fn recompute(&mut self, config: &PrecisionConfig) {
        // v1 = v0 + a * duration, d = 1/2 * (v0 + v1) * duration
        self.v1 = &self.v0 + &self.a * &self.duration;
        let v_sum = &self.v0 + &self.v1;
        self.d = math::prod(
            &[&math::point_five(), &v_sum, &self.duration],
            config.working_digits,
        );
    }

    /// Change the duration in place, keeping `v0`, `a` and `x0`.
    pub fn update_duration(
        &mut self,
        new_duration: impl IntoDecimal,
        config: &PrecisionConfig,
    ) -> Result<()> {
        let new_duration = new_duration.into_decimal()?;
        if new_duration <= -&config.epsilon {
            return Err(CurveError::InvalidDuration {
                duration: new_duration.to_string(),
            });
        }

        self.duration = new_duration;
        self.recompute(config);
        Ok(())
    }

    fn check_time(&self, t: &Decimal, config: &PrecisionConfig) -> Result<()> {
        if *t <= -&config.epsilon || *t >= &self.duration + &config.epsilon {
            return Err(CurveError::TimeOutOfRange {
                time: t.to_string(),
                duration: self.duration.to_string(),
            });
        }
        Ok(())
    }

    /// Position at local time `t` from the segment start.
    pub fn eval_pos(&self, t: impl IntoDecimal, config: &PrecisionConfig) -> Result<Decimal> {
        let t = t.into_decimal()?;
        self.check_time(&t, config)?;

        // x0 + t * (v0 + 1/2 * t * a), composed left to right
        let half_ta = math::prod(&[&math::point_five(), &t, &self.a], config.working_digits);
        let d_incr = &t * &(&self.v0 + &half_ta);
        Ok(&self.x0 + &d_incr)
    }

    /// Velocity at local time `t` from the segment start.
    pub fn eval_vel(&self, t: impl IntoDecimal, config: &PrecisionConfig) -> Result<Decimal> {
        let t = t.into_decimal()?;
        self.check_time(&t, config)?;

        Ok(&self.v0 + &self.a * &t)
    }

    /// Acceleration at local time `t` from the segment start.
    pub fn eval_acc(&self, t: impl IntoDecimal, config: &PrecisionConfig) -> Result<Decimal> {
        let t = t.into_decimal()?;
        self.check_time(&t, config)?;

        Ok(self.a.clone())
    }

    /// Initial position.
    #[inline]
    pub fn x0(&self) -> &Decimal {
        &self.x0
    }

    /// Initial velocity.
    #[inline]
    pub fn v0(&self) -> &Decimal {
        &self.v0
    }

    /// Constant acceleration.
    #[inline]
    pub fn a(&self) -> &Decimal {
        &self.a
    }

    /// Segment duration.
    #[inline]
    pub fn duration(&self) -> &Decimal {
        &self.duration
    }

    /// Final velocity, derived.
    #[inline]
    pub fn v1(&self) -> &Decimal {
        &self.v1
    }

    /// Net displacement over the segment, derived.
    #[inline]
    pub fn d(&self) -> &Decimal {
        &self.d
    }

    /// Overwrite the initial position. Only an owning curve does this, while
    /// splicing the ramp in behind its predecessor.
    pub(crate) fn set_x0(&mut self, x0: Decimal) {
        self.x0 = x0;
    }
}

/// A scalar supplied by the upstream generator, either as a native number or
/// as a decimal string when the value exceeds what `f64` can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarInput {
    Number(f64),
    Text(String),
}

impl IntoDecimal for ScalarInput {
    fn into_decimal(self) -> core::result::Result<Decimal, CurveError> {
        match self {
            Self::Number(value) => value.into_decimal(),
            Self::Text(text) => text.into_decimal(),
        }
    }
}

impl IntoDecimal for &ScalarInput {
    fn into_decimal(self) -> core::result::Result<Decimal, CurveError> {
        self.clone().into_decimal()
    }
}

// Easier conversions
impl From<f64> for ScalarInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ScalarInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ScalarInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Ramp parameters as produced by the upstream trajectory generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampDescriptor {
    pub v0: ScalarInput,
    pub a: ScalarInput,
    pub duration: ScalarInput,
    pub x0: ScalarInput,
}

impl RampDescriptor {
    /// Build the ramp this descriptor describes.
    pub fn to_ramp(&self, config: &PrecisionConfig) -> Result<Ramp> {
        Ramp::new(&self.v0, &self.a, &self.duration, &self.x0, config)
    }
}
