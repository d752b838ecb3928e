//! A single degree of freedom's trajectory: a time-contiguous ramp sequence.

use std::ops::Index;

use bigdecimal::Zero;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::PrecisionConfig;
use crate::error::CurveError;
use crate::math::{self, Decimal, IntoDecimal};
use crate::ramp::{Ramp, RampDescriptor};
use crate::Result;

/// An ordered, time-contiguous sequence of constant-acceleration segments.
///
/// The switch-point list holds the cumulative segment end times starting at
/// zero, so it has one more entry than there are ramps (none for the empty
/// curve). Continuity across segments is established constructively:
/// `append` rewrites each incoming ramp's initial position instead of
/// trusting the source curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParabolicCurve {
    ramps: Vec<Ramp>,
    x0: Decimal,
    duration: Decimal,
    d: Decimal,
    switch_points: Vec<Decimal>,
}

impl Default for ParabolicCurve {
    fn default() -> Self {
        Self::empty()
    }
}

impl ParabolicCurve {
    /// The empty curve: zero duration, zero displacement, append identity.
    pub fn empty() -> Self {
        Self {
            ramps: Vec::new(),
            x0: Decimal::zero(),
            duration: Decimal::zero(),
            d: Decimal::zero(),
            switch_points: Vec::new(),
        }
    }

    /// Build a curve from an already-contiguous ramp sequence.
    ///
    /// The initial position, switch points, duration and displacement are all
    /// re-derived from the ramps.
    pub fn from_ramps(ramps: Vec<Ramp>, config: &PrecisionConfig) -> Self {
        if ramps.is_empty() {
            return Self::empty();
        }

        let x0 = ramps[0].x0().clone();
        let mut switch_points = Vec::with_capacity(ramps.len() + 1);
        let mut total = Decimal::zero();
        switch_points.push(total.clone());
        for ramp in &ramps {
            total = &total + ramp.duration();
            switch_points.push(total.clone());
        }

        let displacements: Vec<&Decimal> = ramps.iter().map(|ramp| ramp.d()).collect();
        let d = math::sum(&displacements, config.working_digits);

        Self {
            ramps,
            x0,
            duration: total,
            d,
            switch_points,
        }
    }

    /// Build a curve from upstream ramp descriptors.
    pub fn from_descriptors(
        descriptors: &[RampDescriptor],
        config: &PrecisionConfig,
    ) -> Result<Self> {
        let ramps = descriptors
            .iter()
            .map(|descriptor| descriptor.to_ramp(config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_ramps(ramps, config))
    }

    /// Whether this is the empty curve.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }

    /// Number of ramps.
    #[inline]
    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    /// The ramps, in time order.
    #[inline]
    pub fn ramps(&self) -> &[Ramp] {
        &self.ramps
    }

    /// Initial position.
    #[inline]
    pub fn x0(&self) -> &Decimal {
        &self.x0
    }

    /// Total duration.
    #[inline]
    pub fn duration(&self) -> &Decimal {
        &self.duration
    }

    /// Total net displacement.
    #[inline]
    pub fn d(&self) -> &Decimal {
        &self.d
    }

    /// Cumulative segment end times, starting at zero.
    #[inline]
    pub fn switch_points(&self) -> &[Decimal] {
        &self.switch_points
    }

    /// Splice `other` onto the end of this curve.
    ///
    /// Each incoming ramp's initial position is overwritten with the running
    /// displacement total, so continuity across the splice never depends on
    /// the source curve's own positions. Either side may be the empty curve,
    /// which acts as the identity.
    pub fn append(&mut self, other: &ParabolicCurve) {
        if self.is_empty() {
            if !other.is_empty() {
                *self = other.clone();
            }
            return;
        }

        let mut duration = self.duration.clone();
        let mut d = self.d.clone();
        for ramp in &other.ramps {
            let mut ramp = ramp.clone();
            duration = &duration + ramp.duration();
            self.switch_points.push(duration.clone());
            ramp.set_x0(d.clone());
            d = &d + ramp.d();
            self.ramps.push(ramp);
        }
        self.duration = duration;
        self.d = d;
    }

    /// Coalesce consecutive runs of ramps whose accelerations agree within
    /// the tolerance into single ramps.
    ///
    /// Idempotent; afterwards no two adjacent ramps share an acceleration
    /// within the tolerance.
    pub fn merge(&mut self, config: &PrecisionConfig) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        let mut a_run = self.ramps[0].a().clone();
        let mut index = 1;
        let mut coalesced = 0usize;
        while index < self.ramps.len() {
            if config.approx_eq(self.ramps[index].a(), &a_run) {
                let redundant = self.ramps.remove(index);
                let new_duration = self.ramps[index - 1].duration() + redundant.duration();
                self.ramps[index - 1].update_duration(new_duration, config)?;
                self.switch_points.remove(index);
                coalesced += 1;
            } else {
                a_run = self.ramps[index].a().clone();
                index += 1;
            }
        }

        if coalesced > 0 {
            trace!(
                "merge coalesced {} ramp(s), {} remaining",
                coalesced,
                self.ramps.len()
            );
        }
        Ok(())
    }

    /// Locate the ramp containing `t` and the local remainder into it.
    ///
    /// A time landing exactly on an interior switch point resolves to the
    /// *end of the preceding ramp*, so that ramp's acceleration is the one
    /// reported at the switch instant.
    fn ramp_index_at(&self, t: &Decimal, config: &PrecisionConfig) -> (usize, Decimal) {
        if *t < config.epsilon {
            return (0, Decimal::zero());
        }

        let insertion = self.switch_points.partition_point(|s| s < t);
        // A time within tolerance past the final switch point still lands on
        // the last ramp.
        let index = (insertion - 1).min(self.ramps.len() - 1);
        let remainder = t - &self.switch_points[index];
        (index, remainder)
    }

    fn check_time(&self, t: &Decimal, config: &PrecisionConfig) -> Result<()> {
        if self.ramps.is_empty()
            || *t <= -&config.epsilon
            || *t >= &self.duration + &config.epsilon
        {
            return Err(CurveError::TimeOutOfRange {
                time: t.to_string(),
                duration: self.duration.to_string(),
            });
        }
        Ok(())
    }

    /// Position at curve time `t`.
    pub fn eval_pos(&self, t: impl IntoDecimal, config: &PrecisionConfig) -> Result<Decimal> {
        let t = t.into_decimal()?;
        self.check_time(&t, config)?;

        let (index, remainder) = self.ramp_index_at(&t, config);
        self.ramps[index].eval_pos(remainder, config)
    }

    /// Velocity at curve time `t`.
    pub fn eval_vel(&self, t: impl IntoDecimal, config: &PrecisionConfig) -> Result<Decimal> {
        let t = t.into_decimal()?;
        self.check_time(&t, config)?;

        let (index, remainder) = self.ramp_index_at(&t, config);
        self.ramps[index].eval_vel(remainder, config)
    }

    /// Acceleration at curve time `t`.
    pub fn eval_acc(&self, t: impl IntoDecimal, config: &PrecisionConfig) -> Result<Decimal> {
        let t = t.into_decimal()?;
        self.check_time(&t, config)?;

        let (index, remainder) = self.ramp_index_at(&t, config);
        self.ramps[index].eval_acc(remainder, config)
    }

    /// Shorten the curve by `delta_t`, taking the time out of the last ramp.
    ///
    /// Succeeds as a no-op when `delta_t` is negligible. Fails without
    /// mutating when `delta_t` exceeds the total duration, or when it reaches
    /// the last ramp's duration: trimming across more than one ramp is a
    /// documented limitation, callers only ever trim away precision drift.
    pub fn trim(&mut self, delta_t: impl IntoDecimal, config: &PrecisionConfig) -> Result<()> {
        let delta_t = delta_t.into_decimal()?;
        if delta_t > self.duration {
            return Err(CurveError::UntrimmableCurve {
                delta: delta_t.to_string(),
                duration: self.duration.to_string(),
            });
        }
        if config.is_negligible(&delta_t) {
            return Ok(());
        }

        let last_index = match self.ramps.len().checked_sub(1) {
            Some(index) if delta_t < *self.ramps[index].duration() => index,
            _ => {
                return Err(CurveError::UntrimmableCurve {
                    delta: delta_t.to_string(),
                    duration: self.duration.to_string(),
                })
            }
        };

        let new_duration = self.ramps[last_index].duration() - &delta_t;
        self.ramps[last_index].update_duration(new_duration, config)?;

        // Re-derive the shortened totals and the final switch point.
        self.duration = &self.duration - &delta_t;
        let displacements: Vec<&Decimal> = self.ramps.iter().map(|ramp| ramp.d()).collect();
        self.d = math::sum(&displacements, config.working_digits);
        if let Some(last) = self.switch_points.last_mut() {
            *last = self.duration.clone();
        }

        trace!("trimmed {} off the last ramp, duration now {}", delta_t, self.duration);
        Ok(())
    }
}

impl Index<usize> for ParabolicCurve {
    type Output = Ramp;

    fn index(&self, index: usize) -> &Ramp {
        &self.ramps[index]
    }
}
