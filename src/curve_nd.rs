//! Multi-DOF trajectories: per-joint curves reconciled onto one time base.

use std::ops::Index;

use bigdecimal::Zero;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PrecisionConfig;
use crate::curve::ParabolicCurve;
use crate::error::CurveError;
use crate::math::{Decimal, IntoDecimal};
use crate::Result;

/// A fixed-size collection of per-DOF curves sharing a single duration and a
/// unified switch-point list.
///
/// Construction reconciles curves that were built independently per DOF:
/// durations may disagree by accumulated precision drift below the tolerance,
/// and every curve is trimmed down to the common minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParabolicCurvesNd {
    curves: Vec<ParabolicCurve>,
    x0_vect: Vec<Decimal>,
    duration: Decimal,
    switch_points: Vec<Decimal>,
}

impl Default for ParabolicCurvesNd {
    fn default() -> Self {
        Self::empty()
    }
}

impl ParabolicCurvesNd {
    /// The empty trajectory: no DOFs, zero duration, append identity.
    pub fn empty() -> Self {
        Self {
            curves: Vec::new(),
            x0_vect: Vec::new(),
            duration: Decimal::zero(),
            switch_points: Vec::new(),
        }
    }

    /// Reconcile independently built per-DOF curves onto one time base.
    ///
    /// Fails with `DurationMismatch` when a curve's duration differs from the
    /// running minimum by at least the tolerance, or when a curve cannot
    /// absorb its trim inside its last ramp.
    pub fn from_curves(curves: Vec<ParabolicCurve>, config: &PrecisionConfig) -> Result<Self> {
        if curves.is_empty() {
            return Ok(Self::empty());
        }

        let mut curves = curves;
        let mut min_duration = curves[0].duration().clone();
        for (index, curve) in curves.iter().enumerate().skip(1) {
            if !config.approx_eq(curve.duration(), &min_duration) {
                return Err(CurveError::DurationMismatch {
                    index,
                    duration: curve.duration().to_string(),
                    expected: min_duration.to_string(),
                });
            }
            if *curve.duration() < min_duration {
                min_duration = curve.duration().clone();
            }
        }

        for (index, curve) in curves.iter_mut().enumerate() {
            let delta_t = curve.duration() - &min_duration;
            curve
                .trim(delta_t, config)
                .map_err(|_| CurveError::DurationMismatch {
                    index,
                    duration: curve.duration().to_string(),
                    expected: min_duration.to_string(),
                })?;
        }

        let x0_vect = curves.iter().map(|curve| curve.x0().clone()).collect();

        // Unified switch points: stable sorted insert of every curve's
        // points, then compaction dropping near-duplicates across DOFs.
        let mut collected = curves[0].switch_points().to_vec();
        for curve in &curves[1..] {
            for point in curve.switch_points() {
                let at = collected.partition_point(|existing| existing < point);
                collected.insert(at, point.clone());
            }
        }
        let mut switch_points: Vec<Decimal> = Vec::with_capacity(collected.len());
        for point in collected {
            let keep = match switch_points.last() {
                Some(last) => &point - last > config.epsilon,
                None => true,
            };
            if keep {
                switch_points.push(point);
            }
        }

        debug!(
            "reconciled {} curve(s) onto duration {}, {} switch point(s)",
            curves.len(),
            min_duration,
            switch_points.len()
        );

        Ok(Self {
            curves,
            x0_vect,
            duration: min_duration,
            switch_points,
        })
    }

    /// Whether this is the empty trajectory.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Number of degrees of freedom.
    #[inline]
    pub fn ndof(&self) -> usize {
        self.curves.len()
    }

    /// The per-DOF curves, in construction order.
    #[inline]
    pub fn curves(&self) -> &[ParabolicCurve] {
        &self.curves
    }

    /// Initial position of every DOF.
    #[inline]
    pub fn x0_vect(&self) -> &[Decimal] {
        &self.x0_vect
    }

    /// Shared duration.
    #[inline]
    pub fn duration(&self) -> &Decimal {
        &self.duration
    }

    /// Unified switch points across all DOFs.
    #[inline]
    pub fn switch_points(&self) -> &[Decimal] {
        &self.switch_points
    }

    /// Concatenate another trajectory after this one, DOF by DOF.
    ///
    /// The incoming unified switch points are shifted by the prior duration
    /// and appended as-is; duplicates across the splice are tolerated.
    pub fn append(&mut self, other: &ParabolicCurvesNd) -> Result<()> {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            *self = other.clone();
            return Ok(());
        }
        if self.ndof() != other.ndof() {
            return Err(CurveError::DofMismatch {
                expected: self.ndof(),
                actual: other.ndof(),
            });
        }

        let prior_duration = self.duration.clone();
        self.duration = &self.duration + &other.duration;
        for (curve, incoming) in self.curves.iter_mut().zip(&other.curves) {
            curve.append(incoming);
        }
        self.switch_points.extend(
            other
                .switch_points
                .iter()
                .map(|point| point + &prior_duration),
        );
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

    /// Position of every DOF at time `t`, index-aligned with construction.
    pub fn eval_pos(&self, t: impl IntoDecimal, config: &PrecisionConfig) -> Result<Vec<Decimal>> {
        let t = t.into_decimal()?;
        self.check_time(&t, config)?;

        self.curves
            .iter()
            .map(|curve| curve.eval_pos(t.clone(), config))
            .collect()
    }

    /// Velocity of every DOF at time `t`.
    pub fn eval_vel(&self, t: impl IntoDecimal, config: &PrecisionConfig) -> Result<Vec<Decimal>> {
        let t = t.into_decimal()?;
        self.check_time(&t, config)?;

        self.curves
            .iter()
            .map(|curve| curve.eval_vel(t.clone(), config))
            .collect()
    }

    /// Acceleration of every DOF at time `t`.
    pub fn eval_acc(&self, t: impl IntoDecimal, config: &PrecisionConfig) -> Result<Vec<Decimal>> {
        let t = t.into_decimal()?;
        self.check_time(&t, config)?;

        self.curves
            .iter()
            .map(|curve| curve.eval_acc(t.clone(), config))
            .collect()
    }
}

impl Index<usize> for ParabolicCurvesNd {
    type Output = ParabolicCurve;

    fn index(&self, index: usize) -> &ParabolicCurve {
        &self.curves[index]
    }
}
