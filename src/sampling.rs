//! Uniform-grid sampling of curves for external plotting and comparison.

use bigdecimal::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::config::PrecisionConfig;
use crate::curve::ParabolicCurve;
use crate::curve_nd::ParabolicCurvesNd;
use crate::error::CurveError;
use crate::math::{Decimal, IntoDecimal};
use crate::Result;

/// Pre-sampled kinematic columns for one degree of freedom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledDof {
    pub positions: Vec<Decimal>,
    pub velocities: Vec<Decimal>,
    pub accelerations: Vec<Decimal>,
}

/// A trajectory sampled on a uniform time grid.
///
/// The grid steps from zero by `time_step`; when it does not land on the
/// total duration exactly, the final instant is appended so consumers always
/// see the endpoint state. Values stay at full precision; serialization
/// renders them as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledProfile {
    pub duration: Decimal,
    pub time_step: Decimal,
    pub times: Vec<Decimal>,
    pub dofs: Vec<SampledDof>,
    pub switch_points: Vec<Decimal>,
}

/// Summary of a sampled profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStatistics {
    pub dof_count: usize,
    pub sample_count: usize,
    pub duration_seconds: f64,
}

impl SampledProfile {
    /// Sample a single-DOF curve.
    pub fn from_curve(
        curve: &ParabolicCurve,
        time_step: impl IntoDecimal,
        config: &PrecisionConfig,
    ) -> Result<Self> {
        let time_step = checked_step(time_step)?;
        let times = time_grid(curve.duration(), &time_step);
        let dof = sample_dof(curve, &times, config)?;

        Ok(Self {
            duration: curve.duration().clone(),
            time_step,
            times,
            dofs: vec![dof],
            switch_points: curve.switch_points().to_vec(),
        })
    }

    /// Sample every DOF of a trajectory on one shared grid.
    pub fn from_trajectory(
        trajectory: &ParabolicCurvesNd,
        time_step: impl IntoDecimal,
        config: &PrecisionConfig,
    ) -> Result<Self> {
        let time_step = checked_step(time_step)?;
        let times = time_grid(trajectory.duration(), &time_step);
        let dofs = trajectory
            .curves()
            .iter()
            .map(|curve| sample_dof(curve, &times, config))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            duration: trajectory.duration().clone(),
            time_step,
            times,
            dofs,
            switch_points: trajectory.switch_points().to_vec(),
        })
    }

    /// Export to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(CurveError::from)
    }

    /// Import from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(CurveError::from)
    }

    /// Get statistics about the sampled data.
    pub fn statistics(&self) -> SampleStatistics {
        SampleStatistics {
            dof_count: self.dofs.len(),
            sample_count: self.times.len(),
            duration_seconds: self.duration.to_f64().unwrap_or(f64::INFINITY),
        }
    }
}

fn checked_step(time_step: impl IntoDecimal) -> Result<Decimal> {
    let time_step = time_step.into_decimal()?;
    if time_step <= Decimal::zero() {
        return Err(CurveError::InvalidScalar {
            reason: format!("time step must be positive, got {}", time_step),
        });
    }
    Ok(time_step)
}

/// Grid 0, dt, 2dt, ... ending exactly at `duration`.
fn time_grid(duration: &Decimal, time_step: &Decimal) -> Vec<Decimal> {
    let mut times = Vec::new();
    let mut t = Decimal::zero();
    while &t < duration {
        times.push(t.clone());
        t = &t + time_step;
    }
    times.push(duration.clone());
    times
}

fn sample_dof(
    curve: &ParabolicCurve,
    times: &[Decimal],
    config: &PrecisionConfig,
) -> Result<SampledDof> {
    let mut positions = Vec::with_capacity(times.len());
    let mut velocities = Vec::with_capacity(times.len());
    let mut accelerations = Vec::with_capacity(times.len());
    for t in times {
        positions.push(curve.eval_pos(t.clone(), config)?);
        velocities.push(curve.eval_vel(t.clone(), config)?);
        accelerations.push(curve.eval_acc(t.clone(), config)?);
    }
    Ok(SampledDof {
        positions,
        velocities,
        accelerations,
    })
}
