//! Simulation driver
//!
//! Wires the plant model, the adaptive engine, and the trajectory
//! recorder, and runs the fixed-horizon loop.

use std::time::{Duration, Instant};

use crate::engine::AdaptiveEngine;
use crate::matrix::ShapeError;
use crate::model::{ConfigError, PlantModel, SimConfig};
use crate::recorder::Trajectory;

/// Summary of a completed run.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    /// Number of samples produced
    pub samples: usize,
    /// Wall-clock time spent in the loop
    pub elapsed: Duration,
}

/// Fixed-horizon simulation: engine, recorder, and time constants.
///
/// # Example
///
/// ```ignore
/// let mut sim = Simulation::new(config)?;
/// let report = sim.run()?;
///
/// println!("{} samples in {:.6} s", report.samples, report.elapsed.as_secs_f64());
/// for sample in sim.trajectory().data() {
///     println!("{},{}", sample.time, sample.value);
/// }
/// ```
#[derive(Debug)]
pub struct Simulation {
    engine: AdaptiveEngine,
    trajectory: Trajectory,
    dt: f64,
    t_final: f64,
}

impl Simulation {
    /// Validate the configuration and assemble a ready-to-run simulation.
    ///
    /// The recorder is pre-sized to `⌈T/dt⌉ + 1` samples: one per
    /// iteration of the `t <= T` loop, including the sample taken for
    /// `t = 0`.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        if !(config.dt > 0.0) {
            return Err(ConfigError::NonPositiveTimestep(config.dt));
        }
        if !(config.t_final >= 0.0) {
            return Err(ConfigError::NegativeHorizon(config.t_final));
        }

        let model = PlantModel::new(&config)?;
        let capacity = (config.t_final / config.dt).ceil() as usize + 1;

        Ok(Self {
            engine: AdaptiveEngine::new(model, config.x0, config.gamma_hat0),
            trajectory: Trajectory::with_capacity(capacity),
            dt: config.dt,
            t_final: config.t_final,
        })
    }

    /// Run the full horizon, recording one sample per step.
    ///
    /// Loops while the engine clock satisfies `t <= T`, with `t`
    /// accumulated in increments of `dt` (so the final sample may drift
    /// off an exact multiple of `dt` when `T` is not one). Returns the
    /// sample count and the wall-clock time measured around the loop.
    ///
    /// A failed step aborts the run immediately; samples recorded before
    /// the failure remain valid and accessible.
    pub fn run(&mut self) -> Result<RunReport, ShapeError> {
        let start = Instant::now();

        while self.engine.time() <= self.t_final {
            let sample = self.engine.step(self.dt)?;
            self.trajectory.record(sample);
        }

        Ok(RunReport {
            samples: self.trajectory.len(),
            elapsed: start.elapsed(),
        })
    }

    /// Recorded trajectory.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// The engine, for inspecting the final state.
    pub fn engine(&self) -> &AdaptiveEngine {
        &self.engine
    }
}
