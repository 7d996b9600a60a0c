//! Adaptive simulation engine
//!
//! Advances the coupled plant state and parameter estimate one fixed
//! timestep at a time using explicit forward Euler integration.

use nalgebra::{DMatrix, Vector2};

use crate::matrix::{self, ShapeError};
use crate::model::PlantModel;

/// One recorded simulation sample: the first state component at a point
/// in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

/// Adaptive state-feedback simulation engine.
///
/// Owns the mutable simulation state: the plant state `x` and the
/// parameter estimate `gamma_hat`, both 2x1 columns. Each [`step`] reads
/// only the values present at entry, computes the control input and both
/// derivative vectors, then commits a forward-Euler update of both vectors
/// with the same timestep.
///
/// The engine has no notion of a horizon; it advances for as long as the
/// caller keeps stepping it. Horizon enforcement belongs to the driver.
///
/// # Example
///
/// ```ignore
/// let model = PlantModel::new(&config)?;
/// let mut engine = AdaptiveEngine::new(model, config.x0, config.gamma_hat0);
///
/// let sample = engine.step(config.dt)?;
/// println!("t={}, position={}", sample.time, sample.value);
/// ```
///
/// [`step`]: AdaptiveEngine::step
#[derive(Debug, Clone)]
pub struct AdaptiveEngine {
    model: PlantModel,

    /// Plant state [position, velocity] (2x1)
    x: DMatrix<f64>,
    /// Adaptive estimate of the true parameter vector (2x1)
    gamma_hat: DMatrix<f64>,
    /// Current simulation time
    time: f64,

    // Initial conditions for reset()
    initial_x: DMatrix<f64>,
    initial_gamma_hat: DMatrix<f64>,
}

impl AdaptiveEngine {
    /// Create an engine at `t = 0` with the given initial conditions.
    pub fn new(model: PlantModel, x0: Vector2<f64>, gamma_hat0: Vector2<f64>) -> Self {
        let x = DMatrix::from_column_slice(2, 1, x0.as_slice());
        let gamma_hat = DMatrix::from_column_slice(2, 1, gamma_hat0.as_slice());

        Self {
            model,
            initial_x: x.clone(),
            initial_gamma_hat: gamma_hat.clone(),
            x,
            gamma_hat,
            time: 0.0,
        }
    }

    /// Advance the coupled state by one timestep.
    ///
    /// Computes, in order and from the pre-step state only:
    ///
    /// 1. the stabilizing input `u = K·x − γ̂ᵀ·x`,
    /// 2. the plant derivative `ẋ = A·x + B·(γᵀ·x) + B·u`, with the
    ///    true-parameter coupling formed as the chain product `B·γᵀ·x`,
    /// 3. the adaptation derivative `γ̂̇ = x·Bᵀ·P·x`, the unprojected
    ///    Lyapunov update direction (sustained large states can drive the
    ///    estimate without bound; that is accepted behavior here).
    ///
    /// Both vectors are then integrated with the same `dt`, and the
    /// updated first state component is emitted with the step's entry
    /// time. The engine clock advances by exactly `dt`.
    ///
    /// Fails with [`ShapeError`] only if the fixed matrices were corrupted
    /// through [`model_mut`]; the state is left untouched in that case.
    ///
    /// [`model_mut`]: AdaptiveEngine::model_mut
    pub fn step(&mut self, dt: f64) -> Result<Sample, ShapeError> {
        let model = &self.model;

        let u = self.stabilizing_input()?;

        // ẋ = A·x + B·(γᵀ·x) + B·u
        let ax = matrix::multiply(&model.A, &self.x)?;
        let gamma_t = matrix::transpose(&model.gamma);
        let coupling = matrix::chain_product(&[&model.B, &gamma_t, &self.x])?;
        let forcing = matrix::multiply(&model.B, &u)?;
        let dot_x = matrix::add(&matrix::add(&ax, &coupling)?, &forcing)?;

        // γ̂̇ = x·Bᵀ·P·x
        let b_t = matrix::transpose(&model.B);
        let dot_gamma_hat = matrix::chain_product(&[&self.x, &b_t, &model.P, &self.x])?;

        // Forward Euler, same dt for both vectors; nothing is committed
        // until both updates exist.
        let next_x = matrix::add(&self.x, &matrix::scale(dt, &dot_x))?;
        let next_gamma_hat = matrix::add(&self.gamma_hat, &matrix::scale(dt, &dot_gamma_hat))?;

        self.x = next_x;
        self.gamma_hat = next_gamma_hat;

        let sample = Sample {
            time: self.time,
            value: self.x[(0, 0)],
        };
        self.time += dt;

        Ok(sample)
    }

    /// Control input `u = K·x − γ̂ᵀ·x` for the current state.
    pub fn control_input(&self) -> Result<f64, ShapeError> {
        Ok(self.stabilizing_input()?[(0, 0)])
    }

    // Both terms are 1x1; the difference is the scalar control input.
    fn stabilizing_input(&self) -> Result<DMatrix<f64>, ShapeError> {
        let feedback = matrix::multiply(&self.model.K, &self.x)?;
        let estimate_t = matrix::transpose(&self.gamma_hat);
        let correction = matrix::multiply(&estimate_t, &self.x)?;
        matrix::subtract(&feedback, &correction)
    }

    /// Current plant state (2x1).
    pub fn state(&self) -> &DMatrix<f64> {
        &self.x
    }

    /// Current parameter estimate (2x1).
    pub fn gamma_hat(&self) -> &DMatrix<f64> {
        &self.gamma_hat
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The fixed plant and controller constants.
    pub fn model(&self) -> &PlantModel {
        &self.model
    }

    /// Mutable access to the fixed constants (use with caution).
    ///
    /// Corrupting a matrix shape here makes the next [`step`] fail
    /// without mutating the simulation state.
    ///
    /// [`step`]: AdaptiveEngine::step
    pub fn model_mut(&mut self) -> &mut PlantModel {
        &mut self.model
    }

    /// Reset to the initial conditions at `t = 0`.
    pub fn reset(&mut self) {
        self.x = self.initial_x.clone();
        self.gamma_hat = self.initial_gamma_hat.clone();
        self.time = 0.0;
    }
}
