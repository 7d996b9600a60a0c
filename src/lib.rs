//! adaptsim - Adaptive state-feedback control simulation
//!
//! Simulates a second-order linear plant under a Lyapunov-style adaptive
//! state-feedback controller, integrating the coupled plant state and
//! parameter-estimate vectors with fixed-step explicit forward Euler.
//!
//! # Architecture
//!
//! - [`matrix`] - shape-checked dense matrix operations
//! - [`model`] - fixed plant/controller constants and run configuration
//! - [`engine`] - per-step control input, derivatives, and Euler update
//! - [`recorder`] - accumulates the produced (time, value) samples
//! - [`sim`] - fixed-horizon driver loop and wall-clock run report
//!
//! # Example
//!
//! ```rust,ignore
//! use adaptsim::prelude::*;
//! use nalgebra::{DMatrix, Vector2};
//!
//! let config = SimConfig {
//!     A: DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]),
//!     B: DMatrix::from_row_slice(2, 1, &[0.0, 1.0]),
//!     K: DMatrix::from_row_slice(1, 2, &[-2.0, -2.0]),
//!     P: DMatrix::from_row_slice(2, 2, &[1.25, 0.25, 0.25, 0.375]),
//!     m: 1.0,
//!     c: 2.0,
//!     k: 3.0,
//!     x0: Vector2::new(0.0, 5.0),
//!     gamma_hat0: Vector2::zeros(),
//!     dt: 1e-4,
//!     t_final: 50.0,
//! };
//!
//! let mut sim = Simulation::new(config)?;
//! let report = sim.run()?;
//! println!("{} samples in {:.6} s", report.samples, report.elapsed.as_secs_f64());
//! ```

pub mod engine;
pub mod matrix;
pub mod model;
pub mod recorder;
pub mod sim;

pub use engine::{AdaptiveEngine, Sample};
pub use matrix::ShapeError;
pub use model::{ConfigError, PlantModel, SimConfig};
pub use recorder::Trajectory;
pub use sim::{RunReport, Simulation};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{AdaptiveEngine, Sample};
    pub use crate::matrix::ShapeError;
    pub use crate::model::{ConfigError, PlantModel, SimConfig};
    pub use crate::recorder::Trajectory;
    pub use crate::sim::{RunReport, Simulation};
}
