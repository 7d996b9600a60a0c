//! Plant and controller constants
//!
//! Uses standard control notation (uppercase for matrices: A, B, K, P)

#![allow(non_snake_case)]

use nalgebra::{DMatrix, Vector2};
use thiserror::Error;

/// Configuration errors, raised before any simulation step runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("mass must be non-zero")]
    ZeroMass,

    #[error("{name} must be {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    WrongShape {
        name: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("timestep must be positive, got {0}")]
    NonPositiveTimestep(f64),

    #[error("horizon must be non-negative, got {0}")]
    NegativeHorizon(f64),
}

/// Full construction surface for a simulation run.
///
/// Every value is fixed at start; there is no interactive control while a
/// run is in progress.
///
/// # Example
///
/// ```ignore
/// // Mass-spring-damper plant under the reference gain and Lyapunov pair
/// let config = SimConfig {
///     A: DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]),
///     B: DMatrix::from_row_slice(2, 1, &[0.0, 1.0]),
///     K: DMatrix::from_row_slice(1, 2, &[-2.0, -2.0]),
///     P: DMatrix::from_row_slice(2, 2, &[1.25, 0.25, 0.25, 0.375]),
///     m: 1.0,
///     c: 2.0,
///     k: 3.0,
///     x0: Vector2::new(0.0, 5.0),
///     gamma_hat0: Vector2::zeros(),
///     dt: 1e-4,
///     t_final: 50.0,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Open-loop state matrix (2x2)
    pub A: DMatrix<f64>,
    /// Input matrix (2x1)
    pub B: DMatrix<f64>,
    /// State-feedback gain (1x2)
    pub K: DMatrix<f64>,
    /// Lyapunov solution matrix (2x2, symmetric positive-definite, paired
    /// with `A + B*K`; the pairing is the caller's responsibility and is
    /// not verified here)
    pub P: DMatrix<f64>,
    /// Plant mass (non-zero)
    pub m: f64,
    /// Plant damping
    pub c: f64,
    /// Plant stiffness
    pub k: f64,
    /// Initial plant state [position, velocity]
    pub x0: Vector2<f64>,
    /// Initial parameter estimate
    pub gamma_hat0: Vector2<f64>,
    /// Fixed integration timestep
    pub dt: f64,
    /// Simulation horizon
    pub t_final: f64,
}

/// Fixed plant and controller constants.
///
/// Holds the system matrices, the plant scalars, and the derived true
/// parameter vector `gamma = [k/m, c/m]ᵀ`, which the plant dynamics use
/// but the control law does not know. Stateless with respect to the
/// simulation loop; nothing here changes after construction.
#[derive(Debug, Clone)]
pub struct PlantModel {
    /// Open-loop state matrix (2x2)
    pub A: DMatrix<f64>,
    /// Input matrix (2x1)
    pub B: DMatrix<f64>,
    /// State-feedback gain (1x2)
    pub K: DMatrix<f64>,
    /// Lyapunov solution matrix (2x2)
    pub P: DMatrix<f64>,
    /// True parameter vector `[k/m, c/m]ᵀ` (2x1)
    pub gamma: DMatrix<f64>,
    pub m: f64,
    pub c: f64,
    pub k: f64,
}

impl PlantModel {
    /// Validate the fixed constants and derive `gamma`.
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        if config.m == 0.0 {
            return Err(ConfigError::ZeroMass);
        }
        check_shape("A", &config.A, 2, 2)?;
        check_shape("B", &config.B, 2, 1)?;
        check_shape("K", &config.K, 1, 2)?;
        check_shape("P", &config.P, 2, 2)?;

        let gamma =
            DMatrix::from_column_slice(2, 1, &[config.k / config.m, config.c / config.m]);

        Ok(Self {
            A: config.A.clone(),
            B: config.B.clone(),
            K: config.K.clone(),
            P: config.P.clone(),
            gamma,
            m: config.m,
            c: config.c,
            k: config.k,
        })
    }
}

fn check_shape(
    name: &'static str,
    matrix: &DMatrix<f64>,
    rows: usize,
    cols: usize,
) -> Result<(), ConfigError> {
    if matrix.shape() != (rows, cols) {
        return Err(ConfigError::WrongShape {
            name,
            expected_rows: rows,
            expected_cols: cols,
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        });
    }
    Ok(())
}
