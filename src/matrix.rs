//! Shape-checked dense matrix operations
//!
//! Thin fallible wrappers over [`nalgebra`] dense matrices. nalgebra panics
//! on a dimension mismatch; the simulation needs a recoverable error
//! instead, so every binary operation here validates operand shapes up
//! front and returns a [`ShapeError`] carrying the offending dimensions.
//!
//! Every operation returns a freshly allocated matrix. An input is never
//! aliased as the output of an operation that reads it.

use nalgebra::DMatrix;
use thiserror::Error;

/// Matrix shape errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("cannot multiply {lhs_rows}x{lhs_cols} by {rhs_rows}x{rhs_cols}")]
    IncompatibleProduct {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    #[error("element-wise operation on {lhs_rows}x{lhs_cols} and {rhs_rows}x{rhs_cols}")]
    DimensionMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    #[error("chain product needs at least 2 factors, got {0}")]
    ChainTooShort(usize),
}

/// Matrix product `x * y`.
///
/// Fails if the column count of `x` does not match the row count of `y`.
pub fn multiply(x: &DMatrix<f64>, y: &DMatrix<f64>) -> Result<DMatrix<f64>, ShapeError> {
    if x.ncols() != y.nrows() {
        return Err(ShapeError::IncompatibleProduct {
            lhs_rows: x.nrows(),
            lhs_cols: x.ncols(),
            rhs_rows: y.nrows(),
            rhs_cols: y.ncols(),
        });
    }
    Ok(x * y)
}

/// Left-to-right product of two or more factors.
///
/// Equivalent to folding [`multiply`] over the slice; fails at the first
/// incompatible adjacent pair.
///
/// # Example
///
/// ```ignore
/// // x·Bᵀ·P·x reduces 2x1 · 1x2 · 2x2 · 2x1 to a 2x1 column
/// let d = chain_product(&[&x, &b_t, &p, &x])?;
/// ```
pub fn chain_product(factors: &[&DMatrix<f64>]) -> Result<DMatrix<f64>, ShapeError> {
    if factors.len() < 2 {
        return Err(ShapeError::ChainTooShort(factors.len()));
    }

    let mut product = multiply(factors[0], factors[1])?;
    for factor in &factors[2..] {
        product = multiply(&product, factor)?;
    }
    Ok(product)
}

/// Transpose of `x`.
pub fn transpose(x: &DMatrix<f64>) -> DMatrix<f64> {
    x.transpose()
}

/// Element-wise sum `x + y`.
pub fn add(x: &DMatrix<f64>, y: &DMatrix<f64>) -> Result<DMatrix<f64>, ShapeError> {
    check_same_shape(x, y)?;
    Ok(x + y)
}

/// Element-wise difference `x - y`.
pub fn subtract(x: &DMatrix<f64>, y: &DMatrix<f64>) -> Result<DMatrix<f64>, ShapeError> {
    check_same_shape(x, y)?;
    Ok(x - y)
}

/// Uniform scaling `s * x`.
pub fn scale(s: f64, x: &DMatrix<f64>) -> DMatrix<f64> {
    x * s
}

fn check_same_shape(x: &DMatrix<f64>, y: &DMatrix<f64>) -> Result<(), ShapeError> {
    if x.shape() != y.shape() {
        return Err(ShapeError::DimensionMismatch {
            lhs_rows: x.nrows(),
            lhs_cols: x.ncols(),
            rhs_rows: y.nrows(),
            rhs_cols: y.ncols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: usize, cols: usize, data: &[f64]) -> DMatrix<f64> {
        DMatrix::from_row_slice(rows, cols, data)
    }

    #[test]
    fn test_multiply() {
        let a = mat(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let x = mat(2, 1, &[5.0, 6.0]);

        let result = multiply(&a, &x).unwrap();
        assert_eq!(result.shape(), (2, 1));
        assert_eq!(result[(0, 0)], 17.0);
        assert_eq!(result[(1, 0)], 39.0);
    }

    #[test]
    fn test_multiply_incompatible() {
        let a = mat(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let b = mat(1, 2, &[1.0, 2.0]);

        let err = multiply(&a, &b).unwrap_err();
        assert_eq!(
            err,
            ShapeError::IncompatibleProduct {
                lhs_rows: 2,
                lhs_cols: 2,
                rhs_rows: 1,
                rhs_cols: 2,
            }
        );
    }

    #[test]
    fn test_chain_product_four_factors() {
        // x·Bᵀ·P·x: 2x1 · 1x2 · 2x2 · 2x1 reduces to a 2x1 column
        let x = mat(2, 1, &[0.0, 5.0]);
        let b_t = mat(1, 2, &[0.0, 1.0]);
        let p = mat(2, 2, &[1.25, 0.25, 0.25, 0.375]);

        let result = chain_product(&[&x, &b_t, &p, &x]).unwrap();
        assert_eq!(result.shape(), (2, 1));
        // x·Bᵀ = [[0,0],[0,5]]; ·P = [[0,0],[1.25,1.875]]; ·x = [0, 9.375]
        assert_eq!(result[(0, 0)], 0.0);
        assert_eq!(result[(1, 0)], 9.375);
    }

    #[test]
    fn test_chain_product_fails_at_first_bad_pair() {
        let a = mat(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let row = mat(1, 2, &[1.0, 2.0]);
        let col = mat(2, 1, &[1.0, 2.0]);

        // a * row is the first incompatible pair; col is never reached
        let err = chain_product(&[&a, &row, &col]).unwrap_err();
        assert!(matches!(err, ShapeError::IncompatibleProduct { lhs_cols: 2, rhs_rows: 1, .. }));
    }

    #[test]
    fn test_chain_product_too_short() {
        let a = mat(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(chain_product(&[&a]).unwrap_err(), ShapeError::ChainTooShort(1));
        assert_eq!(chain_product(&[]).unwrap_err(), ShapeError::ChainTooShort(0));
    }

    #[test]
    fn test_transpose() {
        let b = mat(2, 1, &[0.0, 1.0]);
        let b_t = transpose(&b);
        assert_eq!(b_t.shape(), (1, 2));
        assert_eq!(b_t[(0, 1)], 1.0);
    }

    #[test]
    fn test_add_subtract() {
        let x = mat(2, 1, &[1.0, 2.0]);
        let y = mat(2, 1, &[10.0, 20.0]);

        let sum = add(&x, &y).unwrap();
        assert_eq!(sum[(0, 0)], 11.0);
        assert_eq!(sum[(1, 0)], 22.0);

        let diff = subtract(&x, &y).unwrap();
        assert_eq!(diff[(0, 0)], -9.0);
        assert_eq!(diff[(1, 0)], -18.0);
    }

    #[test]
    fn test_add_shape_mismatch() {
        let x = mat(2, 1, &[1.0, 2.0]);
        let y = mat(1, 2, &[1.0, 2.0]);

        let err = add(&x, &y).unwrap_err();
        assert!(matches!(err, ShapeError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_scale() {
        let x = mat(2, 1, &[1.0, -4.0]);
        let scaled = scale(0.5, &x);
        assert_eq!(scaled[(0, 0)], 0.5);
        assert_eq!(scaled[(1, 0)], -2.0);
    }

    #[test]
    fn test_operations_do_not_mutate_inputs() {
        let x = mat(2, 1, &[1.0, 2.0]);
        let y = mat(2, 1, &[3.0, 4.0]);

        let _ = add(&x, &y).unwrap();
        let _ = scale(10.0, &x);

        assert_eq!(x[(0, 0)], 1.0);
        assert_eq!(y[(1, 0)], 4.0);
    }
}
