//! Linear regression by normal equations

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{CoursecastError, Result};
use crate::model::Regressor;

/// Cholesky factor of a symmetric positive-definite matrix, lower
/// triangular. `None` when the matrix is not positive definite.
fn cholesky(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let mut l = Array2::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    Some(l)
}

/// Solve `A x = b` for symmetric positive-definite `A` via Cholesky.
/// Retries once with a small diagonal ridge when `A` is near-singular.
fn solve_spd(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return None;
    }

    let l = match cholesky(a) {
        Some(l) => l,
        None => {
            let mut regularized = a.clone();
            let ridge = 1e-8 * a.diag().iter().map(|v| v.abs()).sum::<f64>() / n as f64;
            for k in 0..n {
                regularized[[k, k]] += ridge;
            }
            cholesky(&regularized)?
        }
    };

    // Forward substitution: L y = b
    let mut y = Array1::zeros(n);
    for i in 0..n {
        let sum: f64 = (0..i).map(|j| l[[i, j]] * y[j]).sum();
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T x = y
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let sum: f64 = (i + 1..n).map(|j| l[[j, i]] * x[j]).sum();
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Some(x)
}

/// Gauss-Jordan inverse, the fallback for systems Cholesky rejects.
fn gauss_jordan_inverse(m: &Array2<f64>) -> Option<Array2<f64>> {
    let n = m.nrows();
    if n != m.ncols() {
        return None;
    }

    let mut aug = Array2::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = m[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        let mut pivot_row = col;
        for row in col + 1..n {
            if aug[[row, col]].abs() > aug[[pivot_row, col]].abs() {
                pivot_row = row;
            }
        }
        if pivot_row != col {
            for j in 0..2 * n {
                aug.swap([col, j], [pivot_row, j]);
            }
        }

        if aug[[col, col]].abs() < 1e-10 {
            return None;
        }

        let pivot = aug[[col, col]];
        for j in 0..2 * n {
            aug[[col, j]] /= pivot;
        }
        for row in 0..n {
            if row != col {
                let factor = aug[[row, col]];
                for j in 0..2 * n {
                    aug[[row, j]] -= factor * aug[[col, j]];
                }
            }
        }
    }

    let mut inv = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inv[[i, j]] = aug[[i, n + j]];
        }
    }
    Some(inv)
}

/// Solve `(X^T X + alpha I) w = X^T y`, Cholesky first, Gauss-Jordan as
/// the fallback. Intercepts are handled by centering before the solve.
fn fit_normal_equations(
    x: &Array2<f64>,
    y: &Array1<f64>,
    fit_intercept: bool,
    alpha: f64,
) -> Result<(Array1<f64>, f64)> {
    if x.nrows() != y.len() {
        return Err(CoursecastError::ShapeError {
            expected: format!("{} targets", x.nrows()),
            actual: format!("{} targets", y.len()),
        });
    }

    let (x_work, y_work, x_mean, y_mean) = if fit_intercept {
        let x_mean = x.mean_axis(Axis(0)).ok_or_else(|| {
            CoursecastError::ValidationError("cannot fit on an empty matrix".to_string())
        })?;
        let y_mean = y.mean().unwrap_or(0.0);
        let x_centered = x - &x_mean.clone().insert_axis(Axis(0));
        (x_centered, y - y_mean, Some(x_mean), y_mean)
    } else {
        (x.clone(), y.clone(), None, 0.0)
    };

    let mut xtx = x_work.t().dot(&x_work);
    if alpha > 0.0 {
        for i in 0..xtx.nrows() {
            xtx[[i, i]] += alpha;
        }
    }
    let xty = x_work.t().dot(&y_work);

    let coefficients = match solve_spd(&xtx, &xty) {
        Some(w) => w,
        None => gauss_jordan_inverse(&xtx)
            .map(|inv| inv.dot(&xty))
            .ok_or_else(|| {
                CoursecastError::ComputationError(
                    "normal equations are singular".to_string(),
                )
            })?,
    };

    let intercept = match x_mean {
        Some(x_mean) => y_mean - coefficients.dot(&x_mean),
        None => 0.0,
    };

    Ok((coefficients, intercept))
}

fn predict_linear(
    x: &Array2<f64>,
    coefficients: &Option<Array1<f64>>,
    intercept: f64,
) -> Result<Array1<f64>> {
    let coefficients = coefficients.as_ref().ok_or(CoursecastError::ModelNotFitted)?;
    if x.ncols() != coefficients.len() {
        return Err(CoursecastError::ShapeError {
            expected: format!("{} columns", coefficients.len()),
            actual: format!("{} columns", x.ncols()),
        });
    }
    Ok(x.dot(coefficients) + intercept)
}

/// Ordinary least squares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Option<Array1<f64>>,
    intercept: f64,
    fit_intercept: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: 0.0,
            fit_intercept: true,
        }
    }

    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let (coefficients, intercept) = fit_normal_equations(x, y, self.fit_intercept, 0.0)?;
        self.coefficients = Some(coefficients);
        self.intercept = intercept;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        predict_linear(x, &self.coefficients, self.intercept)
    }
}

/// L2-regularized least squares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidgeRegression {
    alpha: f64,
    coefficients: Option<Array1<f64>>,
    intercept: f64,
    fit_intercept: bool,
}

impl RidgeRegression {
    /// `alpha` is the L2 penalty strength; 0 degenerates to OLS.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: alpha.max(0.0),
            coefficients: None,
            intercept: 0.0,
            fit_intercept: true,
        }
    }

    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }
}

impl Regressor for RidgeRegression {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let (coefficients, intercept) =
            fit_normal_equations(x, y, self.fit_intercept, self.alpha)?;
        self.coefficients = Some(coefficients);
        self.intercept = intercept;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        predict_linear(x, &self.coefficients, self.intercept)
    }
}
