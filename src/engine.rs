use serde::{Deserialize, Serialize};

/// Below this the x values are treated as having no variance.
pub const DEGENERACY_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegressionError {
    #[error("at least 2 points are required, got {0}")]
    InsufficientData(usize),
    #[error("point {position}: coordinates must be finite numbers")]
    InvalidValue { position: usize },
    #[error("cannot compute the slope: variance of x is approximately zero (identical x values)")]
    DegenerateInput,
    #[error("coordinates are too large, the sums overflowed")]
    Overflow,
}

/// Least squares fit `y = m * x + b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub m: f64,
    pub b: f64,
    /// coefficient of determination, floored at 0
    pub r2: f64,
    pub n: usize,
}

impl RegressionResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.m * x + self.b
    }

    /// `y = 2.0000x - 1.0000`, the sign of the intercept goes into the operator.
    pub fn equation(&self) -> String {
        let sign = if self.b >= 0.0 { '+' } else { '-' };
        format!("y = {:.4}x {} {:.4}", self.m, sign, self.b.abs())
    }
}

#[derive(Default)]
struct Sums {
    x: f64,
    y: f64,
    xy: f64,
    x2: f64,
}

impl Sums {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.xy.is_finite() && self.x2.is_finite()
    }
}

/// Fits a line through `points` with the closed form normal equations.
///
/// Checks are made in order: point count, finiteness of every coordinate,
/// then the variance of x. Nothing is computed before all of them pass.
pub fn linear_regression(points: &[Point]) -> Result<RegressionResult, RegressionError> {
    let n = points.len();
    if n < 2 {
        return Err(RegressionError::InsufficientData(n));
    }
    if let Some(position) = points.iter().position(|p| !p.is_finite()) {
        return Err(RegressionError::InvalidValue {
            position: position + 1,
        });
    }

    let sums = points.iter().fold(Sums::default(), |acc, p| Sums {
        x: acc.x + p.x,
        y: acc.y + p.y,
        xy: acc.xy + p.x * p.y,
        x2: acc.x2 + p.x * p.x,
    });
    if !sums.is_finite() {
        return Err(RegressionError::Overflow);
    }

    let n_f = n as f64;
    let numerator = n_f * sums.xy - sums.x * sums.y;
    let denominator = n_f * sums.x2 - sums.x * sums.x;
    if !numerator.is_finite() || !denominator.is_finite() {
        return Err(RegressionError::Overflow);
    }
    if denominator.abs() < DEGENERACY_EPSILON {
        return Err(RegressionError::DegenerateInput);
    }

    let m = numerator / denominator;
    let b = (sums.y - m * sums.x) / n_f;

    let mean_y = sums.y / n_f;
    let ss_tot = points
        .iter()
        .fold(0.0, |acc, p| acc + (p.y - mean_y).powi(2));
    let ss_res = points
        .iter()
        .fold(0.0, |acc, p| acc + (p.y - (m * p.x + b)).powi(2));
    // `max` below would turn a NaN ratio into a silent 0
    if !(ss_tot.is_finite() && ss_res.is_finite()) {
        return Err(RegressionError::Overflow);
    }
    let r2 = if ss_tot == 0.0 {
        1.0
    } else {
        (1.0 - ss_res / ss_tot).max(0.0)
    };

    if !(m.is_finite() && b.is_finite() && r2.is_finite()) {
        return Err(RegressionError::Overflow);
    }
    Ok(RegressionResult { m, b, r2, n })
}
