mod app;
pub mod bounds;
mod chart_module;
pub mod csv;
pub mod engine;
mod input_module;
#[cfg(not(target_arch = "wasm32"))]
pub mod log;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

pub use app::RegressionApp;
pub use bounds::{axis_bounds, fitted_segment, line_segment, Bounds};
pub use csv::{format_points, normalize_csv, parse_points, ParseError};
pub use engine::{linear_regression, Point, RegressionError, RegressionResult};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Regression(#[from] RegressionError),
}

/// Everything needed to display one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub points: Vec<Point>,
    pub fit: RegressionResult,
    pub segment: [Point; 2],
    pub bounds: Bounds,
}

/// Parses `text`, fits a line and lays out the plot window for it.
pub fn calculate(text: &str) -> Result<Calculation, Error> {
    let points = parse_points(text)?;
    let fit = linear_regression(&points)?;
    let segment = fitted_segment(&points, &fit);
    let bounds = axis_bounds(&points, Some(&segment));
    Ok(Calculation {
        points,
        fit,
        segment,
        bounds,
    })
}
