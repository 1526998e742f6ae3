//! Plot window and regression segment for drawing a fit.

use itertools::{Itertools, MinMaxResult};

use crate::engine::{Point, RegressionResult};

/// Axis ranges narrower than this get widened by one unit on each side.
const MIN_AXIS_RANGE: f64 = 1e-6;
const PADDING_FRACTION: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }
}

/// Computes a padded window containing every point and both ends of `line`.
///
/// The result always has `x_max > x_min` and `y_max > y_min`, even when all
/// values on an axis coincide.
pub fn axis_bounds(points: &[Point], line: Option<&[Point; 2]>) -> Bounds {
    let all = || points.iter().chain(line.into_iter().flatten());

    let (x_min, x_max) = match all().map(|p| p.x).minmax() {
        MinMaxResult::NoElements => return Bounds::default(),
        MinMaxResult::OneElement(x) => padded(x, x),
        MinMaxResult::MinMax(min, max) => padded(min, max),
    };
    let (y_min, y_max) = match all().map(|p| p.y).minmax() {
        MinMaxResult::NoElements => return Bounds::default(),
        MinMaxResult::OneElement(y) => padded(y, y),
        MinMaxResult::MinMax(min, max) => padded(min, max),
    };

    Bounds {
        x_min,
        x_max,
        y_min,
        y_max,
    }
}

fn padded(mut min: f64, mut max: f64) -> (f64, f64) {
    if max - min < MIN_AXIS_RANGE {
        min -= 1.0;
        max += 1.0;
    }
    let pad = (max - min) * PADDING_FRACTION;
    (min - pad, max + pad)
}

/// The fitted line between the smallest and largest x of `points`.
pub fn line_segment(points: &[Point], fit: &RegressionResult) -> Option<[Point; 2]> {
    if points.is_empty() {
        return None;
    }
    Some(fitted_segment(points, fit))
}

/// Same as [`line_segment`] for the points `fit` was computed from, which
/// are never empty.
pub fn fitted_segment(points: &[Point], fit: &RegressionResult) -> [Point; 2] {
    let (min_x, max_x) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
            (min.min(p.x), max.max(p.x))
        });
    [
        Point::new(min_x, fit.predict(min_x)),
        Point::new(max_x, fit.predict(max_x)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_unit_box() {
        assert_eq!(axis_bounds(&[], None), Bounds::default());
    }

    #[test]
    fn pads_ten_percent() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 20.0)];
        let bounds = axis_bounds(&points, None);
        assert!((bounds.x_min + 1.0).abs() < 1e-12);
        assert!((bounds.x_max - 11.0).abs() < 1e-12);
        assert!((bounds.y_min + 2.0).abs() < 1e-12);
        assert!((bounds.y_max - 22.0).abs() < 1e-12);
    }

    #[test]
    fn flat_axis_is_widened() {
        let points = [Point::new(2.0, 5.0), Point::new(2.0, 5.0)];
        let bounds = axis_bounds(&points, None);
        // [1, 3] padded by 0.2
        assert!((bounds.x_min - 0.8).abs() < 1e-12);
        assert!((bounds.x_max - 3.2).abs() < 1e-12);
        assert!((bounds.y_min - 3.8).abs() < 1e-12);
        assert!((bounds.y_max - 6.2).abs() < 1e-12);
    }

    #[test]
    fn line_extends_window() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let line = [Point::new(0.0, -4.0), Point::new(1.0, 6.0)];
        let bounds = axis_bounds(&points, Some(&line));
        assert!((bounds.y_min + 5.0).abs() < 1e-12);
        assert!((bounds.y_max - 7.0).abs() < 1e-12);
    }

    #[test]
    fn segment_spans_x_range() {
        let fit = RegressionResult {
            m: 2.0,
            b: 1.0,
            r2: 1.0,
            n: 3,
        };
        let points = [Point::new(3.0, 0.0), Point::new(-1.0, 0.0), Point::new(1.0, 0.0)];
        let [start, end] = line_segment(&points, &fit).unwrap();
        assert_eq!(start, Point::new(-1.0, -1.0));
        assert_eq!(end, Point::new(3.0, 7.0));
    }

    #[test]
    fn fitted_segment_matches_line_segment() {
        let points = [Point::new(0.0, 1.0), Point::new(1.0, 3.0)];
        let fit = crate::engine::linear_regression(&points).unwrap();
        assert_eq!(
            fitted_segment(&points, &fit),
            [Point::new(0.0, 1.0), Point::new(1.0, 3.0)]
        );
        assert_eq!(line_segment(&points, &fit), Some(fitted_segment(&points, &fit)));
    }

    #[test]
    fn no_segment_without_points() {
        let fit = RegressionResult {
            m: 1.0,
            b: 0.0,
            r2: 1.0,
            n: 0,
        };
        assert_eq!(line_segment(&[], &fit), None);
    }
}
