//! Line based point lists: one `x,y` pair per line.
//!
//! The coordinates of a line may be separated by commas, semicolons or any
//! whitespace, in any mix. Blank lines are ignored.

use itertools::Itertools;

use crate::engine::Point;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: invalid format, use \"x,y\"")]
    Format { line: usize },
    #[error("line {line}: non-numeric value")]
    NotNumeric { line: usize },
}

impl ParseError {
    /// 1-based line of the input the error points at.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Format { line } | ParseError::NotNumeric { line } => *line,
        }
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

/// Parses one point per non-blank line.
///
/// Line numbers in errors count only the non-blank lines, the same numbering
/// the text gets after [`normalize_csv`].
pub fn parse_points(text: &str) -> Result<Vec<Point>, ParseError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| parse_line(i + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<Point, ParseError> {
    let tokens = line
        .split(is_separator)
        .filter(|token| !token.is_empty())
        .collect_vec();
    let [x, y] = tokens.as_slice() else {
        return Err(ParseError::Format { line: line_no });
    };
    match (parse_coordinate(x), parse_coordinate(y)) {
        (Some(x), Some(y)) => Ok(Point::new(x, y)),
        _ => Err(ParseError::NotNumeric { line: line_no }),
    }
}

fn parse_coordinate(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Trims every line of an uploaded file and drops the blank ones.
pub fn normalize_csv(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join("\n")
}

/// Writes `points` in the format read by [`parse_points`].
pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x, point.y))
        .join("\n")
}
