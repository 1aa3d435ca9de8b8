//! Parsing point sets from in-memory text.
//!
//! Two formats are accepted:
//!
//! - **Text**: a point count `N` followed by `N` pairs of integers
//!   `x y`, separated by any whitespace.
//! - **JSON**: an array of `{"x": .., "y": ..}` objects. A `null`
//!   document or element is reported through [`DetectError`] the same way
//!   as any other absent input.

use serde::{Deserialize, Serialize};

use crate::types::{DetectError, Point, require_points};

/// Supported point file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputFormat {
    /// Count followed by whitespace-separated coordinate pairs.
    #[default]
    Text,
    /// JSON array of point objects.
    Json,
}

impl InputFormat {
    /// Guess the format from a file extension (`json` selects JSON,
    /// anything else text).
    #[must_use]
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Errors that can occur while parsing a point set.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The input contained no tokens at all.
    #[error("input is empty")]
    Empty,

    /// The leading point count is not a non-negative integer.
    #[error("invalid point count {token:?}")]
    InvalidCount {
        /// The offending token.
        token: String,
    },

    /// A coordinate token is not a 32-bit integer.
    #[error("invalid coordinate {token:?} at token {position}")]
    InvalidCoordinate {
        /// The offending token.
        token: String,
        /// One-based position of the token in the input.
        position: usize,
    },

    /// The last point has an `x` but no `y`.
    #[error("point {index} has no y coordinate")]
    DanglingCoordinate {
        /// Index of the incomplete point.
        index: usize,
    },

    /// The number of pairs differs from the declared count.
    #[error("expected {expected} points, found {found}")]
    CountMismatch {
        /// Count declared on the first line.
        expected: usize,
        /// Pairs actually present.
        found: usize,
    },

    /// The JSON document is malformed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The point collection or one of its elements is absent.
    #[error(transparent)]
    Points(#[from] DetectError),
}

/// Parse a point set in the given format.
///
/// # Errors
///
/// See [`parse_text`] and [`parse_json`].
pub fn parse(input: &str, format: InputFormat) -> Result<Vec<Point>, InputError> {
    match format {
        InputFormat::Text => parse_text(input),
        InputFormat::Json => parse_json(input),
    }
}

/// Parse the count-then-pairs text format.
///
/// # Errors
///
/// Returns [`InputError::Empty`] for blank input,
/// [`InputError::InvalidCount`] or [`InputError::InvalidCoordinate`]
/// for unparsable tokens, [`InputError::DanglingCoordinate`] for an odd
/// number of coordinates and [`InputError::CountMismatch`] when the
/// number of pairs differs from the declared count.
pub fn parse_text(input: &str) -> Result<Vec<Point>, InputError> {
    let mut tokens = input.split_whitespace();
    let count_token = tokens.next().ok_or(InputError::Empty)?;
    let expected: usize = count_token
        .parse()
        .map_err(|_| InputError::InvalidCount {
            token: count_token.to_string(),
        })?;

    let coords = tokens
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<i32>()
                .map_err(|_| InputError::InvalidCoordinate {
                    token: token.to_string(),
                    position: i + 2,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut pairs = coords.chunks_exact(2);
    let points: Vec<Point> = pairs
        .by_ref()
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect();
    if !pairs.remainder().is_empty() {
        return Err(InputError::DanglingCoordinate {
            index: points.len(),
        });
    }
    if points.len() != expected {
        return Err(InputError::CountMismatch {
            expected,
            found: points.len(),
        });
    }
    Ok(points)
}

/// Parse a JSON array of points.
///
/// # Errors
///
/// Returns [`InputError::Json`] for malformed JSON and
/// [`InputError::Points`] wrapping [`DetectError::MissingCollection`] or
/// [`DetectError::MissingPoint`] for `null` values.
pub fn parse_json(input: &str) -> Result<Vec<Point>, InputError> {
    let raw: Option<Vec<Option<Point>>> = serde_json::from_str(input)?;
    Ok(require_points(raw.as_deref())?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn text_parses_count_and_pairs() {
        let input = "4\n10000 0\n0 10000\n3000 7000\n7000 3000\n";
        let points = parse_text(input).unwrap();
        assert_eq!(
            points,
            vec![
                Point::new(10000, 0),
                Point::new(0, 10000),
                Point::new(3000, 7000),
                Point::new(7000, 3000),
            ],
        );
    }

    #[test]
    fn text_accepts_irregular_whitespace() {
        let points = parse_text("  2 1\t2\n\n -3   4 ").unwrap();
        assert_eq!(points, vec![Point::new(1, 2), Point::new(-3, 4)]);
    }

    #[test]
    fn text_zero_points() {
        assert!(parse_text("0").unwrap().is_empty());
    }

    #[test]
    fn text_empty_input() {
        assert!(matches!(parse_text(" \n "), Err(InputError::Empty)));
    }

    #[test]
    fn text_invalid_count() {
        let err = parse_text("-1 0 0").unwrap_err();
        assert!(matches!(err, InputError::InvalidCount { ref token } if token == "-1"));
    }

    #[test]
    fn text_invalid_coordinate_reports_position() {
        let err = parse_text("2 1 2 x 4").unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidCoordinate { ref token, position: 4 } if token == "x"
        ));
        assert_eq!(err.to_string(), r#"invalid coordinate "x" at token 4"#);
    }

    #[test]
    fn text_coordinate_out_of_range() {
        let err = parse_text("1 0 3000000000").unwrap_err();
        assert!(matches!(err, InputError::InvalidCoordinate { position: 3, .. }));
    }

    #[test]
    fn text_dangling_coordinate() {
        let err = parse_text("2 1 2 3").unwrap_err();
        assert!(matches!(err, InputError::DanglingCoordinate { index: 1 }));
    }

    #[test]
    fn text_count_mismatch() {
        let err = parse_text("3 1 2 3 4").unwrap_err();
        assert!(matches!(
            err,
            InputError::CountMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn json_parses_points() {
        let points = parse_json(r#"[{"x": 1, "y": 2}, {"x": -3, "y": 4}]"#).unwrap();
        assert_eq!(points, vec![Point::new(1, 2), Point::new(-3, 4)]);
    }

    #[test]
    fn json_null_document_is_missing_collection() {
        let err = parse_json("null").unwrap_err();
        assert!(matches!(
            err,
            InputError::Points(DetectError::MissingCollection)
        ));
    }

    #[test]
    fn json_null_element_is_missing_point() {
        let err = parse_json(r#"[{"x": 1, "y": 2}, null]"#).unwrap_err();
        assert!(matches!(
            err,
            InputError::Points(DetectError::MissingPoint { index: 1 })
        ));
        assert_eq!(err.to_string(), "point at index 1 is missing");
    }

    #[test]
    fn json_malformed() {
        assert!(matches!(parse_json("[{"), Err(InputError::Json(_))));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_extension(Some("json")), InputFormat::Json);
        assert_eq!(InputFormat::from_extension(Some("JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_extension(Some("txt")), InputFormat::Text);
        assert_eq!(InputFormat::from_extension(None), InputFormat::Text);
    }

    #[test]
    fn parse_dispatches_on_format() {
        assert_eq!(parse("1 5 6", InputFormat::Text).unwrap(), vec![Point::new(5, 6)]);
        assert_eq!(
            parse(r#"[{"x": 5, "y": 6}]"#, InputFormat::Json).unwrap(),
            vec![Point::new(5, 6)],
        );
    }
}
