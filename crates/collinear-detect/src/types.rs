//! Shared types for collinear point detection.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detector::DetectorKind;
use crate::slope::{Slope, SlopeOrder};

/// A 2D point with integer coordinates.
///
/// Points are ordered by `y` first and `x` second (the "natural order"
/// used throughout this crate). Two points are duplicates when both
/// coordinates match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Slope of the line through `self` and `other`.
    ///
    /// The result is symmetric: `p.slope_to(q) == q.slope_to(p)`.
    /// A point's slope to itself is [`Slope::Degenerate`].
    #[must_use]
    pub fn slope_to(self, other: Self) -> Slope {
        Slope::between(self, other)
    }

    /// Ordering of other points by the slope they make with `self`.
    #[must_use]
    pub const fn slope_order(self) -> SlopeOrder {
        SlopeOrder::new(self)
    }

    /// Returns `true` if `self`, `a` and `b` lie on one straight line.
    ///
    /// Exact integer test: the cross product of `a - self` and
    /// `b - self` is zero.
    #[must_use]
    pub fn is_collinear_with(self, a: Self, b: Self) -> bool {
        let ax = i64::from(a.x) - i64::from(self.x);
        let ay = i64::from(a.y) - i64::from(self.y);
        let bx = i64::from(b.x) - i64::from(self.x);
        let by = i64::from(b.y) - i64::from(self.y);
        i128::from(ax) * i128::from(by) == i128::from(ay) * i128::from(bx)
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A maximal collinear run, represented by its two extreme points.
///
/// `start` is never greater than `end` under the natural point order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineSegment {
    /// Smallest point of the run.
    pub start: Point,
    /// Largest point of the run.
    pub end: Point,
}

impl LineSegment {
    /// Create a segment between two points, swapping them if necessary
    /// so that `start <= end`.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    /// Returns `true` if `point` lies on the infinite line through this
    /// segment's endpoints.
    #[must_use]
    pub fn supports(&self, point: Point) -> bool {
        self.start.is_collinear_with(self.end, point)
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Segments found by one detector run.
///
/// Segment order is the order in which the detector emitted them; it is
/// deterministic for a given point set and detector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    segments: Vec<LineSegment>,
}

impl Detection {
    /// Wrap a list of emitted segments.
    #[must_use]
    pub const fn new(segments: Vec<LineSegment>) -> Self {
        Self { segments }
    }

    /// Number of segments found.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if no segment was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a slice of all segments.
    #[must_use]
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Consumes the detection and returns the underlying segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<LineSegment> {
        self.segments
    }
}

/// Configuration for a detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Which detection algorithm to run.
    pub detector: DetectorKind,
}

/// Errors that reject a point collection as malformed input.
///
/// None of these is recoverable for the call that raised it: no partial
/// result is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum DetectError {
    /// The point collection itself is absent.
    #[error("point collection is missing")]
    MissingCollection,

    /// An individual point in the collection is absent.
    #[error("point at index {index} is missing")]
    MissingPoint {
        /// Position of the absent point in the input.
        index: usize,
    },

    /// Two input points share both coordinates.
    #[error("duplicate point {point}")]
    DuplicatePoint {
        /// The repeated coordinate pair.
        point: Point,
    },
}

/// Resolve a nullable point collection into concrete points.
///
/// Used for sources that can encode absence, such as JSON `null`.
///
/// # Errors
///
/// Returns [`DetectError::MissingCollection`] if `points` is `None`, or
/// [`DetectError::MissingPoint`] for the first absent element.
pub fn require_points(points: Option<&[Option<Point>]>) -> Result<Vec<Point>, DetectError> {
    let points = points.ok_or(DetectError::MissingCollection)?;
    points
        .iter()
        .enumerate()
        .map(|(index, p)| p.ok_or(DetectError::MissingPoint { index }))
        .collect()
}
