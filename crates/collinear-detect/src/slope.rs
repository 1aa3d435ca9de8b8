//! Exact slopes between integer points and the per-pivot slope ordering.
//!
//! Slopes live on the extended real line: [`Slope::Degenerate`] (a point
//! paired with itself) sorts below every finite slope and
//! [`Slope::Vertical`] sorts above. Finite slopes are kept as an integer
//! ratio and compared by cross multiplication, so equality is exact and
//! no floating-point tolerance is involved.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// A finite slope `rise / run` with `run > 0`.
///
/// The ratio is not reduced; two gradients are equal when their
/// cross products match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Gradient {
    rise: i64,
    run: i64,
}

impl Gradient {
    /// Vertical change.
    #[must_use]
    pub const fn rise(self) -> i64 {
        self.rise
    }

    /// Horizontal change, always positive.
    #[must_use]
    pub const fn run(self) -> i64 {
        self.run
    }

    /// Returns `true` for a horizontal line.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        self.rise == 0
    }

    /// Nearest `f64` to the exact ratio.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        self.rise as f64 / self.run as f64
    }
}

impl Ord for Gradient {
    fn cmp(&self, other: &Self) -> Ordering {
        // Both runs are positive, so cross multiplication preserves order.
        let lhs = i128::from(self.rise) * i128::from(other.run);
        let rhs = i128::from(other.rise) * i128::from(self.run);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Gradient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Gradient {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Gradient {}

/// Slope of the line through two points.
///
/// Variant order is the numeric order: `Degenerate` (negative infinity)
/// < every `Finite` < `Vertical` (positive infinity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slope {
    /// Both points coincide. Never a real line.
    Degenerate,
    /// A non-vertical line. Horizontal lines have zero rise.
    Finite(Gradient),
    /// Equal `x`, different `y`.
    Vertical,
}

impl Slope {
    /// Slope of the line through `from` and `to`.
    ///
    /// Symmetric in its arguments: the direction of travel is
    /// normalized so that the run is positive.
    #[must_use]
    pub fn between(from: Point, to: Point) -> Self {
        let run = i64::from(to.x) - i64::from(from.x);
        let rise = i64::from(to.y) - i64::from(from.y);
        match (run, rise) {
            (0, 0) => Self::Degenerate,
            (0, _) => Self::Vertical,
            (run, rise) if run < 0 => Self::Finite(Gradient {
                rise: -rise,
                run: -run,
            }),
            (run, rise) => Self::Finite(Gradient { rise, run }),
        }
    }

    /// Returns `true` for the self-slope sentinel.
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        matches!(self, Self::Degenerate)
    }

    /// The slope as an IEEE double.
    ///
    /// `Degenerate` maps to negative infinity, `Vertical` to positive
    /// infinity and horizontal lines to positive zero.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Degenerate => f64::NEG_INFINITY,
            Self::Finite(g) if g.is_horizontal() => 0.0,
            Self::Finite(g) => g.to_f64(),
            Self::Vertical => f64::INFINITY,
        }
    }
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate => write!(f, "-inf"),
            Self::Finite(g) => write!(f, "{}/{}", g.rise, g.run),
            Self::Vertical => write!(f, "+inf"),
        }
    }
}

/// Orders points by the slope each makes with a fixed pivot.
///
/// Points with equal slope compare equal; a stable sort keeps them in
/// their incoming order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlopeOrder {
    pivot: Point,
}

impl SlopeOrder {
    /// Create an ordering around `pivot`.
    #[must_use]
    pub const fn new(pivot: Point) -> Self {
        Self { pivot }
    }

    /// The point slopes are measured from.
    #[must_use]
    pub const fn pivot(&self) -> Point {
        self.pivot
    }

    /// Compare `a` and `b` by their slope to the pivot.
    #[must_use]
    pub fn compare(&self, a: &Point, b: &Point) -> Ordering {
        self.pivot.slope_to(*a).cmp(&self.pivot.slope_to(*b))
    }
}
