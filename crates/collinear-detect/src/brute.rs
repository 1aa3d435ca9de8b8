//! Brute-force collinear detection over every quadruple of points.
//!
//! Serves as an independent reference for the fast detector. Each
//! collinear quadruple is folded into the extent of its supporting line,
//! so a line through five or more points still yields one maximal
//! segment rather than one per quadruple.

use std::collections::BTreeMap;

use log::debug;

use crate::detector::sorted_distinct;
use crate::extract::MIN_COLLINEAR;
use crate::slope::Slope;
use crate::sort::merge_sort;
use crate::types::{DetectError, Detection, LineSegment, Point};

/// Output of the quadruple enumeration, with counters for diagnostics.
#[derive(Debug, Clone, Default)]
pub(crate) struct BruteScan {
    pub segments: Vec<LineSegment>,
    pub collinear_triples: u64,
    pub collinear_quadruples: u64,
}

/// Canonical identity of an infinite line through integer points.
///
/// The direction is reduced to lowest terms with a positive run (or
/// `(1, 0)` for vertical lines); `offset` is `run * y - rise * x`, which
/// is the same for every point on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct LineKey {
    rise: i64,
    run: i64,
    offset: i128,
}

impl LineKey {
    /// Key of the line through `p` with the given slope, or `None` for
    /// the degenerate slope.
    fn through(p: Point, slope: Slope) -> Option<Self> {
        let (rise, run) = match slope {
            Slope::Degenerate => return None,
            Slope::Vertical => (1, 0),
            Slope::Finite(g) => {
                let divisor = gcd(g.rise().unsigned_abs(), g.run().unsigned_abs());
                // The gcd never exceeds the run, which is an i64.
                let divisor = i64::try_from(divisor).ok()?;
                (g.rise() / divisor, g.run() / divisor)
            }
        };
        let offset = i128::from(run) * i128::from(p.y) - i128::from(rise) * i128::from(p.x);
        Some(Self { rise, run, offset })
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Find every maximal segment of four or more collinear points by
/// checking all quadruples.
///
/// Segments are listed in natural order of `(start, end)`.
///
/// # Errors
///
/// Returns [`DetectError::DuplicatePoint`] if two points coincide.
pub fn detect(points: &[Point]) -> Result<Detection, DetectError> {
    let sorted = sorted_distinct(points)?;
    Ok(Detection::new(scan(&sorted).segments))
}

/// Enumerate quadruples `i < j < k < l` of naturally sorted,
/// duplicate-free points.
///
/// With the input sorted, `sorted[i]` is the smallest and `sorted[l]`
/// the largest point of each quadruple. A quadruple is collinear when
/// `sorted[j]`, `sorted[k]` and `sorted[l]` all have the same slope to
/// `sorted[i]`; quadruples whose first three points already disagree
/// are skipped without visiting `l`.
pub(crate) fn scan(sorted: &[Point]) -> BruteScan {
    let mut result = BruteScan::default();
    let n = sorted.len();
    if n < MIN_COLLINEAR {
        debug!("brute-force: {n} points, nothing to scan");
        return result;
    }
    debug!("brute-force: enumerating quadruples of {n} points");

    let mut lines: BTreeMap<LineKey, (Point, Point)> = BTreeMap::new();

    for (i, &p) in sorted.iter().enumerate() {
        for (j, &q) in sorted.iter().enumerate().skip(i + 1) {
            let slope = p.slope_to(q);
            for (k, &r) in sorted.iter().enumerate().skip(j + 1) {
                if p.slope_to(r) != slope {
                    continue;
                }
                result.collinear_triples += 1;
                for &s in &sorted[k + 1..] {
                    if p.slope_to(s) != slope {
                        continue;
                    }
                    result.collinear_quadruples += 1;
                    let Some(key) = LineKey::through(p, slope) else {
                        continue;
                    };
                    lines
                        .entry(key)
                        .and_modify(|(lo, hi)| {
                            *lo = (*lo).min(p);
                            *hi = (*hi).max(s);
                        })
                        .or_insert((p, s));
                }
            }
        }
    }

    result.segments = lines
        .into_values()
        .map(|(lo, hi)| LineSegment::new(lo, hi))
        .collect();
    merge_sort(&mut result.segments);

    debug!(
        "brute-force: {} segments from {} collinear quadruples",
        result.segments.len(),
        result.collinear_quadruples,
    );
    result
}
