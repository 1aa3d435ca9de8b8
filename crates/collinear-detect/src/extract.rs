//! Segment extraction from a slope-sorted neighbourhood of one pivot.
//!
//! Given a pivot and every other point stably sorted by slope to that
//! pivot, points on a common line through the pivot sit next to each
//! other. A run of at least [`MIN_RUN`] equal slopes plus the pivot is a
//! collinear set of at least [`MIN_COLLINEAR`] points.
//!
//! The same line is seen once from each of its points. Only the pivot
//! that is the natural-order minimum of the whole set emits it; every
//! other pivot drops the run. Because each run is extended to its full
//! length before the check, the emitted segment is maximal.

use log::trace;

use crate::types::{LineSegment, Point};

/// Smallest number of collinear points that forms a segment.
pub const MIN_COLLINEAR: usize = 4;

/// Smallest run of equal slopes (excluding the pivot) that qualifies.
pub const MIN_RUN: usize = MIN_COLLINEAR - 1;

/// Counters for one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Runs of at least [`MIN_RUN`] equal slopes.
    pub runs_found: usize,
    /// Qualifying runs dropped because the pivot was not their minimum.
    pub runs_suppressed: usize,
}

impl ExtractStats {
    /// Segments emitted by the pass.
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.runs_found - self.runs_suppressed
    }
}

impl std::ops::AddAssign for ExtractStats {
    fn add_assign(&mut self, rhs: Self) {
        self.runs_found += rhs.runs_found;
        self.runs_suppressed += rhs.runs_suppressed;
    }
}

/// Scan `others` (every point except `pivot`, sorted by slope to
/// `pivot`) and push one segment per maximal run the pivot owns.
///
/// Endpoints are the natural-order extremes of the pivot and the run,
/// found by scanning rather than by position.
pub fn extract_segments(pivot: Point, others: &[Point], out: &mut Vec<LineSegment>) -> ExtractStats {
    let mut stats = ExtractStats::default();
    if others.len() < MIN_RUN {
        return stats;
    }

    let mut i = 0;
    while i < others.len() {
        let slope = pivot.slope_to(others[i]);
        let len = others[i..]
            .iter()
            .take_while(|&&q| pivot.slope_to(q) == slope)
            .count();

        if len < MIN_RUN || slope.is_degenerate() {
            i += 1;
            continue;
        }

        let run = &others[i..i + len];
        stats.runs_found += 1;

        let (min, max) = run
            .iter()
            .fold((pivot, pivot), |(lo, hi), &q| (lo.min(q), hi.max(q)));

        if min == pivot {
            let segment = LineSegment::new(min, max);
            trace!("pivot {pivot} slope {slope}: {} points -> {segment}", len + 1);
            out.push(segment);
        } else {
            stats.runs_suppressed += 1;
            trace!("pivot {pivot} slope {slope}: run owned by {min}");
        }

        i += len;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::merge_sort_by;

    /// Every point but `pivot`, in the given order, then slope-sorted.
    fn neighbourhood(pivot: Point, points: &[Point]) -> Vec<Point> {
        let mut others: Vec<Point> = points.iter().copied().filter(|&p| p != pivot).collect();
        let order = pivot.slope_order();
        merge_sort_by(&mut others, |a, b| order.compare(a, b));
        others
    }

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn too_few_neighbours_produce_nothing() {
        let pivot = Point::new(0, 0);
        let others = pts(&[(1, 1), (2, 2)]);
        let mut out = Vec::new();
        let stats = extract_segments(pivot, &others, &mut out);
        assert!(out.is_empty());
        assert_eq!(stats, ExtractStats::default());
    }

    #[test]
    fn empty_neighbourhood_is_handled() {
        let mut out = Vec::new();
        let stats = extract_segments(Point::new(0, 0), &[], &mut out);
        assert!(out.is_empty());
        assert_eq!(stats.emitted(), 0);
    }

    #[test]
    fn minimal_pivot_emits_run() {
        let points = pts(&[(0, 0), (1, 1), (2, 2), (3, 3), (1, 0)]);
        let pivot = Point::new(0, 0);
        let mut out = Vec::new();
        let stats = extract_segments(pivot, &neighbourhood(pivot, &points), &mut out);
        assert_eq!(out, vec![LineSegment::new(Point::new(0, 0), Point::new(3, 3))]);
        assert_eq!(stats.runs_found, 1);
        assert_eq!(stats.emitted(), 1);
    }

    #[test]
    fn non_minimal_pivot_suppresses_run() {
        let points = pts(&[(0, 0), (1, 1), (2, 2), (3, 3), (1, 0)]);
        let pivot = Point::new(2, 2);
        let mut out = Vec::new();
        let stats = extract_segments(pivot, &neighbourhood(pivot, &points), &mut out);
        assert!(out.is_empty());
        assert_eq!(stats.runs_found, 1);
        assert_eq!(stats.runs_suppressed, 1);
    }

    #[test]
    fn run_is_extended_to_full_length() {
        let points = pts(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (4, 1)]);
        let pivot = Point::new(0, 0);
        let mut out = Vec::new();
        extract_segments(pivot, &neighbourhood(pivot, &points), &mut out);
        assert_eq!(out, vec![LineSegment::new(Point::new(0, 0), Point::new(0, 5))]);
    }

    #[test]
    fn endpoints_found_by_scan_not_position() {
        // Not pre-sorted by natural order, so the run is out of order
        // after the slope sort.
        let pivot = Point::new(0, 0);
        let others = pts(&[(3, 3), (1, 1), (2, 2)]);
        let mut out = Vec::new();
        extract_segments(pivot, &neighbourhood(pivot, &others), &mut out);
        assert_eq!(out, vec![LineSegment::new(Point::new(0, 0), Point::new(3, 3))]);
    }

    #[test]
    fn several_lines_through_one_pivot() {
        let points = pts(&[
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (1, 1),
            (2, 2),
            (3, 3),
            (0, 1),
            (0, 2),
            (0, 3),
            (5, 1),
        ]);
        let pivot = Point::new(0, 0);
        let mut out = Vec::new();
        let stats = extract_segments(pivot, &neighbourhood(pivot, &points), &mut out);
        assert_eq!(stats.runs_found, 3);
        assert_eq!(
            out,
            vec![
                LineSegment::new(Point::new(0, 0), Point::new(3, 0)),
                LineSegment::new(Point::new(0, 0), Point::new(3, 3)),
                LineSegment::new(Point::new(0, 0), Point::new(0, 3)),
            ],
        );
    }

    #[test]
    fn pivot_in_middle_of_line_sees_both_sides() {
        // The pivot splits the line, but both halves share one slope.
        let points = pts(&[(-2, -2), (-1, -1), (0, 0), (1, 1), (2, 2)]);
        let pivot = Point::new(-2, -2);
        let mut out = Vec::new();
        extract_segments(pivot, &neighbourhood(pivot, &points), &mut out);
        assert_eq!(out, vec![LineSegment::new(Point::new(-2, -2), Point::new(2, 2))]);

        let middle = Point::new(0, 0);
        let mut out = Vec::new();
        let stats = extract_segments(middle, &neighbourhood(middle, &points), &mut out);
        assert!(out.is_empty());
        assert_eq!(stats.runs_suppressed, 1);
    }

    #[test]
    fn stats_accumulate() {
        let mut total = ExtractStats::default();
        total += ExtractStats {
            runs_found: 2,
            runs_suppressed: 1,
        };
        total += ExtractStats {
            runs_found: 3,
            runs_suppressed: 3,
        };
        assert_eq!(total.runs_found, 5);
        assert_eq!(total.emitted(), 1);
    }
}
