//! Sorting-based collinear detection.
//!
//! 1. Copy the input, sort it by natural order and reject duplicates.
//! 2. For each point `p` of the sorted copy, take every other point,
//!    stably sort them by slope to `p` and hand the result to the
//!    segment extractor.
//!
//! Because the copy is in natural order before each slope sort and the
//! sort is stable, every tie group is itself in natural order. The
//! extractor only emits a run when `p` is the smallest point of the
//! collinear set, so each maximal segment is reported exactly once.

use log::debug;

use crate::detector::sorted_distinct;
use crate::extract::{ExtractStats, MIN_COLLINEAR, extract_segments};
use crate::sort::MergeSorter;
use crate::types::{DetectError, Detection, LineSegment, Point};

/// Output of the per-pivot scan, with counters for diagnostics.
#[derive(Debug, Clone, Default)]
pub(crate) struct FastScan {
    pub segments: Vec<LineSegment>,
    pub pivots: usize,
    pub comparisons: u64,
    pub stats: ExtractStats,
}

/// Find every maximal segment of four or more collinear points.
///
/// Segments are listed in the natural order of their start points.
///
/// # Errors
///
/// Returns [`DetectError::DuplicatePoint`] if two points coincide.
pub fn detect(points: &[Point]) -> Result<Detection, DetectError> {
    let sorted = sorted_distinct(points)?;
    Ok(Detection::new(scan(&sorted).segments))
}

/// Run the per-pivot slope sort and extraction over naturally sorted,
/// duplicate-free points.
pub(crate) fn scan(sorted: &[Point]) -> FastScan {
    let mut result = FastScan::default();
    if sorted.len() < MIN_COLLINEAR {
        debug!("fast: {} points, nothing to scan", sorted.len());
        return result;
    }
    debug!("fast: scanning {} pivots", sorted.len());

    let mut sorter = MergeSorter::new();
    let mut others = Vec::with_capacity(sorted.len() - 1);

    for (idx, &pivot) in sorted.iter().enumerate() {
        others.clear();
        others.extend_from_slice(&sorted[..idx]);
        others.extend_from_slice(&sorted[idx + 1..]);

        let order = pivot.slope_order();
        let comparisons = &mut result.comparisons;
        sorter.sort_by(&mut others, |a, b| {
            *comparisons += 1;
            order.compare(a, b)
        });

        result.stats += extract_segments(pivot, &others, &mut result.segments);
        result.pivots += 1;
    }

    debug!(
        "fast: {} segments from {} runs ({} suppressed)",
        result.segments.len(),
        result.stats.runs_found,
        result.stats.runs_suppressed,
    );
    result
}
