//! Detector selection: run the fast or brute-force algorithm.
//!
//! This module defines the [`CollinearDetector`] trait for pluggable
//! detection strategies and the [`DetectorKind`] enum for selecting one
//! at runtime. Both strategies share one input contract (validated by
//! [`sorted_distinct`]) and report the same set of maximal segments.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::sort::merge_sort;
use crate::types::{DetectError, Detection, LineSegment, Point};
use crate::{brute, fast};

/// Selects which detection algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetectorKind {
    /// Sort every other point by slope to each pivot and scan for runs.
    ///
    /// O(N^2 log N).
    #[default]
    Fast,

    /// Enumerate every quadruple of points.
    ///
    /// O(N^4). Intended as a reference for checking [`Fast`](Self::Fast)
    /// on small inputs.
    BruteForce,
}

impl DetectorKind {
    /// Short human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::BruteForce => "brute-force",
        }
    }
}

/// Trait for detection strategies.
///
/// Input: points in any order.
/// Output: every maximal segment through four or more of them, once.
pub trait CollinearDetector {
    /// Find all maximal collinear segments.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::DuplicatePoint`] if two points coincide.
    fn detect(&self, points: &[Point]) -> Result<Detection, DetectError>;
}

impl CollinearDetector for DetectorKind {
    fn detect(&self, points: &[Point]) -> Result<Detection, DetectError> {
        match *self {
            Self::Fast => fast::detect(points),
            Self::BruteForce => brute::detect(points),
        }
    }
}

/// Disagreement between the fast and brute-force detectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossCheck {
    /// Segments only the fast detector reported.
    pub only_fast: Vec<LineSegment>,
    /// Segments only the brute-force detector reported.
    pub only_brute: Vec<LineSegment>,
}

impl CrossCheck {
    /// Returns `true` if both detectors reported the same segment set.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.only_fast.is_empty() && self.only_brute.is_empty()
    }
}

/// Run both detectors on `points` and compare their segment sets.
///
/// # Errors
///
/// Returns [`DetectError::DuplicatePoint`] if two points coincide.
pub fn cross_check(points: &[Point]) -> Result<CrossCheck, DetectError> {
    let by_fast: BTreeSet<LineSegment> = fast::detect(points)?.into_segments().into_iter().collect();
    let by_brute: BTreeSet<LineSegment> =
        brute::detect(points)?.into_segments().into_iter().collect();
    Ok(CrossCheck {
        only_fast: by_fast.difference(&by_brute).copied().collect(),
        only_brute: by_brute.difference(&by_fast).copied().collect(),
    })
}

/// Copy `points`, sort the copy by natural order and reject duplicates.
///
/// Duplicates are adjacent after sorting, so one linear pass finds them.
pub(crate) fn sorted_distinct(points: &[Point]) -> Result<Vec<Point>, DetectError> {
    let mut sorted = points.to_vec();
    merge_sort(&mut sorted);
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(DetectError::DuplicatePoint { point: pair[0] });
    }
    Ok(sorted)
}
