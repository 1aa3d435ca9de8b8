//! collinear-detect: Collinear point detection (sans-IO).
//!
//! Finds every maximal line segment through four or more points of a
//! finite set of integer points, reporting each segment once by its two
//! extreme endpoints:
//!
//! validate -> natural-order sort -> per-pivot slope sort -> run extraction.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! point slices and text and returns structured data. File and terminal
//! interaction lives in `collinear-bench`.

pub mod brute;
pub mod detector;
pub mod diagnostics;
pub mod extract;
pub mod fast;
pub mod input;
pub mod slope;
pub mod sort;
pub mod types;

pub use detector::{CollinearDetector, CrossCheck, DetectorKind, cross_check};
pub use diagnostics::{Clock, DetectionDiagnostics, detect_with_diagnostics};
pub use input::{InputError, InputFormat};
pub use slope::{Slope, SlopeOrder};
pub use types::{DetectConfig, DetectError, Detection, LineSegment, Point, require_points};

/// Run the configured detector over `points`.
///
/// # Errors
///
/// Returns [`DetectError::DuplicatePoint`] if two points coincide.
/// Fewer than four points is not an error: the result is simply empty.
pub fn detect(points: &[Point], config: &DetectConfig) -> Result<Detection, DetectError> {
    config.detector.detect(points)
}
