//! Detection diagnostics: timing and counts for each stage.
//!
//! [`detect_with_diagnostics`] runs a detector and records how long input
//! validation and the main scan took, along with algorithm counters
//! (pivots, slope comparisons, runs suppressed as already owned by a
//! smaller point, collinear quadruples).
//!
//! The library has no time source of its own. Callers supply a
//! [`Clock`]; the bench CLI backs it with [`std::time::Instant`].
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::detector::{DetectorKind, sorted_distinct};
use crate::types::{DetectConfig, DetectError, Detection, Point};
use crate::{brute, fast};

/// Source of timestamps for stage timing.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Current timestamp.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionDiagnostics {
    /// Which detector ran.
    pub detector: DetectorKind,
    /// Stage 1: copy, natural-order sort and duplicate check.
    pub validation: StageDiagnostics,
    /// Stage 2: per-pivot slope scan or quadruple enumeration.
    pub scan: StageDiagnostics,
    /// Total wall-clock duration of the run (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts.
    pub summary: DetectionSummary,
}

/// Diagnostics for a single stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Input validation metrics.
    Validation {
        /// Number of input points.
        point_count: usize,
    },
    /// Fast detector scan metrics.
    SlopeScan {
        /// Pivots processed.
        pivots: usize,
        /// Slope comparisons made by the per-pivot sorts.
        comparisons: u64,
        /// Runs of three or more equal slopes.
        runs_found: usize,
        /// Runs dropped because the pivot was not the smallest point.
        runs_suppressed: usize,
    },
    /// Brute-force scan metrics.
    QuadrupleScan {
        /// Collinear triples `i < j < k` found during enumeration.
        collinear_triples: u64,
        /// Collinear quadruples found.
        collinear_quadruples: u64,
    },
}

/// High-level summary counts for a detection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSummary {
    /// Number of input points.
    pub point_count: usize,
    /// Number of segments reported.
    pub segment_count: usize,
}

/// Run the configured detector, collecting per-stage diagnostics.
///
/// # Errors
///
/// Returns [`DetectError::DuplicatePoint`] if two points coincide.
pub fn detect_with_diagnostics<C: Clock>(
    points: &[Point],
    config: &DetectConfig,
    clock: &C,
) -> Result<(Detection, DetectionDiagnostics), DetectError> {
    let total_start = clock.now();

    let start = clock.now();
    let sorted = sorted_distinct(points)?;
    let validation = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Validation {
            point_count: points.len(),
        },
    };

    let start = clock.now();
    let (segments, metrics) = match config.detector {
        DetectorKind::Fast => {
            let result = fast::scan(&sorted);
            let metrics = StageMetrics::SlopeScan {
                pivots: result.pivots,
                comparisons: result.comparisons,
                runs_found: result.stats.runs_found,
                runs_suppressed: result.stats.runs_suppressed,
            };
            (result.segments, metrics)
        }
        DetectorKind::BruteForce => {
            let result = brute::scan(&sorted);
            let metrics = StageMetrics::QuadrupleScan {
                collinear_triples: result.collinear_triples,
                collinear_quadruples: result.collinear_quadruples,
            };
            (result.segments, metrics)
        }
    };
    let scan = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics,
    };

    let detection = Detection::new(segments);
    let diagnostics = DetectionDiagnostics {
        detector: config.detector,
        validation,
        scan,
        total_duration: clock.elapsed(&total_start),
        summary: DetectionSummary {
            point_count: points.len(),
            segment_count: detection.count(),
        },
    };
    Ok((detection, diagnostics))
}

impl DetectionDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Detection Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Detector: {}  |  Points: {}",
            self.detector.name(),
            self.summary.point_count,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<16} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(80));

        let total_ms = duration_ms(self.total_duration);
        for (name, diag) in [("Validation", &self.validation), ("Scan", &self.scan)] {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<16} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!("Segments: {}", self.summary.segment_count));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Validation { point_count } => format!("{point_count} points"),
        StageMetrics::SlopeScan {
            pivots,
            comparisons,
            runs_found,
            runs_suppressed,
        } => {
            format!(
                "{pivots} pivots, {comparisons} comparisons, runs={runs_found} (suppressed {runs_suppressed})",
            )
        }
        StageMetrics::QuadrupleScan {
            collinear_triples,
            collinear_quadruples,
        } => {
            format!("triples={collinear_triples} quadruples={collinear_quadruples}")
        }
    }
}
