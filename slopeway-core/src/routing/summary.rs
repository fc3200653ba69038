//! Slope statistics of a found path for the presentation layer

use serde::Serialize;

use super::path::{PathOutcome, PathResult};
use crate::{Meters, SlopePercent};

/// Statistics of one path. Slopes are signed in the direction of travel;
/// all slope figures are 0 for a path without segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSummary {
    pub threshold: SlopePercent,
    pub total_length: Meters,
    pub segment_count: usize,
    pub min_slope: SlopePercent,
    pub max_slope: SlopePercent,
    pub mean_slope: SlopePercent,
    pub max_abs_slope: SlopePercent,
    /// Meters climbed
    pub ascent: Meters,
    /// Meters descended, positive
    pub descent: Meters,
    /// Some traversed segment lies within epsilon of the threshold
    pub tight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "summary", rename_all = "snake_case")]
pub enum RouteSummary {
    Route(PathSummary),
    NoRoute,
}

impl RouteSummary {
    pub fn route(&self) -> Option<&PathSummary> {
        match self {
            RouteSummary::Route(summary) => Some(summary),
            RouteSummary::NoRoute => None,
        }
    }
}

impl PathResult {
    /// `epsilon` is the distance below the threshold, in percentage points,
    /// that marks a segment as close to the limit
    #[allow(clippy::cast_precision_loss)]
    pub fn summarize(&self, epsilon: SlopePercent) -> PathSummary {
        let total_length = self.segments.iter().map(|s| s.length).sum();

        let mut min_slope = f64::INFINITY;
        let mut max_slope = f64::NEG_INFINITY;
        let mut slope_sum = 0.0;
        let mut ascent = 0.0;
        let mut descent = 0.0;
        let mut tight = false;

        for segment in &self.segments {
            min_slope = min_slope.min(segment.slope);
            max_slope = max_slope.max(segment.slope);
            slope_sum += segment.slope;
            if segment.elevation_change > 0.0 {
                ascent += segment.elevation_change;
            } else {
                descent -= segment.elevation_change;
            }
            if self.threshold - segment.slope.abs() <= epsilon {
                tight = true;
            }
        }

        let segment_count = self.segments.len();
        if segment_count == 0 {
            min_slope = 0.0;
            max_slope = 0.0;
        }
        let mean_slope = if segment_count == 0 {
            0.0
        } else {
            slope_sum / segment_count as f64
        };

        PathSummary {
            threshold: self.threshold,
            total_length,
            segment_count,
            min_slope,
            max_slope,
            mean_slope,
            max_abs_slope: max_slope.abs().max(min_slope.abs()),
            ascent,
            descent,
            tight,
        }
    }
}

/// Summary of a search outcome; a missing path yields `NoRoute`
pub fn summarize(outcome: &PathOutcome, epsilon: SlopePercent) -> RouteSummary {
    match outcome.path() {
        Some(path) => RouteSummary::Route(path.summarize(epsilon)),
        None => RouteSummary::NoRoute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeId, routing::TraversedSegment};

    fn step(from: i64, to: i64, length: f64, elevation_change: f64) -> TraversedSegment {
        TraversedSegment {
            segment: 0,
            from: NodeId(from),
            to: NodeId(to),
            length,
            slope: elevation_change * 100.0 / length,
            elevation_change,
        }
    }

    fn path(threshold: f64, segments: Vec<TraversedSegment>) -> PathResult {
        let mut nodes: Vec<NodeId> = segments.iter().map(|s| s.from).collect();
        if let Some(last) = segments.last() {
            nodes.push(last.to);
        }
        let total_length = segments.iter().map(|s| s.length).sum();
        PathResult {
            threshold,
            nodes,
            segments,
            total_length,
        }
    }

    #[test]
    fn statistics_over_traversed_segments() {
        let p = path(
            8.0,
            vec![
                step(1, 2, 100.0, 5.0),
                step(2, 3, 50.0, 0.0),
                step(3, 4, 200.0, -6.0),
            ],
        );
        let summary = p.summarize(0.5);

        assert_eq!(summary.segment_count, 3);
        assert!((summary.total_length - 350.0).abs() < 1e-9);
        assert!((summary.min_slope + 3.0).abs() < 1e-9);
        assert!((summary.max_slope - 5.0).abs() < 1e-9);
        assert!((summary.mean_slope - 2.0 / 3.0).abs() < 1e-9);
        assert!((summary.max_abs_slope - 5.0).abs() < 1e-9);
        assert!((summary.ascent - 5.0).abs() < 1e-9);
        assert!((summary.descent - 6.0).abs() < 1e-9);
        assert!(!summary.tight);
    }

    #[test]
    fn tight_when_close_to_threshold() {
        let p = path(5.0, vec![step(1, 2, 100.0, -4.75), step(2, 3, 10.0, 0.0)]);
        assert!(p.summarize(0.5).tight);
        assert!(!p.summarize(0.1).tight);
    }

    #[test]
    fn total_length_is_sum_of_segments() {
        let p = path(
            40.0,
            vec![step(1, 2, 12.5, 1.0), step(2, 3, 7.25, 0.5), step(3, 4, 80.0, -2.0)],
        );
        let expected: f64 = p.segments.iter().map(|s| s.length).sum();
        assert!((p.summarize(0.5).total_length - expected).abs() < 1e-9);
    }

    #[test]
    fn no_route_summary() {
        assert_eq!(summarize(&PathOutcome::NoPathFound, 0.5), RouteSummary::NoRoute);
        assert!(summarize(&PathOutcome::NoPathFound, 0.5).route().is_none());
    }

    #[test]
    fn empty_path_has_zero_statistics() {
        let p = path(3.0, vec![]);
        let summary = summarize(&PathOutcome::Found(p), 0.5);
        let summary = summary.route().unwrap();
        assert_eq!(summary.segment_count, 0);
        assert!(summary.min_slope.abs() < f64::EPSILON);
        assert!(summary.mean_slope.abs() < f64::EPSILON);
        assert!(!summary.tight);
    }
}
