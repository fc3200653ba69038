use serde::Serialize;

use crate::{Meters, NodeId, SegmentId, SlopePercent};

/// One step of a path, oriented in the direction of travel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraversedSegment {
    pub segment: SegmentId,
    pub from: NodeId,
    pub to: NodeId,
    pub length: Meters,
    /// Signed grade in the direction of travel
    pub slope: SlopePercent,
    /// Signed elevation change in the direction of travel
    pub elevation_change: Meters,
}

/// Shortest admissible route between two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Threshold of the subgraph the path was searched on
    pub threshold: SlopePercent,
    pub nodes: Vec<NodeId>,
    pub segments: Vec<TraversedSegment>,
    pub total_length: Meters,
}

impl PathResult {
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Per-segment slopes in travel order
    pub fn slopes(&self) -> Vec<SlopePercent> {
        self.segments.iter().map(|s| s.slope).collect()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

/// Outcome of a path search. A disconnected pair is an expected result,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum PathOutcome {
    Found(PathResult),
    NoPathFound,
}

impl PathOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&PathResult> {
        match self {
            PathOutcome::Found(path) => Some(path),
            PathOutcome::NoPathFound => None,
        }
    }

    pub fn into_path(self) -> Option<PathResult> {
        match self {
            PathOutcome::Found(path) => Some(path),
            PathOutcome::NoPathFound => None,
        }
    }
}
