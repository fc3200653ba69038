//! Slope-constrained street graph model and routing engine.
//!
//! A street network is built once into an immutable [`SlopeGraph`], every
//! segment annotated with its grade. Threshold filtering derives read-only
//! [`ThresholdSubgraph`] views holding only the segments whose absolute slope
//! stays under a limit, and path search runs over such a view.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod algo;
pub mod error;
pub mod export;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use algo::threshold::{compute_thresholds, compute_thresholds_par, filter};
pub use error::Error;
pub use loading::{
    BuildReport, ElevationLookup, GraphBuild, NetworkKind, RawEdge, RawNode, RawTopology,
    SkipReason, SkippedSegment, SlopeModelConfig, build_graph,
};
pub use model::{MAX_SEGMENT_LENGTH, SlopeGraph, StreetNode, StreetSegment, ThresholdSubgraph};
pub use routing::{
    PathOutcome, PathResult, PathSummary, RouteSummary, TraversedSegment, find_path, summarize,
};

/// Distance in meters
pub type Meters = f64;

/// Grade as a percentage: elevation change over horizontal length, times 100
pub type SlopePercent = f64;

/// Stable index of a segment in the base graph arena
pub type SegmentId = usize;

/// Opaque node identifier supplied by the raw topology (OSM ids fit here)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId(value)
    }
}
