// Re-export key components
pub use crate::algo::threshold::{compute_thresholds, compute_thresholds_par, filter};
pub use crate::export::SegmentRecord;
pub use crate::loading::{
    BuildReport, ElevationLookup, GraphBuild, NetworkKind, RawEdge, RawNode, RawTopology,
    SkipReason, SlopeModelConfig, build_graph,
};
pub use crate::model::{SlopeGraph, StreetNode, StreetSegment, ThresholdSubgraph};
pub use crate::routing::{
    PathOutcome, PathResult, PathSummary, RouteSummary, TraversedSegment, find_path, summarize,
};

// Core scalar types
pub use crate::Error;
pub use crate::Meters;
pub use crate::NodeId;
pub use crate::SegmentId;
pub use crate::SlopePercent;
