//! This module is responsible for turning raw topology and elevation
//! samples supplied by external collaborators into a slope graph.

mod builder;
mod config;
mod raw;
mod report;

pub use builder::{GraphBuild, build_graph};
pub use config::{NetworkKind, SlopeModelConfig};
pub use raw::{ElevationLookup, RawEdge, RawNode, RawTopology};
pub use report::{BuildReport, SkipReason, SkippedSegment};
