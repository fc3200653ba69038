//! Data model for slope-aware routing
//!
//! Contains the street network arena and the threshold views derived from it.

pub mod streets;
pub mod subgraph;

pub use streets::components::{MAX_SEGMENT_LENGTH, slope_percentage};
pub use streets::network::{IndexedPoint, SlopeGraph};
pub use streets::{StreetNode, StreetSegment};
pub use subgraph::ThresholdSubgraph;
