//! Slope-aware street routing for a presentation layer.
//!
//! [`SlopeModel`] bundles the base street graph with one precomputed
//! subgraph per integer slope threshold. Route queries resolve free-text
//! locations through a caller-supplied [`Geocoder`] and search the
//! subgraph for the requested threshold.

pub mod error;
pub mod model;
pub mod routing;

pub use error::Error;
pub use model::SlopeModel;
pub use routing::{
    Geocoder, RouteResponse, find_route, find_route_by_ids, find_routes_one_to_many,
    resolve_location, with_locality,
};

pub use slopeway_core::{
    BuildReport, ElevationLookup, NetworkKind, NodeId, PathOutcome, PathResult, PathSummary,
    RawEdge, RawNode, RawTopology, RouteSummary, SlopeGraph, SlopeModelConfig, SlopePercent,
    ThresholdSubgraph,
};
