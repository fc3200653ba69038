use geo::Point;
use geojson::FeatureCollection;
use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use slopeway_core::prelude::*;

use crate::{Error, model::SlopeModel};

/// Free-text location lookup supplied by the caller, e.g. a geocoding
/// service client. Returns `None` when the text matches nothing.
pub trait Geocoder: Sync {
    fn geocode(&self, query: &str) -> Option<Point<f64>>;
}

impl<F> Geocoder for F
where
    F: Fn(&str) -> Option<Point<f64>> + Sync,
{
    fn geocode(&self, query: &str) -> Option<Point<f64>> {
        self(query)
    }
}

/// Outcome of one route query with its slope summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResponse {
    pub source: NodeId,
    pub destination: NodeId,
    pub outcome: PathOutcome,
    pub summary: RouteSummary,
}

impl RouteResponse {
    fn new(source: NodeId, destination: NodeId, outcome: PathOutcome, epsilon: f64) -> Self {
        let summary = summarize(&outcome, epsilon);
        Self {
            source,
            destination,
            outcome,
            summary,
        }
    }

    pub fn is_found(&self) -> bool {
        self.outcome.is_found()
    }

    /// Traversed segments as `GeoJSON`, `None` when no path exists
    ///
    /// # Errors
    ///
    /// A segment of the path is missing from `model`
    pub fn to_geojson(&self, model: &SlopeModel) -> Result<Option<FeatureCollection>, Error> {
        match self.outcome.path() {
            Some(path) => Ok(Some(path.to_geojson(model.graph())?)),
            None => Ok(None),
        }
    }
}

/// Appends `suffix` unless the text already names its place, the first
/// comma-separated part of the suffix (case-insensitive)
pub fn with_locality(text: &str, suffix: Option<&str>) -> String {
    let text = text.trim();
    match suffix.map(str::trim).filter(|s| !s.is_empty()) {
        Some(suffix) => {
            let locality = suffix.trim_start_matches(',').trim();
            let place = locality.split(',').next().unwrap_or(locality).trim();
            if text.to_lowercase().contains(&place.to_lowercase()) {
                text.to_string()
            } else {
                format!("{text}, {locality}")
            }
        }
        None => text.to_string(),
    }
}

/// Geocodes `text` and snaps the point to the nearest node of `subgraph`
/// that touches an admitted segment.
///
/// # Errors
///
/// `LocationNotFound` if the geocoder has no match or the subgraph admits
/// no segment at all
pub fn resolve_location<G: Geocoder + ?Sized>(
    model: &SlopeModel,
    subgraph: &ThresholdSubgraph,
    geocoder: &G,
    text: &str,
) -> Result<NodeId, Error> {
    let query = with_locality(text, model.config().locality_suffix.as_deref());
    let point = geocoder
        .geocode(&query)
        .ok_or_else(|| Error::LocationNotFound(query.clone()))?;

    let node = subgraph
        .nearest_connected_node(&point)
        .ok_or_else(|| Error::LocationNotFound(query.clone()))?;
    debug!("Resolved '{query}' to node {node}");
    Ok(node)
}

/// Resolves both locations and searches the subgraph for `threshold`
///
/// # Errors
///
/// Unresolvable location or invalid threshold
pub fn find_route<G: Geocoder + ?Sized>(
    model: &SlopeModel,
    geocoder: &G,
    start: &str,
    end: &str,
    threshold: SlopePercent,
) -> Result<RouteResponse, Error> {
    let subgraph = model.subgraph_for(threshold)?;
    let source = resolve_location(model, &subgraph, geocoder, start)?;
    let destination = resolve_location(model, &subgraph, geocoder, end)?;

    let outcome = find_path(&subgraph, source, destination)?;
    Ok(RouteResponse::new(
        source,
        destination,
        outcome,
        model.config().tight_epsilon,
    ))
}

/// Route between already resolved node ids
///
/// # Errors
///
/// Unknown node or invalid threshold
pub fn find_route_by_ids(
    model: &SlopeModel,
    source: NodeId,
    destination: NodeId,
    threshold: SlopePercent,
) -> Result<RouteResponse, Error> {
    let subgraph = model.subgraph_for(threshold)?;
    let outcome = find_path(&subgraph, source, destination)?;
    Ok(RouteResponse::new(
        source,
        destination,
        outcome,
        model.config().tight_epsilon,
    ))
}

/// Routes from `source` to every target on the rayon pool; results keep
/// the order of `targets`.
///
/// # Errors
///
/// Fails as a whole if the threshold is invalid or any node is unknown
pub fn find_routes_one_to_many(
    model: &SlopeModel,
    source: NodeId,
    targets: &[NodeId],
    threshold: SlopePercent,
) -> Result<Vec<RouteResponse>, Error> {
    let subgraph = model.subgraph_for(threshold)?;
    let epsilon = model.config().tight_epsilon;

    targets
        .par_iter()
        .map(|&destination| -> Result<RouteResponse, Error> {
            let outcome = find_path(&subgraph, source, destination)?;
            Ok(RouteResponse::new(source, destination, outcome, epsilon))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locality_appended_once() {
        let suffix = Some(", Pittsburgh, PA");
        assert_eq!(
            with_locality("Forbes Ave", suffix),
            "Forbes Ave, Pittsburgh, PA"
        );
        assert_eq!(
            with_locality("5000 Forbes Ave, pittsburgh, pa", suffix),
            "5000 Forbes Ave, pittsburgh, pa"
        );
        assert_eq!(with_locality("CMU, Pittsburgh", suffix), "CMU, Pittsburgh");
        assert_eq!(with_locality("  Forbes Ave ", None), "Forbes Ave");
        assert_eq!(with_locality("Forbes Ave", Some("  ")), "Forbes Ave");
    }
}
