use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{
    Error, NodeId, SegmentId, SlopeGraph, StreetSegment, ThresholdSubgraph,
    routing::{PathResult, TraversedSegment},
};

impl PathResult {
    /// Converts the traversed segments to a `GeoJSON` `FeatureCollection`,
    /// each line oriented in the direction of travel.
    pub fn to_geojson(&self, graph: &SlopeGraph) -> Result<FeatureCollection, Error> {
        let features = self
            .segments
            .iter()
            .enumerate()
            .map(|(idx, step)| create_step_feature(graph, idx, step))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, graph: &SlopeGraph) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(graph)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

impl ThresholdSubgraph {
    /// Admitted segments as a `GeoJSON` `FeatureCollection`
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let graph = self.base();
        let features = self
            .segments()
            .map(|(id, segment)| create_segment_feature(graph, id, segment))
            .collect::<Result<Vec<_>, _>>()?;

        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert("threshold".to_string(), json!(self.threshold()));
        foreign_members.insert("network".to_string(), json!(graph.network()));

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: Some(foreign_members),
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn create_step_feature(
    graph: &SlopeGraph,
    leg_idx: usize,
    step: &TraversedSegment,
) -> Result<Feature, Error> {
    let segment = graph
        .segment(step.segment)
        .ok_or_else(|| Error::InvalidData(format!("unknown segment {}", step.segment)))?;

    let mut line = segment_line(graph, segment)?;
    if step.from != segment.start {
        line.0.reverse();
    }

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&line)),
        "properties": {
            "leg_index": leg_idx,
            "segment_id": step.segment,
            "from_id": step.from,
            "to_id": step.to,
            "name": segment.name,
            "length": step.length,
            "slope": step.slope,
            "elevation_change": step.elevation_change,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_segment_feature(
    graph: &SlopeGraph,
    id: SegmentId,
    segment: &StreetSegment,
) -> Result<Feature, Error> {
    let line = segment_line(graph, segment)?;

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&line)),
        "properties": {
            "segment_id": id,
            "start_id": segment.start,
            "end_id": segment.end,
            "name": segment.name,
            "oneway": segment.oneway,
            "length": segment.length,
            "elevation_change": segment.elevation_change,
            "slope": segment.slope,
            "abs_slope": segment.abs_slope(),
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Detailed geometry when the source provided one, else a straight line
fn segment_line(graph: &SlopeGraph, segment: &StreetSegment) -> Result<LineString<f64>, Error> {
    if let Some(geometry) = &segment.geometry {
        return Ok(geometry.clone());
    }
    let start = endpoint(graph, segment.start)?;
    let end = endpoint(graph, segment.end)?;
    Ok(LineString::new(vec![start, end]))
}

fn endpoint(graph: &SlopeGraph, id: NodeId) -> Result<Coord<f64>, Error> {
    graph
        .node(id)
        .map(|node| node.geometry.into())
        .ok_or(Error::UnknownNode(id))
}
