use hashbrown::{HashMap, hash_map::Entry};
use log::{debug, info, warn};
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::{
    config::NetworkKind,
    raw::{ElevationLookup, RawEdge, RawNode, RawTopology},
    report::{BuildReport, SkipReason},
};
use crate::{
    Error,
    model::{SlopeGraph, StreetNode, StreetSegment},
};

/// Built graph together with the warnings collected on the way
#[derive(Debug, Clone)]
pub struct GraphBuild {
    pub graph: SlopeGraph,
    pub report: BuildReport,
}

/// Builds a slope graph from raw topology and per-node elevations.
///
/// Edges that fail segment validation are recorded in the report and left
/// out; the build continues. Output depends only on input order.
///
/// # Errors
///
/// `Error::BuildFailure` if the topology is malformed: duplicate node ids,
/// coordinates outside the valid range, or edges referencing unknown nodes
pub fn build_graph<E: ElevationLookup>(
    raw: &RawTopology,
    elevations: &E,
    network: NetworkKind,
) -> Result<GraphBuild, Error> {
    info!(
        "Building {} graph from {} nodes and {} edges",
        network.label(),
        raw.nodes.len(),
        raw.edges.len()
    );

    let mut graph = SlopeGraph::with_capacity(network, raw.nodes.len(), raw.edges.len());
    let mut report = BuildReport::default();

    add_nodes(&mut graph, &raw.nodes, elevations)?;
    add_segments(&mut graph, &raw.edges, &mut report)?;
    graph.build_rtree();
    report.sort();

    if !report.is_clean() {
        warn!(
            "Skipped {} of {} raw edges: {:?}",
            report.skipped_count(),
            raw.edges.len(),
            report.counts_by_reason()
        );
    }
    info!(
        "Graph built with {} nodes and {} segments",
        graph.node_count(),
        graph.segment_count()
    );

    Ok(GraphBuild { graph, report })
}

fn add_nodes<E: ElevationLookup>(
    graph: &mut SlopeGraph,
    nodes: &[RawNode],
    elevations: &E,
) -> Result<(), Error> {
    let mut missing_elevation = 0usize;

    for raw in nodes {
        validate_coordinates(raw)?;

        let elevation = elevations.elevation(raw.id);
        if elevation.is_none_or(|e| !e.is_finite()) {
            missing_elevation += 1;
        }

        let node = StreetNode::new(raw.id, raw.lat, raw.lon, elevation);
        if graph.add_node(node).is_none() {
            return Err(Error::BuildFailure(format!("duplicate node id {}", raw.id)));
        }
    }

    if missing_elevation > 0 {
        debug!("{missing_elevation} nodes have no elevation sample");
    }
    Ok(())
}

fn validate_coordinates(raw: &RawNode) -> Result<(), Error> {
    let valid_lat = raw.lat.is_finite() && (-90.0..=90.0).contains(&raw.lat);
    let valid_lon = raw.lon.is_finite() && (-180.0..=180.0).contains(&raw.lon);
    if valid_lat && valid_lon {
        Ok(())
    } else {
        Err(Error::BuildFailure(format!(
            "node {} has invalid coordinates ({}, {})",
            raw.id, raw.lat, raw.lon
        )))
    }
}

fn add_segments(
    graph: &mut SlopeGraph,
    edges: &[RawEdge],
    report: &mut BuildReport,
) -> Result<(), Error> {
    // Unordered node pair -> (segment, raw index currently stored there)
    let mut pairs: HashMap<(NodeIndex, NodeIndex), (EdgeIndex, usize)> =
        HashMap::with_capacity(edges.len());

    for (raw_index, edge) in edges.iter().enumerate() {
        let a = resolve_endpoint(graph, edge, raw_index, edge.a)?;
        let b = resolve_endpoint(graph, edge, raw_index, edge.b)?;

        if a == b {
            report.record(raw_index, edge.a, edge.b, SkipReason::SelfLoop);
            continue;
        }

        let segment = match StreetSegment::new(graph.node_at(a), graph.node_at(b), edge.length) {
            Ok(segment) => segment
                .with_oneway(edge.oneway)
                .with_name(edge.name.clone())
                .with_geometry(edge.geometry.clone()),
            Err(Error::InvalidSegment { reason }) => {
                report.record(raw_index, edge.a, edge.b, reason);
                continue;
            }
            Err(e) => return Err(e),
        };

        let key = if a < b { (a, b) } else { (b, a) };
        match pairs.entry(key) {
            Entry::Vacant(entry) => {
                let index = graph.add_segment(a, b, segment);
                entry.insert((index, raw_index));
            }
            Entry::Occupied(mut entry) => {
                let (index, kept_raw) = *entry.get();
                let Some(kept) = graph.segment(index.index()).cloned() else {
                    continue;
                };
                if segment.length < kept.length {
                    // Shorter parallel edge takes over the existing slot
                    report.record(
                        kept_raw,
                        kept.start,
                        kept.end,
                        SkipReason::DuplicateSegment {
                            kept_length: segment.length,
                        },
                    );
                    graph.replace_segment(index, segment);
                    entry.insert((index, raw_index));
                } else {
                    report.record(
                        raw_index,
                        edge.a,
                        edge.b,
                        SkipReason::DuplicateSegment {
                            kept_length: kept.length,
                        },
                    );
                }
            }
        }
    }

    Ok(())
}

fn resolve_endpoint(
    graph: &SlopeGraph,
    edge: &RawEdge,
    raw_index: usize,
    endpoint: crate::NodeId,
) -> Result<NodeIndex, Error> {
    graph.node_index(endpoint).ok_or_else(|| {
        Error::BuildFailure(format!(
            "edge #{raw_index} ({} -> {}) references unknown node {endpoint}",
            edge.a, edge.b
        ))
    })
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;

    use super::*;
    use crate::NodeId;

    fn elevations(values: &[(i64, f64)]) -> HashMap<NodeId, f64> {
        values.iter().map(|&(id, e)| (NodeId(id), e)).collect()
    }

    fn edge(a: i64, b: i64, length: f64) -> RawEdge {
        RawEdge::new(NodeId(a), NodeId(b), length)
    }

    #[allow(clippy::cast_precision_loss)]
    fn topology(nodes: &[i64], edges: Vec<RawEdge>) -> RawTopology {
        let mut raw = RawTopology::new();
        for (i, &id) in nodes.iter().enumerate() {
            raw.add_node(NodeId(id), 40.44 + i as f64 * 0.001, -79.99);
        }
        raw.edges = edges;
        raw
    }

    #[test]
    fn computes_slope_for_every_segment() {
        let raw = topology(&[1, 2, 3], vec![edge(1, 2, 100.0), edge(2, 3, 50.0)]);
        let build = build_graph(
            &raw,
            &elevations(&[(1, 0.0), (2, 5.0), (3, 5.0)]),
            NetworkKind::Drive,
        )
        .unwrap();

        assert!(build.report.is_clean());
        assert_eq!(build.graph.node_count(), 3);
        let slopes: Vec<f64> = build.graph.segments().map(|(_, s)| s.slope).collect();
        assert_eq!(slopes.len(), 2);
        assert!((slopes[0] - 5.0).abs() < 1e-9);
        assert!(slopes[1].abs() < 1e-9);
    }

    #[test]
    fn invalid_segments_are_reported_not_fatal() {
        let raw = topology(
            &[1, 2, 3, 4],
            vec![
                edge(1, 2, 0.0),
                edge(2, 3, 10.0),
                edge(3, 4, 10.0),
                edge(4, 4, 10.0),
            ],
        );
        // node 4 has no elevation
        let build = build_graph(
            &raw,
            &elevations(&[(1, 0.0), (2, 1.0), (3, 1.0)]),
            NetworkKind::Drive,
        )
        .unwrap();

        assert_eq!(build.graph.segment_count(), 1);
        let reasons: Vec<_> = build
            .report
            .skipped
            .iter()
            .map(|s| (s.raw_index, s.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (0, SkipReason::NonPositiveLength(0.0)),
                (2, SkipReason::MissingElevation(NodeId(4))),
                (3, SkipReason::SelfLoop),
            ]
        );
        assert_eq!(build.report.counts_by_reason()["missing elevation"], 1);
        // Nodes are kept even when all their segments were dropped
        assert!(build.graph.contains_node(NodeId(4)));
    }

    #[test]
    fn implausible_lengths_are_skipped() {
        let raw = topology(
            &[1, 2, 3, 4],
            vec![edge(1, 2, 1e17), edge(2, 3, -1.0), edge(3, 4, 10.0), edge(4, 1, 2e7)],
        );
        let build = build_graph(
            &raw,
            &elevations(&[(1, 0.0), (2, 0.0), (3, 0.0), (4, 0.0)]),
            NetworkKind::Drive,
        )
        .unwrap();

        assert_eq!(build.graph.segment_count(), 1);
        assert_eq!(
            build.report.skipped[0].reason,
            SkipReason::ExcessiveLength(1e17)
        );
        // Labels come out sorted so the build log is stable
        let counts: Vec<_> = build.report.counts_by_reason().into_iter().collect();
        assert_eq!(
            counts,
            vec![("excessive length", 2), ("non-positive length", 1)]
        );
    }

    #[test]
    fn shorter_parallel_segment_wins_at_stable_index() {
        let raw = topology(
            &[1, 2, 3],
            vec![
                edge(1, 2, 80.0),
                edge(2, 3, 10.0),
                edge(2, 1, 60.0),
                edge(1, 2, 90.0),
            ],
        );
        let build = build_graph(
            &raw,
            &elevations(&[(1, 0.0), (2, 3.0), (3, 3.0)]),
            NetworkKind::Bike,
        )
        .unwrap();

        assert_eq!(build.graph.segment_count(), 2);
        let first = build.graph.segment(0).unwrap();
        assert!((first.length - 60.0).abs() < 1e-9);
        assert_eq!(first.start, NodeId(2));
        assert!((first.slope + 5.0).abs() < 1e-9);
        assert_eq!(build.graph.find_segment(NodeId(1), NodeId(2)), Some(0));

        let skipped: Vec<usize> = build.report.skipped.iter().map(|s| s.raw_index).collect();
        assert_eq!(skipped, vec![0, 3]);
    }

    #[test]
    fn malformed_topology_aborts() {
        let raw = topology(&[1, 1], vec![]);
        assert!(matches!(
            build_graph(&raw, &elevations(&[]), NetworkKind::Drive),
            Err(Error::BuildFailure(_))
        ));

        let raw = topology(&[1, 2], vec![edge(1, 9, 10.0)]);
        assert!(matches!(
            build_graph(&raw, &elevations(&[(1, 0.0), (2, 0.0)]), NetworkKind::Drive),
            Err(Error::BuildFailure(_))
        ));

        let mut raw = RawTopology::new();
        raw.add_node(NodeId(1), 95.0, 0.0);
        assert!(matches!(
            build_graph(&raw, &elevations(&[]), NetworkKind::Drive),
            Err(Error::BuildFailure(_))
        ));
    }

    #[test]
    fn rebuild_is_deterministic() {
        let raw = topology(
            &[5, 3, 9, 1],
            vec![
                edge(5, 3, 12.0),
                edge(3, 9, 30.0),
                edge(9, 1, 7.5),
                edge(1, 5, 40.0),
            ],
        );
        let elevations = elevations(&[(5, 1.0), (3, 2.0), (9, 0.5), (1, 4.0)]);
        let first = build_graph(&raw, &elevations, NetworkKind::Drive).unwrap();
        let second = build_graph(&raw, &elevations, NetworkKind::Drive).unwrap();

        let ids = |g: &SlopeGraph| g.nodes().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids(&first.graph), vec![NodeId(5), NodeId(3), NodeId(9), NodeId(1)]);
        assert_eq!(ids(&first.graph), ids(&second.graph));

        let segments = |g: &SlopeGraph| {
            g.segments()
                .map(|(id, s)| (id, s.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(segments(&first.graph), segments(&second.graph));
    }
}
