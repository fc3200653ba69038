use std::borrow::Cow;

use geo::Point;
use hashbrown::HashMap;
use slopeway::*;

/// Alpha(1) 0 m -- 100 m, 5% -- Beta(2) 5 m -- 50 m, flat -- Gamma(3) 5 m,
/// plus Summit(4) 40 m reached from Gamma by a 35% climb over 100 m
fn raw() -> (RawTopology, HashMap<NodeId, f64>) {
    let mut raw = RawTopology::new();
    raw.add_node(NodeId(1), 40.000, -80.0)
        .add_node(NodeId(2), 40.001, -80.0)
        .add_node(NodeId(3), 40.002, -80.0)
        .add_node(NodeId(4), 40.003, -80.0);
    raw.add_edge(RawEdge::new(NodeId(1), NodeId(2), 100.0))
        .add_edge(RawEdge::new(NodeId(2), NodeId(3), 50.0))
        .add_edge(RawEdge::new(NodeId(3), NodeId(4), 100.0));
    let elevations = [
        (NodeId(1), 0.0),
        (NodeId(2), 5.0),
        (NodeId(3), 5.0),
        (NodeId(4), 40.0),
    ]
    .into_iter()
    .collect();
    (raw, elevations)
}

fn model(config: SlopeModelConfig) -> SlopeModel {
    let (raw, elevations) = raw();
    SlopeModel::build(&raw, &elevations, config).unwrap()
}

fn config() -> SlopeModelConfig {
    SlopeModelConfig {
        locality_suffix: Some("Testville".to_string()),
        ..SlopeModelConfig::default()
    }
}

/// Answers only fully qualified queries
fn geocoder(query: &str) -> Option<Point<f64>> {
    match query {
        "Alpha, Testville" => Some(Point::new(-80.0, 40.0)),
        "Gamma, Testville" => Some(Point::new(-80.0, 40.002)),
        "Summit, Testville" => Some(Point::new(-80.0, 40.003)),
        _ => None,
    }
}

#[test]
fn model_precomputes_network_thresholds() {
    let model = model(config());
    assert_eq!(model.thresholds().collect::<Vec<_>>(), (1..=40).collect::<Vec<_>>());
    assert_eq!(model.node_count(), 4);
    assert_eq!(model.segment_count(), 3);
    assert!(model.report().is_clean());

    let coverage = model.coverage();
    assert_eq!(coverage[0], (1, 1));
    assert_eq!(coverage[4], (5, 2));
    assert_eq!(coverage[39], (40, 3));
    assert!(model.to_string().contains("4 nodes"));
}

#[test]
fn sequential_and_parallel_models_agree() {
    let parallel = model(config());
    let sequential = model(SlopeModelConfig {
        parallel: false,
        ..config()
    });
    assert_eq!(parallel.coverage(), sequential.coverage());
}

#[test]
fn route_found_at_five_percent() {
    let model = model(config());
    let response = find_route(&model, &geocoder, "Alpha", "Gamma", 5.0).unwrap();

    assert_eq!((response.source, response.destination), (NodeId(1), NodeId(3)));
    let path = response.outcome.path().unwrap();
    assert_eq!(path.nodes, vec![NodeId(1), NodeId(2), NodeId(3)]);

    let summary = response.summary.route().unwrap();
    assert!((summary.total_length - 150.0).abs() < 1e-9);
    assert!((summary.max_slope - 5.0).abs() < 1e-9);
    assert!(summary.tight);

    let collection = response.to_geojson(&model).unwrap().unwrap();
    assert_eq!(collection.features.len(), 2);
}

#[test]
fn isolated_location_snaps_to_connected_node() {
    let model = model(config());
    // Below 5% Alpha has no admitted segment; Beta is the nearest node with one
    let response = find_route(&model, &geocoder, "Alpha", "Gamma", 4.0).unwrap();
    assert_eq!(response.source, NodeId(2));
    assert!(response.is_found());
}

#[test]
fn summit_unreachable_below_its_grade() {
    let model = model(config());
    let response = find_route_by_ids(&model, NodeId(1), NodeId(4), 30.0).unwrap();
    assert_eq!(response.outcome, PathOutcome::NoPathFound);
    assert_eq!(response.summary, RouteSummary::NoRoute);
    assert!(response.to_geojson(&model).unwrap().is_none());

    let response = find_route_by_ids(&model, NodeId(1), NodeId(4), 35.0).unwrap();
    assert!(response.is_found());
}

#[test]
fn unknown_location_is_reported() {
    let model = model(config());
    let result = find_route(&model, &geocoder, "Nowhere", "Gamma", 5.0);
    assert!(matches!(result, Err(Error::LocationNotFound(q)) if q == "Nowhere, Testville"));

    // Without the suffix the geocoder cannot match
    let bare = self::model(SlopeModelConfig::default());
    assert!(find_route(&bare, &geocoder, "Alpha", "Gamma", 5.0).is_err());
}

#[test]
fn one_to_many_keeps_target_order() {
    let model = model(config());
    let targets = [NodeId(4), NodeId(3), NodeId(1)];
    let responses = find_routes_one_to_many(&model, NodeId(1), &targets, 5.0).unwrap();

    assert_eq!(responses.len(), 3);
    assert!(!responses[0].is_found());
    assert_eq!(responses[1].destination, NodeId(3));
    assert!(responses[1].is_found());
    let own = responses[2].outcome.path().unwrap();
    assert_eq!(own.nodes, vec![NodeId(1)]);

    let result = find_routes_one_to_many(&model, NodeId(1), &[NodeId(3), NodeId(99)], 5.0);
    assert!(matches!(
        result,
        Err(Error::Core(slopeway_core::Error::UnknownNode(NodeId(99))))
    ));
}

#[test]
fn fractional_threshold_is_filtered_on_demand() {
    let model = model(config());
    assert!(matches!(model.subgraph_for(5.0).unwrap(), Cow::Borrowed(_)));

    let sub = model.subgraph_for(4.5).unwrap();
    assert!(matches!(sub, Cow::Owned(_)));
    assert!((sub.threshold() - 4.5).abs() < f64::EPSILON);
    assert_eq!(sub.segment_count(), 1);

    assert!(matches!(
        model.subgraph_for(0.0),
        Err(Error::Core(slopeway_core::Error::InvalidThreshold(_)))
    ));
}
