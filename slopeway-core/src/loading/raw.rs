//! Raw inputs handed over by the map-data and elevation collaborators

use std::collections::{BTreeMap, HashMap as StdHashMap};

use geo::LineString;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{Meters, NodeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawEdge {
    pub a: NodeId,
    pub b: NodeId,
    pub length: Meters,
    pub oneway: bool,
    pub name: Option<String>,
    pub geometry: Option<LineString<f64>>,
}

impl RawEdge {
    pub fn new(a: NodeId, b: NodeId, length: Meters) -> Self {
        Self {
            a,
            b,
            length,
            oneway: false,
            name: None,
            geometry: None,
        }
    }

    #[must_use]
    pub fn oneway(mut self, oneway: bool) -> Self {
        self.oneway = oneway;
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: LineString<f64>) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

/// Ordered street topology. Order is significant: node and segment ids in
/// the built graph follow it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTopology {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

impl RawTopology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: NodeId, lat: f64, lon: f64) -> &mut Self {
        self.nodes.push(RawNode {
            id,
            lat,
            lon,
        });
        self
    }

    pub fn add_edge(&mut self, edge: RawEdge) -> &mut Self {
        self.edges.push(edge);
        self
    }
}

/// Per-node elevation source, `None` when no sample exists
pub trait ElevationLookup {
    fn elevation(&self, node: NodeId) -> Option<Meters>;
}

impl ElevationLookup for HashMap<NodeId, Meters> {
    fn elevation(&self, node: NodeId) -> Option<Meters> {
        self.get(&node).copied()
    }
}

impl ElevationLookup for StdHashMap<NodeId, Meters> {
    fn elevation(&self, node: NodeId) -> Option<Meters> {
        self.get(&node).copied()
    }
}

impl ElevationLookup for BTreeMap<NodeId, Meters> {
    fn elevation(&self, node: NodeId) -> Option<Meters> {
        self.get(&node).copied()
    }
}

impl<T: ElevationLookup + ?Sized> ElevationLookup for &T {
    fn elevation(&self, node: NodeId) -> Option<Meters> {
        (**self).elevation(node)
    }
}
