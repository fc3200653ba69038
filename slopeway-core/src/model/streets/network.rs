//! Base street graph: flat node and segment arenas with stable indices

use geo::Point;
use hashbrown::HashMap;
use petgraph::{
    graph::{EdgeIndex, NodeIndex, UnGraph},
    visit::EdgeRef,
};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{StreetNode, StreetSegment};
use crate::{NodeId, SegmentId, loading::NetworkKind};

/// R-tree entry: `[lon, lat]` of a node with its arena index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Immutable, slope-annotated street network.
///
/// Nodes and segments live in the arena of an undirected petgraph graph and
/// are addressed by their insertion index, which follows raw-input order.
/// Node ids are resolved through a lookup table instead of back references.
#[derive(Debug, Clone)]
pub struct SlopeGraph {
    pub(crate) graph: UnGraph<StreetNode, StreetSegment>,
    node_lookup: HashMap<NodeId, NodeIndex>,
    rtree: RTree<IndexedPoint>,
    network: NetworkKind,
}

impl SlopeGraph {
    pub(crate) fn with_capacity(network: NetworkKind, nodes: usize, segments: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, segments),
            node_lookup: HashMap::with_capacity(nodes),
            rtree: RTree::new(),
            network,
        }
    }

    /// Returns `None` if a node with the same id was already added
    pub(crate) fn add_node(&mut self, node: StreetNode) -> Option<NodeIndex> {
        if self.node_lookup.contains_key(&node.id) {
            return None;
        }
        let id = node.id;
        let index = self.graph.add_node(node);
        self.node_lookup.insert(id, index);
        Some(index)
    }

    pub(crate) fn add_segment(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
        segment: StreetSegment,
    ) -> EdgeIndex {
        self.graph.add_edge(a, b, segment)
    }

    pub(crate) fn replace_segment(&mut self, index: EdgeIndex, segment: StreetSegment) {
        if let Some(weight) = self.graph.edge_weight_mut(index) {
            *weight = segment;
        }
    }

    pub(crate) fn build_rtree(&mut self) {
        let points = self
            .graph
            .node_indices()
            .map(|index| {
                let node = &self.graph[index];
                IndexedPoint::new([node.geometry.x(), node.geometry.y()], index)
            })
            .collect();
        self.rtree = RTree::bulk_load(points);
    }

    pub fn network(&self) -> NetworkKind {
        self.network
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_lookup.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&StreetNode> {
        self.node_index(id).map(|index| &self.graph[index])
    }

    pub(crate) fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_lookup.get(&id).copied()
    }

    pub(crate) fn node_at(&self, index: NodeIndex) -> &StreetNode {
        &self.graph[index]
    }

    /// Nodes in raw-input order
    pub fn nodes(&self) -> impl Iterator<Item = &StreetNode> {
        self.graph.node_weights()
    }

    /// Segments in raw-input order with their stable ids
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &StreetSegment)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.id().index(), edge.weight()))
    }

    pub fn segment(&self, id: SegmentId) -> Option<&StreetSegment> {
        self.graph.edge_weight(EdgeIndex::new(id))
    }

    /// Segment joining two nodes, in either orientation
    pub fn find_segment(&self, a: NodeId, b: NodeId) -> Option<SegmentId> {
        let a = self.node_index(a)?;
        let b = self.node_index(b)?;
        self.graph.find_edge(a, b).map(EdgeIndex::index)
    }

    /// Segments touching `node`, each with the arena index of its far end
    pub(crate) fn incident(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &StreetSegment)> {
        self.graph.edges(node).map(move |edge| {
            let other = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (edge.id(), other, edge.weight())
        })
    }

    /// Nearest node by planar distance in lon/lat space
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<NodeId> {
        self.rtree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|entry| self.graph[entry.data].id)
    }

    /// Nodes ordered by distance from `point`, nearest first
    pub(crate) fn nodes_by_distance(
        &self,
        point: &Point<f64>,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.rtree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .map(|entry| entry.data)
    }
}
