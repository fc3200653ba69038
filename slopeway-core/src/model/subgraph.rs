//! Threshold-derived, read-only views over the base graph

use std::sync::Arc;

use fixedbitset::FixedBitSet;
use geo::Point;
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::{SlopeGraph, StreetSegment};
use crate::{NodeId, SegmentId, SlopePercent};

/// All nodes of the base graph plus the segments whose absolute slope does
/// not exceed `threshold`.
///
/// Holds a shared handle to the base graph and a bitset over segment ids;
/// no node or segment data is copied.
#[derive(Debug, Clone)]
pub struct ThresholdSubgraph {
    graph: Arc<SlopeGraph>,
    threshold: SlopePercent,
    admitted: FixedBitSet,
}

impl ThresholdSubgraph {
    pub(crate) fn from_parts(
        graph: Arc<SlopeGraph>,
        threshold: SlopePercent,
        admitted: FixedBitSet,
    ) -> Self {
        Self {
            graph,
            threshold,
            admitted,
        }
    }

    pub fn threshold(&self) -> SlopePercent {
        self.threshold
    }

    /// The base graph this view was derived from
    pub fn base(&self) -> &Arc<SlopeGraph> {
        &self.graph
    }

    /// Node set is always the full base node set
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.graph.contains_node(id)
    }

    pub fn contains_segment(&self, id: SegmentId) -> bool {
        self.admitted.contains(id)
    }

    pub fn segment_count(&self) -> usize {
        self.admitted.count_ones(..)
    }

    /// Admitted segment ids in ascending order
    pub fn segment_ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.admitted.ones()
    }

    /// Admitted segments in ascending id order
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &StreetSegment)> {
        self.admitted.ones().filter_map(|id| {
            self.graph
                .graph
                .edge_weight(EdgeIndex::new(id))
                .map(|segment| (id, segment))
        })
    }

    /// Every admitted segment of `self` is admitted in `other`
    pub fn is_subset_of(&self, other: &ThresholdSubgraph) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph) && self.admitted.is_subset(&other.admitted)
    }

    /// Admitted segments touching `node`, with the far endpoint
    pub(crate) fn admissible_edges(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &StreetSegment)> {
        self.graph
            .incident(node)
            .filter(|(edge, _, _)| self.admitted.contains(edge.index()))
    }

    /// Node has at least one admitted segment
    pub(crate) fn is_connected(&self, node: NodeIndex) -> bool {
        self.admissible_edges(node).next().is_some()
    }

    /// Nearest node that touches at least one admitted segment.
    ///
    /// Snapping a geocoded location onto an isolated node would always
    /// produce an empty route, so such nodes are skipped.
    pub fn nearest_connected_node(&self, point: &Point<f64>) -> Option<NodeId> {
        self.graph
            .nodes_by_distance(point)
            .find(|&index| self.is_connected(index))
            .map(|index| self.graph.node_at(index).id)
    }
}
