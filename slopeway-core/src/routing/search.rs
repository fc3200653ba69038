use hashbrown::HashMap;
use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::{
    dijkstra::settled_distances,
    path::{PathOutcome, PathResult, TraversedSegment},
};
use crate::{Error, NodeId, model::ThresholdSubgraph};

/// Shortest path by segment length over the admitted segments of
/// `subgraph`.
///
/// Lengths are compared at millimetre resolution: each segment counts as
/// its length rounded to the nearest millimetre, so a returned path may be
/// longer than the true shortest one by up to half a millimetre per
/// segment. Among equally short paths the one whose node id sequence is
/// lexicographically smallest is returned, so repeated queries agree.
///
/// # Errors
///
/// `Error::UnknownNode` if either endpoint is not in the node set
pub fn find_path(
    subgraph: &ThresholdSubgraph,
    source: NodeId,
    destination: NodeId,
) -> Result<PathOutcome, Error> {
    let graph = subgraph.base();
    let source_index = graph.node_index(source).ok_or(Error::UnknownNode(source))?;
    let destination_index = graph
        .node_index(destination)
        .ok_or(Error::UnknownNode(destination))?;

    // Distances to the destination; every node on a shortest path from the
    // source is settled before the source itself
    let to_destination = settled_distances(subgraph, destination_index, Some(source_index));

    if !to_destination.contains_key(&source_index) {
        debug!(
            "No path from {source} to {destination} at threshold {}%",
            subgraph.threshold()
        );
        return Ok(PathOutcome::NoPathFound);
    }

    let path = walk_smallest_ids(subgraph, &to_destination, source_index, destination_index);
    debug!(
        "Path from {source} to {destination} at threshold {}%: {} segments, {:.1} m",
        subgraph.threshold(),
        path.segments.len(),
        path.total_length
    );
    Ok(PathOutcome::Found(path))
}

/// Follows the shortest-path DAG from source to destination, always taking
/// the admissible neighbor with the smallest id.
fn walk_smallest_ids(
    subgraph: &ThresholdSubgraph,
    to_destination: &HashMap<NodeIndex, u64>,
    source: NodeIndex,
    destination: NodeIndex,
) -> PathResult {
    let graph = subgraph.base();
    let mut nodes = vec![graph.node_at(source).id];
    let mut segments = Vec::new();
    let mut current = source;

    while current != destination {
        let Some(&remaining) = to_destination.get(&current) else {
            break;
        };

        let next = subgraph
            .admissible_edges(current)
            .filter(|(_, next, segment)| {
                to_destination
                    .get(next)
                    .is_some_and(|&d| d + segment.weight() == remaining)
            })
            .min_by_key(|(_, next, _)| graph.node_at(*next).id);

        let Some((edge, next, segment)) = next else {
            break;
        };

        let from = graph.node_at(current).id;
        let to = graph.node_at(next).id;
        segments.push(TraversedSegment {
            segment: EdgeIndex::index(edge),
            from,
            to,
            length: segment.length,
            slope: segment.slope_from(from),
            elevation_change: segment.elevation_change_from(from),
        });
        nodes.push(to);
        current = next;
    }

    let total_length = segments.iter().map(|s| s.length).sum();

    PathResult {
        threshold: subgraph.threshold(),
        nodes,
        segments,
        total_length,
    }
}
