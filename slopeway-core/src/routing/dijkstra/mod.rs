mod state;

use std::collections::BinaryHeap;

use hashbrown::{HashMap, hash_map::Entry};
use petgraph::graph::NodeIndex;

use crate::model::ThresholdSubgraph;
use state::State;

/// Dijkstra's algorithm over the admitted segments of a subgraph.
/// Returns settled distances (millimeters) from `origin`; stops as soon as
/// `stop_at` is settled.
pub(crate) fn settled_distances(
    subgraph: &ThresholdSubgraph,
    origin: NodeIndex,
    stop_at: Option<NodeIndex>,
) -> HashMap<NodeIndex, u64> {
    let estimated_nodes = subgraph.base().node_count().min(1000);
    let mut distances: HashMap<NodeIndex, u64> = HashMap::with_capacity(estimated_nodes);
    let mut settled: HashMap<NodeIndex, u64> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        cost: 0,
        node: origin,
    });
    distances.insert(origin, 0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip stale heap entries
        if settled.contains_key(&node) {
            continue;
        }
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }
        settled.insert(node, cost);

        if stop_at == Some(node) {
            break;
        }

        for (_, next, segment) in subgraph.admissible_edges(node) {
            if settled.contains_key(&next) {
                continue;
            }
            let next_cost = cost + segment.weight();

            match distances.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    settled
}
