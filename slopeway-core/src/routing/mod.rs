//! Shortest-path search over threshold subgraphs and result aggregation

mod dijkstra;
pub mod itinerary;
mod path;
mod search;
mod summary;

pub use path::{PathOutcome, PathResult, TraversedSegment};
pub use search::find_path;
pub use summary::{PathSummary, RouteSummary, summarize};
