//! Street network model

pub mod components;
pub mod network;

pub use components::{StreetNode, StreetSegment};
pub use network::{IndexedPoint, SlopeGraph};
