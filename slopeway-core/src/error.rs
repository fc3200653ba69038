use thiserror::Error;

use crate::{NodeId, loading::SkipReason};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid segment: {reason}")]
    InvalidSegment { reason: SkipReason },
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),
    #[error("Graph build failed: {0}")]
    BuildFailure(String),
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
