use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] slopeway_core::Error),
    /// The geocoder had no match, or no street is reachable near it
    #[error("Location not found: {0}")]
    LocationNotFound(String),
}
