// crates/geoalias-core/src/error.rs

use std::time::Duration;
use thiserror::Error;

/// Crate-wide error type.
///
/// Nothing here is fatal to the process: every failure is local to the
/// triggering call and recoverable by retrying or by supplying different
/// input. A failed alias load in particular leaves the store untouched, so
/// the next lookup retries the load.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The backing alias source failed on transport or query level.
    #[error("alias source unavailable: {0}")]
    SourceUnavailable(String),

    /// The backing alias source did not answer in time. Kept distinct from
    /// [`GeoError::SourceUnavailable`] so callers can apply a different
    /// retry policy to slow sources than to broken ones.
    #[error("alias source timed out after {0:?}")]
    SourceTimeout(Duration),

    /// The external geocoding service failed.
    #[error("geocoder error: {0}")]
    Geocoder(String),

    /// Writing a staged batch to the object store failed.
    #[error("object store error: {0}")]
    ObjectStore(String),

    /// The warehouse table rejected a fetch or bulk import.
    #[error("warehouse error: {0}")]
    Warehouse(String),

    /// A geocode record could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeoError>;
