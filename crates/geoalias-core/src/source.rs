// crates/geoalias-core/src/source.rs

//! The boundary to the backing alias table.
//!
//! The resolver never talks to a warehouse directly; it pulls records
//! through [`AliasSource`], which a deployment backs with its analytical
//! store of choice. Retry policy, credentials, and query shape all live
//! behind this trait.

use crate::error::Result;
use crate::model::CountryAlias;

/// Names the dataset and table an [`AliasSource`] reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRef {
    pub dataset: String,
    pub table: String,
}

impl DatasetRef {
    pub fn new(dataset: impl Into<String>, table: impl Into<String>) -> Self {
        DatasetRef {
            dataset: dataset.into(),
            table: table.into(),
        }
    }
}

/// Bulk loader for country alias records.
///
/// Implementations must exclude rows where the country id, alias, or alias
/// type is null (the equivalent of `CountryId IS NOT NULL AND Alias IS NOT
/// NULL AND AliasType IS NOT NULL` pushed down to the source) and map
/// absent source/language metadata to the empty string.
///
/// Errors surface as [`GeoError::SourceUnavailable`] or, for slow sources,
/// [`GeoError::SourceTimeout`].
///
/// [`GeoError::SourceUnavailable`]: crate::GeoError::SourceUnavailable
/// [`GeoError::SourceTimeout`]: crate::GeoError::SourceTimeout
pub trait AliasSource {
    fn load(&self, dataset: &DatasetRef) -> Result<Vec<CountryAlias>>;
}

/// An [`AliasSource`] over a fixed in-memory table.
///
/// Useful for embedding a small alias set directly in a binary, and as the
/// source of choice in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAliasSource {
    records: Vec<CountryAlias>,
}

impl StaticAliasSource {
    pub fn new(records: Vec<CountryAlias>) -> Self {
        StaticAliasSource { records }
    }
}

impl AliasSource for StaticAliasSource {
    fn load(&self, _dataset: &DatasetRef) -> Result<Vec<CountryAlias>> {
        Ok(self.records.clone())
    }
}
