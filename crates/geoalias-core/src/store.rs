// crates/geoalias-core/src/store.rs

use crate::error::Result;
use crate::model::CountryAlias;
use crate::source::{AliasSource, DatasetRef};

/// The full set of alias records, lazily loaded from the backing source.
///
/// The store is populated on first use and immutable until [`clear`]
/// forces the next lookup to reload. Loads are all-or-nothing: if the
/// source errors, the store stays empty and the failed operation can
/// simply be retried.
///
/// [`clear`]: AliasStore::clear
#[derive(Debug)]
pub struct AliasStore<S> {
    source: S,
    dataset: DatasetRef,
    records: Vec<CountryAlias>,
}

impl<S: AliasSource> AliasStore<S> {
    pub fn new(source: S, dataset: DatasetRef) -> Self {
        AliasStore {
            source,
            dataset,
            records: Vec::new(),
        }
    }

    /// Loads the record sequence from the source if it is empty.
    ///
    /// Blocking; the source call is the only external I/O in the crate.
    pub fn ensure_loaded(&mut self) -> Result<()> {
        if !self.records.is_empty() {
            return Ok(());
        }
        // a failed load leaves `records` empty, so the next call retries
        self.records = self.source.load(&self.dataset)?;
        Ok(())
    }

    pub fn records(&self) -> &[CountryAlias] {
        &self.records
    }

    /// Discards the record sequence. Derived caches are owned by the
    /// resolver and must be cleared together with the store.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
