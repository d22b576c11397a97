// crates/geoalias-core/src/geocode.rs

//! Geocode lookup cache with warehouse write-back.
//!
//! Addresses are resolved in three stages: the in-memory map, the durable
//! warehouse table of previously resolved addresses, and finally the
//! external geocoding service. Fresh results from the external service are
//! staged and, on [`GeocodeCache::flush`], written to the object store as
//! one newline-delimited JSON batch that the warehouse bulk-imports.
//!
//! All state is owned by the [`GeocodeCache`] instance; there are no
//! process-wide maps.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// One persisted geocode row: the queried address and the raw payload the
/// external service returned for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCodeRecord {
    pub address: String,
    pub geocodes: Value,
}

/// External geocoding service.
pub trait Geocoder {
    /// Resolves an address. `Ok(None)` means the service answered but has
    /// no result for the address; misses are not cached or staged.
    fn geocode(&self, address: &str) -> Result<Option<Value>>;
}

/// Durable table of previously resolved addresses.
pub trait GeocodeTable {
    /// Rows stored for the exact address string.
    fn fetch(&self, address: &str) -> Result<Vec<GeoCodeRecord>>;

    /// Bulk-imports a staged newline-delimited JSON object into the table
    /// and removes the object afterwards.
    fn import(&self, object_name: &str) -> Result<()>;
}

/// Staging area for batch uploads.
pub trait ObjectStore {
    fn put(&self, name: &str, payload: &[u8]) -> Result<()>;
}

/// Caches geocode lookups and stages new results for persistence.
pub struct GeocodeCache<G, T, O> {
    geocoder: G,
    table: T,
    objects: O,
    resolved: HashMap<String, Value>,
    staged: Vec<GeoCodeRecord>,
}

impl<G: Geocoder, T: GeocodeTable, O: ObjectStore> GeocodeCache<G, T, O> {
    pub fn new(geocoder: G, table: T, objects: O) -> Self {
        GeocodeCache {
            geocoder,
            table,
            objects,
            resolved: HashMap::new(),
            staged: Vec::new(),
        }
    }

    /// Resolves an address: memory, then warehouse, then the external
    /// service. A result obtained from the external service is staged for
    /// the next [`flush`](GeocodeCache::flush).
    pub fn lookup(&mut self, address: &str) -> Result<Option<Value>> {
        if let Some(hit) = self.resolved.get(address) {
            return Ok(Some(hit.clone()));
        }

        if let Some(stored) = self.fetch_stored(address) {
            self.resolved.insert(address.to_string(), stored.clone());
            return Ok(Some(stored));
        }

        let Some(geocodes) = self.geocoder.geocode(address)? else {
            return Ok(None);
        };
        self.staged.push(GeoCodeRecord {
            address: address.to_string(),
            geocodes: geocodes.clone(),
        });
        self.resolved.insert(address.to_string(), geocodes.clone());
        Ok(Some(geocodes))
    }

    /// Warehouse lookup. Read failures degrade to the external service
    /// rather than failing the whole resolution.
    fn fetch_stored(&self, address: &str) -> Option<Value> {
        let rows = match self.table.fetch(address) {
            Ok(rows) => rows,
            Err(err) => {
                warn!("geocode table lookup failed for {address:?}: {err}");
                return None;
            }
        };
        if rows.len() > 1 {
            warn!("more than one geocode row for address {address:?}");
        }
        rows.into_iter().next().map(|row| row.geocodes)
    }

    /// Number of addresses staged for the next flush.
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Persists the staged records: one timestamped newline-delimited JSON
    /// object in the store, bulk-imported into the warehouse table. The
    /// staging buffer is cleared only after both steps succeed. Returns
    /// the number of addresses flushed; an empty buffer is a no-op.
    pub fn flush(&mut self) -> Result<usize> {
        if self.staged.is_empty() {
            return Ok(0);
        }
        info!("saving {} addresses to the geocode table", self.staged.len());

        let mut payload = Vec::new();
        for record in &self.staged {
            serde_json::to_writer(&mut payload, record)?;
            payload.push(b'\n');
        }

        let object_name = format!("geocode_{}", unix_millis());
        self.objects.put(&object_name, &payload)?;
        self.table.import(&object_name)?;

        let flushed = self.staged.len();
        self.staged.clear();
        Ok(flushed)
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoError;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct GeocoderState {
        calls: usize,
        results: HashMap<String, Value>,
    }

    #[derive(Clone, Default)]
    struct FakeGeocoder(Rc<RefCell<GeocoderState>>);

    impl FakeGeocoder {
        fn with(address: &str, payload: Value) -> Self {
            let fake = FakeGeocoder::default();
            fake.0.borrow_mut().results.insert(address.into(), payload);
            fake
        }

        fn calls(&self) -> usize {
            self.0.borrow().calls
        }
    }

    impl Geocoder for FakeGeocoder {
        fn geocode(&self, address: &str) -> Result<Option<Value>> {
            let mut state = self.0.borrow_mut();
            state.calls += 1;
            Ok(state.results.get(address).cloned())
        }
    }

    #[derive(Default)]
    struct TableState {
        rows: Vec<GeoCodeRecord>,
        imported: Vec<String>,
        fail_fetch: bool,
    }

    #[derive(Clone, Default)]
    struct FakeTable(Rc<RefCell<TableState>>);

    impl GeocodeTable for FakeTable {
        fn fetch(&self, address: &str) -> Result<Vec<GeoCodeRecord>> {
            let state = self.0.borrow();
            if state.fail_fetch {
                return Err(GeoError::Warehouse("query failed".into()));
            }
            Ok(state
                .rows
                .iter()
                .filter(|row| row.address == address)
                .cloned()
                .collect())
        }

        fn import(&self, object_name: &str) -> Result<()> {
            self.0.borrow_mut().imported.push(object_name.to_string());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct FakeObjects(Rc<RefCell<Vec<(String, Vec<u8>)>>>);

    impl ObjectStore for FakeObjects {
        fn put(&self, name: &str, payload: &[u8]) -> Result<()> {
            self.0.borrow_mut().push((name.to_string(), payload.to_vec()));
            Ok(())
        }
    }

    fn payload() -> Value {
        json!([{ "lat": 52.37, "lng": 4.89 }])
    }

    #[test]
    fn second_lookup_hits_memory() {
        let geocoder = FakeGeocoder::with("Amsterdam", payload());
        let mut cache = GeocodeCache::new(geocoder.clone(), FakeTable::default(), FakeObjects::default());

        assert_eq!(cache.lookup("Amsterdam").unwrap(), Some(payload()));
        assert_eq!(cache.lookup("Amsterdam").unwrap(), Some(payload()));
        assert_eq!(geocoder.calls(), 1);
        assert_eq!(cache.staged_len(), 1);
    }

    #[test]
    fn warehouse_rows_bypass_the_external_service() {
        let geocoder = FakeGeocoder::default();
        let table = FakeTable::default();
        table.0.borrow_mut().rows.push(GeoCodeRecord {
            address: "Amsterdam".into(),
            geocodes: payload(),
        });
        let mut cache = GeocodeCache::new(geocoder.clone(), table, FakeObjects::default());

        assert_eq!(cache.lookup("Amsterdam").unwrap(), Some(payload()));
        assert_eq!(geocoder.calls(), 0);
        // nothing new was discovered, nothing to persist
        assert_eq!(cache.staged_len(), 0);
    }

    #[test]
    fn warehouse_failure_degrades_to_the_external_service() {
        let geocoder = FakeGeocoder::with("Amsterdam", payload());
        let table = FakeTable::default();
        table.0.borrow_mut().fail_fetch = true;
        let mut cache = GeocodeCache::new(geocoder.clone(), table, FakeObjects::default());

        assert_eq!(cache.lookup("Amsterdam").unwrap(), Some(payload()));
        assert_eq!(geocoder.calls(), 1);
    }

    #[test]
    fn unresolvable_address_is_not_cached() {
        let geocoder = FakeGeocoder::default();
        let mut cache = GeocodeCache::new(geocoder.clone(), FakeTable::default(), FakeObjects::default());

        assert_eq!(cache.lookup("Nowhere").unwrap(), None);
        assert_eq!(cache.lookup("Nowhere").unwrap(), None);
        // no memory entry, so the service is asked again
        assert_eq!(geocoder.calls(), 2);
        assert_eq!(cache.staged_len(), 0);
    }

    #[test]
    fn flush_writes_ndjson_and_imports_it() {
        let geocoder = FakeGeocoder::with("Amsterdam", payload());
        let table = FakeTable::default();
        let objects = FakeObjects::default();
        let mut cache = GeocodeCache::new(geocoder, table.clone(), objects.clone());

        cache.lookup("Amsterdam").unwrap();
        assert_eq!(cache.flush().unwrap(), 1);
        assert_eq!(cache.staged_len(), 0);

        let stored = objects.0.borrow();
        let (name, bytes) = &stored[0];
        assert!(name.starts_with("geocode_"));
        let line = std::str::from_utf8(bytes).unwrap().trim_end();
        let record: GeoCodeRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.address, "Amsterdam");
        assert_eq!(record.geocodes, payload());

        assert_eq!(table.0.borrow().imported, vec![name.clone()]);
    }

    #[test]
    fn flush_without_staged_records_is_a_noop() {
        let objects = FakeObjects::default();
        let mut cache =
            GeocodeCache::new(FakeGeocoder::default(), FakeTable::default(), objects.clone());

        assert_eq!(cache.flush().unwrap(), 0);
        assert!(objects.0.borrow().is_empty());
    }
}
