// crates/geoalias-core/src/lib.rs

//! # geoalias-core
//!
//! An in-memory resolution index over country alias records. Aliases
//! (names, codes, localized variants) are bulk-loaded from a backing
//! source and resolved in both directions:
//!
//! - alias → canonical country id (exact, with optional fuzzy fallback)
//! - country id → alias (pick a representation, e.g. the ISO3 code)
//! - alias → alias (chained through the country id)
//!
//! Lookups can be constrained by alias type, data source, and language;
//! each constraint is a comma-separated list of acceptable values. A query
//! that matches records disagreeing on the target value returns the empty
//! string: ambiguity is a silent degradation, not an error.
//!
//! The crate also carries a geocode lookup cache ([`geocode::GeocodeCache`])
//! that stages newly resolved addresses and flushes them back to durable
//! storage as newline-delimited JSON.
//!
//! ```rust
//! use geoalias_core::{AliasFilter, CountryAlias, CountryResolver, DatasetRef, StaticAliasSource};
//!
//! let source = StaticAliasSource::new(vec![
//!     CountryAlias::new("NL", "Netherlands", "common"),
//!     CountryAlias::new("NL", "NLD", "ISO3"),
//! ]);
//! let mut resolver = CountryResolver::new(source, DatasetRef::new("geo", "countries"));
//!
//! let id = resolver.alias_to_id("netherlands", None, false).unwrap();
//! assert_eq!(id, "NL");
//!
//! let iso3 = resolver.id_to_alias("NL", Some(&AliasFilter::default().with_alias_type("ISO3"))).unwrap();
//! assert_eq!(iso3, "NLD");
//! ```

pub mod error;
mod filter;
pub mod fuzzy;
pub mod geocode;
pub mod model;
pub mod resolver;
pub mod source;
pub mod store;
pub mod text;

// Re-exports
pub use crate::error::{GeoError, Result};
pub use crate::geocode::{GeoCodeRecord, GeocodeCache, GeocodeTable, Geocoder, ObjectStore};
pub use crate::model::{AliasFilter, CountryAlias};
pub use crate::resolver::CountryResolver;
pub use crate::source::{AliasSource, DatasetRef, StaticAliasSource};
pub use crate::store::AliasStore;
pub use crate::text::{equals_fold, fold_key};
