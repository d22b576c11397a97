// crates/geoalias-core/src/resolver.rs

//! The resolution engine: bidirectional country lookups over the alias
//! store, with ambiguity suppression and per-operation memoization.

use std::collections::HashMap;

use crate::error::Result;
use crate::filter::FilterSpec;
use crate::fuzzy;
use crate::model::{AliasFilter, CountryAlias};
use crate::source::{AliasSource, DatasetRef};
use crate::store::AliasStore;
use crate::text::equals_fold;

/// Resolves country identifiers against the loaded alias set.
///
/// Every operation is idempotent and safe to call against an unloaded
/// store: the first lookup triggers the bulk load, a failed load surfaces
/// unchanged and the next call retries. Results are memoized per
/// (subject, filter) pair in three independent tables — id→alias,
/// alias→id exact, and alias→id fuzzy. The fuzzy table is separate so a
/// heuristic hit can never masquerade as an exact one.
///
/// A lookup that matches two or more records disagreeing on the target
/// value returns the empty string, exactly like a lookup that matches
/// nothing: ambiguity is suppressed, never resolved by precedence, and
/// only non-empty results are cached.
///
/// The engine owns all of its state. Methods take `&mut self`, which
/// gives single-flight loads and atomic cache updates for free; to share
/// a resolver across threads, wrap it in a `Mutex`.
#[derive(Debug)]
pub struct CountryResolver<S> {
    store: AliasStore<S>,
    // country id → alias
    alias_cache: HashMap<String, String>,
    // alias → country id, exact matches only
    id_cache: HashMap<String, String>,
    // alias → country id via fuzzy ranking
    fuzzy_cache: HashMap<String, String>,
}

impl<S: AliasSource> CountryResolver<S> {
    pub fn new(source: S, dataset: DatasetRef) -> Self {
        CountryResolver {
            store: AliasStore::new(source, dataset),
            alias_cache: HashMap::new(),
            id_cache: HashMap::new(),
            fuzzy_cache: HashMap::new(),
        }
    }

    /// Resolves a country id to one of its aliases under `filter`.
    ///
    /// Returns the empty string when the id is unknown, when no record
    /// passes the filter, or when the matching records carry more than one
    /// distinct alias value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoalias_core::{AliasFilter, CountryAlias, CountryResolver, DatasetRef, StaticAliasSource};
    ///
    /// let source = StaticAliasSource::new(vec![CountryAlias::new("NL", "NLD", "ISO3")]);
    /// let mut resolver = CountryResolver::new(source, DatasetRef::new("geo", "countries"));
    ///
    /// let iso3 = AliasFilter::default().with_alias_type("ISO3");
    /// assert_eq!(resolver.id_to_alias("nl", Some(&iso3)).unwrap(), "NLD");
    /// ```
    pub fn id_to_alias(&mut self, country_id: &str, filter: Option<&AliasFilter>) -> Result<String> {
        if country_id.is_empty() {
            return Ok(String::new());
        }
        self.store.ensure_loaded()?;

        let spec = FilterSpec::new(filter);
        let key = spec.cache_key(country_id);
        if let Some(hit) = self.alias_cache.get(&key) {
            return Ok(hit.clone());
        }

        let mut alias = String::new();
        for record in self.store.records() {
            if !equals_fold(&record.country_id, country_id) {
                continue;
            }
            if !spec.carried_by(record) {
                continue;
            }
            if !alias.is_empty() && alias != record.alias {
                // double match: degrade to "no match"
                alias.clear();
                break;
            }
            alias = record.alias.clone();
        }

        if !alias.is_empty() {
            self.alias_cache.insert(key, alias.clone());
        }
        Ok(alias)
    }

    /// Resolves an alias to its country id.
    ///
    /// The input is trimmed; an empty input resolves to the empty string
    /// without touching the store. Exact matching is case-insensitive.
    /// When it comes up empty and `fuzzy` is set, the candidate pool is
    /// ranked by approximate similarity and the winner is re-resolved
    /// through the exact path, so fuzzy hits obey the same ambiguity rule.
    pub fn alias_to_id(
        &mut self,
        alias: &str,
        filter: Option<&AliasFilter>,
        fuzzy: bool,
    ) -> Result<String> {
        let alias = alias.trim();
        if alias.is_empty() {
            return Ok(String::new());
        }
        self.store.ensure_loaded()?;

        let spec = FilterSpec::new(filter);
        let id = self.match_exact(alias, &spec);
        if !id.is_empty() || !fuzzy {
            return Ok(id);
        }
        Ok(self.match_fuzzy(alias, &spec))
    }

    /// Translates an alias into another alias, chained through the id.
    ///
    /// Equivalent to `alias_to_id` under `filter_from` followed by
    /// `id_to_alias` under `filter_to`; an empty intermediate id
    /// short-circuits to the empty string without the second lookup.
    pub fn alias_to_alias(
        &mut self,
        alias_from: &str,
        filter_from: Option<&AliasFilter>,
        filter_to: Option<&AliasFilter>,
        fuzzy: bool,
    ) -> Result<String> {
        let country_id = self.alias_to_id(alias_from, filter_from, fuzzy)?;
        if country_id.is_empty() {
            return Ok(String::new());
        }
        self.id_to_alias(&country_id, filter_to)
    }

    /// Discards the loaded records and every derived cache. The next
    /// lookup reloads from the source.
    pub fn clear(&mut self) {
        self.store.clear();
        self.clear_caches();
    }

    /// Drops the memoization tables while keeping the loaded records.
    pub fn clear_caches(&mut self) {
        self.alias_cache.clear();
        self.id_cache.clear();
        self.fuzzy_cache.clear();
    }

    /// Number of records currently loaded.
    pub fn loaded_aliases(&self) -> usize {
        self.store.len()
    }

    fn match_exact(&mut self, alias: &str, spec: &FilterSpec) -> String {
        let key = spec.cache_key(alias);
        if let Some(hit) = self.id_cache.get(&key) {
            return hit.clone();
        }

        let mut id = String::new();
        for record in self.store.records() {
            if !spec.allows(record) {
                continue;
            }
            if !equals_fold(&record.alias, alias) {
                continue;
            }
            if !id.is_empty() && id != record.country_id {
                // double match: degrade to "no match"
                id.clear();
                break;
            }
            id = record.country_id.clone();
        }

        if !id.is_empty() {
            self.id_cache.insert(key, id.clone());
        }
        id
    }

    fn match_fuzzy(&mut self, alias: &str, spec: &FilterSpec) -> String {
        let key = spec.cache_key(alias);
        if let Some(hit) = self.fuzzy_cache.get(&key) {
            return hit.clone();
        }

        let winner = {
            let pool: Vec<&str> = self
                .store
                .records()
                .iter()
                .filter(|record| spec.allows(record))
                .map(|record| record.alias.as_str())
                .collect();
            match fuzzy::best_match(alias, &pool) {
                Some(winner) => winner.to_owned(),
                None => return String::new(),
            }
        };

        // the winner still goes through the exact path, so a candidate
        // shared by two countries stays suppressed as ambiguous
        let id = self.match_exact(&winner, spec);
        if !id.is_empty() {
            self.fuzzy_cache.insert(key, id.clone());
        }
        id
    }
}
