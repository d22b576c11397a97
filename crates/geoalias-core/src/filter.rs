// crates/geoalias-core/src/filter.rs

//! The filter predicate: evaluates whether an alias record satisfies a
//! requested combination of alias-type / source / language constraints.
//!
//! Within a dimension the comma-separated values are alternatives (OR);
//! across dimensions all constraints must hold (AND). An [`AliasFilter`]
//! is normalized into a [`FilterSpec`] once per query so the per-record
//! checks and the cache key never re-fold the same strings.

use crate::model::{AliasFilter, CountryAlias};
use crate::text::list_contains;

/// Joins cache-key parts. A control character cannot occur in alias
/// content, so keys never collide with aliases that contain punctuation.
const KEY_SEPARATOR: char = '\u{1f}';

/// An [`AliasFilter`] with every dimension lowercased, ready for
/// per-record evaluation. An empty dimension is unconstrained.
#[derive(Debug, Clone, Default)]
pub(crate) struct FilterSpec {
    alias_type: String,
    source: String,
    language: String,
}

impl FilterSpec {
    pub(crate) fn new(filter: Option<&AliasFilter>) -> Self {
        fn lower(dim: &Option<String>) -> String {
            dim.as_deref().map(str::to_lowercase).unwrap_or_default()
        }

        match filter {
            Some(f) => FilterSpec {
                alias_type: lower(&f.alias_type),
                source: lower(&f.source),
                language: lower(&f.language),
            },
            None => FilterSpec::default(),
        }
    }

    /// Alias→id direction: every constrained dimension must list the
    /// record's field value among its accepted tokens.
    ///
    /// A filter of `alias_type: "ISO2,ISO3"` accepts a record typed
    /// `"ISO3"`; it does not accept a record typed `"common"`.
    pub(crate) fn allows(&self, record: &CountryAlias) -> bool {
        (self.alias_type.is_empty() || list_contains(&self.alias_type, &record.alias_type))
            && (self.source.is_empty() || list_contains(&self.source, &record.source))
            && (self.language.is_empty() || list_contains(&self.language, &record.language))
    }

    /// Id→alias direction: the record's own comma-separated field must
    /// carry the constrained value as a token.
    ///
    /// A record typed `"ISO2,common"` carries the requested type
    /// `"common"`; a record typed `"common"` does not carry the request
    /// `"ISO2,common"`.
    pub(crate) fn carried_by(&self, record: &CountryAlias) -> bool {
        (self.alias_type.is_empty() || list_contains(&record.alias_type, &self.alias_type))
            && (self.source.is_empty() || list_contains(&record.source, &self.source))
            && (self.language.is_empty() || list_contains(&record.language, &self.language))
    }

    /// Memoization key for `subject` under this filter. The subject is
    /// lowercased like the dimensions; the scans themselves are
    /// case-insensitive, so equal-up-to-case queries share an entry.
    pub(crate) fn cache_key(&self, subject: &str) -> String {
        let mut key = subject.to_lowercase();
        for part in [&self.alias_type, &self.source, &self.language] {
            key.push(KEY_SEPARATOR);
            key.push_str(part);
        }
        key
    }
}
