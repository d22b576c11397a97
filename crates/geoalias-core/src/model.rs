// crates/geoalias-core/src/model.rs

use serde::{Deserialize, Serialize};

/// One alias row from the country reference table.
///
/// A country has many aliases: its ISO codes, its common name, localized
/// names, spellings used by specific upstream systems, and so on. The
/// `alias_type`, `source`, and `language` fields classify the alias;
/// `source` and `language` may be empty when that metadata is absent.
///
/// Records are immutable once loaded: the [`AliasStore`](crate::AliasStore)
/// owns the sequence and everything downstream reads it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryAlias {
    pub country_id: String,
    pub alias: String,
    pub alias_type: String,
    pub source: String,
    pub language: String,
}

impl CountryAlias {
    /// A record without source/language metadata.
    pub fn new(
        country_id: impl Into<String>,
        alias: impl Into<String>,
        alias_type: impl Into<String>,
    ) -> Self {
        CountryAlias {
            country_id: country_id.into(),
            alias: alias.into(),
            alias_type: alias_type.into(),
            source: String::new(),
            language: String::new(),
        }
    }
}

/// Constrains a lookup to a subset of alias records.
///
/// Each dimension, if present, is a comma-separated list of acceptable
/// values ("ISO2,ISO3" matches either code type). Values are compared
/// case-insensitively; an absent dimension matches everything, including
/// records whose corresponding field is empty.
///
/// # Examples
///
/// ```rust
/// use geoalias_core::AliasFilter;
///
/// let filter = AliasFilter::default()
///     .with_alias_type("common")
///     .with_language("en");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasFilter {
    pub alias_type: Option<String>,
    pub source: Option<String>,
    pub language: Option<String>,
}

impl AliasFilter {
    pub fn with_alias_type(mut self, alias_type: impl Into<String>) -> Self {
        self.alias_type = Some(alias_type.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
