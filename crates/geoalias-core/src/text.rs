// crates/geoalias-core/src/text.rs

//! Text normalization helpers shared by the filter predicate and the
//! fuzzy matcher.

/// Convert a string into a folded key suitable for approximate comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// The implementation uses the `deunicode` crate to perform a best-effort
/// transliteration from Unicode to ASCII.
///
/// # Examples
///
/// ```rust
/// use geoalias_core::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Curaçao"), "curacao");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Case-insensitive equality without diacritic folding.
///
/// Exact alias matching is case-insensitive only: `"NETHERLANDS"` equals
/// `"netherlands"`, but `"Curacao"` does not equal `"Curaçao"`. Diacritic
/// folding is reserved for the fuzzy path (see [`fold_key`]).
pub fn equals_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Whole-token containment over a comma-separated list.
///
/// Both sides are lowercased and wrapped in commas before the substring
/// test, so a value only matches at token boundaries: `"en"` is found in
/// `"en,environment"` but not in `"environment"` alone. `value` may itself
/// be a comma-joined run of tokens, in which case it must appear in `list`
/// as a contiguous run.
pub fn list_contains(list: &str, value: &str) -> bool {
    let haystack = format!(",{},", list.to_lowercase());
    let needle = format!(",{},", value.to_lowercase());
    haystack.contains(&needle)
}
