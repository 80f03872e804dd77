// SPDX-License-Identifier: MPL-2.0
//! Pure translation-key resolution: fallback chain and parameter
//! substitution. Holds no state; identical inputs always produce identical
//! output.

use super::catalog::Catalogs;
use super::Language;

/// Resolves `key` for `language`, falling back to the default language and
/// finally to the key itself, then substitutes `params`.
///
/// Substitution is a sequential pass: each `(name, value)` entry, in slice
/// order, replaces every occurrence of the literal token `{name}`. A later
/// entry's scan sees text substituted by an earlier one, so entry order can
/// matter when a value itself contains a `{token}` pattern. Unresolved keys
/// are returned verbatim, without substitution, so missing translations stay
/// visible rather than blank.
pub fn resolve(
    catalogs: &Catalogs,
    language: Language,
    key: &str,
    params: &[(&str, &str)],
) -> String {
    let mut found = catalogs.lookup(language, key);
    if found.is_none() && language != Language::default() {
        found = catalogs.lookup(Language::default(), key);
    }

    match found {
        Some(text) => interpolate(text, params),
        None => key.to_string(),
    }
}

fn interpolate(text: &str, params: &[(&str, &str)]) -> String {
    let mut out = text.to_string();
    for (name, value) in params {
        let token = format!("{{{name}}}");
        out = out.replace(&token, value);
    }
    out
}
