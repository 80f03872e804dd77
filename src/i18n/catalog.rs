use std::collections::HashMap;

use rust_embed::RustEmbed;

use super::Language;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Immutable per-language translation trees, loaded once at startup.
///
/// Each embedded `<code>.toml` file becomes one catalog; leaves are strings
/// addressed by dot-joined paths (`"home.title"`). Catalogs are never
/// mutated after loading.
pub struct Catalogs {
    tables: HashMap<Language, toml::Table>,
}

impl Catalogs {
    /// Loads every embedded catalog whose filename matches a supported
    /// language code. Files for unknown languages are skipped.
    pub fn load() -> Self {
        let mut tables = HashMap::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(code) = filename.strip_suffix(".toml") {
                if let Some(language) = Language::from_code(code) {
                    if let Some(content) = Asset::get(filename) {
                        let text = String::from_utf8_lossy(content.data.as_ref());
                        let table: toml::Table =
                            toml::from_str(&text).expect("Failed to parse embedded catalog.");
                        tables.insert(language, table);
                    }
                }
            }
        }

        Self { tables }
    }

    /// Languages an embedded catalog was actually found for, default first.
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| self.tables.contains_key(language))
            .collect()
    }

    /// Resolves `key` as a dot-path through `language`'s catalog.
    ///
    /// Returns `None` when the language has no catalog, any path segment is
    /// missing, an intermediate segment is not a table, or the final value
    /// is not a string.
    pub fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        let table = self.tables.get(&language)?;

        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut value = table.get(first)?;
        for segment in segments {
            value = value.as_table()?.get(segment)?;
        }
        value.as_str()
    }

    #[cfg(test)]
    pub(crate) fn from_tables(tables: HashMap<Language, toml::Table>) -> Self {
        Self { tables }
    }
}
