// SPDX-License-Identifier: MPL-2.0
//! Owned localization state: the active language, its persistence seam, and
//! the `t` lookup surface handed to the rest of the application.
//!
//! There is intentionally no global: the caller constructs one
//! [`Localization`] at startup and passes it where translations are needed.
//! It is the sole writer of its own state.

use std::path::PathBuf;

use crate::config;

use super::catalog::Catalogs;
use super::{resolver, Language};

/// Persistence seam for the user's chosen language.
///
/// Implementations have no failure contract: a write that cannot be
/// persisted is logged and swallowed, never surfaced.
pub trait LanguagePreferences {
    /// Returns the stored language code, if any. The value is untrusted and
    /// is validated against [`Language`] by the caller.
    fn get(&self) -> Option<String>;

    /// Stores a canonical language code.
    fn set(&mut self, code: &str);
}

/// [`LanguagePreferences`] backed by the `settings.toml` handled in
/// [`crate::config`]. Writes go through a load-modify-save of the whole
/// file so a language change never clobbers other persisted fields.
pub struct FilePreferences {
    /// Explicit file location; `None` means the platform config directory.
    path: Option<PathBuf>,
}

impl FilePreferences {
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Uses an explicit settings file instead of the platform default.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn load(&self) -> config::Config {
        let loaded = match &self.path {
            Some(path) => config::load_from_path(path),
            None => config::load(),
        };
        loaded.unwrap_or_default()
    }
}

impl Default for FilePreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePreferences for FilePreferences {
    fn get(&self) -> Option<String> {
        self.load().language
    }

    fn set(&mut self, code: &str) {
        let mut config = self.load();
        config.language = Some(code.to_string());
        let result = match &self.path {
            Some(path) => config::save_to_path(&config, path),
            None => config::save(&config),
        };
        if let Err(err) = result {
            tracing::warn!(%err, "failed to persist language preference");
        }
    }
}

/// Current language plus the bound translation surface.
pub struct Localization {
    language: Language,
    catalogs: Catalogs,
    preferences: Box<dyn LanguagePreferences>,
}

impl Localization {
    /// Reads the stored preference once and adopts it when it names a
    /// supported language; anything else falls back to the default. No
    /// network or async dependency.
    pub fn init(catalogs: Catalogs, preferences: Box<dyn LanguagePreferences>) -> Self {
        let language = match preferences.get() {
            Some(code) => match Language::from_code(&code) {
                Some(language) => language,
                None => {
                    tracing::warn!(
                        %code,
                        "unrecognized persisted language, falling back to default"
                    );
                    Language::default()
                }
            },
            None => Language::default(),
        };

        Self {
            language,
            catalogs,
            preferences,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Languages a catalog is actually available for.
    pub fn available_languages(&self) -> Vec<Language> {
        self.catalogs.languages()
    }

    /// Persists the new language, then adopts it. Readers observe both
    /// effects together: the exclusive borrow rules out an interleaved
    /// `language()` call between the two writes.
    pub fn set_language(&mut self, language: Language) {
        self.preferences.set(language.code());
        self.language = language;
    }

    /// Translates `key` against the current language. Recomputed per call,
    /// so it always reflects the latest `set_language`.
    pub fn t(&self, key: &str) -> String {
        resolver::resolve(&self.catalogs, self.language, key, &[])
    }

    /// Like [`Localization::t`], with `{param}` substitution.
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        resolver::resolve(&self.catalogs, self.language, key, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// In-memory preference store recording every write.
    struct MemoryPreferences {
        stored: Rc<RefCell<Option<String>>>,
    }

    impl LanguagePreferences for MemoryPreferences {
        fn get(&self) -> Option<String> {
            self.stored.borrow().clone()
        }

        fn set(&mut self, code: &str) {
            *self.stored.borrow_mut() = Some(code.to_string());
        }
    }

    fn memory(initial: Option<&str>) -> (Rc<RefCell<Option<String>>>, Box<MemoryPreferences>) {
        let stored = Rc::new(RefCell::new(initial.map(str::to_string)));
        let prefs = Box::new(MemoryPreferences {
            stored: Rc::clone(&stored),
        });
        (stored, prefs)
    }

    fn catalogs() -> Catalogs {
        let fr: toml::Table = toml::from_str(
            r#"
            [home]
            title = "Vérifiez l'information"
            "#,
        )
        .expect("failed to parse fr test catalog");

        let en: toml::Table = toml::from_str(
            r#"
            [home]
            title = "Verify the facts"
            "#,
        )
        .expect("failed to parse en test catalog");

        let mut tables = HashMap::new();
        tables.insert(Language::Fr, fr);
        tables.insert(Language::En, en);
        Catalogs::from_tables(tables)
    }

    #[test]
    fn init_adopts_valid_stored_preference() {
        let (_, prefs) = memory(Some("en"));
        let localization = Localization::init(catalogs(), prefs);
        assert_eq!(localization.language(), Language::En);
    }

    #[test]
    fn init_falls_back_to_default_on_invalid_preference() {
        let (_, prefs) = memory(Some("xx"));
        let localization = Localization::init(catalogs(), prefs);
        assert_eq!(localization.language(), Language::Fr);
    }

    #[test]
    fn init_falls_back_to_default_on_missing_preference() {
        let (_, prefs) = memory(None);
        let localization = Localization::init(catalogs(), prefs);
        assert_eq!(localization.language(), Language::Fr);
    }

    #[test]
    fn set_language_persists_and_switches_lookup() {
        let (stored, prefs) = memory(None);
        let mut localization = Localization::init(catalogs(), prefs);

        localization.set_language(Language::En);

        assert_eq!(stored.borrow().as_deref(), Some("en"));
        assert_eq!(localization.t("home.title"), "Verify the facts");
    }

    #[test]
    fn t_is_idempotent_between_language_changes() {
        let (_, prefs) = memory(None);
        let localization = Localization::init(catalogs(), prefs);
        assert_eq!(localization.t("home.title"), localization.t("home.title"));
    }
}
