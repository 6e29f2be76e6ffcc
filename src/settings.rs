//! Persisted user settings and their storage encoding.
//!
//! Settings live in the host's synced key-value storage. Nothing here caches
//! them: every operation decodes a fresh mapping read from the store.

use crate::i18n::LanguageRegistry;
use crate::provider::Provider;
use serde_json::{Map, Value};

/// Storage key for the ordered list of target language codes
pub const KEY_SELECTED_LANGUAGES: &str = "selectedLanguages";

/// Storage key for the provider name ("kagi" or "google")
pub const KEY_PROVIDER: &str = "provider";

/// Storage key for the number of successful redirects
pub const KEY_TRANSLATION_COUNT: &str = "translationCount";

/// All keys read when a surface resolves settings.
pub const ALL_KEYS: [&str; 3] = [KEY_SELECTED_LANGUAGES, KEY_PROVIDER, KEY_TRANSLATION_COUNT];

/// Upper bound on selected languages
pub const MAX_SELECTED_LANGUAGES: usize = 5;

/// Language used when settings cannot be read at all, and seeded on first run
pub const FALLBACK_LANGUAGE: &str = "pl";

/// Resolved settings for a single operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Target language codes in priority order; the first is primary
    pub selected_languages: Vec<String>,
    pub provider: Provider,
    pub translation_count: u64,
}

impl Settings {
    /// Decode settings from a storage mapping.
    ///
    /// Absent or malformed keys take defaults: `default_languages` for the
    /// language list, Kagi for the provider, zero for the counter.
    pub fn from_map(map: &Map<String, Value>, default_languages: &[&str]) -> Self {
        Self {
            selected_languages: decode_languages(map.get(KEY_SELECTED_LANGUAGES))
                .unwrap_or_else(|| default_languages.iter().map(|code| code.to_string()).collect()),
            provider: decode_provider(map.get(KEY_PROVIDER)).unwrap_or_default(),
            translation_count: decode_count(map.get(KEY_TRANSLATION_COUNT)).unwrap_or(0),
        }
    }

    /// Primary (first) target language, if any.
    pub fn primary_language(&self) -> Option<&str> {
        self.selected_languages.first().map(String::as_str)
    }

    /// Selected codes that the catalog does not know.
    ///
    /// These are skipped when rendering but left in storage untouched.
    pub fn unknown_languages(&self) -> Vec<&str> {
        let registry = LanguageRegistry::get();
        self.selected_languages
            .iter()
            .map(String::as_str)
            .filter(|code| !registry.contains(code))
            .collect()
    }

    /// Mapping written when the options surface saves.
    ///
    /// The counter is left out so a save never clobbers concurrent increments.
    pub fn selection_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            KEY_SELECTED_LANGUAGES.to_string(),
            Value::from(self.selected_languages.clone()),
        );
        map.insert(KEY_PROVIDER.to_string(), Value::from(self.provider.as_str()));
        map
    }
}

/// Mapping that sets only the translation counter.
pub fn count_map(count: u64) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(KEY_TRANSLATION_COUNT.to_string(), Value::from(count));
    map
}

/// A language list is only accepted as an array of strings.
pub(crate) fn decode_languages(value: Option<&Value>) -> Option<Vec<String>> {
    value?
        .as_array()?
        .iter()
        .map(|code| code.as_str().map(str::to_owned))
        .collect()
}

pub(crate) fn decode_provider(value: Option<&Value>) -> Option<Provider> {
    match value? {
        Value::String(name) if !name.is_empty() => Some(Provider::from_stored(name)),
        _ => None,
    }
}

/// Counters written by other clients may arrive as whole floats (`5.0`).
pub(crate) fn decode_count(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|count| count.is_finite() && *count >= 0.0 && count.fract() == 0.0)
            .map(|count| count as u64)
    })
}
