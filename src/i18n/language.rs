//! Language type: a language code validated against the catalog.

use crate::error::{Error, Result};
use crate::i18n::{LanguageEntry, LanguageRegistry};

/// A language known to the catalog.
///
/// Settings keep raw codes so unknown entries survive in storage; this type is
/// what surfaces resolve those codes into before rendering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    entry: &'static LanguageEntry,
}

impl Language {
    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the catalog
    /// * `Err(Error::InvalidRequest)` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|entry| Language { entry })
            .ok_or_else(|| Error::InvalidRequest(format!("unknown language code: '{}'", code)))
    }

    /// Resolve codes in order, skipping any the catalog does not know.
    pub fn resolve_all<S: AsRef<str>>(codes: &[S]) -> Vec<Language> {
        codes
            .iter()
            .filter_map(|code| Language::from_code(code.as_ref()).ok())
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.entry.code
    }

    /// English display name (e.g., "Polish").
    pub fn name(&self) -> &'static str {
        self.entry.name
    }

    /// Native name (e.g., "Polski").
    pub fn native_name(&self) -> &'static str {
        self.entry.native_name
    }
}
