//! Options surface model: choosing target languages and the provider.

use crate::error::Result;
use crate::i18n::{Language, LanguageEntry, LanguageRegistry};
use crate::provider::Provider;
use crate::settings::{Settings, KEY_PROVIDER, KEY_SELECTED_LANGUAGES, MAX_SELECTED_LANGUAGES};
use crate::store::SettingsStore;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Editable copy of the language selection.
///
/// Changes stay local until `save`, which writes the language list and
/// provider in a single store call.
pub struct LanguageSelector {
    store: Arc<dyn SettingsStore>,
    selected: Vec<String>,
    provider: Provider,
    dirty: bool,
}

impl LanguageSelector {
    /// Load the saved selection.
    ///
    /// The options surface has no default languages; an unreadable store
    /// starts from an empty list and Kagi.
    pub async fn load(store: Arc<dyn SettingsStore>) -> Self {
        let settings = match store.get(&[KEY_SELECTED_LANGUAGES, KEY_PROVIDER]).await {
            Ok(stored) => Settings::from_map(&stored, &[]),
            Err(e) => {
                error!("Failed to load settings: {}", e);
                Settings::default()
            }
        };

        let unknown = settings.unknown_languages();
        if !unknown.is_empty() {
            debug!("Ignoring unknown saved languages: {}", unknown.join(", "));
        }

        Self {
            store,
            selected: settings.selected_languages,
            provider: settings.provider,
            dirty: false,
        }
    }

    /// Selected codes in priority order, as they will be saved.
    pub fn selected_codes(&self) -> &[String] {
        &self.selected
    }

    /// Selected languages resolved against the catalog; unknown codes skipped.
    pub fn selected_languages(&self) -> Vec<Language> {
        Language::resolve_all(&self.selected)
    }

    /// Labels previewing the popup buttons, in priority order.
    pub fn preview(&self) -> Vec<&'static str> {
        self.selected_languages()
            .into_iter()
            .map(|language| language.name())
            .collect()
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Whether there are unsaved changes (the save button is enabled).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.iter().any(|selected| selected == code)
    }

    pub fn is_max_reached(&self) -> bool {
        self.selected.len() >= MAX_SELECTED_LANGUAGES
    }

    /// Whether clicking `code` in the grid does anything.
    pub fn is_selectable(&self, code: &str) -> bool {
        self.is_selected(code) || !self.is_max_reached()
    }

    /// Select or deselect `code`.
    ///
    /// Returns whether the selection changed. Adding fails silently once the
    /// maximum is reached or when the catalog does not know the code.
    pub fn toggle(&mut self, code: &str) -> bool {
        if let Some(index) = self.selected.iter().position(|selected| selected == code) {
            self.selected.remove(index);
        } else if self.is_max_reached() {
            debug!("Maximum of {} languages reached", MAX_SELECTED_LANGUAGES);
            return false;
        } else if !LanguageRegistry::get().contains(code) {
            warn!("Cannot select unknown language '{}'", code);
            return false;
        } else {
            self.selected.push(code.to_string());
        }

        self.dirty = true;
        true
    }

    pub fn set_provider(&mut self, provider: Provider) {
        if self.provider != provider {
            self.provider = provider;
            self.dirty = true;
        }
    }

    /// Catalog entries matching a search term.
    pub fn filter(&self, term: &str) -> Vec<&'static LanguageEntry> {
        LanguageRegistry::get().search(term)
    }

    /// Persist the selection and provider.
    ///
    /// On failure the changes stay pending so the user can retry.
    pub async fn save(&mut self) -> Result<()> {
        let settings = Settings {
            selected_languages: self.selected.clone(),
            provider: self.provider,
            translation_count: 0,
        };

        if let Err(e) = self.store.set(settings.selection_map()).await {
            error!("Failed to save settings: {}", e);
            return Err(e);
        }

        info!(
            "Saved {} languages with provider {}",
            self.selected.len(),
            self.provider
        );
        self.dirty = false;
        Ok(())
    }
}
