//! Background dispatcher: toolbar activation and message handling.
//!
//! One activation runs `Idle -> CheckingDomain -> Suppressed | ResolvingSettings
//! -> Redirecting -> Idle`. Each step awaits the previous one, so the settings
//! read always precedes the URL build, which always precedes navigation.
//! Nothing is retried: a second click is the retry.

use crate::classifier::is_translate_surface;
use crate::error::{Error, Result};
use crate::messaging::{Request, Response, INVALID_REQUEST};
use crate::provider::Provider;
use crate::settings::{
    count_map, decode_count, decode_provider, Settings, ALL_KEYS, FALLBACK_LANGUAGE, KEY_PROVIDER,
    KEY_SELECTED_LANGUAGES, KEY_TRANSLATION_COUNT,
};
use crate::store::SettingsStore;
use crate::tabs::{Tab, TabController};
use crate::url_builder::build_target_url;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Language list the dispatcher assumes when the key has never been written.
pub const DEFAULT_LANGUAGES: &[&str] = &[FALLBACK_LANGUAGE];

/// Default location of the options surface.
pub const DEFAULT_OPTIONS_URL: &str = "options.html";

/// Result of one dispatcher activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DispatchOutcome {
    /// No tab (or no tab URL) to act on
    NoActiveTab,

    /// Tab is on a translation surface; nothing was done
    Suppressed,

    /// No languages selected; the options surface was opened instead
    OpenedOptions,

    /// Tab was navigated to `url`
    #[serde(rename_all = "camelCase")]
    Redirected {
        language_code: String,
        provider: Provider,
        url: String,
    },
}

/// Coordinates settings, the classifier, the URL builder, and tab navigation.
///
/// Both collaborators are injected so every surface shares the same store and
/// tests can substitute in-memory fakes.
pub struct Dispatcher {
    store: Arc<dyn SettingsStore>,
    tabs: Arc<dyn TabController>,
    options_url: String,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn SettingsStore>, tabs: Arc<dyn TabController>) -> Self {
        Self {
            store,
            tabs,
            options_url: DEFAULT_OPTIONS_URL.to_string(),
        }
    }

    /// Set the URL opened for the options surface.
    pub fn with_options_url(mut self, url: impl Into<String>) -> Self {
        self.options_url = url.into();
        self
    }

    /// Seed `selectedLanguages` and `provider` on first run.
    ///
    /// Only absent keys are written. Failures are logged and swallowed.
    pub async fn initialize_default_settings(&self) {
        let stored = match self.store.get(&[KEY_SELECTED_LANGUAGES, KEY_PROVIDER]).await {
            Ok(stored) => stored,
            Err(e) => {
                error!("Failed to initialize default settings: {}", e);
                return;
            }
        };

        let mut updates = Map::new();
        if !stored.contains_key(KEY_SELECTED_LANGUAGES) {
            updates.insert(
                KEY_SELECTED_LANGUAGES.to_string(),
                Value::from(DEFAULT_LANGUAGES.to_vec()),
            );
        }
        if !stored.contains_key(KEY_PROVIDER) {
            updates.insert(KEY_PROVIDER.to_string(), Value::from(Provider::Kagi.as_str()));
        }

        if updates.is_empty() {
            return;
        }

        let seeded: Vec<String> = updates.keys().cloned().collect();
        match self.store.set(updates).await {
            Ok(()) => info!("Initialized default settings: {}", seeded.join(", ")),
            Err(e) => error!("Failed to initialize default settings: {}", e),
        }
    }

    /// Read settings fresh from the store.
    ///
    /// `default_languages` fills an absent language list. A failed read yields
    /// `default_languages` with Kagi, as if nothing had been stored.
    pub async fn load_settings(&self, default_languages: &[&str]) -> Settings {
        match self.store.get(&ALL_KEYS).await {
            Ok(stored) => Settings::from_map(&stored, default_languages),
            Err(e) => {
                warn!("Failed to read settings, using defaults: {}", e);
                Settings::from_map(&Map::new(), default_languages)
            }
        }
    }

    /// Active tab of the current window.
    ///
    /// Query failures are logged and treated as no tab.
    pub async fn active_tab(&self) -> Option<Tab> {
        match self.tabs.query_active_tab().await {
            Ok(tab) => tab,
            Err(e) => {
                error!("Failed to query active tab: {}", e);
                None
            }
        }
    }

    /// Handle a toolbar click on `tab`.
    ///
    /// Redirects to the primary language, or opens the options surface when
    /// no language is selected. Navigation failures are returned as-is.
    pub async fn handle_toolbar_click(&self, tab: Option<Tab>) -> Result<DispatchOutcome> {
        let Some((tab_id, url)) = tab.and_then(|Tab { id, url }| url.map(|url| (id, url))) else {
            error!("No valid tab for translation");
            return Ok(DispatchOutcome::NoActiveTab);
        };

        if is_translate_surface(&url) {
            info!("Extension disabled on translate domain");
            return Ok(DispatchOutcome::Suppressed);
        }

        let settings = self.load_settings(DEFAULT_LANGUAGES).await;
        let Some(language_code) = settings.primary_language() else {
            info!("No languages selected, opening options");
            self.open_options().await?;
            return Ok(DispatchOutcome::OpenedOptions);
        };

        self.redirect(tab_id, &url, language_code, settings.provider)
            .await
    }

    /// Redirect `tab` to `language_code` with the stored provider.
    pub async fn translate_to_language(
        &self,
        tab: &Tab,
        language_code: &str,
    ) -> Result<DispatchOutcome> {
        let Some(url) = tab.url.as_deref() else {
            error!("No valid tab for translation");
            return Ok(DispatchOutcome::NoActiveTab);
        };

        if is_translate_surface(url) {
            info!("Extension disabled on translate domain");
            return Ok(DispatchOutcome::Suppressed);
        }

        let provider = self.stored_provider().await;
        self.redirect(tab.id, url, language_code, provider).await
    }

    /// Open the options surface in a new tab.
    pub async fn open_options(&self) -> Result<()> {
        self.tabs.open_new_tab(&self.options_url).await
    }

    /// Selected languages, or the defaults when unreadable or never set.
    pub async fn selected_languages(&self) -> Vec<String> {
        self.load_settings(DEFAULT_LANGUAGES).await.selected_languages
    }

    /// Answer a raw message from a surface; `sender` is the tab it came from.
    pub async fn handle_message(&self, message: &Value, sender: Option<Tab>) -> Response {
        debug!("Received message: {}", message);

        let request = match Request::parse(message) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected message: {}", e);
                return Response::unknown_action();
            }
        };

        match request {
            Request::GetLanguages => Response::Languages {
                languages: self.selected_languages().await,
            },
            Request::TranslateTo { language_code } => {
                let (Some(code), Some(tab)) = (language_code, sender) else {
                    return Response::failure(INVALID_REQUEST);
                };

                match self.translate_to_language(&tab, &code).await {
                    Ok(DispatchOutcome::Redirected { .. }) => Response::success(),
                    Ok(DispatchOutcome::Suppressed) => {
                        Response::failure("Translation disabled on translate domain")
                    }
                    Ok(_) => Response::failure(Error::NoActiveTab.to_string()),
                    Err(e) => Response::failure(e.to_string()),
                }
            }
            Request::OpenOptions => match self.open_options().await {
                Ok(()) => Response::success(),
                Err(e) => Response::failure(e.to_string()),
            },
        }
    }

    async fn stored_provider(&self) -> Provider {
        match self.store.get(&[KEY_PROVIDER]).await {
            Ok(stored) => decode_provider(stored.get(KEY_PROVIDER)).unwrap_or_default(),
            Err(e) => {
                warn!("Failed to read provider, using {}: {}", Provider::Kagi, e);
                Provider::Kagi
            }
        }
    }

    async fn redirect(
        &self,
        tab_id: u32,
        source_url: &str,
        language_code: &str,
        provider: Provider,
    ) -> Result<DispatchOutcome> {
        let target = build_target_url(source_url, language_code, provider);

        if let Err(e) = self.tabs.update_tab(tab_id, &target).await {
            error!("Translation failed: {}", e);
            return Err(e);
        }
        info!("Translated page to {} via {}", language_code, provider);

        self.increment_translation_count().await;

        Ok(DispatchOutcome::Redirected {
            language_code: language_code.to_string(),
            provider,
            url: target,
        })
    }

    /// Bump the counter with a fresh read. Failures are logged only; the
    /// redirect has already happened.
    async fn increment_translation_count(&self) {
        let current = match self.store.get(&[KEY_TRANSLATION_COUNT]).await {
            Ok(stored) => decode_count(stored.get(KEY_TRANSLATION_COUNT)).unwrap_or(0),
            Err(e) => {
                warn!("Failed to read translation counter: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(count_map(current.saturating_add(1))).await {
            warn!("Failed to update translation counter: {}", e);
        }
    }
}
