//! Popup surface model.
//!
//! Builds what the popup shows from fresh settings and the active tab, and
//! routes button presses through the dispatcher so the popup never builds
//! redirect URLs on its own.

use crate::classifier::is_translate_surface;
use crate::dispatcher::{DispatchOutcome, Dispatcher};
use crate::error::{Error, Result};
use crate::i18n::Language;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// One "translate to" button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateButton {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub flag: &'static str,
}

impl TranslateButton {
    fn from_language(language: Language) -> Self {
        Self {
            code: language.code(),
            name: language.name(),
            native_name: language.native_name(),
            flag: language_flag(language.code()),
        }
    }
}

/// Main popup content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PopupContent {
    /// Active tab is a translation surface
    Disabled,
    /// No languages selected; the popup points at settings
    Empty,
    Buttons { buttons: Vec<TranslateButton> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupView {
    pub content: PopupContent,
    pub translation_count: u64,
}

pub struct Popup {
    dispatcher: Arc<Dispatcher>,
}

impl Popup {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Resolve the popup view.
    ///
    /// The popup has no default languages: an absent list renders as empty.
    pub async fn load(&self) -> PopupView {
        let settings = self.dispatcher.load_settings(&[]).await;

        let on_translate_surface = self
            .dispatcher
            .active_tab()
            .await
            .and_then(|tab| tab.url)
            .is_some_and(|url| is_translate_surface(&url));

        let content = if on_translate_surface {
            PopupContent::Disabled
        } else if settings.selected_languages.is_empty() {
            PopupContent::Empty
        } else {
            PopupContent::Buttons {
                buttons: Language::resolve_all(&settings.selected_languages)
                    .into_iter()
                    .map(TranslateButton::from_language)
                    .collect(),
            }
        };

        PopupView {
            content,
            translation_count: settings.translation_count,
        }
    }

    /// Translate the active tab to `language_code`.
    pub async fn translate_to(&self, language_code: &str) -> Result<DispatchOutcome> {
        let Some(tab) = self.dispatcher.active_tab().await else {
            error!("No active tab found");
            return Err(Error::NoActiveTab);
        };

        self.dispatcher.translate_to_language(&tab, language_code).await
    }

    /// Open the options surface.
    pub async fn open_settings(&self) -> Result<()> {
        info!("Opening settings from popup");
        self.dispatcher.open_options().await
    }
}

/// Flag glyph shown next to a language; a globe for anything unmapped.
pub fn language_flag(code: &str) -> &'static str {
    match code {
        "en" => "🇺🇸",
        "es" => "🇪🇸",
        "fr" => "🇫🇷",
        "de" => "🇩🇪",
        "it" => "🇮🇹",
        "pt" => "🇵🇹",
        "ru" => "🇷🇺",
        "ja" => "🇯🇵",
        "ko" => "🇰🇷",
        "zh" => "🇨🇳",
        "ar" => "🇸🇦",
        "hi" => "🇮🇳",
        "tr" => "🇹🇷",
        "pl" => "🇵🇱",
        "nl" => "🇳🇱",
        "sv" => "🇸🇪",
        "no" => "🇳🇴",
        "da" => "🇩🇰",
        "fi" => "🇫🇮",
        "he" => "🇮🇱",
        "th" => "🇹🇭",
        "vi" => "🇻🇳",
        "uk" => "🇺🇦",
        "cs" => "🇨🇿",
        "hu" => "🇭🇺",
        "ro" => "🇷🇴",
        "bg" => "🇧🇬",
        "hr" => "🇭🇷",
        "sk" => "🇸🇰",
        "sl" => "🇸🇮",
        _ => "🌐",
    }
}
