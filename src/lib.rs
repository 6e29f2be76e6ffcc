//! Redirect the current tab to a translation service.
//!
//! Two providers are supported: Kagi Translate and Google Translate. Target
//! languages and the provider come from synced settings storage; both the
//! popup and the background dispatcher consult the translate-surface
//! classifier before acting so a translated page is never redirected again.

pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod i18n;
pub mod messaging;
pub mod options;
pub mod popup;
pub mod provider;
pub mod settings;
pub mod store;
pub mod tabs;
pub mod url_builder;

pub use classifier::is_translate_surface;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{Error, Result};
pub use i18n::map_for_provider;
pub use provider::Provider;
pub use settings::Settings;
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use tabs::{MemoryTabs, Tab, TabController};
pub use url_builder::build_target_url;
