use serde::{Deserialize, Serialize};
use std::fmt;

/// Host serving Kagi Translate pages
pub const KAGI_HOST: &str = "translate.kagi.com";

/// Origin for Kagi Translate redirects
pub const KAGI_ORIGIN: &str = "https://translate.kagi.com";

/// Host serving Google Translate pages
pub const GOOGLE_HOST: &str = "translate.google.com";

/// Endpoint for Google Translate website translation
pub const GOOGLE_ENDPOINT: &str = "https://translate.google.com/translate";

/// Translation service a tab is redirected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Kagi,
    Google,
}

impl Provider {
    /// Parse the stored provider string.
    ///
    /// Only "google" selects Google; any other value, including a corrupted
    /// one, falls back to Kagi.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "google" => Provider::Google,
            _ => Provider::Kagi,
        }
    }

    /// Value written to settings storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Kagi => "kagi",
            Provider::Google => "google",
        }
    }

    /// Host of the provider's translation surface.
    pub fn host(&self) -> &'static str {
        match self {
            Provider::Kagi => KAGI_HOST,
            Provider::Google => GOOGLE_HOST,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
