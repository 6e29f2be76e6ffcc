use crate::dispatcher::DEFAULT_OPTIONS_URL;
use anyhow::{bail, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub settings_path: PathBuf,

    // Surfaces
    pub options_page_url: String,

    // Host window
    pub active_tab_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let options_page_url = std::env::var("OPTIONS_PAGE_URL")
            .unwrap_or_else(|_| DEFAULT_OPTIONS_URL.to_string());
        if options_page_url.trim().is_empty() {
            bail!("OPTIONS_PAGE_URL must not be empty");
        }

        Ok(Self {
            // Storage - JSON file standing in for synced extension storage
            settings_path: std::env::var("SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("settings.json")),

            options_page_url,

            // Initial URL of the active tab (optional)
            active_tab_url: std::env::var("ACTIVE_TAB_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        })
    }
}
