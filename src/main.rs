use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use translate_redirect::config::Config;
use translate_redirect::{Dispatcher, JsonFileStore, MemoryTabs, TabController};

/// One line of host input.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
enum HostEvent {
    /// Toolbar button pressed on the active tab
    ToolbarClick,
    /// Message from a surface; the active tab is the sender
    Message { message: Value },
    /// User navigated the active tab
    Navigate { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging on stderr; stdout carries responses
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translate_redirect=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let store = Arc::new(JsonFileStore::new(&config.settings_path));
    info!("Using settings file {}", store.path().display());
    let tabs = Arc::new(match &config.active_tab_url {
        Some(url) => MemoryTabs::with_active_url(url.clone()),
        None => MemoryTabs::new(),
    });
    let dispatcher = Dispatcher::new(store, tabs.clone())
        .with_options_url(config.options_page_url.clone());

    dispatcher.initialize_default_settings().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<HostEvent>(&line) {
            Ok(event) => handle_event(&dispatcher, &tabs, event).await?,
            Err(e) => {
                warn!("Ignoring malformed event: {}", e);
                json!({ "error": format!("malformed event: {}", e) })
            }
        };

        stdout.write_all(reply.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("Input closed, exiting");
    Ok(())
}

async fn handle_event(dispatcher: &Dispatcher, tabs: &MemoryTabs, event: HostEvent) -> Result<Value> {
    let reply = match event {
        HostEvent::ToolbarClick => {
            let tab = tabs.query_active_tab().await?;
            match dispatcher.handle_toolbar_click(tab).await {
                Ok(outcome) => serde_json::to_value(outcome)?,
                Err(e) => json!({ "outcome": "failed", "error": e.to_string() }),
            }
        }
        HostEvent::Message { message } => {
            let sender = tabs.query_active_tab().await?;
            serde_json::to_value(dispatcher.handle_message(&message, sender).await)?
        }
        HostEvent::Navigate { url } => {
            tabs.navigate_active(url.clone()).await;
            json!({ "activeTab": url })
        }
    };

    Ok(reply)
}
