//! Tab navigation collaborator.

use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// A browser tab as seen by the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: u32,
    /// Absent for tabs the extension may not inspect
    pub url: Option<String>,
}

impl Tab {
    pub fn new(id: u32, url: impl Into<String>) -> Self {
        Self {
            id,
            url: Some(url.into()),
        }
    }
}

/// Tab operations provided by the host browser.
#[async_trait]
pub trait TabController: Send + Sync {
    /// Active tab of the current window, if any.
    async fn query_active_tab(&self) -> Result<Option<Tab>>;

    /// Navigate an existing tab.
    async fn update_tab(&self, tab_id: u32, url: &str) -> Result<()>;

    /// Open `url` in a new tab, which becomes active.
    async fn open_new_tab(&self, url: &str) -> Result<()>;
}

/// One recorded tab side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Update { tab_id: u32, url: String },
    Open { tab_id: u32, url: String },
}

#[derive(Default)]
struct TabState {
    tabs: Vec<Tab>,
    active: Option<u32>,
    history: Vec<Navigation>,
    next_id: u32,
}

/// In-memory tab model that records every navigation.
///
/// Used by the headless host and by tests.
#[derive(Default)]
pub struct MemoryTabs {
    state: RwLock<TabState>,
    /// If Some, navigations fail with `Error::Navigation` carrying this message
    navigation_error: RwLock<Option<String>>,
}

impl MemoryTabs {
    /// Create a window with no tabs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a window with one active tab showing `url`.
    pub fn with_active_url(url: impl Into<String>) -> Self {
        let tab = Tab::new(1, url);
        Self {
            state: RwLock::new(TabState {
                active: Some(tab.id),
                tabs: vec![tab],
                history: Vec::new(),
                next_id: 2,
            }),
            navigation_error: RwLock::new(None),
        }
    }

    pub async fn set_navigation_error(&self, err: Option<String>) {
        *self.navigation_error.write().await = err;
    }

    /// Point the active tab at `url`, opening a tab first if none exists.
    ///
    /// This models the user navigating, so nothing is recorded in history.
    pub async fn navigate_active(&self, url: impl Into<String>) {
        let mut state = self.state.write().await;
        let url = url.into();
        let active = state.active;

        match active {
            Some(id) => {
                if let Some(tab) = state.tabs.iter_mut().find(|tab| tab.id == id) {
                    tab.url = Some(url);
                }
            }
            None => {
                let id = state.allocate_id();
                state.tabs.push(Tab::new(id, url));
                state.active = Some(id);
            }
        }
    }

    /// Navigations performed through `TabController`, oldest first.
    pub async fn history(&self) -> Vec<Navigation> {
        self.state.read().await.history.clone()
    }

    pub async fn tab(&self, tab_id: u32) -> Option<Tab> {
        self.state
            .read()
            .await
            .tabs
            .iter()
            .find(|tab| tab.id == tab_id)
            .cloned()
    }

    async fn check_navigation(&self) -> Result<()> {
        match &*self.navigation_error.read().await {
            Some(msg) => Err(Error::Navigation(msg.clone())),
            None => Ok(()),
        }
    }
}

impl TabState {
    fn allocate_id(&mut self) -> u32 {
        self.next_id = self.next_id.max(1);
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[async_trait]
impl TabController for MemoryTabs {
    async fn query_active_tab(&self) -> Result<Option<Tab>> {
        let state = self.state.read().await;
        Ok(state
            .active
            .and_then(|id| state.tabs.iter().find(|tab| tab.id == id))
            .cloned())
    }

    async fn update_tab(&self, tab_id: u32, url: &str) -> Result<()> {
        self.check_navigation().await?;

        let mut state = self.state.write().await;
        let tab = state
            .tabs
            .iter_mut()
            .find(|tab| tab.id == tab_id)
            .ok_or_else(|| Error::Navigation(format!("no tab with id {}", tab_id)))?;
        tab.url = Some(url.to_string());

        state.history.push(Navigation::Update {
            tab_id,
            url: url.to_string(),
        });
        Ok(())
    }

    async fn open_new_tab(&self, url: &str) -> Result<()> {
        self.check_navigation().await?;

        let mut state = self.state.write().await;
        let id = state.allocate_id();
        state.tabs.push(Tab::new(id, url));
        state.active = Some(id);

        state.history.push(Navigation::Open {
            tab_id: id,
            url: url.to_string(),
        });
        Ok(())
    }
}
