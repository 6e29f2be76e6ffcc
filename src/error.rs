//! Error taxonomy shared by the dispatcher, stores, and surface models.
//!
//! None of these are fatal: storage failures are recovered with hardcoded
//! defaults, a missing tab is logged and dropped, and unknown messages are
//! answered with a structured error response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Settings read or write failed
    #[error("settings storage unavailable: {0}")]
    StorageUnavailable(String),

    /// No active tab (or a tab without a URL) to act on
    #[error("no active tab")]
    NoActiveTab,

    /// Tab update or new-tab creation failed
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Message action outside the known vocabulary
    #[error("unknown action: '{0}'")]
    UnknownAction(String),

    /// Known action with a missing or malformed payload
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::NoActiveTab.to_string(), "no active tab");
        assert_eq!(
            Error::UnknownAction("ping".to_string()).to_string(),
            "unknown action: 'ping'"
        );
        assert!(Error::StorageUnavailable("quota".to_string())
            .to_string()
            .contains("quota"));
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: Error = err.into();
        assert!(matches!(converted, Error::Json(_)));
    }
}
