//! Messages exchanged between the popup/options surfaces and the dispatcher.
//!
//! The action vocabulary is closed. Anything outside it is answered with an
//! explicit "Unknown action" response instead of being dropped.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_ACTION: &str = "Unknown action";
pub const INVALID_REQUEST: &str = "Invalid request";

/// Request sent to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Selected languages in priority order
    GetLanguages,

    /// Redirect the sender's tab to the given language
    TranslateTo {
        #[serde(rename = "languageCode", skip_serializing_if = "Option::is_none")]
        language_code: Option<String>,
    },

    /// Open the options surface in a new tab
    OpenOptions,
}

impl Request {
    /// Parse a raw message.
    ///
    /// Only the action name decides the variant; a `translateTo` without a
    /// string `languageCode` still parses and is rejected when handled.
    pub fn parse(message: &Value) -> Result<Self> {
        let action = message
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default();

        match action {
            "getLanguages" => Ok(Request::GetLanguages),
            "translateTo" => Ok(Request::TranslateTo {
                language_code: message
                    .get("languageCode")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            }),
            "openOptions" => Ok(Request::OpenOptions),
            other => Err(Error::UnknownAction(other.to_string())),
        }
    }
}

/// Response returned to the requesting surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Languages {
        languages: Vec<String>,
    },
    Ack {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Error {
        error: String,
    },
}

impl Response {
    pub fn success() -> Self {
        Response::Ack {
            success: true,
            error: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Response::Ack {
            success: false,
            error: Some(reason.into()),
        }
    }

    pub fn unknown_action() -> Self {
        Response::Error {
            error: UNKNOWN_ACTION.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Languages { .. } | Response::Ack { success: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== Request Parsing Tests ====================

    #[test]
    fn test_parse_known_actions() {
        assert_eq!(
            Request::parse(&json!({ "action": "getLanguages" })).unwrap(),
            Request::GetLanguages
        );
        assert_eq!(
            Request::parse(&json!({ "action": "openOptions" })).unwrap(),
            Request::OpenOptions
        );
        assert_eq!(
            Request::parse(&json!({ "action": "translateTo", "languageCode": "de" })).unwrap(),
            Request::TranslateTo {
                language_code: Some("de".to_string())
            }
        );
    }

    #[test]
    fn test_parse_translate_without_code() {
        assert_eq!(
            Request::parse(&json!({ "action": "translateTo", "languageCode": 4 })).unwrap(),
            Request::TranslateTo { language_code: None }
        );
    }

    #[test]
    fn test_parse_unknown_action() {
        let err = Request::parse(&json!({ "action": "selfDestruct" })).unwrap_err();
        assert!(matches!(err, Error::UnknownAction(name) if name == "selfDestruct"));
    }

    #[test]
    fn test_parse_missing_action() {
        assert!(matches!(
            Request::parse(&json!({ "greeting": "hello" })),
            Err(Error::UnknownAction(_))
        ));
        assert!(Request::parse(&json!("getLanguages")).is_err());
    }

    #[test]
    fn test_request_serializes_to_wire_shape() {
        let value = serde_json::to_value(Request::TranslateTo {
            language_code: Some("fr".to_string()),
        })
        .unwrap();
        assert_eq!(value, json!({ "action": "translateTo", "languageCode": "fr" }));

        let value = serde_json::to_value(Request::GetLanguages).unwrap();
        assert_eq!(value, json!({ "action": "getLanguages" }));
    }

    #[test]
    fn test_serialized_request_parses_back() {
        let request = Request::TranslateTo {
            language_code: Some("ja".to_string()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(Request::parse(&value).unwrap(), request);
    }

    // ==================== Response Tests ====================

    #[test]
    fn test_response_wire_shapes() {
        assert_eq!(serde_json::to_value(Response::success()).unwrap(), json!({ "success": true }));
        assert_eq!(
            serde_json::to_value(Response::failure(INVALID_REQUEST)).unwrap(),
            json!({ "success": false, "error": "Invalid request" })
        );
        assert_eq!(
            serde_json::to_value(Response::unknown_action()).unwrap(),
            json!({ "error": "Unknown action" })
        );
        assert_eq!(
            serde_json::to_value(Response::Languages {
                languages: vec!["pl".to_string()]
            })
            .unwrap(),
            json!({ "languages": ["pl"] })
        );
    }

    #[test]
    fn test_response_deserializes_untagged() {
        let response: Response = serde_json::from_value(json!({ "error": "Unknown action" })).unwrap();
        assert_eq!(response, Response::unknown_action());
        assert!(!response.is_success());

        let response: Response = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(response.is_success());
    }
}
