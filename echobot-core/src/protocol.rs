//! Request and response bodies for `/chat` and `/reset`
//!
//! The server side uses the strict `*Response` types. Clients decode the
//! lenient `*Reply` types, since a reply may carry either a payload or an
//! error body.

use serde::{Deserialize, Serialize};

/// Session id used when a request does not carry one
pub const DEFAULT_SESSION_ID: &str = "default-session";

/// Status text returned by `/reset`
pub const RESET_STATUS: &str = "Conversation reset successfully (static response)";

/// Body of `POST /chat`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Message text, empty when absent
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    /// Session id, falling back to [`DEFAULT_SESSION_ID`] when absent or empty
    pub fn session_or_default(&self) -> &str {
        non_empty(self.session_id.as_deref()).unwrap_or(DEFAULT_SESSION_ID)
    }
}

/// Successful `/chat` body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

impl ChatResponse {
    /// Build the canned echo for `message`
    pub fn echo(message: &str, session_id: impl Into<String>) -> Self {
        Self {
            response: echo_text(message),
            session_id: session_id.into(),
        }
    }
}

/// The canned reply text for a user message
pub fn echo_text(message: &str) -> String {
    format!(
        "You said: \"{}\". This is a static response from the Netlify function. \
         For the full chatbot experience with LangGraph and memory functionality, \
         please run the app locally.",
        message
    )
}

/// Body of `POST /reset`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ResetRequest {
    pub fn session_or_default(&self) -> &str {
        non_empty(self.session_id.as_deref()).unwrap_or(DEFAULT_SESSION_ID)
    }
}

/// Successful `/reset` body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    pub status: String,
    pub session_id: String,
}

impl ResetResponse {
    pub fn acknowledge(session_id: impl Into<String>) -> Self {
        Self {
            status: RESET_STATUS.to_string(),
            session_id: session_id.into(),
        }
    }
}

/// JSON error body used by every failing route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl ToString) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

/// What a client reads back from `/chat`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What a client reads back from `/reset`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ResetReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Treat `Some("")` like `None`
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
