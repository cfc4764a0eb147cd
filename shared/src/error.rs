use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a create or update payload is refused before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text is required")]
    MissingText,
    #[error("dueDate is required")]
    MissingDueDate,
    #[error("text must not be empty")]
    EmptyText,
}

/// JSON body of a failed API call.
///
/// Not-found answers carry `message`, every other failure carries `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: None,
            message: Some(message.into()),
        }
    }

    /// Whichever text the server sent, `error` first.
    pub fn into_text(self) -> Option<String> {
        self.error.or(self.message)
    }
}
