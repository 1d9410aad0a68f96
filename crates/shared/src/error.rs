use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body the backend sends when it refuses a request, e.g. `{"error": "User not logged in"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendRejection {
    pub message: String,
}

impl BackendRejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Empty or absent messages do not count as a rejection.
    pub fn from_field(error: Option<String>) -> Option<Self> {
        error.filter(|message| !message.is_empty()).map(Self::new)
    }
}
