//! Pipeline failure taxonomy and the notice a failure maps to.

use std::fmt::Display;

use shared::{
    error::BackendRejection,
    protocol::{Reply, ShapeError},
};
use thiserror::Error;

/// Text the backend uses when `/recommend` needs a Spotify session.
pub const LOGIN_REQUIRED_MARKER: &str = "User not logged in";

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The backend answered with `{"error": ...}`; displays the backend message verbatim.
    #[error("{0}")]
    Application(#[from] BackendRejection),
    /// No usable response: the request failed, or the body was not the expected JSON.
    #[error("request to {endpoint} failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },
}

impl PipelineError {
    pub fn transport(endpoint: &'static str, err: impl Display) -> Self {
        Self::Transport {
            endpoint,
            message: err.to_string(),
        }
    }

    /// Turns a decoded reply into its payload, or the failure the pipeline aborts with.
    pub fn settle<T>(
        endpoint: &'static str,
        reply: Result<Reply<T>, ShapeError>,
    ) -> Result<T, Self> {
        match reply {
            Ok(Reply::Accepted(value)) => Ok(value),
            Ok(Reply::Rejected(rejection)) => Err(Self::Application(rejection)),
            Err(shape) => Err(Self::transport(endpoint, shape)),
        }
    }

    pub fn notice(&self) -> NoticeKind {
        classify_failure_message(&self.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    LoginPrompt,
    GenericRetry,
}

impl NoticeKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::LoginPrompt => "Please log in with Spotify to get music recommendations.",
            Self::GenericRetry => "Sorry, an error occurred. Please try again.",
        }
    }
}

/// Case-sensitive substring match; the marker is the backend's actual contract.
pub fn classify_failure_message(message: &str) -> NoticeKind {
    if message.contains(LOGIN_REQUIRED_MARKER) {
        NoticeKind::LoginPrompt
    } else {
        NoticeKind::GenericRetry
    }
}
