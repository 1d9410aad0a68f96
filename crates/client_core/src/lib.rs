use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::MoodSubmission,
    protocol::{PredictRequest, PredictResponse, RecommendRequest, RecommendResponse},
};
use tracing::debug;
use url::Url;

mod controller;
pub mod error;
pub mod view;

pub use controller::{MoodSubmissionController, PipelineOutcome, DEFAULT_REVEAL_DELAY};
pub use error::{classify_failure_message, NoticeKind, PipelineError, LOGIN_REQUIRED_MARKER};
pub use view::{Element, MemoryElement, Notifier, TrackEntry, ViewBindings};

pub const PREDICT_PATH: &str = "/predict";
pub const RECOMMEND_PATH: &str = "/recommend";
pub const LOGIN_PATH: &str = "/login";

#[async_trait]
pub trait MoodBackend: Send + Sync {
    async fn predict(&self, submission: &MoodSubmission) -> Result<PredictResponse, PipelineError>;
    async fn recommend(&self, emotion: &str) -> Result<RecommendResponse, PipelineError>;
}

/// Talks to the MoodMate backend over HTTP.
///
/// Endpoint paths are absolute, so they resolve against the origin of
/// `server_url`, the way a browser resolves a root-relative link.
/// Response bodies are decoded regardless of status: the backend reports
/// failures as JSON with 400/401 codes.
pub struct HttpMoodBackend {
    http: Client,
    base_url: Url,
    session_cookie: Option<String>,
}

impl HttpMoodBackend {
    pub fn new(server_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(server_url)?,
            session_cookie: None,
        })
    }

    /// Sends `cookie` as the `Cookie` header; the backend keeps the Spotify login in its session.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn endpoint_url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    async fn post_json<B, R>(&self, path: &'static str, body: &B) -> Result<R, PipelineError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self
            .endpoint_url(path)
            .map_err(|err| PipelineError::transport(path, err))?;
        let mut request = self.http.post(url).json(body);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let res = request
            .send()
            .await
            .map_err(|err| PipelineError::transport(path, err))?;
        debug!(endpoint = path, status = %res.status(), "backend responded");
        res.json::<R>()
            .await
            .map_err(|err| PipelineError::transport(path, err))
    }
}

#[async_trait]
impl MoodBackend for HttpMoodBackend {
    async fn predict(&self, submission: &MoodSubmission) -> Result<PredictResponse, PipelineError> {
        self.post_json(
            PREDICT_PATH,
            &PredictRequest {
                text: submission.text.clone(),
            },
        )
        .await
    }

    async fn recommend(&self, emotion: &str) -> Result<RecommendResponse, PipelineError> {
        self.post_json(
            RECOMMEND_PATH,
            &RecommendRequest {
                emotion: emotion.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
