//! Blocking HTTP client for the labnote AI backend.
//!
//! Every flow is a single request with a fixed per-endpoint timeout; failures
//! surface once to the caller and are never retried.

pub mod types;

use crate::config::Config;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use types::{
    ChatRequest, ChatResponse, ConstantsResponse, PopulateRequest, PopulateResponse,
    PreferenceRequest, QueryRequest, QueryResponse, RecommendResponse, ScaffoldResponse,
    StructuredNoteRequest,
};

const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Per-endpoint request timeouts, used unless the config carries a
/// `timeout_secs` override. Generation endpoints wait on a model and run
/// long; light endpoints fail fast.
const GENERATE_TIMEOUT_SECS: u64 = 180;
const CHAT_TIMEOUT_SECS: u64 = 120;
const RECOMMEND_TIMEOUT_SECS: u64 = 60;
const SCAFFOLD_TIMEOUT_SECS: u64 = 300;
const POPULATE_TIMEOUT_SECS: u64 = 120;
const PREFERENCE_TIMEOUT_SECS: u64 = 30;
const CONSTANTS_TIMEOUT_SECS: u64 = 30;

/// Errors from backend communication.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend URL is not configured; set backend_url in the config file or LABNOTE_BACKEND_URL")]
    MissingBackendUrl,

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode backend response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },
}

/// Client for the labnote AI backend.
#[derive(Debug)]
pub struct BackendClient {
    http: reqwest::blocking::Client,
    base_url: String,
    timeout_override: Option<Duration>,
}

impl BackendClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Fails when no backend URL is configured or the HTTP client cannot be
    /// constructed.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = config
            .backend_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ApiError::MissingBackendUrl)?
            .trim_end_matches('/')
            .to_string();

        let http = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("labnote/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            timeout_override: config.timeout_secs.map(Duration::from_secs),
        })
    }

    /// Timeout for one request: the config override when set, the endpoint's
    /// default otherwise.
    fn request_timeout(&self, default_secs: u64) -> Duration {
        self.timeout_override
            .unwrap_or_else(|| Duration::from_secs(default_secs))
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: &B,
        timeout_secs: u64,
    ) -> Result<T, ApiError> {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(endpoint, "sending backend request");

        let response = self
            .http
            .post(&url)
            .timeout(self.request_timeout(timeout_secs))
            .json(body)
            .send()?;

        Self::decode(endpoint, response)
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        timeout_secs: u64,
    ) -> Result<T, ApiError> {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(endpoint, "sending backend request");

        let response = self
            .http
            .get(&url)
            .timeout(self.request_timeout(timeout_secs))
            .send()?;

        Self::decode(endpoint, response)
    }

    fn decode<T: DeserializeOwned>(
        endpoint: &'static str,
        response: reqwest::blocking::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }

    /// Generate a full lab note draft from a free-text query.
    pub fn generate_labnote(&self, query: &str) -> Result<QueryResponse, ApiError> {
        self.post(
            "/generate_labnote",
            &QueryRequest { query },
            GENERATE_TIMEOUT_SECS,
        )
    }

    /// One chat turn, optionally continuing a conversation.
    pub fn chat(
        &self,
        query: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatResponse, ApiError> {
        self.post(
            "/chat",
            &ChatRequest {
                query,
                conversation_id,
            },
            CHAT_TIMEOUT_SECS,
        )
    }

    /// Ask the backend for a recommended workflow and unit operations.
    pub fn recommend_structure(&self, query: &str) -> Result<RecommendResponse, ApiError> {
        self.post(
            "/recommend_structure",
            &QueryRequest { query },
            RECOMMEND_TIMEOUT_SECS,
        )
    }

    /// Generate a filled note for a chosen structure.
    pub fn create_filled_note(
        &self,
        request: &StructuredNoteRequest<'_>,
    ) -> Result<QueryResponse, ApiError> {
        self.post("/create_filled_note", request, SCAFFOLD_TIMEOUT_SECS)
    }

    /// Generate the scaffold files for a chosen structure.
    pub fn create_scaffold(
        &self,
        request: &StructuredNoteRequest<'_>,
    ) -> Result<ScaffoldResponse, ApiError> {
        self.post("/create_scaffold", request, SCAFFOLD_TIMEOUT_SECS)
    }

    /// Draft candidate texts for one placeholder section.
    pub fn populate_note(
        &self,
        request: &PopulateRequest<'_>,
    ) -> Result<PopulateResponse, ApiError> {
        self.post("/populate_note", request, POPULATE_TIMEOUT_SECS)
    }

    /// Record which draft the user kept. Non-critical telemetry: callers log
    /// failures and move on.
    pub fn record_preference(&self, request: &PreferenceRequest<'_>) -> Result<(), ApiError> {
        let url = format!("{}/record_preference", self.base_url);
        debug!("sending preference record");

        let response = self
            .http
            .post(&url)
            .timeout(self.request_timeout(PREFERENCE_TIMEOUT_SECS))
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Fetch the backend's workflow and unit-operation constants.
    pub fn constants(&self) -> Result<ConstantsResponse, ApiError> {
        self.get("/constants", CONSTANTS_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: Option<&str>) -> Config {
        Config {
            backend_url: url.map(str::to_string),
            experimenter: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn test_new_requires_backend_url() {
        let err = BackendClient::new(&config_with_url(None)).unwrap_err();
        assert!(matches!(err, ApiError::MissingBackendUrl));

        let err = BackendClient::new(&config_with_url(Some(""))).unwrap_err();
        assert!(matches!(err, ApiError::MissingBackendUrl));
    }

    #[test]
    fn test_timeout_override_beats_endpoint_default() {
        let mut config = config_with_url(Some("http://localhost:8000"));
        config.timeout_secs = Some(5);
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(
            client.request_timeout(GENERATE_TIMEOUT_SECS),
            Duration::from_secs(5)
        );

        let client = BackendClient::new(&config_with_url(Some("http://localhost:8000"))).unwrap();
        assert_eq!(
            client.request_timeout(GENERATE_TIMEOUT_SECS),
            Duration::from_secs(GENERATE_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = BackendClient::new(&config_with_url(Some("http://localhost:8000/"))).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
