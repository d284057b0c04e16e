//! Client for the water-log REST backend.
//!
//! Every call is a single request: no caching, retries or timeouts. Any
//! failure, whether transport, status or body decoding, surfaces as
//! [`ApiError::RequestFailed`].

use crate::models::{GroupStats, SubmitWaterLog, WaterLog};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const WATER_LOGS_PATH: &str = "/api/water-logs/";
const GROUP_STATS_PATH: &str = "/api/group-stats/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SubmitWaterLog,
    ListUserLogs,
    GetGroupStats,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operation::SubmitWaterLog => "submit water log",
            Operation::ListUserLogs => "fetch user logs",
            Operation::GetGroupStats => "fetch group stats",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to {0}")]
    RequestFailed(Operation),
}

impl ApiError {
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::RequestFailed(operation) => *operation,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.strip_suffix('/').unwrap_or(&base_url).to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    /// Returns a client that authenticates with `token`, sharing the
    /// underlying connection pool. `None` sends requests unauthenticated.
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn submit_water_log(&self, mugs: u32) -> Result<WaterLog, ApiError> {
        let operation = Operation::SubmitWaterLog;
        if mugs == 0 {
            warn!(%operation, "refusing to submit zero mugs");
            return Err(ApiError::RequestFailed(operation));
        }

        let request = self
            .request(Method::POST, WATER_LOGS_PATH)
            .json(&SubmitWaterLog { mugs });
        self.send(operation, request).await
    }

    pub async fn list_user_logs(&self) -> Result<Vec<WaterLog>, ApiError> {
        let request = self.request(Method::GET, WATER_LOGS_PATH);
        self.send(Operation::ListUserLogs, request).await
    }

    pub async fn get_group_stats(&self) -> Result<GroupStats, ApiError> {
        let request = self.request(Method::GET, GROUP_STATS_PATH);
        self.send(Operation::GetGroupStats, request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Every request declares JSON; the bearer header only goes out when a
    /// token is set.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");
        match self.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|err| {
            warn!(%operation, error = %err, "request did not complete");
            ApiError::RequestFailed(operation)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%operation, status = status.as_u16(), "backend returned non-success status");
            return Err(ApiError::RequestFailed(operation));
        }

        let body = response.json::<T>().await.map_err(|err| {
            warn!(%operation, error = %err, "failed to decode backend response");
            ApiError::RequestFailed(operation)
        })?;
        debug!(%operation, status = status.as_u16(), "request succeeded");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_once() {
        let client = ApiClient::new("http://backend:8000/");
        assert_eq!(client.base_url(), "http://backend:8000");
        assert_eq!(
            client.url(WATER_LOGS_PATH),
            "http://backend:8000/api/water-logs/"
        );
    }

    #[test]
    fn with_token_keeps_base_url() {
        let client = ApiClient::new(DEFAULT_BASE_URL);
        assert_eq!(client.token(), None);

        let authed = client.with_token(Some("abc".to_string()));
        assert_eq!(authed.token(), Some("abc"));
        assert_eq!(authed.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.token(), None);
    }

    #[test]
    fn error_messages_name_the_operation() {
        assert_eq!(
            ApiError::RequestFailed(Operation::SubmitWaterLog).to_string(),
            "Failed to submit water log"
        );
        assert_eq!(
            ApiError::RequestFailed(Operation::ListUserLogs).to_string(),
            "Failed to fetch user logs"
        );
        assert_eq!(
            ApiError::RequestFailed(Operation::GetGroupStats).to_string(),
            "Failed to fetch group stats"
        );
    }

    #[tokio::test]
    async fn zero_mugs_fails_without_network() {
        // Nothing listens on port 9; the early return must win.
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.submit_water_log(0).await.unwrap_err();
        assert_eq!(err.operation(), Operation::SubmitWaterLog);
    }
}
