//! HTTP transport seam.
//!
//! DESIGN
//! ======
//! The client never talks to `reqwest` directly. It goes through
//! [`HttpTransport`], which offers exactly the three verbs the API needs and
//! hands back the status code plus the fully-read body. [`ReqwestTransport`]
//! is the production implementation; tests substitute a recording mock.

use std::time::Duration;

use crate::config::{IpMsgConfig, IpMsgTimeouts};
use crate::error::IpMsgError;

// =============================================================================
// FORM VALUES
// =============================================================================

/// Ordered `application/x-www-form-urlencoded` fields for a mutating request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pairs: Vec<(&'static str, String)>,
}

impl FormValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value for the same key.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    /// Set `key` only when `value` is non-empty.
    pub fn set_if_present(&mut self, key: &'static str, value: &str) {
        if !value.is_empty() {
            self.set(key, value);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| *k == key)
    }

    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// =============================================================================
// TRANSPORT TRAIT
// =============================================================================

/// Status code and fully-read body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// `true` for any status in `[200, 300)`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP primitive the client issues every call through. Enables mocking in tests.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a body-less GET.
    ///
    /// # Errors
    ///
    /// Returns [`IpMsgError::Transport`] if the request or body read fails.
    async fn get(&self, url: &str) -> Result<HttpResponse, IpMsgError>;

    /// Issue a POST with a form-encoded body.
    ///
    /// # Errors
    ///
    /// Returns [`IpMsgError::Transport`] if the request or body read fails.
    async fn post(&self, form: &FormValues, url: &str) -> Result<HttpResponse, IpMsgError>;

    /// Issue a body-less DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`IpMsgError::Transport`] if the request or body read fails.
    async fn delete(&self, url: &str) -> Result<HttpResponse, IpMsgError>;
}

// =============================================================================
// REQWEST TRANSPORT
// =============================================================================

/// Production transport: `reqwest` with HTTP Basic credentials on every call.
pub struct ReqwestTransport {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
}

impl ReqwestTransport {
    /// Build a transport authenticating as `account_sid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(account_sid: String, auth_token: String, timeouts: IpMsgTimeouts) -> Result<Self, IpMsgError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| IpMsgError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, account_sid, auth_token })
    }

    /// Build a transport from parsed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &IpMsgConfig) -> Result<Self, IpMsgError> {
        Self::new(config.account_sid.clone(), config.auth_token.clone(), config.timeouts)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<HttpResponse, IpMsgError> {
        let response = request
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await
            .map_err(|e| IpMsgError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| IpMsgError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, IpMsgError> {
        self.send(self.http.get(url)).await
    }

    async fn post(&self, form: &FormValues, url: &str) -> Result<HttpResponse, IpMsgError> {
        self.send(self.http.post(url).form(form.pairs())).await
    }

    async fn delete(&self, url: &str) -> Result<HttpResponse, IpMsgError> {
        self.send(self.http.delete(url)).await
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
