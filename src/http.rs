use crate::error::{ProbeError, Result};
use crate::types::config::{RetryConfig, Settings};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub bearer: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            bearer: None,
        }
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The outbound seam both probes depend on. A transport only reports
/// transport-level failures; status handling belongs to the caller.
pub trait Transport {
    fn get(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, ProbeError>;
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.http.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, ProbeError> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_secs(config.backoff_secs),
            retry_statuses: config.retry_statuses.clone(),
        }
    }
}

impl RetryPolicy {
    /// `attempt` is 1-based and counts the request that produced `status`.
    pub fn should_retry(&self, status: u16, attempt: u32) -> bool {
        attempt < self.max_attempts && self.retry_statuses.contains(&status)
    }

    /// Issues `request`, repeating it after `backoff` while the response
    /// status is retryable. Transport errors end the loop immediately.
    pub fn execute(
        &self,
        transport: &dyn Transport,
        request: &HttpRequest,
    ) -> std::result::Result<HttpResponse, ProbeError> {
        let mut attempt = 1;
        loop {
            let response = transport.get(request)?;
            if !self.should_retry(response.status, attempt) {
                return Ok(response);
            }
            tracing::info!(
                url = %request.url,
                status = response.status,
                attempt,
                backoff_ms = self.backoff.as_millis() as u64,
                "remote is still computing, retrying"
            );
            if !self.backoff.is_zero() {
                std::thread::sleep(self.backoff);
            }
            attempt += 1;
        }
    }

    /// Runs `execute` and accepts only a final 2xx that is not itself a
    /// retryable status. A 202 still pending after the last attempt is a
    /// failure, not data.
    pub fn fetch(
        &self,
        transport: &dyn Transport,
        request: &HttpRequest,
    ) -> std::result::Result<HttpResponse, ProbeError> {
        let response = self.execute(transport, request)?;
        if !response.is_success() || self.retry_statuses.contains(&response.status) {
            return Err(ProbeError::from_status(response.status));
        }
        Ok(response)
    }
}
