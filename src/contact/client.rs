use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::response::ResponseContract;
use super::submission::ContactSubmission;

/// A pre-registered hosted form that receives a site's contact submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEndpoint {
    pub url: String,
    #[serde(default)]
    pub response: ResponseContract,
}

#[derive(Debug)]
pub enum TransportError {
    /// The request never produced a response (connect, DNS, TLS, timeout).
    Request(String),
    /// A response arrived but its body was not JSON.
    Decode(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Request(msg) => write!(f, "Form request failed: {msg}"),
            TransportError::Decode(msg) => write!(f, "Form response was not JSON: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait FormService: Send + Sync {
    /// Send one submission and return the service's JSON reply, whatever its status code.
    async fn post(
        &self,
        endpoint: &FormEndpoint,
        submission: &ContactSubmission,
    ) -> Result<Value, TransportError>;
}

pub struct HostedFormClient {
    client: reqwest::Client,
}

impl HostedFormClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FormService for HostedFormClient {
    async fn post(
        &self,
        endpoint: &FormEndpoint,
        submission: &ContactSubmission,
    ) -> Result<Value, TransportError> {
        let resp = self
            .client
            .post(&endpoint.url)
            .header(ACCEPT, "application/json")
            .multipart(submission.to_multipart())
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        tracing::debug!("Form endpoint answered {status} ({} bytes)", body.len());

        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(format!("status {status}: {e}")))
    }
}
