//! HTTP client for the remote analysis service.

use std::time::Duration;

use async_trait::async_trait;
use credcheck_core::{AnalysisRequest, AnalysisResult};
use serde_json::Value;
use tracing::{debug, info};

use crate::{AnalysisError, Analyzer};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/analyze";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAnalyzerConfig {
    /// Full URL of the analysis endpoint.
    pub endpoint: String,
    /// Whole-request timeout. `None` waits until the transport gives up.
    pub timeout: Option<Duration>,
}

impl Default for HttpAnalyzerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

/// Sends each request as one JSON `POST` to the configured endpoint.
pub struct HttpAnalyzer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalyzer {
    pub fn new(config: HttpAnalyzerConfig) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        info!(
            endpoint = %self.endpoint,
            chars = request.text().chars().count(),
            "sending analysis request"
        );
        let resp = self.client.post(&self.endpoint).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let result = parse_response(&body)?;
        info!(
            verdict = %result.verdict,
            confidence = result.confidence.get(),
            red_flags = result.red_flags.len(),
            "analysis received"
        );
        Ok(result)
    }
}

/// Decode a 2xx body: either an explicit `error` payload or a result.
fn parse_response(body: &str) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_str(body)?;
    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        debug!(%message, "service reported an error");
        return Err(AnalysisError::Service(message));
    }
    Ok(serde_json::from_value(value)?)
}
