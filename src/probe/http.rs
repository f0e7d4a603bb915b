//! HTTP prober.
//!
//! # Responsibilities
//! - Send the health check payload to the derived target
//! - Enforce the per-attempt deadline (connect + full exchange)
//! - Measure latency from dispatch to decoded body
//! - Classify the response

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::time::{timeout, Instant};

use crate::candidates::Endpoint;
use crate::config::{DataCheck, ProbeConfig, ProbePath};
use crate::error::{ProberError, ProberResult};
use crate::probe::error::ProbeError;
use crate::probe::request::TranslationRequest;
use crate::probe::Probe;

/// Probes endpoints over HTTP with a shared client.
///
/// Cloning is cheap: clones share the client's connection pool. The pool is
/// closed once the last clone is dropped.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    path: ProbePath,
    data_check: DataCheck,
    timeout: Duration,
}

impl HttpProber {
    /// Build a prober with its own client.
    pub fn new(config: &ProbeConfig) -> ProberResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("endpoint-prober/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProberError::Client)?;

        Ok(Self::with_client(client, config))
    }

    /// Build a prober around an existing client.
    pub fn with_client(client: Client, config: &ProbeConfig) -> Self {
        Self {
            client,
            path: config.path,
            data_check: config.data_check,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Override the per-attempt deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn classify(&self, err: reqwest::Error) -> ProbeError {
        if err.is_timeout() {
            ProbeError::Timeout(self.timeout)
        } else if err.is_decode() {
            ProbeError::MalformedBody(err)
        } else {
            ProbeError::Network(err)
        }
    }
}

impl Probe for HttpProber {
    async fn attempt(&self, endpoint: &Endpoint) -> Result<Duration, ProbeError> {
        let url = self.path.target(endpoint)?;

        let started = Instant::now();
        let exchange = async {
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .json(&TranslationRequest::HEALTH_CHECK)
                .send()
                .await
                .map_err(|e| self.classify(e))?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(ProbeError::Status(status.as_u16()));
            }

            response.json::<Value>().await.map_err(|e| self.classify(e))
        };

        let body = match timeout(self.timeout, exchange).await {
            Ok(result) => result?,
            Err(_) => return Err(ProbeError::Timeout(self.timeout)),
        };
        let latency = started.elapsed();

        if !self.data_check.accepts(&body) {
            return Err(ProbeError::MissingData);
        }

        Ok(latency)
    }
}
