//! Probe wire contract.
//!
//! # Request
//! `POST <target>` with `Content-Type: application/json` and the body
//! `{"text":"hello world","source_lang":"EN","target_lang":"ZH"}`.
//!
//! # Response
//! Status 200 and a JSON object whose `data` field passes the configured
//! [`DataCheck`].

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::candidates::Endpoint;
use crate::config::{DataCheck, ProbePath};
use crate::probe::error::ProbeError;

/// Translation-style health check payload.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TranslationRequest<'a> {
    pub text: &'a str,
    pub source_lang: &'a str,
    pub target_lang: &'a str,
}

impl TranslationRequest<'static> {
    pub const HEALTH_CHECK: Self = Self {
        text: "hello world",
        source_lang: "EN",
        target_lang: "ZH",
    };
}

impl ProbePath {
    /// Resolve the URL a probe for `endpoint` is sent to.
    pub fn target(self, endpoint: &Endpoint) -> Result<Url, ProbeError> {
        let raw = match self {
            ProbePath::Bare => endpoint.as_str().to_string(),
            ProbePath::Translate => {
                format!("{}/translate", endpoint.as_str().trim_end_matches('/'))
            }
        };

        let url = Url::parse(&raw)
            .map_err(|_| ProbeError::InvalidEndpoint(endpoint.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ProbeError::InvalidEndpoint(endpoint.to_string())),
        }
    }
}

impl DataCheck {
    /// Whether a decoded response body carries an acceptable `data` field.
    pub fn accepts(self, body: &Value) -> bool {
        let Some(data) = body.get("data") else {
            return false;
        };

        match self {
            DataCheck::Truthy => is_truthy(data),
            DataCheck::NonEmpty => match data {
                Value::String(s) => !s.is_empty(),
                other => !other.to_string().is_empty(),
            },
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
