//! Tag translation via the public Google Translate `gtx` endpoint (the same
//! endpoint the common unofficial translate libraries wrap). One short GET
//! per tag; the response is a positional JSON array rather than an object.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

const API_BASE: &str = "https://translate.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translate API error: status {0}")]
    Status(u16),

    #[error("translate API returned an unexpected response shape")]
    MalformedBody,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Abstraction over the per-tag translation collaborator. Implemented by
/// `GoogleTranslate` for production; mock implementations used in tests.
pub trait Translator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError>;
}

#[derive(Clone)]
pub struct GoogleTranslate {
    http: Client,
    base_url: String,
}

impl GoogleTranslate {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }
}

impl Translator for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let response = self
            .http
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .header("User-Agent", crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        let translated = parse_translation(&body).ok_or(TranslateError::MalformedBody)?;
        debug!(source, target, "tag translated");
        Ok(translated)
    }
}

/// The gtx endpoint answers with nested positional arrays:
/// `[[["<translated>", "<original>", ...], ...], ...]`.
/// Long inputs are split across segments; concatenate them.
fn parse_translation(body: &serde_json::Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(|v| v.as_str()) {
            out.push_str(piece);
        }
    }
    if out.is_empty() { None } else { Some(out) }
}
