use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ApiErrorBody, CompletionRequest, GeneratedText, GenerationParameters};

const API_BASE: &str = "https://api-inference.huggingface.co";
const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Generation is kept deterministic-leaning and short: the model only has to
// emit a comma-separated tag list.
const MAX_NEW_TOKENS: u32 = 100;
const TEMPERATURE: f32 = 0.3;
const TOP_P: f32 = 0.9;

#[derive(Debug, thiserror::Error)]
pub enum HfError {
    #[error("HF_TOKEN not set. Create one at https://huggingface.co/settings/tokens")]
    TokenNotSet,

    #[error("model is still loading, retry in a moment")]
    ModelLoading,

    #[error("API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("empty completion response")]
    EmptyResponse,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Abstraction over the text-completion collaborator used for tag
/// extraction. Implemented by `HfClient` for production; mock
/// implementations used in tests.
pub trait CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, HfError>;
}

#[derive(Clone)]
struct ApiToken(String);

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone)]
pub struct HfClient {
    http: Client,
    token: ApiToken,
    model: String,
    base_url: String,
}

impl HfClient {
    pub fn from_env(http: Client) -> Result<Self, HfError> {
        let token = env::var("HF_TOKEN")
            .or_else(|_| env::var("HUGGING_FACE_TOKEN"))
            .map_err(|_| HfError::TokenNotSet)?;
        if token.trim().is_empty() {
            return Err(HfError::TokenNotSet);
        }
        let model = env::var("HF_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self {
            http,
            token: ApiToken(token.trim().to_string()),
            model,
            base_url: API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            token: ApiToken("test-token".to_string()),
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.to_string(),
        }
    }
}

impl CompletionClient for HfClient {
    // One call per query, no retries: a failed extraction halts the pipeline
    // rather than burning quota on a query the user can simply re-run.
    async fn complete(&self, prompt: &str) -> Result<String, HfError> {
        let url = format!("{}/models/{}", self.base_url, self.model);

        let request = CompletionRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                top_p: TOP_P,
                return_full_text: false,
            },
        };

        debug_assert!(
            url.starts_with("https://") || cfg!(test),
            "API token must only be sent over HTTPS"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token.0)
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("inference API rate limited");
            return Err(HfError::RateLimited);
        }
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            warn!(model = %self.model, "model not loaded yet");
            return Err(HfError::ModelLoading);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| {
                    let snippet = &text[..text.floor_char_boundary(200)];
                    format!("HTTP {status}: {snippet}")
                });
            warn!(status = %status, "inference API error");
            return Err(HfError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body: Vec<GeneratedText> = response.json().await?;
        debug!(model = %self.model, "completion received");

        body.into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or(HfError::EmptyResponse)
    }
}
