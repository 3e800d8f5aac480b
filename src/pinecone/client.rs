use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ArticleMatch, QueryRequest, QueryResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Dimension of the index's embedding space. The query vector is all zeros
/// since matching is done purely through the metadata containment filter.
const DEFAULT_DIMENSION: usize = 1536;

#[derive(Debug, thiserror::Error)]
pub enum PineconeError {
    #[error("PINECONE_API_KEY not set")]
    ApiKeyNotSet,

    #[error("PINECONE_INDEX_HOST not set (the index endpoint URL from the Pinecone console)")]
    IndexHostNotSet,

    #[error("invalid index host URL: {0}")]
    InvalidIndexHost(#[from] url::ParseError),

    #[error("namespace not found: {0}")]
    NamespaceNotFound(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Abstraction over the namespace-partitioned article index. Implemented by
/// `PineconeClient` for production; mock implementations used in tests.
pub trait ArticleIndex {
    async fn query(
        &self,
        namespace: &str,
        tag: &str,
        top_k: u32,
    ) -> Result<Vec<ArticleMatch>, PineconeError>;
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone)]
pub struct PineconeClient {
    http: Client,
    api_key: ApiKey,
    host: String,
    dimension: usize,
}

impl PineconeClient {
    pub fn from_env(http: Client) -> Result<Self, PineconeError> {
        let api_key = env::var("PINECONE_API_KEY").map_err(|_| PineconeError::ApiKeyNotSet)?;
        if api_key.trim().is_empty() {
            return Err(PineconeError::ApiKeyNotSet);
        }
        let host = env::var("PINECONE_INDEX_HOST").map_err(|_| PineconeError::IndexHostNotSet)?;
        let host = host.trim().trim_end_matches('/').to_string();
        if host.is_empty() {
            return Err(PineconeError::IndexHostNotSet);
        }
        url::Url::parse(&host)?;
        Ok(Self {
            http,
            api_key: ApiKey(api_key.trim().to_string()),
            host,
            dimension: DEFAULT_DIMENSION,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            host: base_url.trim_end_matches('/').to_string(),
            dimension: 8,
        }
    }
}

impl ArticleIndex for PineconeClient {
    async fn query(
        &self,
        namespace: &str,
        tag: &str,
        top_k: u32,
    ) -> Result<Vec<ArticleMatch>, PineconeError> {
        let request = QueryRequest {
            vector: vec![0.0; self.dimension],
            filter: serde_json::json!({ "text": { "$contains": tag } }),
            top_k,
            namespace,
            include_metadata: true,
        };

        let response = self
            .http
            .post(format!("{}/query", self.host))
            .header("Api-Key", &self.api_key.0)
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            warn!(namespace, "namespace missing from index");
            return Err(PineconeError::NamespaceNotFound(namespace.to_string()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet = &text[..text.floor_char_boundary(200)];
            warn!(status = %status, namespace, "index query failed");
            return Err(PineconeError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {snippet}"),
            });
        }

        let body: QueryResponse = response.json().await?;
        debug!(namespace, tag, matches = body.matches.len(), "index query complete");
        Ok(body.matches)
    }
}
