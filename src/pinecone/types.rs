use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest<'a> {
    pub vector: Vec<f32>,
    pub filter: serde_json::Value,
    pub top_k: u32,
    pub namespace: &'a str,
    pub include_metadata: bool,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<ArticleMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleMatch {
    pub id: String,
    /// Similarity score from the index. Carried through for display but not
    /// used for ranking; results are ordered by article date instead.
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: ArticleMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleMetadata {
    pub date: Option<String>,
    /// Article body. Also the identity key when deduplicating merged results.
    #[serde(default)]
    pub text: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
}
