use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub inputs: &'a str,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub return_full_text: bool,
}

/// One element of the inference API's response array.
#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// Error body the inference API returns alongside non-success statuses
/// (and 503 while a cold model is loading).
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}
