mod hf;
mod output;
mod pinecone;
mod search;
mod translate;

pub const USER_AGENT: &str = concat!("khoj/", env!("CARGO_PKG_VERSION"), " (CLI)");

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::info;

use hf::client::HfClient;
use pinecone::client::PineconeClient;
use search::engine::{self, SearchError, SearchRequest};
use translate::GoogleTranslate;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Search indexed news articles with a query in your own language.
///
/// Configuration via environment variables:
/// - `HF_TOKEN` (or `HUGGING_FACE_TOKEN`): Hugging Face Inference API token
/// - `HF_MODEL`: completion model override (optional)
/// - `PINECONE_API_KEY` and `PINECONE_INDEX_HOST`: article index access
#[derive(Parser)]
#[command(name = "khoj", version, about = "Cross-lingual news article search")]
struct Cli {
    /// Free-text query
    query: String,

    /// Index namespace to search (repeat for several)
    #[arg(
        long = "namespace",
        default_values_t = ["divyabhasker".to_string(), "sandesh".to_string()]
    )]
    namespaces: Vec<String>,

    /// Language the query is written in (ISO 639-1)
    #[arg(long, default_value = "en")]
    source_lang: String,

    /// Language of the indexed articles (ISO 639-1)
    #[arg(long, default_value = "gu")]
    target_lang: String,

    /// Maximum matches requested per namespace/tag query
    #[arg(long, default_value_t = 10)]
    top_k: u32,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("khoj=info".parse()?),
        )
        .init();

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    let completion = match HfClient::from_env(http.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let index = match PineconeClient::from_env(http.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let translator = GoogleTranslate::new(http);

    let req = SearchRequest {
        query: &cli.query,
        source_lang: &cli.source_lang,
        target_lang: &cli.target_lang,
        namespaces: &cli.namespaces,
        top_k: cli.top_k,
    };

    info!(query = %cli.query, namespaces = cli.namespaces.len(), "starting search");

    match engine::run_query(&completion, &translator, &index, &req).await {
        Ok(report) => {
            println!("{}", output::format_report(&report, &cli.query));
            Ok(ExitCode::SUCCESS)
        }
        Err(SearchError::NoMatches) => {
            println!("No articles found for the given query.");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
