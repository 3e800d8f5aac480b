use std::collections::HashSet;

use chrono::NaiveDateTime;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::hf::client::{CompletionClient, HfError};
use crate::pinecone::client::ArticleIndex;
use crate::pinecone::types::ArticleMatch;
use crate::search::{dates, tags};
use crate::translate::Translator;

/// Upper bound on in-flight index queries during the namespace fan-out.
const MAX_CONCURRENT_QUERIES: usize = 4;

pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub source_lang: &'a str,
    pub target_lang: &'a str,
    pub namespaces: &'a [String],
    pub top_k: u32,
}

#[derive(Debug)]
pub struct SearchReport {
    pub tags: Vec<String>,
    pub translated_tags: Vec<String>,
    /// Deduplicated matches, newest first.
    pub articles: Vec<ArticleMatch>,
    /// Per-tag and per-query failures that were skipped rather than fatal.
    pub warnings: Vec<String>,
}

/// Conditions that stop a query. All are user-facing; `NoMatches` is the
/// ordinary came-up-empty outcome rather than a fault.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("tag extraction failed: {0}")]
    ExtractionFailed(HfError),

    #[error("no tags could be extracted from the query")]
    NoTags,

    #[error("no tags could be translated")]
    NoTranslatedTags,

    #[error("no content namespaces configured")]
    NoNamespaces,

    #[error("no articles found")]
    NoMatches,
}

/// Run one query end to end: extract tags, translate them into the content
/// language, fan out over every (namespace, tag) pair, then deduplicate and
/// rank the merged matches by date.
pub async fn run_query(
    completion: &impl CompletionClient,
    translator: &impl Translator,
    index: &impl ArticleIndex,
    req: &SearchRequest<'_>,
) -> Result<SearchReport, SearchError> {
    if req.query.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    if req.namespaces.is_empty() {
        return Err(SearchError::NoNamespaces);
    }

    let tags = extract_tags(completion, req.query).await?;
    info!(count = tags.len(), "tags extracted");

    let mut warnings = Vec::new();
    let translated = translate_tags(
        translator,
        &tags,
        req.source_lang,
        req.target_lang,
        &mut warnings,
    )
    .await;
    if translated.is_empty() {
        return Err(SearchError::NoTranslatedTags);
    }
    info!(count = translated.len(), "tags translated");

    let matches = fan_out(index, req.namespaces, &translated, req.top_k, &mut warnings).await;
    let articles = aggregate(matches);
    if articles.is_empty() {
        return Err(SearchError::NoMatches);
    }
    info!(count = articles.len(), "articles ranked");

    Ok(SearchReport {
        tags,
        translated_tags: translated,
        articles,
        warnings,
    })
}

async fn extract_tags(
    completion: &impl CompletionClient,
    query: &str,
) -> Result<Vec<String>, SearchError> {
    let prompt = tags::build_prompt(query);
    let generated = completion.complete(&prompt).await.map_err(|e| {
        warn!(error = %e, "tag extraction failed");
        SearchError::ExtractionFailed(e)
    })?;
    let tags = tags::parse_tags(&generated);
    if tags.is_empty() {
        return Err(SearchError::NoTags);
    }
    Ok(tags)
}

async fn translate_tags(
    translator: &impl Translator,
    tags: &[String],
    source: &str,
    target: &str,
    warnings: &mut Vec<String>,
) -> Vec<String> {
    let mut translated = Vec::with_capacity(tags.len());
    for tag in tags {
        match translator.translate(tag, source, target).await {
            Ok(t) => translated.push(t),
            Err(e) => {
                warn!(tag = %tag, error = %e, "tag translation failed, skipping");
                warnings.push(format!("Could not translate \"{tag}\" ({e})"));
            }
        }
    }
    translated
}

async fn fan_out(
    index: &impl ArticleIndex,
    namespaces: &[String],
    tags: &[String],
    top_k: u32,
    warnings: &mut Vec<String>,
) -> Vec<ArticleMatch> {
    let pairs: Vec<(&str, &str)> = namespaces
        .iter()
        .flat_map(|ns| tags.iter().map(move |tag| (ns.as_str(), tag.as_str())))
        .collect();

    // `buffered` keeps completion order equal to the namespace x tag
    // iteration order, so ties in the final sort break the same way on
    // every run.
    let outcomes: Vec<_> = stream::iter(pairs)
        .map(|(ns, tag)| async move { (ns, tag, index.query(ns, tag, top_k).await) })
        .buffered(MAX_CONCURRENT_QUERIES)
        .collect()
        .await;

    let mut matches = Vec::new();
    for (ns, tag, outcome) in outcomes {
        match outcome {
            Ok(mut found) => {
                debug!(namespace = ns, tag, count = found.len(), "namespace searched");
                matches.append(&mut found);
            }
            Err(e) => {
                warn!(namespace = ns, tag, error = %e, "namespace query failed, skipping");
                warnings.push(format!("Search in \"{ns}\" for \"{tag}\" failed ({e})"));
            }
        }
    }
    matches
}

/// Deduplicate merged matches by article text, keeping the first copy seen,
/// then sort newest first. The sort is stable, so equal dates keep their
/// fan-out arrival order.
///
/// Each match's date is normalized exactly once, before sorting, and the
/// sort compares those pre-computed instants. Re-normalizing inside the
/// comparator would hand an unparseable date a fresh "now" on every
/// comparison, making the ordering non-deterministic; pinning the instant
/// keeps repeated aggregation of the same input stable.
fn aggregate(matches: Vec<ArticleMatch>) -> Vec<ArticleMatch> {
    let mut seen = HashSet::new();
    let mut unique: Vec<(NaiveDateTime, ArticleMatch)> = Vec::new();
    for m in matches {
        if seen.insert(m.metadata.text.clone()) {
            let instant = dates::normalize(m.metadata.date.as_deref().unwrap_or(""));
            unique.push((instant, m));
        }
    }
    unique.sort_by(|a, b| b.0.cmp(&a.0));
    unique.into_iter().map(|(_, m)| m).collect()
}
