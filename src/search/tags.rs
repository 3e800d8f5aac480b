/// Build the tag-extraction prompt for the completion model.
///
/// The query is embedded verbatim; the instruction asks for a bare
/// comma-separated list so the output can be split without any further
/// structure parsing.
pub(crate) fn build_prompt(query: &str) -> String {
    format!(
        "Task: Extract relevant keywords or tags from the following text. \
         Return only the tags as a comma-separated list.\n\n\
         Text: {query}\n\n\
         Tags:"
    )
}

/// Split a generated comma-separated tag list into individual tags.
/// Whitespace is trimmed and empty pieces dropped; order and duplicates are
/// kept as generated.
pub(crate) fn parse_tags(generated: &str) -> Vec<String> {
    generated
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
