//! Markdown rendering of a finished search report for the terminal.

use crate::search::engine::SearchReport;

const MAX_BODY_CHARS: usize = 1500;

pub(crate) fn format_report(report: &SearchReport, query: &str) -> String {
    let mut out = format!("# Search: {}\n\n", sanitize_heading(query));

    out.push_str(&format!("**Tags:** {}\n\n", report.tags.join(", ")));
    out.push_str(&format!(
        "**Translated:** {}\n\n",
        report.translated_tags.join(", ")
    ));
    out.push_str(&format!("Found {} articles:\n\n", report.articles.len()));

    for article in &report.articles {
        let date = article.metadata.date.as_deref().unwrap_or("Unknown date");
        out.push_str(&format!("## Article from {date}\n\n"));

        if let Some(title) = &article.metadata.title
            && !title.is_empty()
        {
            out.push_str(&format!("**Title:** {title}\n\n"));
        }
        if let Some(source) = &article.metadata.source
            && !source.is_empty()
        {
            out.push_str(&format!("**Source:** {source}\n\n"));
        }

        let text = if article.metadata.text.is_empty() {
            "No content available"
        } else {
            &article.metadata.text
        };
        if text.len() > MAX_BODY_CHARS {
            let end = text.floor_char_boundary(MAX_BODY_CHARS);
            out.push_str(&format!("{}...\n\n(truncated)\n\n", &text[..end]));
        } else {
            out.push_str(text);
            out.push_str("\n\n");
        }

        if let Some(link) = &article.metadata.link
            && !link.is_empty()
        {
            out.push_str(&format!("[Read more]({})\n\n", escape_md_link(link)));
        }
    }

    if !report.warnings.is_empty() {
        out.push_str("---\n\n## Warnings\n\n");
        for warning in &report.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
    }

    out
}

/// Escape characters that break Markdown link syntax: `[`, `]`, `(`, `)`.
fn escape_md_link(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '[' | ']' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Replace newlines in user input so it cannot break heading structure.
fn sanitize_heading(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
