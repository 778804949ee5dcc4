//! Comment aggregation: distributions plus a synthesized summary.

use std::collections::HashMap;

use crate::comments::CommentStore;
use crate::config::GenerationConfig;
use crate::error::Error;
use crate::generate::{framed, ContentGenerator};
use crate::models::AggregateReport;
use crate::prompt;

/// Placeholder synthesis reported for a document with no comments yet.
pub const EMPTY_SYNTHESIS: &str = "No comments yet.";

/// Recompute the aggregate report for one document from scratch.
///
/// Labels are counted verbatim, with no normalization, so a malformed
/// stored label shows up as its own bucket. The synthesis is a single
/// generation call over the newline-joined comment bodies, bounded to the
/// prompt budget regardless of comment count. A document with no comments
/// yields zero counts and the placeholder synthesis without invoking the
/// generator. Nothing is cached; every call recomputes.
pub async fn aggregate(
    store: &dyn CommentStore,
    generator: &dyn ContentGenerator,
    config: &GenerationConfig,
    document_id: &str,
) -> Result<AggregateReport, Error> {
    let comments = store.list_by_document(document_id).await?;

    if comments.is_empty() {
        return Ok(AggregateReport {
            total: 0,
            sentiment_counts: HashMap::new(),
            category_counts: HashMap::new(),
            synthesis: EMPTY_SYNTHESIS.to_string(),
        });
    }

    let mut sentiment_counts: HashMap<String, u64> = HashMap::new();
    let mut category_counts: HashMap<String, u64> = HashMap::new();
    for comment in &comments {
        *sentiment_counts.entry(comment.sentiment.clone()).or_insert(0) += 1;
        *category_counts.entry(comment.category.clone()).or_insert(0) += 1;
    }

    let joined = comments
        .iter()
        .map(|c| c.body.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let bounded = prompt::truncate_chars(&joined, config.prompt_budget);
    let synthesis = generator
        .generate(&framed(prompt::comment_summary(bounded)), config.max_tokens)
        .await?;

    Ok(AggregateReport {
        total: comments.len() as u64,
        sentiment_counts,
        category_counts,
        synthesis,
    })
}
