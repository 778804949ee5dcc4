//! Comment submission: validation, sentiment classification, persistence.

use crate::comments::{CommentStore, DEFAULT_CATEGORY};
use crate::config::GenerationConfig;
use crate::documents::NO_SELECTION;
use crate::error::Error;
use crate::generate::{framed, ContentGenerator};
use crate::models::Sentiment;
use crate::prompt;

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmittedComment {
    pub id: i64,
    pub sentiment: Sentiment,
    pub category: String,
}

/// Classify and persist one citizen comment.
///
/// Input is validated before any generation call or side effect: an empty
/// body or a missing document selection is rejected outright. The sentiment
/// label is taken from the first line of the classifier response and must
/// be one of Positive, Negative, or Neutral; any other output fails the
/// submission and nothing is persisted. The stored label is exactly the
/// classified one, computed once and never recomputed.
pub async fn submit_comment(
    store: &dyn CommentStore,
    generator: &dyn ContentGenerator,
    config: &GenerationConfig,
    document_id: &str,
    body: &str,
) -> Result<SubmittedComment, Error> {
    if document_id.is_empty() || document_id == NO_SELECTION {
        return Err(Error::Input("no document selected".to_string()));
    }
    if body.trim().is_empty() {
        return Err(Error::Input(
            "Please enter a comment before submitting.".to_string(),
        ));
    }

    let response = generator
        .generate(&framed(prompt::sentiment(body)), config.max_tokens)
        .await?;
    let label = response.lines().next().unwrap_or("").trim();
    let sentiment = Sentiment::parse(label)
        .ok_or_else(|| Error::Generation(format!("unrecognized sentiment label: {:?}", label)))?;

    let id = match store
        .append(document_id, body, sentiment.as_str(), DEFAULT_CATEGORY)
        .await
    {
        Ok(id) => id,
        Err(err) if err.is_retryable() => {
            store
                .append(document_id, body, sentiment.as_str(), DEFAULT_CATEGORY)
                .await?
        }
        Err(err) => return Err(err),
    };

    Ok(SubmittedComment {
        id,
        sentiment,
        category: DEFAULT_CATEGORY.to_string(),
    })
}
