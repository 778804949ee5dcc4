//! Lazy generation and caching of per-document summary and highlights.

use crate::config::GenerationConfig;
use crate::documents::DocumentStore;
use crate::error::Error;
use crate::generate::{framed, ContentGenerator};
use crate::models::Artifacts;
use crate::prompt;

/// Return the cached summary/highlights pair for a document, generating
/// and persisting it first if absent.
///
/// The store's per-document write lock is held across the whole
/// check-generate-write sequence, so concurrent callers for the same
/// document perform at most one generation pass and never interleave cache
/// writes. Once the cache exists, every later call returns it unchanged
/// without touching the generator; there is no invalidation path.
pub async fn ensure_artifacts(
    store: &DocumentStore,
    generator: &dyn ContentGenerator,
    config: &GenerationConfig,
    document_id: &str,
    document_text: &str,
) -> Result<Artifacts, Error> {
    let lock = store.write_lock(document_id);
    let _guard = lock.lock().await;

    let cached = store.cached_artifacts(document_id)?;
    if cached.is_complete() {
        return Ok(cached);
    }

    let excerpt = prompt::truncate_chars(document_text, config.prompt_budget);
    let summary = generator
        .generate(&framed(prompt::summary(excerpt)), config.max_tokens)
        .await?;
    let highlights = generator
        .generate(&framed(prompt::highlights(excerpt)), config.max_tokens)
        .await?;

    if let Err(err) = store.write_artifacts_if_missing(document_id, &summary, &highlights) {
        if !err.is_retryable() {
            return Err(err);
        }
        store.write_artifacts_if_missing(document_id, &summary, &highlights)?;
    }

    // Re-read so callers always observe the persisted form.
    store.cached_artifacts(document_id)
}
