//! Document store: source PDFs plus their cached AI artifacts.
//!
//! Documents are flat files in a known directory; document identity is the
//! file name. Each document may have a cached summary/highlights pair
//! persisted as two Markdown files in the cache directory, named
//! `<document>_summary.md` and `<document>_highlights.md`. Cached artifacts
//! are written once and never refreshed; there is no invalidation path.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use walkdir::WalkDir;

use crate::config::{CacheConfig, DocumentsConfig};
use crate::error::Error;
use crate::models::Artifacts;

/// Sentinel head entry exposed to the presentation layer when no document
/// is selected.
pub const NO_SELECTION: &str = "None";

const SUMMARY_HEADING: &str = "# AI-Generated Summary\n";
const HIGHLIGHTS_HEADING: &str = "# Key Highlights and Impacts\n";

pub struct DocumentStore {
    documents_dir: PathBuf,
    cache_dir: PathBuf,
    include: GlobSet,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl DocumentStore {
    pub fn open(documents: &DocumentsConfig, cache: &CacheConfig) -> Result<Self, Error> {
        let include = build_globset(&documents.include_globs)?;
        Ok(Self {
            documents_dir: documents.dir.clone(),
            cache_dir: cache.dir.clone(),
            include,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Document identities: file names in the documents directory matching
    /// the configured extensions, sorted.
    pub fn list(&self) -> Result<Vec<String>, Error> {
        if !self.documents_dir.exists() {
            return Err(Error::Storage(format!(
                "documents directory does not exist: {}",
                self.documents_dir.display()
            )));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.documents_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| Error::Storage(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if self.include.is_match(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// [`list`](Self::list) with the [`NO_SELECTION`] sentinel at the head,
    /// for selection widgets in the presentation layer.
    pub fn selection_list(&self) -> Result<Vec<String>, Error> {
        let mut names = self.list()?;
        names.insert(0, NO_SELECTION.to_string());
        Ok(names)
    }

    /// Raw byte content of a source document.
    pub fn read_bytes(&self, document_id: &str) -> Result<Vec<u8>, Error> {
        let path = self.documents_dir.join(document_id);
        std::fs::read(&path)
            .map_err(|e| Error::Storage(format!("failed to read {}: {}", path.display(), e)))
    }

    /// The cached summary/highlights pair; each side is populated only if
    /// its cache file exists.
    pub fn cached_artifacts(&self, document_id: &str) -> Result<Artifacts, Error> {
        Ok(Artifacts {
            summary: read_if_exists(&self.summary_path(document_id))?,
            highlights: read_if_exists(&self.highlights_path(document_id))?,
        })
    }

    /// Persist both artifacts, creating the cache directory if absent.
    ///
    /// Write-once-if-missing: a file that already exists is left untouched,
    /// so a cached artifact is never regenerated for the same document
    /// identity. Returns whether anything was written.
    pub fn write_artifacts_if_missing(
        &self,
        document_id: &str,
        summary: &str,
        highlights: &str,
    ) -> Result<bool, Error> {
        let summary_path = self.summary_path(document_id);
        let highlights_path = self.highlights_path(document_id);

        if summary_path.exists() && highlights_path.exists() {
            return Ok(false);
        }

        std::fs::create_dir_all(&self.cache_dir).map_err(|e| {
            Error::Storage(format!(
                "failed to create cache directory {}: {}",
                self.cache_dir.display(),
                e
            ))
        })?;

        if !summary_path.exists() {
            write_artifact(&summary_path, SUMMARY_HEADING, summary)?;
        }
        if !highlights_path.exists() {
            write_artifact(&highlights_path, HIGHLIGHTS_HEADING, highlights)?;
        }

        Ok(true)
    }

    /// Per-document write lock.
    ///
    /// The annotation flow holds this across its check-generate-write
    /// sequence, so two concurrent callers for the same document cannot
    /// interleave cache writes or both invoke the generator. Different
    /// documents are serialized independently.
    pub fn write_lock(&self, document_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(document_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    fn summary_path(&self, document_id: &str) -> PathBuf {
        self.cache_dir.join(format!("{}_summary.md", document_id))
    }

    fn highlights_path(&self, document_id: &str) -> PathBuf {
        self.cache_dir.join(format!("{}_highlights.md", document_id))
    }
}

fn write_artifact(path: &Path, heading: &str, text: &str) -> Result<(), Error> {
    std::fs::write(path, format!("{}{}\n", heading, text))
        .map_err(|e| Error::Storage(format!("failed to write {}: {}", path.display(), e)))
}

fn read_if_exists(path: &Path) -> Result<Option<String>, Error> {
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| Error::Storage(format!("failed to read {}: {}", path.display(), e)))
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| Error::Storage(e.to_string()))?);
    }
    builder.build().map_err(|e| Error::Storage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheConfig, DocumentsConfig};
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> DocumentStore {
        let documents = DocumentsConfig {
            dir: tmp.path().join("documents"),
            include_globs: vec!["*.pdf".to_string()],
        };
        let cache = CacheConfig {
            dir: tmp.path().join("summaries"),
        };
        std::fs::create_dir_all(&documents.dir).unwrap();
        DocumentStore::open(&documents, &cache).unwrap()
    }

    #[test]
    fn list_filters_by_extension_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let dir = tmp.path().join("documents");
        std::fs::write(dir.join("zoning-bill.pdf"), b"z").unwrap();
        std::fs::write(dir.join("agri-bill.pdf"), b"a").unwrap();
        std::fs::write(dir.join("notes.txt"), b"n").unwrap();

        assert_eq!(store.list().unwrap(), vec!["agri-bill.pdf", "zoning-bill.pdf"]);
    }

    #[test]
    fn selection_list_has_sentinel_head() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(tmp.path().join("documents/bill.pdf"), b"b").unwrap();

        let options = store.selection_list().unwrap();
        assert_eq!(options[0], NO_SELECTION);
        assert_eq!(options[1], "bill.pdf");
    }

    #[test]
    fn missing_documents_dir_is_a_storage_error() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::remove_dir(tmp.path().join("documents")).unwrap();

        assert!(matches!(store.list(), Err(Error::Storage(_))));
    }

    #[test]
    fn artifacts_absent_until_written() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let artifacts = store.cached_artifacts("bill.pdf").unwrap();
        assert!(artifacts.summary.is_none());
        assert!(artifacts.highlights.is_none());
        assert!(!artifacts.is_complete());
    }

    #[test]
    fn written_artifacts_carry_their_headings() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let wrote = store
            .write_artifacts_if_missing("bill.pdf", "a short summary", "- a highlight")
            .unwrap();
        assert!(wrote);

        let artifacts = store.cached_artifacts("bill.pdf").unwrap();
        assert_eq!(
            artifacts.summary.unwrap(),
            "# AI-Generated Summary\na short summary\n"
        );
        assert_eq!(
            artifacts.highlights.unwrap(),
            "# Key Highlights and Impacts\n- a highlight\n"
        );
    }

    #[test]
    fn second_write_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store
            .write_artifacts_if_missing("bill.pdf", "first", "first")
            .unwrap();
        let wrote = store
            .write_artifacts_if_missing("bill.pdf", "second", "second")
            .unwrap();
        assert!(!wrote);

        let artifacts = store.cached_artifacts("bill.pdf").unwrap();
        assert!(artifacts.summary.unwrap().contains("first"));
        assert!(artifacts.highlights.unwrap().contains("first"));
    }

    #[test]
    fn cache_files_are_per_document() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store
            .write_artifacts_if_missing("a.pdf", "summary a", "highlights a")
            .unwrap();
        store
            .write_artifacts_if_missing("b.pdf", "summary b", "highlights b")
            .unwrap();

        assert!(store
            .cached_artifacts("a.pdf")
            .unwrap()
            .summary
            .unwrap()
            .contains("summary a"));
        assert!(store
            .cached_artifacts("b.pdf")
            .unwrap()
            .summary
            .unwrap()
            .contains("summary b"));
    }
}
