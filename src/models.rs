//! Core data models used throughout Maoni.
//!
//! These types represent the documents, comments, chat turns, and derived
//! reports that flow through the annotation and feedback pipeline.

use std::collections::HashMap;

/// A persisted citizen comment.
///
/// Comments are append-only: once written they are never updated or
/// deleted. The sentiment label is computed once, at submission time, and
/// stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Auto-incrementing sequence number, unique and insertion-ordered.
    pub id: i64,
    /// Owning document identity (the source file name).
    pub document_name: String,
    /// Free-text comment body.
    pub body: String,
    /// Sentiment label as classified; usually one of Positive, Negative,
    /// or Neutral, but stored exactly as given.
    pub sentiment: String,
    /// Category label; effectively the constant "General" until category
    /// extraction is refined.
    pub category: String,
}

/// Sentiment labels recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Parse a classifier label, tolerating surrounding whitespace and a
    /// trailing period. Anything outside the fixed label set is rejected.
    pub fn parse(label: &str) -> Option<Sentiment> {
        match label.trim().trim_end_matches('.') {
            "Positive" => Some(Sentiment::Positive),
            "Negative" => Some(Sentiment::Negative),
            "Neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The cached summary/highlights pair for one document.
///
/// Each side is present only if its cache file exists; both are stored as
/// Markdown with a level-1 heading naming the artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub summary: Option<String>,
    pub highlights: Option<String>,
}

impl Artifacts {
    pub fn is_complete(&self) -> bool {
        self.summary.is_some() && self.highlights.is_some()
    }
}

/// Role of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged message in a session-scoped conversation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// Derived sentiment/category distributions and synthesized text computed
/// from all comments on one document.
///
/// Recomputed from scratch on every request; never stored. Map iteration
/// order carries no meaning.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    pub total: u64,
    pub sentiment_counts: HashMap<String, u64>,
    pub category_counts: HashMap<String, u64>,
    pub synthesis: String,
}
