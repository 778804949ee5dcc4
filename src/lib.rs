//! # Maoni
//!
//! A document-annotation and comment-feedback pipeline for public
//! participation tools.
//!
//! Maoni turns a directory of government documents (PDF) plus a stream of
//! free-text citizen comments into two kinds of derived output: a cached
//! AI-generated summary/highlights pair per document, and an on-demand
//! aggregated sentiment/category report with a synthesized summary of the
//! feedback. A session-scoped chat lets a citizen ask questions about the
//! selected document.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌─────────┐   ┌──────────┐   ┌────────────┐
//! │ documents │──▶│ extract │──▶│ generate │──▶│ cache (.md) │
//! │  (*.pdf)  │   └─────────┘   └────┬─────┘   └────────────┘
//! └───────────┘                      │
//!                ┌──────────┐        │        ┌───────────┐
//! comments ─────▶│ classify │────────┴───────▶│  SQLite    │──▶ aggregate
//!                └──────────┘                 └───────────┘
//! ```
//!
//! All intelligence features go through one seam: templated generation
//! against a chat-completion endpoint. Everything else is storage and
//! counting.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`documents`] | Source documents and cached artifacts |
//! | [`extract`] | PDF text extraction |
//! | [`prompt`] | Prompt templates and input bounding |
//! | [`generate`] | Content generation provider abstraction |
//! | [`annotate`] | Lazy summary/highlights caching |
//! | [`comments`] | Append-only comment store |
//! | [`feedback`] | Comment validation, classification, persistence |
//! | [`aggregate`] | Sentiment/category distributions and synthesis |
//! | [`session`] | Session-scoped chat state |
//! | [`db`] | Database connection and schema |
//! | [`error`] | Error taxonomy |

pub mod aggregate;
pub mod annotate;
pub mod comments;
pub mod config;
pub mod db;
pub mod documents;
pub mod error;
pub mod extract;
pub mod feedback;
pub mod generate;
pub mod models;
pub mod prompt;
pub mod session;
