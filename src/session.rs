//! Session-scoped chat over one selected document.
//!
//! History lives only in memory for the lifetime of one user session and is
//! never written to durable storage. Each session owns its history, so two
//! sessions against the same document never observe each other's turns.
//! The presentation layer creates a session at start and drops it at end;
//! interactions are strictly sequential within a session.

use crate::config::GenerationConfig;
use crate::error::Error;
use crate::generate::{framed, ContentGenerator};
use crate::models::{ChatTurn, Role};
use crate::prompt;

pub struct ChatSession {
    document_id: String,
    document_text: String,
    history: Vec<ChatTurn>,
}

impl ChatSession {
    /// Fresh empty history over an already-extracted document text.
    pub fn new(document_id: impl Into<String>, document_text: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            document_text: document_text.into(),
            history: Vec::new(),
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Answer one user question about the document.
    ///
    /// On success the question and the generated answer are appended as two
    /// turns. On failure nothing is appended; the session and its document
    /// text stay usable, so the user retries the question rather than
    /// reselecting the document.
    pub async fn ask(
        &mut self,
        generator: &dyn ContentGenerator,
        config: &GenerationConfig,
        question: &str,
    ) -> Result<String, Error> {
        if question.trim().is_empty() {
            return Err(Error::Input("question must not be empty".to_string()));
        }

        let excerpt = prompt::truncate_chars(&self.document_text, config.prompt_budget);
        let answer = generator
            .generate(&framed(prompt::answer(excerpt, question)), config.max_tokens)
            .await?;

        self.history.push(ChatTurn {
            role: Role::User,
            content: question.to_string(),
        });
        self.history.push(ChatTurn {
            role: Role::Assistant,
            content: answer.clone(),
        });

        Ok(answer)
    }

    /// Ordered question/answer turns so far.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{DisabledGenerator, ScriptedGenerator};

    fn config() -> GenerationConfig {
        GenerationConfig::default()
    }

    #[tokio::test]
    async fn ask_appends_question_and_answer() {
        let generator = ScriptedGenerator::new(["The bill funds rural clinics."]);
        let mut session = ChatSession::new("health-bill.pdf", "document text");

        let answer = session
            .ask(&generator, &config(), "What does it fund?")
            .await
            .unwrap();
        assert_eq!(answer, "The bill funds rural clinics.");

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].content, "What does it fund?");
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, "The bill funds rural clinics.");
    }

    #[tokio::test]
    async fn empty_question_is_rejected() {
        let generator = ScriptedGenerator::new(["unused"]);
        let mut session = ChatSession::new("bill.pdf", "text");

        let err = session.ask(&generator, &config(), "  ").await.unwrap_err();
        assert!(matches!(err, Error::Input(_)));
        assert!(session.history().is_empty());
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn failed_generation_leaves_history_untouched() {
        let mut session = ChatSession::new("bill.pdf", "text");

        let err = session
            .ask(&DisabledGenerator, &config(), "a question")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let generator = ScriptedGenerator::new(["answer one", "answer two"]);
        let mut first = ChatSession::new("bill.pdf", "text");
        let mut second = ChatSession::new("bill.pdf", "text");

        first
            .ask(&generator, &config(), "first question")
            .await
            .unwrap();
        second
            .ask(&generator, &config(), "second question")
            .await
            .unwrap();

        assert_eq!(first.history().len(), 2);
        assert_eq!(second.history().len(), 2);
        assert_eq!(first.history()[0].content, "first question");
        assert_eq!(second.history()[0].content, "second question");
        assert_eq!(first.history()[1].content, "answer one");
        assert_eq!(second.history()[1].content, "answer two");
    }

    #[tokio::test]
    async fn clear_discards_history() {
        let generator = ScriptedGenerator::new(["answer"]);
        let mut session = ChatSession::new("bill.pdf", "text");
        session.ask(&generator, &config(), "question").await.unwrap();

        session.clear();
        assert!(session.history().is_empty());
    }
}
