//! Content generation provider abstraction and implementations.
//!
//! Defines the [`ContentGenerator`] trait and concrete implementations:
//! - **[`DisabledGenerator`]** — returns errors; used when generation is not configured.
//! - **[`GroqGenerator`]** — calls the Groq chat-completions API with a timeout and a bounded retry.
//! - **[`ScriptedGenerator`]** — replays canned responses and counts calls; used in tests.
//!
//! Every call sends a list of role-tagged messages (the persona framing as
//! the system message, one rendered prompt as the user message) and a
//! maximum output token count, and returns generated text. Model selection
//! is a fixed configuration value, not caller-controlled.
//!
//! # Retry Strategy
//!
//! The Groq provider retries transient errors with exponential backoff:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors and timeouts → retry
//!
//! The default configuration allows a single retry, so a hung or flaky
//! call fails the interaction after one extra attempt instead of hanging
//! the whole session.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::config::GenerationConfig;
use crate::error::Error;
use crate::prompt;

const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Role of a generation request message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
        }
    }
}

/// One role-tagged message in a generation request.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// The standard two-message request: persona framing plus one rendered
/// prompt.
pub fn framed(user_prompt: String) -> Vec<Message> {
    vec![
        Message::system(prompt::SYSTEM_PROMPT),
        Message::user(user_prompt),
    ]
}

/// Trait for content generation providers.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Returns the model identifier (e.g. `"mixtral-8x7b-32768"`).
    fn model_name(&self) -> &str;

    /// Generate text from role-tagged messages, bounded to `max_tokens`
    /// output tokens. Synchronous from the caller's point of view: the
    /// future resolves with the full response text or an error.
    async fn generate(&self, messages: &[Message], max_tokens: u32) -> Result<String, Error>;
}

// ============ Disabled Generator ============

/// A no-op generator that always returns errors.
///
/// Used when `generation.provider = "disabled"` in the configuration.
pub struct DisabledGenerator;

#[async_trait]
impl ContentGenerator for DisabledGenerator {
    fn model_name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _messages: &[Message], _max_tokens: u32) -> Result<String, Error> {
        Err(Error::Generation(
            "content generation is disabled".to_string(),
        ))
    }
}

// ============ Groq Generator ============

/// Generator backed by the Groq chat-completions API.
///
/// Calls the OpenAI-compatible `POST /openai/v1/chat/completions` endpoint
/// with the configured model. Requires the `GROQ_API_KEY` environment
/// variable to be set.
pub struct GroqGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_retries: u32,
}

impl GroqGenerator {
    /// Create a new Groq generator from configuration.
    ///
    /// Fails if `GROQ_API_KEY` is not in the environment or the HTTP
    /// client cannot be built.
    pub fn new(config: &GenerationConfig) -> Result<Self, Error> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| Error::Generation("GROQ_API_KEY environment variable not set".into()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }
}

#[async_trait]
impl ContentGenerator for GroqGenerator {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, messages: &[Message], max_tokens: u32) -> Result<String, Error> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages
                .iter()
                .map(|m| serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                }))
                .collect::<Vec<_>>(),
            "max_tokens": max_tokens,
        });

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = self
                .client
                .post(GROQ_CHAT_COMPLETIONS_URL)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: serde_json::Value = response.json().await?;
                        return parse_chat_response(&json);
                    }

                    // Rate limited or server error — retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        last_err = Some(Error::Generation(format!(
                            "Groq API error {}: {}",
                            status, body_text
                        )));
                        continue;
                    }

                    // Client error (not 429) — don't retry
                    let body_text = response.text().await.unwrap_or_default();
                    return Err(Error::Generation(format!(
                        "Groq API error {}: {}",
                        status, body_text
                    )));
                }
                Err(e) => {
                    last_err = Some(e.into());
                    continue;
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| Error::Generation("generation failed after retries".to_string())))
    }
}

/// Parse the chat-completions response JSON.
///
/// Extracts `choices[0].message.content`.
fn parse_chat_response(json: &serde_json::Value) -> Result<String, Error> {
    json.get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            Error::Generation(
                "Invalid Groq response: missing choices[0].message.content".to_string(),
            )
        })
}

// ============ Scripted Generator ============

/// Test generator that replays queued responses in order and records how
/// many times it was invoked.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of generation calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _messages: &[Message], _max_tokens: u32) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Generation("scripted generator exhausted".to_string()))
    }
}

/// Create the appropriate [`ContentGenerator`] based on configuration.
pub fn create_generator(config: &GenerationConfig) -> Result<Box<dyn ContentGenerator>, Error> {
    match config.provider.as_str() {
        "disabled" => Ok(Box::new(DisabledGenerator)),
        "groq" => Ok(Box::new(GroqGenerator::new(config)?)),
        other => Err(Error::Generation(format!(
            "Unknown generation provider: {}",
            other
        ))),
    }
}
