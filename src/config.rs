use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub documents: DocumentsConfig,
    pub cache: CacheConfig,
    pub db: DbConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentsConfig {
    /// Directory holding the source documents.
    pub dir: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
}

fn default_include_globs() -> Vec<String> {
    vec!["*.pdf".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Directory holding the cached summary/highlights files.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum output tokens requested per generation call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Character prefix of document text (and of joined comment bodies)
    /// substituted into prompts.
    #[serde(default = "default_prompt_budget")]
    pub prompt_budget: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after the first for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            prompt_budget: default_prompt_budget(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_provider() -> String {
    "groq".to_string()
}
fn default_model() -> String {
    "mixtral-8x7b-32768".to_string()
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_prompt_budget() -> usize {
    5000
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    1
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.documents.include_globs.is_empty() {
        anyhow::bail!("documents.include_globs must not be empty");
    }

    if config.generation.max_tokens == 0 {
        anyhow::bail!("generation.max_tokens must be > 0");
    }

    if config.generation.prompt_budget == 0 {
        anyhow::bail!("generation.prompt_budget must be > 0");
    }

    match config.generation.provider.as_str() {
        "groq" | "disabled" => {}
        other => anyhow::bail!(
            "Unknown generation provider: '{}'. Must be groq or disabled.",
            other
        ),
    }

    Ok(config)
}
