//! Service configuration loaded from environment variables.

use std::path::PathBuf;

use flashcard_core::DEFAULT_RUBRIC;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("failed to read system prompt {path}: {source}")]
    SystemPrompt {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Backend configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub grader_model: String,
    /// File whose contents replace the built-in grading rubric.
    pub system_prompt_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Required env vars:
    /// - DATABASE_URL: PostgreSQL connection string
    /// - OPENAI_API_KEY: API key for the judge model
    ///
    /// Optional: OPENAI_BASE_URL, GRADER_MODEL, GRADER_SYSTEM_PROMPT_PATH, HOST, PORT
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let database_url = required("DATABASE_URL")?;
        let openai_api_key = required("OPENAI_API_KEY")?;

        let openai_base_url = lookup("OPENAI_BASE_URL")
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();

        let grader_model = lookup("GRADER_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string());
        let system_prompt_path = lookup("GRADER_SYSTEM_PROMPT_PATH").map(PathBuf::from);
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 3000,
        };

        Ok(Self {
            database_url,
            openai_api_key,
            openai_base_url,
            grader_model,
            system_prompt_path,
            host,
            port,
        })
    }

    /// Socket address to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Grading rubric: the configured file's contents, or the built-in one.
    pub fn load_rubric(&self) -> Result<String, ConfigError> {
        match &self.system_prompt_path {
            Some(path) => std::fs::read_to_string(path).map_err(|source| ConfigError::SystemPrompt {
                path: path.clone(),
                source,
            }),
            None => Ok(DEFAULT_RUBRIC.to_string()),
        }
    }
}
