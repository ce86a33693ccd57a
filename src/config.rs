//! Configuration management
//!
//! Configuration is read from environment variables:
//! - `OPENAI_API_KEY` - Required. OpenAI API key.
//! - `OPENAI_MODEL` - Optional. Defaults to `gpt-3.5-turbo`.
//! - `OPENAI_BASE_URL` - Optional. Overrides the OpenAI API base URL.
//! - `SERPAPI_KEY` - Optional. Enables the web search tool when set.
//! - `HOST` - Optional. Web UI host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Web UI port. Defaults to `7860`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key (the one hard requirement)
    pub openai_api_key: String,

    /// Model identifier
    pub openai_model: String,

    /// Optional OpenAI base URL override
    pub openai_base_url: Option<String>,

    /// SerpAPI key; absence disables the web search tool
    pub serpapi_key: Option<String>,

    /// Web UI host
    pub host: String,

    /// Web UI port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let openai_model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let openai_base_url = std::env::var("OPENAI_BASE_URL").ok();
        let serpapi_key = std::env::var("SERPAPI_KEY").ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "7860".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        Ok(Self {
            openai_api_key,
            openai_model,
            openai_base_url,
            serpapi_key,
            host,
            port,
        })
    }
}
