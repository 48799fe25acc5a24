use crate::error::{Error, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub anthropic_api_key: String,
    pub model: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .map_err(|_| Error::Config("GITHUB_TOKEN environment variable not set".to_string()))?;

        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .map_err(|_| Error::Config("ANTHROPIC_API_KEY environment variable not set".to_string()))?;

        let model = env::var("ANTHROPIC_MODEL").ok().filter(|v| !v.is_empty());

        Ok(Self {
            github_token,
            anthropic_api_key,
            model,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub editor_enabled: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            editor_enabled: true,
        }
    }
}
