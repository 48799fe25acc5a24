pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod llm;
pub mod report;

pub use config::{Config, PipelineOptions};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use llm::{ClaudeProvider, LLMProvider};
pub use report::ReleaseNotesPipeline;
