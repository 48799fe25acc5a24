use async_trait::async_trait;

use crate::error::Result;
use crate::llm::prompts::{ClassificationRequest, EditorRequest};
use crate::models::{ClassifierOutput, EditorReview};

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Classifies the whole fetched batch in one call.
    async fn classify_issues(&self, request: ClassificationRequest) -> Result<ClassifierOutput>;

    /// Reviews a drafted document for clarity and consistency.
    async fn review_notes(&self, request: EditorRequest) -> Result<EditorReview>;

    fn name(&self) -> &str;
}
