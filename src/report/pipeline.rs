use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::PipelineOptions;
use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::llm::{ClassificationRequest, EditorRequest, LLMProvider};
use crate::models::{DateRange, RepoRef};
use crate::report;
use crate::report::renderer::render_document;

/// Drives the run end to end: probe repository, fetch closed issues,
/// classify the whole batch in one call, validate, assemble, and
/// optionally polish with the editor pass. Strictly sequential; the
/// final write belongs to the caller.
pub struct ReleaseNotesPipeline {
    github: Arc<GitHubClient>,
    llm: Arc<dyn LLMProvider>,
    options: PipelineOptions,
}

impl ReleaseNotesPipeline {
    pub fn new(
        github: GitHubClient,
        llm: impl LLMProvider + 'static,
        options: PipelineOptions,
    ) -> Self {
        Self {
            github: Arc::new(github),
            llm: Arc::new(llm),
            options,
        }
    }

    pub async fn generate(&self, repo: &RepoRef, range: &DateRange) -> Result<String> {
        // Step 1: resolve the repository so a bad name fails fast
        let repository = self.github.get_repository(repo).await?;
        tracing::debug!("Resolved repository: {}", repository.full_name);

        // Step 2: fetch closed issues in range
        let issues = self.github.list_closed_issues(repo, range).await?;
        tracing::info!("Fetched {} closed issue(s) in range", issues.len());

        // Zero issues in range is a valid, near-empty document, not an
        // error; the classifier is never called.
        if issues.is_empty() {
            tracing::warn!("No closed issues found between {} and {}", range.start, range.end);
            return render_document(repo, range, &[], &issues);
        }

        // Step 3: one classification call for the whole batch
        let request = ClassificationRequest::new(repo.clone(), *range, issues.clone());
        tracing::info!(
            "Classifying {} issue(s) with {} (~{} prompt tokens)",
            issues.len(),
            self.llm.name(),
            request.estimate_tokens()
        );
        let spinner = progress_spinner("Waiting for classification...");
        let classified = self.llm.classify_issues(request).await;
        spinner.finish_and_clear();
        let classified = classified?;

        // Steps 4-6: validate, group, render
        let mut document = report::assemble(repo, range, &issues, &classified)?;

        // Step 7: optional editor polish of the drafted document
        if self.options.editor_enabled {
            document = self.run_editor(repo, document).await?;
        }

        Ok(document)
    }

    async fn run_editor(&self, repo: &RepoRef, draft: String) -> Result<String> {
        tracing::info!("Reviewing draft with {} editor pass", self.llm.name());
        let spinner = progress_spinner("Waiting for editor review...");
        let review = self
            .llm
            .review_notes(EditorRequest::new(repo.clone(), draft))
            .await;
        spinner.finish_and_clear();
        let review = review?;

        if review.edited_markdown.trim().is_empty() {
            return Err(Error::LLMApi(
                "Editor review returned an empty document".to_string(),
            ));
        }

        for change in &review.changes_made {
            tracing::info!("Editor change: {}", change);
        }
        for fixed in &review.clarity_issues_fixed {
            tracing::debug!("Clarity issue fixed: {}", fixed);
        }
        for improvement in &review.consistency_improvements {
            tracing::debug!("Consistency improvement: {}", improvement);
        }
        for recommendation in &review.recommendations {
            tracing::info!("Editor recommendation: {}", recommendation);
        }

        Ok(review.edited_markdown)
    }
}

fn progress_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}
