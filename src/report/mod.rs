pub mod contract;
pub mod grouper;
pub mod pipeline;
pub mod renderer;

pub use pipeline::ReleaseNotesPipeline;

use crate::error::Result;
use crate::models::{ClassifierOutput, DateRange, IssueRecord, RepoRef};

/// Validates a classifier response against the fetched set and assembles
/// the final document. Deterministic: the same inputs always yield the
/// same text.
pub fn assemble(
    repo: &RepoRef,
    range: &DateRange,
    issues: &[IssueRecord],
    output: &ClassifierOutput,
) -> Result<String> {
    contract::validate_classification(issues, output)?;
    let groups = grouper::group_by_theme(&output.items, &output.themes);
    renderer::render_document(repo, range, &groups, issues)
}
