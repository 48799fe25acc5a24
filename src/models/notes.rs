use serde::{Deserialize, Serialize};

/// One categorized issue as returned by the classifier. `issue_number` is a
/// lookup key into the fetched set, resolved and validated before rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub issue_number: u64,
    pub theme: String,
    pub benefit_summary: String,
    #[serde(default)]
    pub technical_detail: Option<String>,
}

/// Classifier-supplied one-sentence summary for a discovered theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSummary {
    pub name: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub items: Vec<ClassifiedItem>,
    #[serde(default)]
    pub themes: Vec<ThemeSummary>,
}

/// A named cluster of classified items. Constructed fresh each run; ordering
/// and summary are pure functions of the classified sequence.
#[derive(Debug, Clone)]
pub struct ThemeGroup {
    pub name: String,
    pub summary: String,
    pub items: Vec<ClassifiedItem>,
}

impl ThemeGroup {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Editor agent's review of the drafted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorReview {
    pub edited_markdown: String,
    #[serde(default)]
    pub changes_made: Vec<String>,
    #[serde(default)]
    pub clarity_issues_fixed: Vec<String>,
    #[serde(default)]
    pub consistency_improvements: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}
