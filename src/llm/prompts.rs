use crate::models::{DateRange, IssueRecord, RepoRef};

pub const CLASSIFIER_SYSTEM_PROMPT: &str = r#"You are a technical writer turning closed GitHub issues into user-friendly release notes.

You must respond with valid JSON matching this exact schema:
{
    "items": [
        {
            "issue_number": <number of the source issue>,
            "theme": "string (2-4 word functional area, e.g. 'Chat Experience')",
            "benefit_summary": "string (1-2 sentences describing the benefit to users, starting with a verb)",
            "technical_detail": "string or null (one short paragraph expanding on the change using the issue description)"
        }
    ],
    "themes": [
        {
            "name": "string (must exactly match a theme used in items)",
            "summary": "string (one sentence summarizing the user impact of this theme)"
        }
    ]
}

Guidelines:
- Focus on USER BENEFITS, not technical implementation details
- Start each benefit_summary with a verb (e.g., "Added", "Fixed", "Improved", "Enabled")
- Group issues by the functional area a typical end user would recognize, not by implementation detail
- Include every issue you are given in exactly one item; never invent issue numbers
- Keep items in the order the issues were provided
- Provide one themes entry for every distinct theme you use
- Use a consistent, professional tone; avoid jargon unless necessary

Examples:
- Good: "Added dark mode support for better visibility in low-light environments"
- Bad: "Implemented CSS variables for theme switching"
- Good: "Fixed authentication errors that prevented users from logging in"
- Bad: "Resolved OAuth token expiration bug in auth middleware""#;

pub const EDITOR_SYSTEM_PROMPT: &str = r#"You are an experienced technical editor reviewing release notes for quality and consistency.

You must respond with valid JSON matching this exact schema:
{
    "edited_markdown": "string (the improved release notes document)",
    "changes_made": ["string describing a specific change and why"],
    "clarity_issues_fixed": ["string"],
    "consistency_improvements": ["string"],
    "recommendations": ["string (optional suggestions for future release notes)"]
}

Guidelines:
- Make the document read as if written by one professional voice
- Keep descriptions concise, active, and benefit-focused
- Ensure consistent verb tense and sentence structure
- Fix grammar, punctuation, and formatting issues
- Preserve all issue numbers, links, section anchors, and the overall structure
- Preserve the factual accuracy of what was changed"#;

// Issue bodies beyond this length add little classification signal.
const MAX_BODY_CHARS: usize = 2000;

#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    pub repo: RepoRef,
    pub range: DateRange,
    pub issues: Vec<IssueRecord>,
}

impl ClassificationRequest {
    pub fn new(repo: RepoRef, range: DateRange, issues: Vec<IssueRecord>) -> Self {
        Self {
            repo,
            range,
            issues,
        }
    }

    pub fn to_prompt(&self) -> String {
        let mut prompt = format!(
            "Categorize the following {} closed issue(s) from repository '{}', closed between {} and {}:\n\n",
            self.issues.len(),
            self.repo,
            self.range.start,
            self.range.end
        );

        for issue in &self.issues {
            prompt.push_str(&format!("## Issue #{}: {}\n", issue.number, issue.title));
            prompt.push_str(&format!("Closed: {}\n", issue.closed_at.format("%Y-%m-%d")));

            let body = issue.body.trim();
            if !body.is_empty() {
                if body.len() > MAX_BODY_CHARS {
                    let truncated: String = body.chars().take(MAX_BODY_CHARS).collect();
                    prompt.push_str(&format!("{}...\n[truncated]\n", truncated));
                } else {
                    prompt.push_str(body);
                    prompt.push('\n');
                }
            }
            prompt.push('\n');
        }

        prompt.push_str("Provide the classification as JSON:\n");
        prompt
    }

    pub fn estimate_tokens(&self) -> usize {
        let char_count: usize = self
            .issues
            .iter()
            .map(|i| i.title.len() + i.body.len().min(MAX_BODY_CHARS))
            .sum();
        // Rough estimate: ~4 characters per token
        char_count / 4
    }
}

#[derive(Debug, Clone)]
pub struct EditorRequest {
    pub repo: RepoRef,
    pub markdown: String,
}

impl EditorRequest {
    pub fn new(repo: RepoRef, markdown: String) -> Self {
        Self { repo, markdown }
    }

    pub fn to_prompt(&self) -> String {
        format!(
            "Review and refine the following release notes for {}.\n\n\
             Apply your editorial expertise to improve clarity and consistency while preserving all factual content.\n\n\
             Release Notes to Review:\n{}\n\n\
             Provide the refined document and your review as JSON:\n",
            self.repo, self.markdown
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn request_with_body(body: &str) -> ClassificationRequest {
        let issue = IssueRecord {
            number: 7,
            title: "Dark mode".to_string(),
            body: body.to_string(),
            url: "https://github.com/o/r/issues/7".to_string(),
            closed_at: Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
        };
        let range = DateRange::new(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        ClassificationRequest::new(RepoRef::new("o", "r"), range, vec![issue])
    }

    #[test]
    fn test_prompt_lists_issue_number_and_period() {
        let prompt = request_with_body("Please add dark mode").to_prompt();
        assert!(prompt.contains("## Issue #7: Dark mode"));
        assert!(prompt.contains("between 2024-01-01 and 2024-01-31"));
        assert!(prompt.contains("Please add dark mode"));
    }

    #[test]
    fn test_prompt_truncates_long_bodies() {
        let prompt = request_with_body(&"x".repeat(5000)).to_prompt();
        assert!(prompt.contains("[truncated]"));
        assert!(prompt.len() < 5000);
    }
}
