use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{ClassifierOutput, IssueRecord};

/// Checks a classifier response against the fetched issue set before any
/// rendering happens. Every item needs a non-empty benefit summary and
/// theme, every referenced issue number must resolve into the input set,
/// and every fetched issue must be covered exactly once. A report that
/// silently omitted or duplicated real issues would be worse than a hard
/// failure.
pub fn validate_classification(
    issues: &[IssueRecord],
    output: &ClassifierOutput,
) -> Result<()> {
    let known: HashSet<u64> = issues.iter().map(|i| i.number).collect();
    let mut covered: HashSet<u64> = HashSet::new();

    for item in &output.items {
        if item.benefit_summary.trim().is_empty() {
            return Err(Error::SchemaViolation(format!(
                "item for issue #{} has an empty benefit_summary",
                item.issue_number
            )));
        }
        if item.theme.trim().is_empty() {
            return Err(Error::SchemaViolation(format!(
                "item for issue #{} has an empty theme",
                item.issue_number
            )));
        }
        if !known.contains(&item.issue_number) {
            return Err(Error::SchemaViolation(format!(
                "item references issue #{} which is not in the fetched set",
                item.issue_number
            )));
        }
        if !covered.insert(item.issue_number) {
            return Err(Error::SchemaViolation(format!(
                "issue #{} is assigned to more than one item",
                item.issue_number
            )));
        }
    }

    let mut missing: Vec<u64> = issues
        .iter()
        .map(|i| i.number)
        .filter(|n| !covered.contains(n))
        .collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        let listed: Vec<String> = missing.iter().map(|n| format!("#{}", n)).collect();
        return Err(Error::SchemaViolation(format!(
            "classifier response omits fetched issue(s) {}",
            listed.join(", ")
        )));
    }

    // Surplus theme summaries are harmless; the grouper only consults
    // summaries for themes that items actually use.
    for theme in &output.themes {
        if !output.items.iter().any(|i| i.theme == theme.name) {
            tracing::debug!("Ignoring summary for unused theme '{}'", theme.name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassifiedItem, ThemeSummary};
    use chrono::{TimeZone, Utc};

    fn issue(number: u64) -> IssueRecord {
        IssueRecord {
            number,
            title: format!("Issue {}", number),
            body: String::new(),
            url: format!("https://github.com/o/r/issues/{}", number),
            closed_at: Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
        }
    }

    fn item(number: u64, theme: &str, summary: &str) -> ClassifiedItem {
        ClassifiedItem {
            issue_number: number,
            theme: theme.to_string(),
            benefit_summary: summary.to_string(),
            technical_detail: None,
        }
    }

    fn output(items: Vec<ClassifiedItem>) -> ClassifierOutput {
        ClassifierOutput {
            items,
            themes: Vec::new(),
        }
    }

    #[test]
    fn test_well_formed_response_passes() {
        let issues = vec![issue(7), issue(11), issue(38)];
        let out = ClassifierOutput {
            items: vec![
                item(7, "Chat Experience", "Improved delivery"),
                item(11, "Chat Experience", "Fixed typing indicator"),
                item(38, "Look and Feel", "Added dark mode"),
            ],
            themes: vec![ThemeSummary {
                name: "Chat Experience".to_string(),
                summary: "Chat got better.".to_string(),
            }],
        };
        assert!(validate_classification(&issues, &out).is_ok());
    }

    #[test]
    fn test_dangling_issue_reference_is_a_violation() {
        let issues = vec![issue(7), issue(11), issue(38)];
        let out = ClassifierOutput {
            items: vec![
                item(7, "Chat", "Improved delivery"),
                item(11, "Chat", "Fixed typing indicator"),
                item(38, "Chat", "Added dark mode"),
                item(9999, "Chat", "Imagined a feature"),
            ],
            themes: Vec::new(),
        };
        let err = validate_classification(&issues, &out).unwrap_err();
        assert!(matches!(err, Error::SchemaViolation(_)));
        assert!(err.to_string().contains("9999"));
    }

    #[test]
    fn test_duplicate_assignment_is_a_violation() {
        let issues = vec![issue(7)];
        let out = output(vec![
            item(7, "Chat", "Improved delivery"),
            item(7, "Look and Feel", "Improved delivery again"),
        ]);
        let err = validate_classification(&issues, &out).unwrap_err();
        assert!(matches!(err, Error::SchemaViolation(_)));
    }

    #[test]
    fn test_omitted_issue_is_a_violation() {
        let issues = vec![issue(7), issue(11)];
        let out = output(vec![item(7, "Chat", "Improved delivery")]);
        let err = validate_classification(&issues, &out).unwrap_err();
        assert!(err.to_string().contains("#11"));
    }

    #[test]
    fn test_empty_fields_are_violations() {
        let issues = vec![issue(7)];

        let blank_summary = output(vec![item(7, "Chat", "   ")]);
        assert!(validate_classification(&issues, &blank_summary).is_err());

        let blank_theme = output(vec![item(7, "", "Improved delivery")]);
        assert!(validate_classification(&issues, &blank_theme).is_err());
    }

    #[test]
    fn test_empty_input_and_empty_output_pass() {
        assert!(validate_classification(&[], &output(Vec::new())).is_ok());
    }
}
