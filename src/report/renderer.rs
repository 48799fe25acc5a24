use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{DateRange, IssueRecord, RepoRef, ThemeGroup};

/// Renders the release-notes document from the ordered groups. Pure
/// transform, no I/O; writing the text somewhere is the caller's job.
pub fn render_document(
    repo: &RepoRef,
    range: &DateRange,
    groups: &[ThemeGroup],
    issues: &[IssueRecord],
) -> Result<String> {
    let urls: HashMap<u64, &str> = issues.iter().map(|i| (i.number, i.url.as_str())).collect();

    let mut output = String::new();
    output.push_str(&format!("# Release Notes: {}\n\n", repo));
    output.push_str(&format!("**Period:** {} to {}\n\n", range.start, range.end));

    output.push_str("## Theme Summary\n\n");

    // Summary links and section headings must agree on anchors; two
    // distinct labels mapping to one anchor would break the round trip.
    let mut anchors: HashMap<String, String> = HashMap::new();
    for group in groups {
        let anchor = theme_anchor(&group.name);
        if let Some(existing) = anchors.insert(anchor.clone(), group.name.clone()) {
            return Err(Error::Render(format!(
                "themes '{}' and '{}' collide on anchor '#{}'",
                existing, group.name, anchor
            )));
        }

        let label = if group.item_count() == 1 {
            "item"
        } else {
            "items"
        };
        output.push_str(&format!(
            "- [{}](#{}): {} ({} {})\n",
            group.name,
            anchor,
            escape_markdown(&group.summary),
            group.item_count(),
            label
        ));
    }
    output.push('\n');

    for group in groups {
        output.push_str(&format!("## {}\n\n", group.name));
        output.push_str(&format!("{}\n\n", escape_markdown(&group.summary)));

        for item in &group.items {
            let url = urls.get(&item.issue_number).ok_or_else(|| {
                Error::Render(format!(
                    "no fetched issue behind item reference #{}",
                    item.issue_number
                ))
            })?;
            output.push_str(&format!(
                "- {} ([#{}]({}))\n",
                escape_markdown(&item.benefit_summary),
                item.issue_number,
                url
            ));
            if let Some(detail) = &item.technical_detail {
                if !detail.trim().is_empty() {
                    output.push_str(&format!("  - {}\n", escape_markdown(detail.trim())));
                }
            }
        }
        output.push('\n');
    }

    Ok(output)
}

/// Derives the fragment anchor shared by a theme's summary link and its
/// section heading: lowercased, alphanumerics kept, whitespace and hyphens
/// collapsed to single hyphens, everything else dropped.
pub fn theme_anchor(name: &str) -> String {
    let mut anchor = String::new();
    for c in name.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            anchor.push(c);
        } else if c.is_whitespace() || c == '-' {
            anchor.push('-');
        }
    }

    while anchor.contains("--") {
        anchor = anchor.replace("--", "-");
    }
    let anchor = anchor.trim_matches('-');

    if anchor.is_empty() {
        "theme".to_string()
    } else {
        anchor.to_string()
    }
}

/// Backslash-escapes the Markdown specials that model-written prose can
/// contain, so a stray bracket never produces a malformed link.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '_' | '*') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
