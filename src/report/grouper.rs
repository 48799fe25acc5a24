use std::collections::HashMap;

use crate::models::{ClassifiedItem, ThemeGroup, ThemeSummary};

/// Partitions classified items into theme groups. Theme labels are compared
/// by exact text match; near-duplicate labels stay separate groups. Groups
/// come back ordered by descending item count, ties broken by the theme's
/// first appearance in the classified sequence. Item order within a group
/// is preserved as emitted.
pub fn group_by_theme(items: &[ClassifiedItem], summaries: &[ThemeSummary]) -> Vec<ThemeGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<ClassifiedItem>> = HashMap::new();

    for item in items {
        let bucket = buckets.entry(item.theme.clone()).or_default();
        if bucket.is_empty() {
            order.push(item.theme.clone());
        }
        bucket.push(item.clone());
    }

    let supplied: HashMap<&str, &str> = summaries
        .iter()
        .map(|t| (t.name.as_str(), t.summary.as_str()))
        .collect();

    let mut groups: Vec<ThemeGroup> = order
        .into_iter()
        .map(|name| {
            let items = buckets.remove(&name).unwrap_or_default();
            let summary = match supplied.get(name.as_str()) {
                Some(s) if !s.trim().is_empty() => (*s).to_string(),
                _ => synthesize_summary(&name, items.len()),
            };
            ThemeGroup {
                name,
                summary,
                items,
            }
        })
        .collect();

    // Stable sort keeps first-appearance order among equal counts.
    groups.sort_by_key(|group| std::cmp::Reverse(group.item_count()));

    groups
}

/// Fallback summary when the classifier supplies none for a theme.
fn synthesize_summary(name: &str, count: usize) -> String {
    if count == 1 {
        format!("1 improvement to {}", name)
    } else {
        format!("{} improvements to {}", count, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(number: u64, theme: &str) -> ClassifiedItem {
        ClassifiedItem {
            issue_number: number,
            theme: theme.to_string(),
            benefit_summary: format!("Change for #{}", number),
            technical_detail: None,
        }
    }

    fn items_with_counts(counts: &[(&str, usize)]) -> Vec<ClassifiedItem> {
        // Interleave so each theme's first appearance follows the slice
        // order while later members arrive out of order.
        let mut items = Vec::new();
        let mut number = 1;
        for &(theme, _) in counts {
            items.push(item(number, theme));
            number += 1;
        }
        for &(theme, count) in counts {
            for _ in 1..count {
                items.push(item(number, theme));
                number += 1;
            }
        }
        items
    }

    #[test]
    fn test_groups_ordered_by_descending_count_with_first_appearance_ties() {
        let items = items_with_counts(&[
            ("Performance", 5),
            ("Chat Experience", 4),
            ("Look and Feel", 2),
            ("Accessibility", 3),
            ("Integrations", 2),
        ]);
        let groups = group_by_theme(&items, &[]);

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Performance",
                "Chat Experience",
                "Accessibility",
                "Look and Feel",
                "Integrations"
            ]
        );
        let counts: Vec<usize> = groups.iter().map(ThemeGroup::item_count).collect();
        assert_eq!(counts, vec![5, 4, 3, 2, 2]);
    }

    #[test]
    fn test_item_order_within_a_group_is_preserved() {
        let items = vec![
            item(38, "Chat"),
            item(7, "Chat"),
            item(11, "Chat"),
        ];
        let groups = group_by_theme(&items, &[]);
        let numbers: Vec<u64> = groups[0].items.iter().map(|i| i.issue_number).collect();
        assert_eq!(numbers, vec![38, 7, 11]);
    }

    #[test]
    fn test_grouping_is_deterministic() {
        let items = items_with_counts(&[("A", 2), ("B", 2), ("C", 1)]);
        let first = group_by_theme(&items, &[]);
        let second = group_by_theme(&items, &[]);

        let order = |groups: &[ThemeGroup]| {
            groups
                .iter()
                .map(|g| {
                    (
                        g.name.clone(),
                        g.items.iter().map(|i| i.issue_number).collect::<Vec<_>>(),
                    )
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn test_theme_labels_match_case_sensitively() {
        let items = vec![item(1, "Chat"), item(2, "chat")];
        let groups = group_by_theme(&items, &[]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_supplied_summary_wins_over_synthesized() {
        let items = vec![item(1, "Chat"), item(2, "Search")];
        let summaries = vec![ThemeSummary {
            name: "Chat".to_string(),
            summary: "Chatting is smoother across the board.".to_string(),
        }];
        let groups = group_by_theme(&items, &summaries);

        let chat = groups.iter().find(|g| g.name == "Chat").unwrap();
        assert_eq!(chat.summary, "Chatting is smoother across the board.");

        let search = groups.iter().find(|g| g.name == "Search").unwrap();
        assert_eq!(search.summary, "1 improvement to Search");
    }
}
