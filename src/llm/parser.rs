use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Pulls the JSON payload out of a model response and deserializes it.
/// Models wrap JSON in code fences or prose more often than not.
pub fn parse_json_response<T: DeserializeOwned>(response: &str) -> Result<T> {
    let json_str = extract_json(response)?;

    serde_json::from_str(&json_str)
        .map_err(|e| Error::ParseError(format!("Failed to parse LLM response: {}", e)))
}

fn extract_json(text: &str) -> Result<String> {
    if let Some(block) = fenced_block(text, "```json") {
        return Ok(block);
    }

    if let Some(block) = fenced_block(text, "```") {
        if block.starts_with('{') {
            return Ok(block);
        }
    }

    if let Some(object) = first_object(text) {
        return Ok(object);
    }

    Err(Error::ParseError("No valid JSON found in response".to_string()))
}

fn fenced_block(text: &str, fence: &str) -> Option<String> {
    let start = text.find(fence)? + fence.len();
    // Skip any language identifier on the opening line
    let start = text[start..]
        .find('\n')
        .map(|i| start + i + 1)
        .unwrap_or(start);
    let end = text[start..].find("```")?;
    Some(text[start..start + end].trim().to_string())
}

fn first_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassifierOutput;

    #[test]
    fn test_extract_json_from_markdown() {
        let input = r#"Here's the classification:
```json
{"items": []}
```
"#;
        let result = extract_json(input).unwrap();
        assert_eq!(result, r#"{"items": []}"#);
    }

    #[test]
    fn test_extract_raw_json() {
        let input = r#"The result is {"items": [], "themes": []}"#;
        let result = extract_json(input).unwrap();
        assert_eq!(result, r#"{"items": [], "themes": []}"#);
    }

    #[test]
    fn test_braces_inside_strings_do_not_close_the_object() {
        let input = r#"{"items": [{"issue_number": 7, "theme": "Chat", "benefit_summary": "Fixed {weird} rendering"}]}"#;
        let result = extract_json(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_parse_classifier_output() {
        let input = r#"```json
{
    "items": [
        {"issue_number": 7, "theme": "Chat Experience", "benefit_summary": "Improved message delivery", "technical_detail": null}
    ],
    "themes": [
        {"name": "Chat Experience", "summary": "Chat is faster and more reliable."}
    ]
}
```"#;
        let output: ClassifierOutput = parse_json_response(input).unwrap();
        assert_eq!(output.items.len(), 1);
        assert_eq!(output.items[0].issue_number, 7);
        assert_eq!(output.themes[0].name, "Chat Experience");
    }

    #[test]
    fn test_no_json_is_a_parse_error() {
        assert!(parse_json_response::<ClassifierOutput>("I could not classify these issues.").is_err());
    }
}
