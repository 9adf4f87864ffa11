/// Find the first balanced `[...]` span in free-form model output.
///
/// LLM responses wrap the JSON we asked for in prose more often than not, so
/// handlers never parse the raw text directly. This scanner walks the text
/// from the first `[`, tracking bracket depth and skipping over string
/// literals (a `]` inside a quoted title must not close the array). Returns
/// `None` when no balanced span exists.
pub fn first_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'[' if !in_string => depth += 1,
            b']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
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

    #[test]
    fn extracts_array_surrounded_by_prose() {
        let text = "Here are the stories you asked for:\n[{\"title\": \"A\"}]\nLet me know!";
        assert_eq!(first_json_array(text), Some("[{\"title\": \"A\"}]"));
    }

    #[test]
    fn extracts_bare_array() {
        assert_eq!(first_json_array("[1, 2, 3]"), Some("[1, 2, 3]"));
    }

    #[test]
    fn handles_nested_arrays() {
        let text = "result: [[1, 2], [3, 4]] trailing";
        assert_eq!(first_json_array(text), Some("[[1, 2], [3, 4]]"));
    }

    #[test]
    fn ignores_brackets_inside_strings() {
        let text = r#"[{"title": "Markets close [higher] today"}]"#;
        assert_eq!(first_json_array(text), Some(text));
    }

    #[test]
    fn handles_escaped_quotes_inside_strings() {
        let text = r#"[{"title": "He said \"sell]\" loudly"}]"#;
        assert_eq!(first_json_array(text), Some(text));
    }

    #[test]
    fn returns_none_without_any_array() {
        assert_eq!(first_json_array("no JSON here, sorry"), None);
    }

    #[test]
    fn returns_none_for_unbalanced_array() {
        assert_eq!(first_json_array("[{\"title\": \"cut off"), None);
    }

    #[test]
    fn picks_the_first_span_when_several_exist() {
        let text = "[1] and later [2, 3]";
        assert_eq!(first_json_array(text), Some("[1]"));
    }
}
