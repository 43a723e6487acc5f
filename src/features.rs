//! Conversion between the stored feature text of a package and the list
//! clients read and write.
//!
//! Stored form: one feature per line. List form: ordered, trimmed, no
//! empty entries.

use serde_json::Value;

/// Split stored feature text into its non-empty, trimmed lines.
pub fn decode(stored: Option<&str>) -> Vec<String> {
    stored
        .map(|text| {
            text.split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Convert a client-supplied `features` value into its stored form.
///
/// Arrays are trimmed, empty entries dropped and joined with `\n`. A string
/// is stored as given. Any other value yields `None`.
pub fn encode(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let lines: Vec<String> = items.iter().map(entry_text).collect();
            Some(encode_lines(&lines))
        }
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}

/// Join already-typed entries into the stored form.
pub fn encode_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn entry_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_trims_and_drops_blank_lines() {
        let stored = "  Responsive layout \n\n   \nSEO basics\r\nSSL";
        assert_eq!(
            decode(Some(stored)),
            vec!["Responsive layout", "SEO basics", "SSL"]
        );
    }

    #[test]
    fn decode_of_nothing_is_empty() {
        assert!(decode(None).is_empty());
        assert!(decode(Some("")).is_empty());
        assert!(decode(Some("\n \n")).is_empty());
    }

    #[test]
    fn encode_list_drops_empty_entries() {
        let stored = encode(&json!(["A", "B", ""]));
        assert_eq!(stored.as_deref(), Some("A\nB"));
    }

    #[test]
    fn encode_passes_strings_through_unchanged() {
        let stored = encode(&json!("  raw\n\ntext "));
        assert_eq!(stored.as_deref(), Some("  raw\n\ntext "));
    }

    #[test]
    fn encode_rejects_other_shapes() {
        assert_eq!(encode(&json!(42)), None);
        assert_eq!(encode(&json!({ "a": 1 })), None);
        assert_eq!(encode(&Value::Null), None);
    }

    #[test]
    fn encode_stringifies_non_string_entries() {
        let stored = encode(&json!(["Pages", 7, true]));
        assert_eq!(stored.as_deref(), Some("Pages\n7\ntrue"));
    }

    #[test]
    fn list_survives_a_round_trip_minus_blanks() {
        let input = vec!["  Blog ", "", "   ", "CMS", "Analytics"];
        let expected: Vec<String> = input
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let stored = encode_lines(&input);
        assert_eq!(decode(Some(&stored)), expected);
    }

    #[test]
    fn stored_text_is_stable_after_one_pass() {
        let stored = "One\n\n  Two  \nThree\n";
        let once = encode_lines(&decode(Some(stored)));
        assert_eq!(once, "One\nTwo\nThree");
        assert_eq!(encode_lines(&decode(Some(&once))), once);
    }
}
