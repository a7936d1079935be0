//! Turning the model's raw text into a [`Deck`].

use crate::error::Result;
use slide_common::Deck;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Trim `raw` and, when it opens with a code fence, remove every fence
/// marker (with the newline directly after it) anywhere in the text.
///
/// Only syntax is touched: no attempt is made to repair the JSON itself.
pub fn strip_fences(raw: &str) -> String {
    let text = raw.trim();
    let stripped = if text.starts_with(JSON_FENCE) {
        remove_marker(&remove_marker(text, JSON_FENCE), FENCE)
    } else if text.starts_with(FENCE) {
        remove_marker(text, FENCE)
    } else {
        return text.to_string();
    };
    stripped.trim().to_string()
}

/// Parse the model's text as a deck. The single boundary between untyped
/// model output and the schema; structural mismatches are rejected.
pub fn parse_deck(raw: &str) -> Result<Deck> {
    let cleaned = strip_fences(raw);
    let deck = serde_json::from_str(&cleaned)?;
    Ok(deck)
}

fn remove_marker(text: &str, marker: &str) -> String {
    text.replace(&format!("{marker}\n"), "").replace(marker, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn json_fence_is_removed() {
        let raw = "```json\n{\"title\":\"T\",\"slides\":[]}\n```";
        assert_eq!(strip_fences(raw), r#"{"title":"T","slides":[]}"#);
    }

    #[test]
    fn bare_fence_and_surrounding_whitespace_are_removed() {
        let raw = "\n\n  ```\n{\"a\": 1}\n```  \n";
        assert_eq!(strip_fences(raw), r#"{"a": 1}"#);
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_fences("  {\"a\":1}\n"), "{\"a\":1}");
        // A fence that does not open the text is left alone.
        let inline = "Here you go: ```json {} ```";
        assert_eq!(strip_fences(inline), inline);
    }

    #[test]
    fn stripping_is_idempotent() {
        for raw in [
            "```json\n{\"title\":\"T\",\"slides\":[]}\n```",
            "```\n[]\n```",
            "{\"x\":\"y\"}",
            "   plain   ",
        ] {
            let once = strip_fences(raw);
            assert_eq!(strip_fences(&once), once, "input: {raw:?}");
        }
    }

    #[test]
    fn parses_fenced_deck() {
        let deck = parse_deck("```json\n{\"title\":\"T\",\"slides\":[]}\n```").unwrap();
        assert_eq!(deck.title, "T");
        assert!(deck.slides.is_empty());
    }

    #[test]
    fn malformed_output_is_a_parse_error() {
        for raw in [
            "Sure! Here is your deck.",
            "```json\n{\"title\":\"T\",\"slides\":[],}\n```",
            "{\"title\":\"T\",\"slides\":[{\"id\":\"s1\"",
            "{\"slides\":[]}",
        ] {
            let err = parse_deck(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "input: {raw:?}");
        }
    }
}
