//! Annotation scanner - finds `{unit: ...}` markers in a text blob

use regex::Regex;
use std::sync::LazyLock;

/// Literal that opens every annotation
pub const MARKER: &str = "{unit:";

/// `{unit:` then one or more non-`}` characters up to the first `}`
static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{unit:([^}]+)\}").expect("annotation pattern is valid"));

/// One annotation borrowed from the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation<'a> {
    /// The full span, braces included
    pub raw: &'a str,
    /// Everything between `{unit:` and `}`, untrimmed
    pub expression: &'a str,
    /// Byte offset of the opening brace
    pub start: usize,
    /// Byte offset one past the closing brace
    pub end: usize,
}

/// Lazily yield annotations left to right, never overlapping
///
/// Expression content is not validated here; `{unit:}` is not an annotation.
pub fn scan(text: &str) -> impl Iterator<Item = Annotation<'_>> {
    ANNOTATION.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let expression = caps.get(1)?;
        Some(Annotation {
            raw: whole.as_str(),
            expression: expression.as_str(),
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// Cheap check used to skip documents without annotations
pub fn contains_marker(text: &str) -> bool {
    text.contains(MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_single() {
        let text = "A {unit: 10 ft}.";
        let found: Vec<_> = scan(text).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw, "{unit: 10 ft}");
        assert_eq!(found[0].expression, " 10 ft");
        assert_eq!(found[0].start, 2);
        assert_eq!(found[0].end, 15);
        assert_eq!(&text[found[0].start..found[0].end], found[0].raw);
    }

    #[test]
    fn test_scan_multiple_in_order() {
        let text = "{unit:1 m} and {unit: 2 kg :: lb} then {unit:3 s}";
        let expressions: Vec<_> = scan(text).map(|a| a.expression).collect();
        assert_eq!(expressions, vec!["1 m", " 2 kg :: lb", "3 s"]);
    }

    #[test]
    fn test_scan_ignores_empty_and_unterminated() {
        assert_eq!(scan("{unit:} and {unit: 5 m").count(), 0);
        assert_eq!(scan("{units: 5 m}").count(), 0);
    }

    #[test]
    fn test_first_closing_brace_ends_annotation() {
        let found: Vec<_> = scan("{unit: 5 m}}").collect();
        assert_eq!(found[0].raw, "{unit: 5 m}");
    }

    #[test]
    fn test_contains_marker() {
        assert!(contains_marker("x {unit: 1 m} y"));
        assert!(contains_marker("{unit:}"));
        assert!(!contains_marker("no annotations here"));
    }
}
