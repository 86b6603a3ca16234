//! HTML renderer - fills the `{unit}` / `{converted}` wrapper template

use mensura_core::{MensuraError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wrapper used when the host does not configure one
pub const DEFAULT_HTML_WRAPPER: &str = "{unit} (<em>{converted}</em>)";

/// Separator between several converted values
pub const CONVERTED_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Unit,
    Converted,
}

/// A parsed wrapper template
///
/// Placeholders are `{unit}` and `{converted}`; `{{` and `}}` are literal
/// braces. Either placeholder may be left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl HtmlTemplate {
    /// Parse a template, rejecting unknown placeholders and unmatched braces
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, next)| next) == Some('{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        name.push(inner);
                    }
                    if !closed {
                        return Err(MensuraError::Template(format!("unmatched '{{' at byte {}", pos)));
                    }

                    let placeholder = match name.trim() {
                        "unit" => Segment::Unit,
                        "converted" => Segment::Converted,
                        other => {
                            return Err(MensuraError::Template(format!(
                                "unknown placeholder '{{{}}}', expected {{unit}} or {{converted}}",
                                other
                            )))
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(placeholder);
                }
                '}' if chars.peek().map(|&(_, next)| next) == Some('}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(MensuraError::Template(format!("unmatched '}}' at byte {}", pos)));
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { source: source.to_string(), segments })
    }

    /// The template text as configured
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute the formatted original and the comma-joined conversions
    pub fn render(&self, unit: &str, converted: &[String]) -> String {
        let converted = converted.join(CONVERTED_SEPARATOR);
        let mut out = String::with_capacity(self.source.len() + unit.len() + converted.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Unit => out.push_str(unit),
                Segment::Converted => out.push_str(&converted),
            }
        }
        out
    }
}

impl Default for HtmlTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_HTML_WRAPPER.to_string(),
            segments: vec![
                Segment::Unit,
                Segment::Literal(" (<em>".to_string()),
                Segment::Converted,
                Segment::Literal("</em>)".to_string()),
            ],
        }
    }
}

impl fmt::Display for HtmlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for HtmlTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for HtmlTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::parse(&source).map_err(serde::de::Error::custom)
    }
}

/// Escape text for use inside HTML content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
