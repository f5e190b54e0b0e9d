//! Splitting a parameter list into names and syntactic types.

use super::Dialect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Never `Some("")`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.filter(|t| !t.is_empty()),
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

/// Parses the interior of a parameter list.
///
/// The text should already be comment-stripped. Commas nested inside `()`,
/// `[]`, `{}` (and `<>` for annotated syntax) do not split.
pub fn parse(text: &str, dialect: Dialect) -> Vec<Parameter> {
    split_top_level(text, dialect)
        .into_iter()
        .filter_map(|token| parse_token(token, dialect))
        .collect()
}

fn split_top_level(text: &str, dialect: Dialect) -> Vec<&str> {
    let angles = dialect.supports_annotations();
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    let mut prev = '\0';

    for (idx, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '<' if angles => depth += 1,
            '>' if angles && prev != '=' => depth -= 1,
            ',' if depth <= 0 => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
        prev = ch;
    }
    parts.push(&text[start..]);
    parts
}

fn parse_token(token: &str, dialect: Dialect) -> Option<Parameter> {
    let token = token.trim();
    let (name, type_name) = match dialect {
        Dialect::AnnotatedSignatureSyntax => match token.split_once(':') {
            Some((name, type_text)) => (name.trim(), normalize_type(type_text.trim())),
            None => (token, None),
        },
        Dialect::PlainFunctionSyntax => (token, None),
    };

    if name.is_empty() {
        return None;
    }
    Some(Parameter::new(name, type_name))
}

fn normalize_type(type_text: &str) -> Option<String> {
    if type_text.is_empty() {
        None
    } else if type_text.contains("=>") {
        Some("function".to_string())
    } else {
        Some(type_text.to_string())
    }
}
