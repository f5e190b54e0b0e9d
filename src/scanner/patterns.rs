//! Compiled regular expressions shared by the scanner.

use regex::Regex;
use std::sync::LazyLock;

/// `function(` or `function` followed by whitespace.
pub static FUNCTION_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function[\s(]").expect("function keyword pattern"));

/// A typed member such as `name: (arg` or `): (x`.
pub static COLON_ARROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i):\s?\([a-z_$]").expect("colon arrow pattern"));

/// Statements whose parentheses never introduce a function header.
pub static CONTROL_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:else\s+if|if|while|for)\s*\(").expect("control keyword pattern")
});

/// `return` followed by an expression, not a bare `return;`.
pub static RETURN_WITH_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\breturn\b\s*[^\s;}]").expect("return pattern"));

/// An arrow function that opens a block body.
pub static ARROW_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=>\s*\{").expect("arrow block pattern"));

/// First line of a JSDoc block or one of its ` * ` continuation lines.
pub static JSDOC_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*|/\*\*").expect("jsdoc line pattern"));

/// A `type="..."` attribute inside a default attribute string.
pub static TYPE_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btype="[^"]*"\s?"#).expect("type attribute pattern"));

pub fn is_function_line(code: &str) -> bool {
    FUNCTION_KEYWORD.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keyword() {
        assert!(is_function_line("function foo(a) {"));
        assert!(is_function_line("var x = function(a) {"));
        assert!(is_function_line("async function\tbar() {"));
        assert!(!is_function_line("if (typeof x === \"function\") {"));
        assert!(!is_function_line("functional();"));
    }

    #[test]
    fn test_colon_arrow() {
        assert!(COLON_ARROW.is_match("foo(): (x: number) => string {"));
        assert!(COLON_ARROW.is_match("handler: ($event) => void;"));
        assert!(!COLON_ARROW.is_match("foo(a: number): string {"));
    }

    #[test]
    fn test_control_keyword() {
        assert!(CONTROL_KEYWORD.is_match("if(x) {"));
        assert!(CONTROL_KEYWORD.is_match("} else if (y) {"));
        assert!(CONTROL_KEYWORD.is_match("while (true) {"));
        assert!(CONTROL_KEYWORD.is_match("for(let i = 0; i < n; i++) {"));
        assert!(!CONTROL_KEYWORD.is_match("format(value) {"));
        assert!(!CONTROL_KEYWORD.is_match("notify(x) {"));
    }

    #[test]
    fn test_return_with_value() {
        assert!(RETURN_WITH_VALUE.is_match("return x;"));
        assert!(RETURN_WITH_VALUE.is_match("return(x)"));
        assert!(!RETURN_WITH_VALUE.is_match("return;"));
        assert!(!RETURN_WITH_VALUE.is_match("  return"));
        assert!(!RETURN_WITH_VALUE.is_match("returnValue = 1;"));
    }

    #[test]
    fn test_type_attribute() {
        assert_eq!(
            TYPE_ATTRIBUTE.replace_all(r#"type="" optional="true""#, ""),
            r#"optional="true""#
        );
    }
}
