//! Comment removal for single lines, plus the block-comment state the body
//! scanner threads from one line to the next.

/// Removes `//` and `/* */` comment text from a single line.
///
/// A `//` truncates the line, an unterminated `/*` truncates the line, and a
/// closed `/* ... */` span is cut out before the remainder is stripped again.
/// The loop runs until a pass removes nothing, so the result is a fixed point:
/// `strip(&strip(s)) == strip(s)`.
pub fn strip(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    if let Some(idx) = text.find("//") {
        return text[..idx].to_string();
    }

    if let Some(open) = text.find("/*") {
        return match text[open + 2..].find("*/") {
            Some(rel) => {
                let close = open + 2 + rel + 2;
                format!("{}{}", &text[..open], &text[close..])
            }
            None => text[..open].to_string(),
        };
    }

    text.to_string()
}

/// Byte index in `line` of the first `needle` at or after `from` that lies
/// outside comments. Comment markers are honored in the order they appear.
pub fn find_in_code(line: &str, from: usize, needle: char) -> Option<usize> {
    let mut idx = 0;
    while idx < line.len() {
        let rest = &line[idx..];
        if rest.starts_with("//") {
            return None;
        }
        if rest.starts_with("/*") {
            idx += 2 + rest[2..].find("*/")? + 2;
            continue;
        }
        let ch = rest.chars().next()?;
        if ch == needle && idx >= from {
            return Some(idx);
        }
        idx += ch.len_utf8();
    }
    None
}

/// Whether the character starting at byte `idx` of `line` is code.
pub fn is_code_at(line: &str, idx: usize) -> bool {
    line.get(idx..)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|ch| find_in_code(line, idx, ch) == Some(idx))
}

/// Tracks whether the scan currently sits inside a `/* ... */` block that spans
/// lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommentRunState {
    pub inside_block_comment: bool,
}

impl CommentRunState {
    /// Returns the code on `line` that lies outside comments, updating the
    /// block-comment flag by processing markers in the order they appear.
    pub fn code_portion(&mut self, line: &str) -> String {
        let mut code = String::new();
        let mut rest = line;

        loop {
            if self.inside_block_comment {
                match rest.find("*/") {
                    Some(idx) => {
                        rest = &rest[idx + 2..];
                        self.inside_block_comment = false;
                        code.push(' ');
                    }
                    None => return code,
                }
            }

            match (rest.find("//"), rest.find("/*")) {
                (Some(line_comment), Some(block)) if line_comment < block => {
                    code.push_str(&rest[..line_comment]);
                    return code;
                }
                (_, Some(block)) => {
                    code.push_str(&rest[..block]);
                    rest = &rest[block + 2..];
                    self.inside_block_comment = true;
                }
                (Some(line_comment), None) => {
                    code.push_str(&rest[..line_comment]);
                    return code;
                }
                (None, None) => {
                    code.push_str(rest);
                    return code;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_without_comments_is_identity() {
        assert_eq!(strip("function foo(a, b) {"), "function foo(a, b) {");
        assert_eq!(strip(""), "");
    }

    #[test]
    fn test_strip_line_comment() {
        assert_eq!(strip("foo(a); // call foo"), "foo(a); ");
    }

    #[test]
    fn test_strip_unterminated_block() {
        assert_eq!(strip("a, /* first"), "a, ");
    }

    #[test]
    fn test_strip_multiple_block_spans() {
        assert_eq!(strip("a /* x */, b /* y */, c"), "a , b , c");
    }

    #[test]
    fn test_strip_line_comment_inside_block() {
        assert_eq!(strip("a /* // */ b"), "a ");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let samples = [
            "function f(a /* first */, b) { // trailing",
            "a /* // */ b",
            "/* open",
            "x */ y /* z",
            "/*/ odd */ tail",
            "plain text",
        ];
        for sample in samples {
            let once = strip(sample);
            assert_eq!(strip(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_find_in_code_skips_comment_spans() {
        assert_eq!(find_in_code("/* (legacy) */ foo(a) {", 0, '('), Some(18));
        assert_eq!(find_in_code("foo(a) /* ( */", 0, '('), Some(3));
        assert_eq!(find_in_code("foo(a, b(c))", 4, '('), Some(8));
        assert_eq!(find_in_code("bar // (x)", 0, '('), None);
        assert_eq!(find_in_code("bar /* (x)", 0, '('), None);
    }

    #[test]
    fn test_is_code_at() {
        let line = "/* function */ go(x)";
        assert!(!is_code_at(line, 3));
        assert!(is_code_at(line, 15));
        assert!(!is_code_at(line, 99));
    }

    #[test]
    fn test_code_portion_tracks_block_comments() {
        let mut state = CommentRunState::default();
        assert_eq!(state.code_portion("foo(); /* start").trim(), "foo();");
        assert!(state.inside_block_comment);
        assert_eq!(state.code_portion("  return 1;"), "");
        assert!(state.inside_block_comment);
        assert_eq!(state.code_portion("end */ bar();").trim(), "bar();");
        assert!(!state.inside_block_comment);
    }

    #[test]
    fn test_code_portion_marker_order() {
        let mut state = CommentRunState::default();
        // Closed then reopened on the same line ends inside a comment.
        state.code_portion("/* a */ x /* b");
        assert!(state.inside_block_comment);

        let mut state = CommentRunState::default();
        // A `/*` after `//` is part of the line comment.
        assert_eq!(state.code_portion("x // /* not a block"), "x ");
        assert!(!state.inside_block_comment);
    }
}
