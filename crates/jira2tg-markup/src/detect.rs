//! # Marker Detection Helpers
//!
//! Lookahead predicates used by the converter to recognise multi-character
//! source constructs. Each helper inspects a `&str` that starts at the
//! current cursor position and reports how many **bytes** the construct
//! spans, so the converter can consume it in one step.
//!
//! None of these helpers consume input or know about open contexts; they are
//! pure functions over the remaining text.
//!
//! ## Brace blocks
//!
//! Jira block macros come in two shapes:
//!
//! ```text
//! {color:red}   left block with an argument
//! {color}       bare block, used both to open and to close
//! ```
//!
//! [`detect_left_block`] accepts both shapes, [`detect_right_block`] only the
//! bare one. [`detect_code_language`] is the left block specialised for
//! `{code:lang}`.

/// Finds the first `target` not escaped by a preceding backslash.
///
/// A backslash escapes exactly the character that follows it, so `\|`
/// hides the pipe but `\\|` does not.
pub fn find_unescaped(s: &str, target: char) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
            continue;
        }
        if ch == target {
            return Some(i);
        }
    }
    None
}

/// Like [`find_unescaped`], but gives up at the first unescaped `stop`.
pub fn find_unescaped_before(s: &str, target: char, stop: char) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            c if c == target => return Some(i),
            c if c == stop => return None,
            _ => {}
        }
    }
    None
}

/// Byte offset of the next line break, or the length of `s` if the line
/// runs to end of input.
pub fn end_of_line(s: &str) -> usize {
    s.find('\n').unwrap_or(s.len())
}

/// True if `s` starts with a heading marker `h1. ` through `h6. `.
pub fn is_heading(s: &str) -> bool {
    matches!(s.as_bytes(), [b'h', b'1'..=b'6', b'.', b' ', ..])
}

/// Detects a URI scheme (`scheme:`) at the start of `s` and returns it.
///
/// RFC 3986: `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
///
/// Stops at the first character that cannot belong to a scheme, so the cost
/// is bounded by the scheme length rather than the remaining input.
pub fn detect_scheme(s: &str) -> Option<&str> {
    let mut chars = s.char_indices();
    let (_, first) = chars.next()?;
    if !first.is_alphabetic() {
        return None;
    }

    for (i, ch) in chars {
        match ch {
            ':' => return Some(&s[..i]),
            c if c.is_alphanumeric() || matches!(c, '+' | '-' | '.') => continue,
            _ => return None,
        }
    }

    None
}

/// Detects a list marker (a run of `*`/`#` followed by whitespace) and
/// returns the length of the run, excluding the whitespace.
pub fn list_marker_len(s: &str) -> Option<usize> {
    if !s.starts_with(['*', '#']) {
        return None;
    }

    for (i, ch) in s.char_indices() {
        match ch {
            '*' | '#' => continue,
            c if c.is_whitespace() => return Some(i),
            _ => return None,
        }
    }

    None
}

/// Detects `{name}` or `{name:argument}` and returns its byte length.
pub fn detect_left_block(s: &str, name: &str) -> Option<usize> {
    let body = s.strip_prefix('{')?.strip_prefix(name)?;
    match body.chars().next()? {
        '}' => Some(name.len() + 2),
        ':' => find_unescaped(body, '}').map(|end| name.len() + 1 + end + 1),
        _ => None,
    }
}

/// Detects the bare closing form `{name}` and returns its byte length.
pub fn detect_right_block(s: &str, name: &str) -> Option<usize> {
    s.strip_prefix('{')?
        .strip_prefix(name)?
        .starts_with('}')
        .then_some(name.len() + 2)
}

/// Detects a `{name}` / `{name:lang}` code opener and returns the language
/// together with the opener's byte length.
///
/// A bare opener yields `default`. So does an argument containing
/// whitespace, control characters or `=`, which is how Jira spells
/// parameter lists such as `{code:title=Foo.java}`. The argument is returned
/// as written otherwise, even when empty.
pub fn detect_code_language<'a>(
    s: &'a str,
    name: &str,
    default: &'a str,
) -> Option<(&'a str, usize)> {
    let body = s.strip_prefix('{')?.strip_prefix(name)?;
    match body.chars().next()? {
        '}' => Some((default, name.len() + 2)),
        ':' => {
            let end = find_unescaped(body, '}')?;
            let len = name.len() + 1 + end + 1;
            let argument = &body[1..end];
            if argument
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || c == '=')
            {
                Some((default, len))
            } else {
                Some((argument, len))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", None)]
    #[case("This is a test.", None)]
    #[case("{color}", Some(7))]
    #[case("{color}This is a test.", Some(7))]
    #[case("{color:red}", None)]
    #[case("{colour}", None)]
    #[case("color}", None)]
    fn right_block(#[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(detect_right_block(input, "color"), expected);
    }

    #[rstest]
    #[case("", None)]
    #[case("This is a test.", None)]
    #[case("{color:red}This is a test.", Some(11))]
    #[case("{color:red}\nThis is a test.", Some(11))]
    #[case("{color}", Some(7))]
    #[case("{color:#ff0000", None)]
    #[case("{color:a\\}b}rest", Some(12))]
    #[case("{colorful}", None)]
    fn left_block(#[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(detect_left_block(input, "color"), expected);
    }

    #[rstest]
    #[case("{code}", Some(("java", 6)))]
    #[case("{code:go}", Some(("go", 9)))]
    #[case("{code:title=Foo.java}", Some(("java", 21)))]
    #[case("{code:c sharp}", Some(("java", 14)))]
    #[case("{code:}", Some(("", 7)))]
    #[case("{code:rust", None)]
    #[case("{noformat}", None)]
    fn code_language(#[case] input: &str, #[case] expected: Option<(&str, usize)>) {
        assert_eq!(detect_code_language(input, "code", "java"), expected);
    }

    #[rstest]
    #[case("* Item", Some(1))]
    #[case("*# Sub item", Some(2))]
    #[case("##\tdeep", Some(2))]
    #[case("*bold*", None)]
    #[case("***", None)]
    #[case("", None)]
    #[case("- item", None)]
    fn list_marker(#[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(list_marker_len(input), expected);
    }

    #[rstest]
    #[case("https://example.com]", Some("https"))]
    #[case("svn+ssh://host", Some("svn+ssh"))]
    #[case("mailto:someone@example.com", Some("mailto"))]
    #[case("Ex:*am*ple", Some("Ex"))]
    #[case(":nothing", None)]
    #[case("1abc:x", None)]
    #[case("no scheme here", None)]
    #[case("not a: scheme", None)]
    #[case("a] then: later", None)]
    #[case("scheme-without-colon", None)]
    fn scheme(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(detect_scheme(input), expected);
    }

    #[test]
    fn unescaped_search_skips_escaped_chars() {
        assert_eq!(find_unescaped("a\\|b|c", '|'), Some(4));
        assert_eq!(find_unescaped("a\\\\|b", '|'), Some(3));
        assert_eq!(find_unescaped("abc", '|'), None);
        assert_eq!(find_unescaped("", '|'), None);
    }

    #[test]
    fn bounded_search_stops_at_closer() {
        assert_eq!(find_unescaped_before("text|url]", '|', ']'), Some(4));
        assert_eq!(find_unescaped_before("text] and [a|b]", '|', ']'), None);
        assert_eq!(find_unescaped_before("a\\]b|c]", '|', ']'), Some(4));
    }

    #[test]
    fn headings() {
        for level in 1..=6 {
            assert!(is_heading(&format!("h{level}. Title")));
        }
        assert!(!is_heading("h7. Title"));
        assert!(!is_heading("h1.Title"));
        assert!(!is_heading("h1"));
        assert!(!is_heading("hello"));
    }

    #[test]
    fn line_end() {
        assert_eq!(end_of_line("abc\ndef"), 3);
        assert_eq!(end_of_line("abc"), 3);
        assert_eq!(end_of_line("\n"), 0);
        assert_eq!(end_of_line(""), 0);
    }
}
