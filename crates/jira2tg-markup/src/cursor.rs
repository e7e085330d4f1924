/// A cursor for code-point-by-code-point scanning with one character of
/// lookahead and lookback.
///
/// Positions are byte offsets into `s` and always sit on a char boundary:
/// every way of advancing moves by whole code points.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    s: &'a str,
    /// Current byte index into `s`.
    i: usize,
    /// The last code point consumed, if any.
    prev: Option<char>,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0, prev: None }
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    /// Peeks at the current code point without advancing.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peeks at the code point after the current one.
    pub fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// The most recently consumed code point.
    pub fn prev(&self) -> Option<char> {
        self.prev
    }

    /// True at the start of input or right after a consumed line break.
    pub fn at_line_start(&self) -> bool {
        self.i == 0 || self.prev == Some('\n')
    }

    /// Checks if the remaining input starts with the given pattern.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advances by one code point, returning it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        self.prev = Some(c);
        Some(c)
    }

    /// Advances by `n` bytes of the remaining input.
    ///
    /// `n` is clamped to the remaining length and must land on a char
    /// boundary; detection helpers only ever return such offsets.
    pub fn bump_n(&mut self, n: usize) {
        let n = n.min(self.s.len() - self.i);
        if n == 0 {
            return;
        }
        if let Some(last) = self.s[self.i..self.i + n].chars().next_back() {
            self.prev = Some(last);
        }
        self.i += n;
    }

    /// Consumes `pat` if the remaining input starts with it.
    pub fn eat(&mut self, pat: &str) -> bool {
        if self.starts_with(pat) {
            self.bump_n(pat.len());
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.peek(), Some('h'));
        assert_eq!(cur.bump(), Some('h'));
        assert_eq!(cur.rest(), "ello");
        assert_eq!(cur.prev(), Some('h'));
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("{{code}}");
        assert!(cur.starts_with("{{"));
        assert!(!cur.starts_with("}}"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert_eq!(cur.rest(), "");
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.peek_next(), None);
        assert!(cur.at_line_start());
    }

    #[test]
    fn multibyte_code_points_advance_whole() {
        let mut cur = Cursor::new("привет");
        assert_eq!(cur.bump(), Some('п'));
        assert_eq!(cur.rest(), "ривет");
        assert_eq!(cur.peek(), Some('р'));
        assert_eq!(cur.peek_next(), Some('и'));
    }

    #[test]
    fn line_start_follows_newline() {
        let mut cur = Cursor::new("a\nb");
        assert!(cur.at_line_start());
        cur.bump();
        assert!(!cur.at_line_start());
        cur.bump();
        assert!(cur.at_line_start());
        cur.bump();
        assert!(!cur.at_line_start());
    }

    #[test]
    fn bump_n_tracks_last_consumed() {
        let mut cur = Cursor::new("{quote}x");
        cur.bump_n(7);
        assert_eq!(cur.prev(), Some('}'));
        assert_eq!(cur.peek(), Some('x'));
    }

    #[test]
    fn bump_n_past_end_is_clamped() {
        let mut cur = Cursor::new("hi");
        cur.bump_n(10);
        assert_eq!(cur.rest(), "");
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.prev(), Some('i'));
    }

    #[test]
    fn eat_consumes_only_on_match() {
        let mut cur = Cursor::new("??cite");
        assert!(!cur.eat("{{"));
        assert_eq!(cur.rest(), "??cite");
        assert!(cur.eat("??"));
        assert_eq!(cur.rest(), "cite");
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x");
        assert_eq!(cur.bump(), Some('x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }
}
