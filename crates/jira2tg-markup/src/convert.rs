//! # Converter - The Single Conversion Pass
//!
//! Jira markup is converted in one left-to-right scan. There is no tree: the
//! converter keeps a [`ContextStack`] of open formats and decides what to do
//! with each code point from the innermost context, the character itself and
//! whether the cursor sits at the start of a line.
//!
//! ## Rule Order
//!
//! Every iteration walks the same ordered chain of rules and stops at the
//! first one that handles the current position:
//!
//! | # | Rule | Applies when |
//! |---|------|--------------|
//! | 1 | [`verbatim_block`] | `{noformat}` or `{code}` block is innermost |
//! | 2 | [`image`] | `!image!` is innermost, content is dropped |
//! | 3 | [`inline_code`] | `{{code}}` is innermost |
//! | 4 | [`unsupported_link`] | `[~user]` and friends, content is dropped |
//! | 5 | [`escaped_char`] | a backslash escape outside verbatim regions |
//! | 6 | [`link_destination`] | a link URL is being collected |
//! | 7 | [`heading`] | `h1. `..`h6. ` at line start |
//! | 8 | [`markup`] | everything else, including plain text |
//!
//! Each rule consumes at least one code point when it reports success, so
//! the loop always terminates.
//!
//! ## Raw Zones
//!
//! Rules 1-4 are raw zones: while one of those contexts is innermost, no
//! other markup is recognised. The two verbatim block kinds share their
//! closers, so `{noformat}` ends a `{code}` block and vice versa.
//!
//! ## Unterminated Markup
//!
//! When input ends with contexts still open, each one is closed with its
//! emergency sequence (innermost first), so the output never leaves a
//! MarkdownV2 entity dangling.
//!
//! [`verbatim_block`]: State::verbatim_block
//! [`image`]: State::image
//! [`inline_code`]: State::inline_code
//! [`unsupported_link`]: State::unsupported_link
//! [`escaped_char`]: State::escaped_char
//! [`link_destination`]: State::link_destination
//! [`heading`]: State::heading
//! [`markup`]: State::markup

use crate::context::{Context, ContextStack};
use crate::cursor::Cursor;
use crate::detect;
use crate::escape;

/// Language label used for `{code}` blocks that do not name one.
pub const DEFAULT_CODE_LANGUAGE: &str = "java";

/// Link destination used when a link never supplied one.
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://example.com";

const NOFORMAT: &str = "{noformat}";
const CODE_CLOSE: &str = "{code}";
const INLINE_CODE_OPEN: &str = "{{";
const INLINE_CODE_CLOSE: &str = "}}";
const CITATION: &str = "??";
const FILE_LINK: &str = "file://";
const QUOTE_PREFIX: &str = "\n>";

/// Tunable values used by the conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Language written after the fence of a `{code}` block without one.
    pub default_code_language: String,
    /// Destination for links written without a URL and for unterminated links.
    pub placeholder_url: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_code_language: DEFAULT_CODE_LANGUAGE.to_string(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }
}

/// Converts Jira wiki markup into Telegram MarkdownV2.
///
/// A `Converter` holds only its [`Options`]; every call to
/// [`convert`](Converter::convert) starts from a fresh state, so one
/// converter can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: Options,
}

impl Converter {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Converts `input`. Never fails: malformed markup degrades to escaped
    /// text, dropped constructs or emergency-closed contexts.
    pub fn convert(&self, input: &str) -> String {
        State::new(input, &self.options).run()
    }
}

/// Converts `input` with the default [`Options`].
///
/// ```
/// use jira2tg_markup::convert;
///
/// assert_eq!(convert("Start *bold* end."), "Start *bold* end\\.");
/// assert_eq!(convert("This -struck- text."), "This ~struck~ text\\.");
/// assert_eq!(convert("Unclosed *bold text"), "Unclosed *bold text*");
/// ```
pub fn convert(input: &str) -> String {
    Converter::default().convert(input)
}

/// Mutable state of one conversion.
struct State<'a> {
    cur: Cursor<'a>,
    stack: ContextStack,
    out: String,
    /// Raw destination of the link being read.
    link: String,
    options: &'a Options,
}

impl<'a> State<'a> {
    fn new(input: &'a str, options: &'a Options) -> Self {
        Self {
            cur: Cursor::new(input),
            stack: ContextStack::new(),
            out: String::with_capacity(input.len() + input.len() / 4),
            link: String::new(),
            options,
        }
    }

    fn run(mut self) -> String {
        while let Some(ch) = self.cur.peek() {
            let handled = self.verbatim_block(ch)
                || self.image(ch)
                || self.inline_code(ch)
                || self.unsupported_link(ch)
                || self.escaped_char(ch)
                || self.link_destination(ch)
                || self.heading();
            if !handled {
                self.markup(ch);
            }
        }

        self.close_unterminated();
        self.out
    }

    // === Raw zones ===

    /// Inside `{noformat}` / `{code}`: code-escape everything up to either closer.
    fn verbatim_block(&mut self, ch: char) -> bool {
        if !self.stack.top().is_some_and(Context::is_verbatim_block) {
            return false;
        }

        if ch == '\\'
            && let Some(next) = self.cur.peek_next()
        {
            if next.is_whitespace() {
                escape::push_code(&mut self.out, ch);
                self.cur.bump();
            } else {
                escape::push_code(&mut self.out, next);
                self.cur.bump();
                self.cur.bump();
            }
            return true;
        }

        if self.cur.eat(NOFORMAT) || self.cur.eat(CODE_CLOSE) {
            self.close_top();
            return true;
        }

        escape::push_code(&mut self.out, ch);
        self.cur.bump();
        true
    }

    /// Inside `!...!`: drop everything up to an unescaped `!`.
    fn image(&mut self, ch: char) -> bool {
        if !self.stack.top_is(Context::Image) {
            return false;
        }
        if ch == '!' && self.cur.prev() != Some('\\') {
            self.stack.pop();
        }
        self.cur.bump();
        true
    }

    /// Inside `{{...}}`: code-escape everything up to an unescaped `}}`.
    fn inline_code(&mut self, ch: char) -> bool {
        if !self.stack.top_is(Context::InlineCode) {
            return false;
        }
        if ch == '}' && self.cur.prev() != Some('\\') && self.cur.eat(INLINE_CODE_CLOSE) {
            self.close_top();
        } else {
            escape::push_code(&mut self.out, ch);
            self.cur.bump();
        }
        true
    }

    /// Inside `[~user]`, `[^file]`, `[#anchor]`: drop everything up to an unescaped `]`.
    fn unsupported_link(&mut self, ch: char) -> bool {
        if !self.stack.top_is(Context::UnsupportedLink) {
            return false;
        }
        if ch == ']' && self.cur.prev() != Some('\\') {
            self.stack.pop();
        }
        self.cur.bump();
        true
    }

    // === Escapes and links ===

    /// `\X` emits `X` literally; a backslash before whitespace is kept.
    fn escaped_char(&mut self, ch: char) -> bool {
        if ch != '\\' {
            return false;
        }
        let Some(next) = self.cur.peek_next() else {
            return false;
        };

        let (literal, width) = if next.is_whitespace() {
            (ch, 1)
        } else {
            (next, 2)
        };
        escape::push_text(&mut self.out, literal);
        if self.stack.top().is_some_and(Context::collects_url) {
            self.link.push(literal);
        }

        for _ in 0..width {
            self.cur.bump();
        }
        true
    }

    /// Collects link destination characters.
    ///
    /// After the `|` of `[text|url]` the characters are only collected. In an
    /// autolink `[https://...]` they are also rendered as the link text, so
    /// this rule lets them fall through to [`markup`](Self::markup).
    fn link_destination(&mut self, ch: char) -> bool {
        if ch == ']' {
            return false;
        }
        match self.stack.top() {
            Some(Context::LinkUrl) => {
                self.link.push(ch);
                self.cur.bump();
                true
            }
            Some(Context::LinkTextAndUrl) => {
                self.link.push(ch);
                false
            }
            _ => false,
        }
    }

    // === Line-start constructs ===

    /// `h1. Title` becomes a bold line. The marker is kept as part of the text.
    fn heading(&mut self) -> bool {
        let rest = self.cur.rest();
        if !self.cur.at_line_start() || !detect::is_heading(rest) {
            return false;
        }

        let len = detect::end_of_line(rest);
        self.out.push_str(Context::Bold.open());
        self.out.push_str(&escape::escape_text(&rest[..len]));
        self.out.push_str(Context::Bold.close());
        self.cur.bump_n(len);
        true
    }

    /// List markers only count at line start outside of any context.
    fn list_marker(&mut self) -> bool {
        if !self.cur.at_line_start() || !self.stack.is_empty() {
            return false;
        }
        let rest = self.cur.rest();
        let Some(len) = detect::list_marker_len(rest) else {
            return false;
        };
        self.out.push_str(&rest[..len]);
        self.cur.bump_n(len);
        true
    }

    // === General dispatch ===

    fn markup(&mut self, ch: char) {
        match ch {
            '!' => self.image_open(ch),
            '\n' if self.stack.top_is(Context::Quote) => {
                self.out.push_str(QUOTE_PREFIX);
                self.cur.bump();
            }
            '|' if self.stack.top_is(Context::LinkText) => {
                self.stack.pop();
                self.stack.push(Context::LinkUrl);
                self.link.clear();
                self.cur.bump();
            }
            ']' if self.stack.top().is_some_and(Context::is_link) => self.link_close(),
            '[' if self.cur.peek_next().is_some()
                && !self.stack.top().is_some_and(Context::is_link) =>
            {
                self.link_open()
            }
            '{' => self.brace(ch),
            '?' if self.cur.starts_with(CITATION) => {
                self.toggle(Context::Citation, CITATION.len());
            }
            '#' => {
                if !self.list_marker() {
                    self.plain(ch);
                }
            }
            '*' => {
                if !self.list_marker() {
                    self.toggle(Context::Bold, ch.len_utf8());
                }
            }
            _ => match Context::from_marker(ch) {
                Some(ctx) => self.toggle(ctx, ch.len_utf8()),
                None => self.plain(ch),
            },
        }
    }

    /// `!` opens an image unless it ends the input or precedes whitespace.
    fn image_open(&mut self, ch: char) {
        match self.cur.peek_next() {
            Some(next) if !next.is_whitespace() => {
                self.stack.push(Context::Image);
                self.cur.bump();
            }
            _ => self.plain(ch),
        }
    }

    /// Classifies a `[` by looking ahead at its content.
    fn link_open(&mut self) {
        self.link.clear();

        let after = &self.cur.rest()['['.len_utf8()..];
        let ctx = if after.starts_with(['^', '#', '~']) || after.starts_with(FILE_LINK) {
            Context::UnsupportedLink
        } else {
            let has_scheme = detect::detect_scheme(after).is_some();
            let has_pipe = detect::find_unescaped_before(after, '|', ']').is_some();
            match (has_scheme, has_pipe) {
                (_, true) => Context::LinkText,
                (true, false) => Context::LinkTextAndUrl,
                (false, false) => Context::UnsupportedLink,
            }
        };

        if ctx != Context::UnsupportedLink {
            self.out.push('[');
        }
        self.stack.push(ctx);
        self.cur.bump();
    }

    /// `]` finishes a link with its collected (or placeholder) destination.
    fn link_close(&mut self) {
        if self.stack.pop() == Some(Context::LinkText) {
            self.link.clear();
            self.link.push_str(&self.options.placeholder_url);
        }

        self.out.push_str("](");
        self.out.push_str(&escape::escape_link(&self.link));
        self.out.push(')');
        self.link.clear();
        self.cur.bump();
    }

    /// Block macros: `{noformat}`, `{code}`, `{{`, `{color}`, `{panel}`,
    /// `{anchor}` and `{quote}`.
    fn brace(&mut self, ch: char) {
        let rest = self.cur.rest();
        let options = self.options;

        if self.stack.is_empty() {
            if rest.starts_with(NOFORMAT) {
                self.open(Context::NoFormat);
                self.cur.bump_n(NOFORMAT.len());
                return;
            }

            if let Some((language, len)) =
                detect::detect_code_language(rest, "code", &options.default_code_language)
            {
                if !self.cur.at_line_start() {
                    self.out.push('\n');
                }
                self.open(Context::CodeBlock);
                if !language.is_empty() {
                    self.out.push_str(&escape::escape_code(language));
                    self.out.push('\n');
                }
                self.cur.bump_n(len);
                return;
            }

            if rest.starts_with(INLINE_CODE_OPEN) {
                self.open(Context::InlineCode);
                self.cur.bump_n(INLINE_CODE_OPEN.len());
                return;
            }
        }

        // Only the bare closer of the innermost block is recognised, so
        // blocks of these kinds never nest.
        if let Some(ctx @ (Context::Panel | Context::Color | Context::Quote)) = self.stack.top() {
            match detect::detect_right_block(rest, block_name(ctx)) {
                Some(len) => {
                    self.close_top();
                    if ctx == Context::Quote {
                        self.out.push('\n');
                    }
                    self.cur.bump_n(len);
                }
                None => self.plain(ch),
            }
            return;
        }

        if let Some(len) = detect::detect_left_block(rest, block_name(Context::Color)) {
            self.open(Context::Color);
            self.cur.bump_n(len);
        } else if let Some(len) = detect::detect_left_block(rest, block_name(Context::Panel)) {
            self.open(Context::Panel);
            self.cur.bump_n(len);
        } else if let Some(len) = detect::detect_left_block(rest, "anchor") {
            self.cur.bump_n(len);
        } else if let Some(len) = detect::detect_right_block(rest, block_name(Context::Quote)) {
            self.open(Context::Quote);
            self.out.push_str(QUOTE_PREFIX);
            self.cur.bump_n(len);
        } else {
            self.plain(ch);
        }
    }

    // === Emission ===

    /// Closes `ctx` if it is innermost, opens it otherwise.
    fn toggle(&mut self, ctx: Context, len: usize) {
        if self.stack.top_is(ctx) {
            self.close_top();
        } else {
            self.open(ctx);
        }
        self.cur.bump_n(len);
    }

    fn open(&mut self, ctx: Context) {
        self.stack.push(ctx);
        self.out.push_str(ctx.open());
    }

    fn close_top(&mut self) {
        if let Some(ctx) = self.stack.pop() {
            self.out.push_str(ctx.close());
        }
    }

    fn plain(&mut self, ch: char) {
        escape::push_text(&mut self.out, ch);
        self.cur.bump();
    }

    fn close_unterminated(&mut self) {
        if !self.stack.is_empty() {
            log::debug!(
                "input ended with {} unterminated context(s), closing them",
                self.stack.len()
            );
        }
        while let Some(ctx) = self.stack.pop() {
            self.out
                .push_str(&ctx.emergency_close(&self.options.placeholder_url));
        }
    }
}

/// Macro name of a brace block context.
fn block_name(ctx: Context) -> &'static str {
    match ctx {
        Context::Color => "color",
        Context::Panel => "panel",
        Context::Quote => "quote",
        _ => "",
    }
}
