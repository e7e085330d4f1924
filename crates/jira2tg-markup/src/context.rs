//! Format contexts and the stack that tracks which ones are open.
//!
//! Following the "knowledge ownership" rule used for inline kinds, every
//! context owns its target delimiters: the converter asks a context how to
//! open or close itself and never hardcodes `*` or `` ``` ``.

use std::borrow::Cow;

use crate::escape::escape_link;

/// One formatting or structural mode that can be open during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// `*text*`
    Bold,
    /// `_text_`
    Italic,
    /// `-text-`, rendered as `~text~`
    Strike,
    /// `+text+`, rendered as `__text__`
    Underline,
    /// `^text^`, no target equivalent
    Superscript,
    /// `~text~`, no target equivalent
    Subscript,
    /// `??text??`, rendered as italic
    Citation,
    /// `{{text}}`
    InlineCode,
    /// `{noformat}...{noformat}`
    NoFormat,
    /// `{code[:lang]}...{code}`
    CodeBlock,
    /// `{color[:value]}...{color}`, content kept, colour dropped
    Color,
    /// `{panel[:params]}...{panel}`, content kept, frame dropped
    Panel,
    /// `{quote}...{quote}`
    Quote,
    /// `[text` before a `|`
    LinkText,
    /// `|url]` after the pipe of a `[text|url]` link
    LinkUrl,
    /// `[scheme:...]`, the URL is also the visible text
    LinkTextAndUrl,
    /// `[~user]`, `[^attachment]`, `[#anchor]`, `[file://...]` and unrecognised brackets
    UnsupportedLink,
    /// `!image.png!`
    Image,
}

impl Context {
    /// Maps a single-character inline marker to the context it toggles.
    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            '*' => Some(Self::Bold),
            '_' => Some(Self::Italic),
            '-' => Some(Self::Strike),
            '+' => Some(Self::Underline),
            '^' => Some(Self::Superscript),
            '~' => Some(Self::Subscript),
            _ => None,
        }
    }

    /// Target sequence written when the context opens.
    pub fn open(self) -> &'static str {
        match self {
            Self::Bold => "*",
            Self::Italic | Self::Citation => "_",
            Self::Strike => "~",
            Self::Underline => "__",
            Self::InlineCode => "`",
            Self::NoFormat | Self::CodeBlock => "```",
            Self::Superscript
            | Self::Subscript
            | Self::Color
            | Self::Panel
            | Self::Quote
            | Self::LinkText
            | Self::LinkUrl
            | Self::LinkTextAndUrl
            | Self::UnsupportedLink
            | Self::Image => "",
        }
    }

    /// Target sequence written when the source closes the context.
    pub fn close(self) -> &'static str {
        // Every paired context closes with the sequence it opened with.
        self.open()
    }

    /// Target sequence written when input ends with the context still open.
    ///
    /// Links that never reached their `]` are finished with a destination so
    /// the output still parses; `placeholder_url` is that destination.
    pub fn emergency_close(self, placeholder_url: &str) -> Cow<'static, str> {
        if self.is_link() {
            Cow::Owned(format!("]({})", escape_link(placeholder_url)))
        } else {
            Cow::Borrowed(self.close())
        }
    }

    /// True for the contexts that end in a `](url)` destination.
    pub fn is_link(self) -> bool {
        matches!(self, Self::LinkText | Self::LinkUrl | Self::LinkTextAndUrl)
    }

    /// True for the contexts whose characters end up in the link destination.
    pub fn collects_url(self) -> bool {
        matches!(self, Self::LinkUrl | Self::LinkTextAndUrl)
    }

    /// True for the fenced verbatim blocks.
    pub fn is_verbatim_block(self) -> bool {
        matches!(self, Self::NoFormat | Self::CodeBlock)
    }
}

/// LIFO stack of open contexts. Empty means neutral scanning mode.
#[derive(Debug, Default)]
pub struct ContextStack {
    items: Vec<Context>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ctx: Context) {
        log::trace!("open {ctx:?} at depth {}", self.items.len());
        self.items.push(ctx);
    }

    pub fn pop(&mut self) -> Option<Context> {
        let ctx = self.items.pop();
        if let Some(ctx) = ctx {
            log::trace!("close {ctx:?} at depth {}", self.items.len());
        }
        ctx
    }

    /// The innermost open context.
    pub fn top(&self) -> Option<Context> {
        self.items.last().copied()
    }

    /// True if the innermost open context is `ctx`.
    pub fn top_is(&self, ctx: Context) -> bool {
        self.top() == Some(ctx)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strike_and_underline_are_substituted() {
        assert_eq!(Context::from_marker('-'), Some(Context::Strike));
        assert_eq!(Context::Strike.open(), "~");
        assert_eq!(Context::from_marker('+'), Some(Context::Underline));
        assert_eq!(Context::Underline.open(), "__");
    }

    #[test]
    fn sub_and_superscript_render_nothing() {
        assert_eq!(Context::from_marker('~'), Some(Context::Subscript));
        assert_eq!(Context::Subscript.open(), "");
        assert_eq!(Context::Superscript.close(), "");
    }

    #[test]
    fn non_marker_chars_map_to_nothing() {
        assert_eq!(Context::from_marker('a'), None);
        assert_eq!(Context::from_marker('#'), None);
    }

    #[test]
    fn links_close_with_placeholder_in_emergency() {
        for ctx in [Context::LinkText, Context::LinkUrl, Context::LinkTextAndUrl] {
            assert_eq!(
                ctx.emergency_close("https://example.com"),
                "](https://example.com)"
            );
        }
        assert_eq!(
            Context::LinkText.emergency_close("https://x.org/(a)"),
            "](https://x.org/\\(a))"
        );
    }

    #[test]
    fn consuming_contexts_close_silently() {
        for ctx in [
            Context::Image,
            Context::UnsupportedLink,
            Context::Color,
            Context::Panel,
            Context::Quote,
        ] {
            assert_eq!(ctx.emergency_close("https://example.com"), "");
        }
    }

    #[test]
    fn verbatim_blocks_share_fences() {
        assert_eq!(Context::NoFormat.open(), "```");
        assert_eq!(Context::CodeBlock.emergency_close(""), "```");
        assert!(Context::CodeBlock.is_verbatim_block());
        assert!(!Context::InlineCode.is_verbatim_block());
    }

    #[test]
    fn stack_is_lifo() {
        let mut stack = ContextStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.top(), None);

        stack.push(Context::Bold);
        stack.push(Context::Italic);
        assert_eq!(stack.len(), 2);
        assert!(stack.top_is(Context::Italic));

        assert_eq!(stack.pop(), Some(Context::Italic));
        assert_eq!(stack.pop(), Some(Context::Bold));
        assert_eq!(stack.pop(), None);
    }
}
