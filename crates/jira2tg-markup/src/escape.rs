//! # Escaping Policies
//!
//! Telegram MarkdownV2 rejects any reserved character that appears outside of
//! markup without a preceding backslash. Which characters count as reserved
//! depends on where the text lands:
//!
//! | Policy | Used for | Reserved set |
//! |--------|----------|--------------|
//! | [`escape_text`] | ordinary text | ``_ * [ ] ( ) ~ ` > # + - = \| { } . !`` and `\` |
//! | [`escape_code`] | code spans and fenced blocks | `` ` `` and `\` |
//! | [`escape_link`] | the `(...)` part of an inline link | `(` and `\` |
//!
//! Each policy is a stateless per-character decision; the `push_*` helpers
//! append to an existing buffer so the converter never allocates per character.

/// Characters reserved in ordinary MarkdownV2 text.
pub const TEXT_SPECIAL_CHARS: &str = "_*[]()~`>#+-=|{}.!\\";

/// Characters reserved inside code spans and code blocks.
pub const CODE_SPECIAL_CHARS: &str = "`\\";

/// Characters reserved inside a link destination.
pub const LINK_SPECIAL_CHARS: &str = "(\\";

fn push_escaped(out: &mut String, ch: char, reserved: &str) {
    if reserved.contains(ch) {
        out.push('\\');
    }
    out.push(ch);
}

/// Appends `ch` to `out` using the plain text policy.
pub fn push_text(out: &mut String, ch: char) {
    push_escaped(out, ch, TEXT_SPECIAL_CHARS);
}

/// Appends `ch` to `out` using the code policy.
pub fn push_code(out: &mut String, ch: char) {
    push_escaped(out, ch, CODE_SPECIAL_CHARS);
}

/// Appends `ch` to `out` using the link destination policy.
pub fn push_link(out: &mut String, ch: char) {
    push_escaped(out, ch, LINK_SPECIAL_CHARS);
}

/// Escapes `text` for use as ordinary MarkdownV2 text.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    text.chars().for_each(|ch| push_text(&mut out, ch));
    out
}

/// Escapes `text` for use inside a code span or code block.
pub fn escape_code(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    text.chars().for_each(|ch| push_code(&mut out, ch));
    out
}

/// Escapes `text` for use as a link destination.
pub fn escape_link(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    text.chars().for_each(|ch| push_link(&mut out, ch));
    out
}
