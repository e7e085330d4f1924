//! # jira2tg-markup
//!
//! Converts Jira wiki markup into Telegram [MarkdownV2] in a single
//! left-to-right pass, without building a tree.
//!
//! [MarkdownV2]: https://core.telegram.org/bots/api#markdownv2-style
//!
//! ## Why a Single Pass?
//!
//! MarkdownV2 is strict: every reserved character that is not markup must be
//! backslash-escaped, and every entity that is opened must be closed, or the
//! Bot API rejects the whole message. Jira markup, on the other hand, is
//! written by humans and is frequently malformed. A streaming converter that
//! tracks the open contexts can escape each character for the context it
//! lands in and close whatever is still open when the input ends, which is
//! all the target needs.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Cursor → Rule chain ⇄ ContextStack → Escaping → Output
//! ```
//!
//! ### 1. Cursor ([`cursor`] module)
//!
//! Walks the input one code point at a time with one character of
//! lookahead ([`Cursor::peek_next`](cursor::Cursor::peek_next)) and lookback
//! ([`Cursor::prev`](cursor::Cursor::prev)). It knows nothing about markup.
//!
//! ### 2. Contexts ([`context`] module)
//!
//! [`Context`] is a closed enum of the formats that can be open (bold, code
//! block, link text, ...). Each variant owns its MarkdownV2 open, close and
//! emergency-close sequences.
//!
//! ### 3. Converter ([`convert`](mod@convert) module)
//!
//! The rule chain. For each position it asks, in a fixed priority order,
//! whether a raw zone, an escape, a link destination, a heading or a piece
//! of inline/block markup applies.
//!
//! ### 4. Detection and escaping ([`detect`], [`escape`] modules)
//!
//! Pure helpers: lookahead predicates for multi-character constructs
//! (`{color:red}`, `h1. `, list markers, URI schemes) and the three
//! MarkdownV2 escaping policies.
//!
//! ## Quick Start
//!
//! ```
//! use jira2tg_markup::convert;
//!
//! assert_eq!(convert("Start *bold* end."), "Start *bold* end\\.");
//! assert_eq!(
//!     convert("See [the docs|https://example.org/a(b)]"),
//!     "See [the docs](https://example.org/a\\(b))"
//! );
//! ```
//!
//! With non-default options:
//!
//! ```
//! use jira2tg_markup::{Converter, Options};
//!
//! let converter = Converter::new(Options {
//!     default_code_language: "kotlin".to_string(),
//!     ..Options::default()
//! });
//! assert_eq!(converter.convert("{code}val x{code}"), "```kotlin\nval x```");
//! ```
//!
//! ## Supported Markup
//!
//! | Jira | MarkdownV2 |
//! |------|------------|
//! | `*bold*` | `*bold*` |
//! | `_italic_`, `??citation??` | `_italic_` |
//! | `-strike-` | `~strike~` |
//! | `+underline+` | `__underline__` |
//! | `^sup^`, `~sub~` | markers dropped |
//! | `{{mono}}` | `` `mono` `` |
//! | `{code:lang}...{code}`, `{noformat}...{noformat}` | fenced block |
//! | `{quote}...{quote}` | `>` prefixed lines |
//! | `{color:x}`, `{panel:x}`, `{anchor:x}` | markup dropped, content kept |
//! | `[text\|url]`, `[https://url]` | inline link |
//! | `[~user]`, `[^file]`, `[#anchor]`, `[file://...]`, `!image!` | dropped |
//! | `h1. Title` | bold line |
//! | `* item`, `# item` | marker kept as is |

pub mod context;
pub mod convert;
pub mod cursor;
pub mod detect;
pub mod escape;

pub use context::{Context, ContextStack};
pub use convert::{
    Converter, DEFAULT_CODE_LANGUAGE, DEFAULT_PLACEHOLDER_URL, Options, convert,
};
pub use escape::{escape_code, escape_link, escape_text};
