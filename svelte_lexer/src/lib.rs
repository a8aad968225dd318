//! External scanners and element-nesting tracker for HTML and Svelte markup.
//!
//! The scanners in this crate decide the context-sensitive tokens a grammar
//! cannot express on its own: tag starts that depend on which elements are
//! open, raw-text element bodies, embedded expressions and comment bodies.
//! [`Scanner`] bundles them into one session; [`tokenize`] drives a whole
//! document through it.

pub mod chars;
mod comment;
pub mod config;
pub mod context;
mod error;
mod expression;
pub mod input;
mod lexer;
pub mod lookahead;
mod raw_text;
mod scanner;
mod tag;
pub mod tags;
pub mod token;

use crate::{config::LexOptions, lexer::Lexer};
pub use crate::{
    comment::scan_comment_content,
    context::ElementContext,
    error::*,
    expression::{CommentSkipper, ExpressionKind, StringSkipper, scan_expression},
    input::{Input, InputId, StrInput},
    lexer::{Language, render_tokens},
    raw_text::RawTextTokenizer,
    scanner::Scanner,
    tag::scan_tag_start,
    token::{Accepted, ExternalTokenizer, Term, Token, TokenKind},
};
use std::path::Path;

/// Split a document into tokens.
///
/// Positions in the returned tokens are code-point indices into `source`.
///
/// ```
/// use svelte_lexer::{tokenize, Language, TokenKind};
///
/// let tokens = tokenize("<ul><li>a<li>b</ul>", Language::Html, &Default::default()).unwrap();
/// let implicit_closes = tokens
///     .iter()
///     .filter(|token| token.kind == TokenKind::MissingCloseTag)
///     .count();
/// assert_eq!(implicit_closes, 2);
/// ```
pub fn tokenize(
    source: &str,
    language: Language,
    options: &LexOptions,
) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(source, language, options).tokenize()
}

/// Detect language from file extension.
pub fn detect_language(path: impl AsRef<Path>) -> Option<Language> {
    match path.as_ref().extension().and_then(std::ffi::OsStr::to_str) {
        Some("html" | "htm") => Some(Language::Html),
        Some("svelte") => Some(Language::Svelte),
        _ => None,
    }
}
