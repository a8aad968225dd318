//! Tokenizers for embedded expressions.
//!
//! An expression ends at a closing bracket that has no opener inside the
//! expression, or at a variant-specific delimiter. Brackets inside string
//! literals and comments are skipped.

use crate::{
    chars::{Bracket, is_expression_prefix, is_expression_space},
    input::Input,
    token::{Accepted, TokenKind, accept},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpressionKind {
    /// Ends only at an unmatched closing bracket.
    Long,
    /// Like [`ExpressionKind::Long`], but also ends before ` as`, as in `{#each items as item}`.
    AsTerminatedLong,
    /// Also ends before a comma, or before whitespace once something was scanned.
    Short,
}

impl ExpressionKind {
    pub fn token(self) -> TokenKind {
        match self {
            ExpressionKind::Long => TokenKind::LongExpression,
            ExpressionKind::AsTerminatedLong => TokenKind::AsTerminatedLongExpression,
            ExpressionKind::Short => TokenKind::ShortExpression,
        }
    }

    fn ends_before(self, input: &impl Input) -> bool {
        match self {
            ExpressionKind::Long => false,
            ExpressionKind::AsTerminatedLong => {
                input.peek(0) == Some(' ') && input.peek(1) == Some('a') && input.peek(2) == Some('s')
            }
            ExpressionKind::Short => input.next() == Some(','),
        }
    }
}

/// Tracks whether the cursor is inside a quoted or template string literal.
#[derive(Clone, Debug, Default)]
pub struct StringSkipper {
    quote: Option<char>,
    escaped: bool,
}

impl StringSkipper {
    pub fn is_active(&self) -> bool {
        self.quote.is_some()
    }

    /// Returns whether the code point under the cursor belongs to a string literal.
    pub fn step(&mut self, input: &impl Input) -> bool {
        let Some(c) = input.next() else {
            return false;
        };
        match self.quote {
            Some(quote) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == quote {
                    self.quote = None;
                }
                true
            }
            None if matches!(c, '"' | '\'' | '`') => {
                self.quote = Some(c);
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Comment {
    Line,
    Block,
}

/// Tracks whether the cursor is inside a `//` or `/* */` comment.
#[derive(Clone, Debug, Default)]
pub struct CommentSkipper {
    comment: Option<Comment>,
}

impl CommentSkipper {
    pub fn is_active(&self) -> bool {
        self.comment.is_some()
    }

    /// Returns whether the code point under the cursor belongs to a comment.
    pub fn step(&mut self, input: &impl Input) -> bool {
        let Some(c) = input.next() else {
            return false;
        };
        match self.comment {
            Some(Comment::Line) => {
                if c == '\n' {
                    self.comment = None;
                }
                true
            }
            Some(Comment::Block) => {
                if c == '*' && input.peek(1) == Some('/') {
                    self.comment = None;
                }
                true
            }
            None if c == '/' => match input.peek(1) {
                Some('/') => {
                    self.comment = Some(Comment::Line);
                    true
                }
                Some('*') => {
                    self.comment = Some(Comment::Block);
                    true
                }
                _ => false,
            },
            None => false,
        }
    }
}

/// Scan an embedded expression starting at the cursor.
///
/// Defers when the first character is a block, directive or closing prefix.
pub fn scan_expression(input: &mut impl Input, kind: ExpressionKind) -> Option<Accepted> {
    if input.next().is_some_and(is_expression_prefix) {
        return None;
    }

    let token = kind.token();
    let mut comments = CommentSkipper::default();
    let mut strings = StringSkipper::default();
    let mut brackets = Vec::new();
    let mut scanned = 0usize;
    loop {
        let Some(c) = input.next() else {
            return if scanned > 0 {
                accept(input, token, 0)
            } else {
                None
            };
        };

        // An open comment or string owns every character until it ends.
        let skipped = if comments.is_active() {
            comments.step(input)
        } else if strings.is_active() {
            strings.step(input)
        } else {
            comments.step(input) || strings.step(input)
        };

        if !skipped {
            if brackets.is_empty() && (Bracket::closing(c).is_some() || kind.ends_before(input)) {
                return accept(input, token, 0);
            }

            if let Some(bracket) = Bracket::opening(c) {
                brackets.push(bracket);
            } else if let Some(bracket) = Bracket::closing(c) {
                if let Some(index) = brackets.iter().rposition(|open| *open == bracket) {
                    brackets.truncate(index);
                }
            }

            if kind == ExpressionKind::Short
                && scanned > 0
                && brackets.is_empty()
                && is_expression_space(c)
            {
                return accept(input, token, 0);
            }
        }

        input.advance();
        scanned += 1;
    }
}
