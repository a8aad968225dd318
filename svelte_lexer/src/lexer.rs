//! A document lexer driving the external scanners.
//!
//! This stands in for the table-driven parser: it walks a whole document,
//! asks the external scanners for tokens at the positions where the grammar
//! would, and reports shift and reduce events to the element tracker. It
//! produces a flat token list, not a tree.

use crate::{
    chars::{is_name_char, is_tag_space},
    config::LexOptions,
    context::ElementContext,
    error::{SyntaxError, SyntaxErrorKind},
    input::{Input, StrInput},
    lookahead::TagName,
    scanner::Scanner,
    tags::RawTextTag,
    token::{Accepted, ExternalTokenizer, Term, Token, TokenKind},
};
use itertools::Itertools;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Html,
    Svelte,
}

enum TagEnd {
    Closed,
    SelfClosed,
    Eof,
}

pub struct Lexer<'s, 'o> {
    input: StrInput<'s>,
    language: Language,
    options: &'o LexOptions,
    scanner: Scanner,
    context: ElementContext,
    tokens: Vec<Token>,
}

impl<'s, 'o> Lexer<'s, 'o> {
    pub fn new(source: &'s str, language: Language, options: &'o LexOptions) -> Self {
        let scanner = Scanner::new();
        Self {
            input: StrInput::new(source),
            language,
            options,
            context: scanner.start(),
            scanner,
            tokens: vec![],
        }
    }

    pub fn tokenize(mut self) -> LResult<Vec<Token>> {
        loop {
            if self.input.is_eof() {
                if self.close_at_eof() {
                    continue;
                }
                break;
            }

            let pos = self.input.pos();
            let context = self.context.clone();
            self.lex_content()?;
            if self.input.pos() == pos && self.context == context {
                return Err(self.emit_error(SyntaxErrorKind::Stalled));
            }
        }
        Ok(self.tokens)
    }

    fn emit_error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError {
            kind,
            pos: self.input.pos(),
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token { kind, start, end });
        self.input.reset(end);
    }

    /// Push a token covering the next `len` code points.
    fn push_len(&mut self, kind: TokenKind, len: usize) {
        let start = self.input.pos();
        self.push(kind, start, start + len);
    }

    fn push_text(&mut self, start: usize, end: usize) {
        if self.options.whitespace_text
            || !self.input.slice(start, end).chars().all(char::is_whitespace)
        {
            self.push(TokenKind::Text, start, end);
        } else {
            self.input.reset(end);
        }
    }

    /// Run an external scanner and record its token. On deferral the cursor is restored.
    fn scan(&mut self, tokenizer: ExternalTokenizer) -> Option<Accepted> {
        let start = self.input.pos();
        let accepted = self.scanner.scan(tokenizer, &mut self.input, &self.context);
        match accepted {
            Some(Accepted { kind, end }) => self.push(kind, start, end),
            None => self.input.reset(start),
        }
        accepted
    }

    fn skip_ws(&mut self) {
        while self.input.next().is_some_and(is_tag_space) {
            self.input.advance();
        }
    }

    fn eat_char(&mut self, c: char, kind: TokenKind) -> bool {
        if self.input.next() == Some(c) {
            self.push_len(kind, 1);
            true
        } else {
            false
        }
    }

    fn open_element(&mut self, kind: TokenKind) -> LResult<()> {
        self.context = self.scanner.shift(&self.context, kind, &self.input);
        if let Some(max) = self.options.max_depth {
            let depth = self.context.depth();
            if depth > max.get() {
                return Err(self.emit_error(SyntaxErrorKind::NestingTooDeep(max.get())));
            }
        }
        Ok(())
    }

    fn close_element(&mut self) {
        self.context = self.scanner.reduce(&self.context, Term::Element);
    }

    /// Close one open element at the end of input; `false` once nothing is open.
    fn close_at_eof(&mut self) -> bool {
        match self.scanner.scan(ExternalTokenizer::TagStart, &mut self.input, &self.context) {
            Some(Accepted {
                kind: TokenKind::MissingCloseTag,
                end,
            }) => {
                tracing::debug!(element = self.context.name(), "closing element at end of input");
                self.push(TokenKind::MissingCloseTag, end, end);
                self.close_element();
                true
            }
            _ => false,
        }
    }

    fn lex_content(&mut self) -> LResult<()> {
        if self.input.starts_with("<!--") {
            self.lex_comment();
            return Ok(());
        }
        match self.input.next() {
            Some('<') => self.lex_tag(),
            Some('{') if self.language == Language::Svelte => {
                self.lex_mustache();
                Ok(())
            }
            _ => {
                self.lex_text();
                Ok(())
            }
        }
    }

    fn lex_text(&mut self) {
        let start = self.input.pos();
        self.input.advance();
        let end = match self.language {
            Language::Html => self.input.find_byte(b'<'),
            Language::Svelte => self.input.find_any2(b'<', b'{'),
        }
        .unwrap_or(self.input.len());
        self.push_text(start, end);
    }

    fn lex_comment(&mut self) {
        self.push_len(TokenKind::CommentStart, 4);
        self.scan(ExternalTokenizer::CommentContent);
        if self.input.starts_with("-->") {
            self.push_len(TokenKind::CommentEnd, 3);
        } else if !self.input.is_eof() {
            // bodies too short for the comment scanner
            let start = self.input.pos();
            match self.input.find("-->") {
                Some(end) => {
                    self.push(TokenKind::CommentContent, start, end);
                    self.push_len(TokenKind::CommentEnd, 3);
                }
                None => self.push(TokenKind::CommentContent, start, self.input.len()),
            }
        }
    }

    fn lex_declaration(&mut self) {
        let start = self.input.pos();
        let end = self
            .input
            .find_byte(b'>')
            .map_or(self.input.len(), |pos| pos + 1);
        self.push(TokenKind::Declaration, start, end);
    }

    fn lex_tag(&mut self) -> LResult<()> {
        let start = self.input.pos();
        let Some(Accepted { kind, end }) =
            self.scanner
                .scan(ExternalTokenizer::TagStart, &mut self.input, &self.context)
        else {
            self.input.reset(start);
            self.lex_deferred_tag();
            return Ok(());
        };

        match kind {
            TokenKind::MissingCloseTag => {
                self.push(kind, end, end);
                self.close_element();
            }
            TokenKind::StartCloseTag => {
                self.push(kind, start, end);
                self.lex_close_tag_rest();
                self.close_element();
            }
            TokenKind::MismatchedStartCloseTag => {
                self.push(kind, start, end);
                self.lex_close_tag_rest();
            }
            TokenKind::StartTag => {
                self.input.reset(start);
                if self.scanner.tag_name_after(&self.input, 1) == TagName::Missing {
                    // a lone `<` is just text
                    self.lex_text();
                } else {
                    self.lex_open_tag(kind, end)?;
                }
            }
            TokenKind::StartSelfClosingTag
            | TokenKind::StartScriptTag
            | TokenKind::StartStyleTag
            | TokenKind::StartTextareaTag => {
                self.input.reset(start);
                self.lex_open_tag(kind, end)?;
            }
            _ => self.push(kind, start, end),
        }
        Ok(())
    }

    /// The tag scanner declined: a markup declaration, or a close tag for an
    /// element further up the stack.
    fn lex_deferred_tag(&mut self) {
        let closes_ancestor = self.input.peek(1) == Some('/')
            && !self.context.is_empty()
            && matches!(self.scanner.tag_name_after(&self.input, 2), TagName::Name(_));
        if closes_ancestor {
            tracing::debug!(
                element = self.context.name(),
                "closing element before ancestor's close tag"
            );
            let pos = self.input.pos();
            self.push(TokenKind::MissingCloseTag, pos, pos);
            self.close_element();
        } else {
            self.lex_declaration();
        }
    }

    /// The cursor is at the `<` of an opener ending at `end`.
    fn lex_open_tag(&mut self, kind: TokenKind, end: usize) -> LResult<()> {
        self.open_element(kind)?;
        let start = self.input.pos();
        self.push(kind, start, end);
        self.lex_tag_name();

        match (self.lex_attrs(), RawTextTag::from_opener(kind)) {
            (TagEnd::Eof, _) => {}
            (TagEnd::SelfClosed, _) => self.close_element(),
            (TagEnd::Closed, _) if kind == TokenKind::StartSelfClosingTag => self.close_element(),
            (TagEnd::Closed, Some(raw)) => self.lex_raw_text(raw),
            (TagEnd::Closed, None) => {}
        }
        Ok(())
    }

    fn lex_tag_name(&mut self) {
        self.skip_ws();
        let start = self.input.pos();
        while self.input.next().is_some_and(is_name_char) {
            self.input.advance();
        }
        let end = self.input.pos();
        if end > start {
            self.push(TokenKind::TagName, start, end);
        }
    }

    fn lex_close_tag_rest(&mut self) {
        self.lex_tag_name();
        self.skip_ws();
        self.eat_char('>', TokenKind::EndTag);
    }

    fn lex_attrs(&mut self) -> TagEnd {
        loop {
            self.skip_ws();
            match self.input.next() {
                None => return TagEnd::Eof,
                Some('>') => {
                    self.push_len(TokenKind::EndTag, 1);
                    return TagEnd::Closed;
                }
                Some('/') if self.input.peek(1) == Some('>') => {
                    self.push_len(TokenKind::SelfCloseEndTag, 2);
                    return TagEnd::SelfClosed;
                }
                Some('{') if self.language == Language::Svelte => self.lex_braced_expr(),
                Some(_) => self.lex_attr(),
            }
        }
    }

    fn lex_attr(&mut self) {
        let start = self.input.pos();
        while self.input.next().is_some_and(|c| self.is_attr_name_char(c)) {
            self.input.advance();
        }
        let end = self.input.pos();
        if end == start {
            // stray quote, `=` or `/`
            self.push(TokenKind::Text, start, start + 1);
            return;
        }
        self.push(TokenKind::AttributeName, start, end);

        self.skip_ws();
        if self.eat_char('=', TokenKind::Is) {
            self.skip_ws();
            self.lex_attr_value();
        }
    }

    fn lex_attr_value(&mut self) {
        let start = self.input.pos();
        match self.input.next() {
            Some(quote @ ('"' | '\'')) => {
                self.input.advance();
                while self.input.next().is_some_and(|c| c != quote) {
                    self.input.advance();
                }
                self.input.advance();
                let end = self.input.pos();
                self.push(TokenKind::AttributeValue, start, end);
            }
            Some('{') if self.language == Language::Svelte => self.lex_braced_expr(),
            _ => {
                while self.input.next().is_some_and(is_unquoted_attr_value_char) {
                    self.input.advance();
                }
                let end = self.input.pos();
                if end > start {
                    self.push(TokenKind::UnquotedAttributeValue, start, end);
                }
            }
        }
    }

    fn is_attr_name_char(&self, c: char) -> bool {
        !matches!(c, '"' | '\'' | '>' | '/' | '=')
            && !c.is_ascii_whitespace()
            && !(c == '{' && self.language == Language::Svelte)
    }

    fn lex_raw_text(&mut self, tag: RawTextTag) {
        let tokenizer = match tag {
            RawTextTag::Script => ExternalTokenizer::ScriptContent,
            RawTextTag::Style => ExternalTokenizer::StyleContent,
            RawTextTag::Textarea => ExternalTokenizer::TextareaContent,
        };
        while let Some(Accepted { kind, .. }) = self.scan(tokenizer) {
            if kind == tag.close() {
                self.lex_close_tag_rest();
                self.close_element();
                return;
            }
        }
    }

    /// `{expr}` in content or in a tag.
    fn lex_braced_expr(&mut self) {
        self.push_len(TokenKind::BraceOpen, 1);
        self.scan(ExternalTokenizer::LongExpression);
        self.eat_char('}', TokenKind::BraceClose);
    }

    fn lex_mustache(&mut self) {
        match self.input.peek(1) {
            Some(prefix @ ('#' | ':' | '/' | '@')) => self.lex_block_tag(prefix),
            _ => self.lex_braced_expr(),
        }
    }

    fn lex_block_tag(&mut self, prefix: char) {
        self.push_len(TokenKind::BlockPrefix, 2);
        let start = self.input.pos();
        while self.input.next().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.input.advance();
        }
        let end = self.input.pos();
        let name = self.input.slice(start, end);
        if end > start {
            self.push(TokenKind::BlockName, start, end);
        }
        self.skip_ws();

        match (prefix, name) {
            ('#', "each") => self.lex_each_rest(),
            (':', "else") => {
                if self.input.starts_with("if")
                    && self.input.peek(2).is_some_and(char::is_whitespace)
                {
                    self.push_len(TokenKind::Keyword, 2);
                    self.skip_ws();
                    self.scan(ExternalTokenizer::LongExpression);
                }
            }
            (':', "then" | "catch") => {
                self.scan(ExternalTokenizer::ShortExpression);
            }
            ('@', "debug") => self.lex_short_list(),
            ('/', _) => {}
            _ => {
                self.scan(ExternalTokenizer::LongExpression);
            }
        }

        self.skip_ws();
        self.eat_char('}', TokenKind::BraceClose);
    }

    /// `{#each items as item, index (key)}` after the block name.
    fn lex_each_rest(&mut self) {
        self.scan(ExternalTokenizer::AsTerminatedLongExpression);
        self.skip_ws();
        if !(self.input.starts_with("as") && self.input.peek(2).is_some_and(char::is_whitespace))
        {
            return;
        }
        self.push_len(TokenKind::Keyword, 2);
        self.skip_ws();
        self.lex_short_list();
        if self.eat_char('(', TokenKind::ParenOpen) {
            self.scan(ExternalTokenizer::LongExpression);
            self.eat_char(')', TokenKind::ParenClose);
        }
    }

    /// Comma-separated short expressions.
    fn lex_short_list(&mut self) {
        loop {
            self.scan(ExternalTokenizer::ShortExpression);
            self.skip_ws();
            if !self.eat_char(',', TokenKind::Comma) {
                break;
            }
            self.skip_ws();
        }
    }
}

fn is_unquoted_attr_value_char(c: char) -> bool {
    !c.is_ascii_whitespace() && !matches!(c, '"' | '\'' | '=' | '<' | '>' | '`')
}

pub type LResult<T> = Result<T, SyntaxError>;

/// One line per token: kind, code-point range and source text.
pub fn render_tokens(source: &str, tokens: &[Token]) -> String {
    let input = StrInput::new(source);
    tokens
        .iter()
        .map(|token| {
            format!(
                "{} {}..{} {:?}",
                token.kind,
                token.start,
                token.end,
                input.slice(token.start, token.end)
            )
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str, language: Language) -> Vec<(TokenKind, &str)> {
        let options = LexOptions::default();
        let input = StrInput::new(source);
        Lexer::new(source, language, &options)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|token| (token.kind, input.slice(token.start, token.end)))
            .collect()
    }

    #[test]
    fn html_braces_are_text() {
        assert_eq!(
            lex("a {b} c", Language::Html),
            [(TokenKind::Text, "a {b} c")]
        );
    }

    #[test]
    fn lone_less_than_is_text() {
        assert_eq!(
            lex("a <= b", Language::Html),
            [(TokenKind::Text, "a "), (TokenKind::Text, "<= b")]
        );
    }

    #[test]
    fn whitespace_text_can_be_dropped() {
        let options = LexOptions {
            whitespace_text: false,
            ..Default::default()
        };
        let tokens = Lexer::new("<p> </p>", Language::Html, &options)
            .tokenize()
            .unwrap();
        assert!(tokens.iter().all(|token| token.kind != TokenKind::Text));
    }

    #[test]
    fn max_depth() {
        let options = LexOptions {
            max_depth: std::num::NonZeroUsize::new(2),
            ..Default::default()
        };
        let error = Lexer::new("<a><b><c>", Language::Html, &options)
            .tokenize()
            .unwrap_err();
        assert_eq!(error.kind, SyntaxErrorKind::NestingTooDeep(2));
        assert_eq!(error.pos, 6);
        assert!(
            Lexer::new("<a><b></b></a>", Language::Html, &options)
                .tokenize()
                .is_ok()
        );
    }

    #[test]
    fn renders_tokens() {
        let source = "<br>é";
        let options = LexOptions::default();
        let tokens = Lexer::new(source, Language::Html, &options)
            .tokenize()
            .unwrap();
        assert_eq!(
            render_tokens(source, &tokens),
            "StartSelfClosingTag 0..1 \"<\"\nTagName 1..3 \"br\"\nEndTag 3..4 \">\"\nText 4..5 \"é\""
        );
    }
}
