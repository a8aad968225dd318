use crate::{
    comment::scan_comment_content,
    context::{self, ElementContext},
    expression::{ExpressionKind, scan_expression},
    input::Input,
    lookahead::{NameCache, TagName, tag_name_after},
    raw_text::RawTextTokenizer,
    tag::scan_tag_start,
    tags::RawTextTag,
    token::{Accepted, ExternalTokenizer, Term, TokenKind},
};

/// A scanning session.
///
/// Owns the name-lookahead cache, so separate sessions never share state.
/// The parser driver calls [`Scanner::scan`] whenever the grammar expects
/// an external token, and reports its shift, reduce and reuse events so
/// the element context follows the parse.
#[derive(Debug)]
pub struct Scanner {
    cache: NameCache,
    script: RawTextTokenizer,
    style: RawTextTokenizer,
    textarea: RawTextTokenizer,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            cache: NameCache::new(),
            script: RawTextTag::Script.into(),
            style: RawTextTag::Style.into(),
            textarea: RawTextTag::Textarea.into(),
        }
    }

    /// Run one external tokenizer at the cursor.
    ///
    /// The cursor may end up past the accepted token; the driver moves it to
    /// [`Accepted::end`]. `None` means the tokenizer defers to other rules.
    pub fn scan(
        &mut self,
        tokenizer: ExternalTokenizer,
        input: &mut impl Input,
        context: &ElementContext,
    ) -> Option<Accepted> {
        let start = input.pos();
        let accepted = match tokenizer {
            ExternalTokenizer::TagStart => scan_tag_start(&mut self.cache, input, context),
            ExternalTokenizer::ScriptContent => self.script.scan(input),
            ExternalTokenizer::StyleContent => self.style.scan(input),
            ExternalTokenizer::TextareaContent => self.textarea.scan(input),
            ExternalTokenizer::LongExpression => scan_expression(input, ExpressionKind::Long),
            ExternalTokenizer::AsTerminatedLongExpression => {
                scan_expression(input, ExpressionKind::AsTerminatedLong)
            }
            ExternalTokenizer::ShortExpression => scan_expression(input, ExpressionKind::Short),
            ExternalTokenizer::CommentContent => scan_comment_content(input),
        };
        match accepted {
            Some(Accepted { kind, end }) => {
                tracing::trace!(?tokenizer, ?kind, start, end, "accept");
            }
            None => tracing::trace!(?tokenizer, start, "defer"),
        }
        accepted
    }

    /// Tag name `offset` code points after the cursor, sharing the session's cache.
    pub fn tag_name_after(&mut self, input: &impl Input, offset: isize) -> TagName {
        tag_name_after(&mut self.cache, input, offset)
    }

    pub fn start(&self) -> ElementContext {
        ElementContext::empty()
    }

    /// `input` must be positioned at the start of the shifted token.
    pub fn shift(
        &mut self,
        context: &ElementContext,
        kind: TokenKind,
        input: &impl Input,
    ) -> ElementContext {
        context::shift(&mut self.cache, context, kind, input)
    }

    pub fn reduce(&self, context: &ElementContext, term: Term) -> ElementContext {
        context::reduce(context, term)
    }

    /// `input` must be positioned at the start of the reused node.
    pub fn reuse(
        &mut self,
        context: &ElementContext,
        term: Term,
        input: &impl Input,
    ) -> ElementContext {
        context::reuse(&mut self.cache, context, term, input)
    }

    pub fn hash(&self, context: &ElementContext) -> u64 {
        context.hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StrInput;

    #[test]
    fn dispatches_by_tokenizer() {
        let mut scanner = Scanner::new();
        let context = scanner.start();

        let mut input = StrInput::new("a</style>");
        let accepted = scanner.scan(ExternalTokenizer::StyleContent, &mut input, &context);
        assert_eq!(accepted.map(|a| (a.kind, a.end)), Some((TokenKind::StyleText, 1)));

        let mut input = StrInput::new("x, y");
        let accepted = scanner.scan(ExternalTokenizer::ShortExpression, &mut input, &context);
        assert_eq!(accepted.map(|a| (a.kind, a.end)), Some((TokenKind::ShortExpression, 1)));

        let mut input = StrInput::new("<p>");
        let accepted = scanner.scan(ExternalTokenizer::TagStart, &mut input, &context);
        assert_eq!(accepted.map(|a| (a.kind, a.end)), Some((TokenKind::StartTag, 1)));
    }

    #[test]
    fn implicit_close_between_list_items() {
        // `<li>a<li>b`
        let mut scanner = Scanner::new();
        let mut input = StrInput::new("<li>a<li>b");
        let mut context = scanner.start();

        let first = scanner.scan(ExternalTokenizer::TagStart, &mut input, &context);
        assert_eq!(first.map(|a| a.kind), Some(TokenKind::StartTag));
        input.reset(0);
        context = scanner.shift(&context, TokenKind::StartTag, &input);
        assert_eq!(context.name(), Some("li"));

        input.reset(5);
        let second = scanner.scan(ExternalTokenizer::TagStart, &mut input, &context);
        assert_eq!(
            second.map(|a| (a.kind, a.end)),
            Some((TokenKind::MissingCloseTag, 5))
        );
        // the cursor overshot the `<` by one
        assert_eq!(input.pos(), 6);

        context = scanner.reduce(&context, Term::Element);
        input.reset(5);
        let third = scanner.scan(ExternalTokenizer::TagStart, &mut input, &context);
        assert_eq!(third.map(|a| (a.kind, a.end)), Some((TokenKind::StartTag, 6)));
    }

    #[test]
    fn end_of_input_unwinds_every_open_element() {
        let mut scanner = Scanner::new();
        let mut input = StrInput::new("");
        let mut context = scanner.start().push("div").push("ul").push("li");
        let mut closes = 0;
        while let Some(accepted) = scanner.scan(ExternalTokenizer::TagStart, &mut input, &context)
        {
            assert_eq!(accepted.kind, TokenKind::MissingCloseTag);
            assert_eq!(accepted.end, 0);
            context = scanner.reduce(&context, Term::Element);
            closes += 1;
        }
        assert_eq!(closes, 3);
        assert!(context.is_empty());
        assert_eq!(scanner.hash(&context), 0);
    }
}
