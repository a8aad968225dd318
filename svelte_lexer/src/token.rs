use crate::input::Input;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Produced by the external scanners.
    StartTag,
    StartCloseTag,
    MismatchedStartCloseTag,
    MissingCloseTag,
    StartSelfClosingTag,
    IncompleteCloseTag,
    StartScriptTag,
    ScriptText,
    StartCloseScriptTag,
    StartStyleTag,
    StyleText,
    StartCloseStyleTag,
    StartTextareaTag,
    TextareaText,
    StartCloseTextareaTag,
    LongExpression,
    AsTerminatedLongExpression,
    ShortExpression,
    CommentContent,

    // Produced by the reference driver.
    Text,
    TagName,
    AttributeName,
    Is,
    AttributeValue,
    UnquotedAttributeValue,
    EndTag,
    SelfCloseEndTag,
    CommentStart,
    CommentEnd,
    Declaration,
    BraceOpen,
    BraceClose,
    BlockPrefix,
    BlockName,
    Keyword,
    Comma,
    ParenOpen,
    ParenClose,
}

impl TokenKind {
    /// Tokens that open a start tag and therefore push an element context.
    pub fn is_start_tag_opener(self) -> bool {
        matches!(
            self,
            TokenKind::StartTag
                | TokenKind::StartSelfClosingTag
                | TokenKind::StartScriptTag
                | TokenKind::StartStyleTag
                | TokenKind::StartTextareaTag
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Grammar terms the element tracker reacts to on reduce and reuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Term {
    Token(TokenKind),
    /// A complete `<name ...>` node.
    OpenTag,
    /// A complete element, from its open tag to its (possibly synthetic) close.
    Element,
    Other,
}

/// The external scanner the grammar expects at the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExternalTokenizer {
    TagStart,
    ScriptContent,
    StyleContent,
    TextareaContent,
    LongExpression,
    AsTerminatedLongExpression,
    ShortExpression,
    CommentContent,
}

/// A token decision: the token kind and the absolute position it ends at.
///
/// The end may lie before the cursor when the scanner looked further ahead
/// than the token it accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accepted {
    pub kind: TokenKind,
    pub end: usize,
}

/// Accept a token ending `offset` code points away from the cursor.
pub fn accept(input: &impl Input, kind: TokenKind, offset: isize) -> Option<Accepted> {
    Some(Accepted {
        kind,
        end: input.pos().saturating_add_signed(offset),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
