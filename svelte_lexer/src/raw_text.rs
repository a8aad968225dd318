use crate::{
    chars::is_tag_space,
    input::Input,
    tags::RawTextTag,
    token::{Accepted, TokenKind, accept},
};

/// Scans the body of a raw-text element up to its literal close tag.
///
/// The close sequence is matched with a small state machine:
///
/// - `0`: nothing matched
/// - `1`: `<` matched
/// - `2`: `</` and possibly whitespace matched
/// - `3..2 + tag.len()`: part of the tag name matched
/// - `2 + tag.len()`: the whole tag name and possibly whitespace matched
///
/// The body is opaque: a close sequence inside a string literal of the
/// embedded language still ends the text.
#[derive(Clone, Debug)]
pub struct RawTextTokenizer {
    tag: Vec<char>,
    text: TokenKind,
    close: TokenKind,
}

impl RawTextTokenizer {
    pub fn new(tag: &str, text: TokenKind, close: TokenKind) -> Self {
        Self {
            tag: tag.chars().collect(),
            text,
            close,
        }
    }

    pub fn scan(&self, input: &mut impl Input) -> Option<Accepted> {
        let last_state = 2 + self.tag.len();
        let mut state = 0;
        let mut matched = 0usize;
        let mut scanned = 0usize;
        loop {
            let Some(c) = input.next() else {
                return if scanned > 0 {
                    accept(input, self.text, 0)
                } else {
                    None
                };
            };

            if state == 0 && c == '<'
                || state == 1 && c == '/'
                || (2..last_state).contains(&state) && c == self.tag[state - 2]
            {
                state += 1;
                matched += 1;
            } else if (state == 2 || state == last_state) && is_tag_space(c) {
                matched += 1;
            } else if state == last_state && c == '>' {
                let matched = matched as isize;
                return if scanned > matched as usize {
                    accept(input, self.text, -matched)
                } else {
                    accept(input, self.close, -(matched - 2))
                };
            } else if matches!(c, '\n' | '\r') && scanned > 0 {
                return accept(input, self.text, 1);
            } else {
                state = 0;
                matched = 0;
            }
            input.advance();
            scanned += 1;
        }
    }
}

impl From<RawTextTag> for RawTextTokenizer {
    fn from(tag: RawTextTag) -> Self {
        RawTextTokenizer::new(tag.name(), tag.text(), tag.close())
    }
}
