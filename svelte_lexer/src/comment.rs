use crate::{
    input::Input,
    token::{Accepted, TokenKind, accept},
};

/// Scan the body of a `<!-- ... -->` comment, leaving `-->` to the grammar.
///
/// Bodies of three characters or fewer before the closing `>` are not
/// emitted at all.
pub fn scan_comment_content(input: &mut impl Input) -> Option<Accepted> {
    let mut dashes = 0;
    let mut scanned = 0usize;
    loop {
        match input.next() {
            None => {
                return if scanned > 0 {
                    accept(input, TokenKind::CommentContent, 0)
                } else {
                    None
                };
            }
            Some('-') => dashes += 1,
            Some('>') if dashes >= 2 => {
                return if scanned > 3 {
                    accept(input, TokenKind::CommentContent, -2)
                } else {
                    None
                };
            }
            Some(_) => dashes = 0,
        }
        input.advance();
        scanned += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StrInput;

    fn scan(source: &str) -> Option<usize> {
        scan_comment_content(&mut StrInput::new(source)).map(|accepted| accepted.end)
    }

    #[test]
    fn body_excludes_closing_dashes() {
        assert_eq!(scan(" a -->"), Some(3));
        assert_eq!(scan("ab--->"), Some(3));
        assert_eq!(scan("x--y-->"), Some(4));
        assert_eq!(scan("a->b-->"), Some(4));
    }

    #[test]
    fn short_bodies_are_not_emitted() {
        assert_eq!(scan("-->"), None);
        assert_eq!(scan("--->"), None);
        assert_eq!(scan("a-->"), None);
    }

    #[test]
    fn unterminated_comment() {
        assert_eq!(scan(" unterminated"), Some(13));
        assert_eq!(scan(""), None);
    }
}
