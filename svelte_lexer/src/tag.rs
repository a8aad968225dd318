use crate::{
    context::ElementContext,
    input::Input,
    lookahead::{NameCache, TagName, tag_name_after},
    tags::{RawTextTag, closes_on_open, is_implicitly_closed, is_self_closing},
    token::{Accepted, TokenKind, accept},
};

/// Classify the tag starting at the `<` under the cursor.
///
/// At the end of input with elements still open this emits a zero-length
/// [`TokenKind::MissingCloseTag`] so every open element can be closed.
/// `None` leaves the position to other rules: markup declarations, and
/// close tags that match an element further up the stack.
pub fn scan_tag_start(
    cache: &mut NameCache,
    input: &mut impl Input,
    context: &ElementContext,
) -> Option<Accepted> {
    match input.next() {
        Some('<') => {}
        None if !context.is_empty() => return accept(input, TokenKind::MissingCloseTag, 0),
        _ => return None,
    }
    input.advance();

    let is_close = input.next() == Some('/');
    if is_close {
        input.advance();
    }

    let name = match tag_name_after(cache, input, 0) {
        TagName::Name(name) => name,
        TagName::Declaration => return None,
        TagName::Missing => {
            let kind = if is_close {
                TokenKind::IncompleteCloseTag
            } else {
                TokenKind::StartTag
            };
            return accept(input, kind, 0);
        }
    };

    let parent = context.name();
    if is_close {
        if parent == Some(&*name) {
            return accept(input, TokenKind::StartCloseTag, 0);
        }
        if parent.is_some_and(is_implicitly_closed) {
            tracing::debug!(?parent, close = &*name, "closing element before close tag");
            return accept(input, TokenKind::MissingCloseTag, -2);
        }
        if context.ancestors().any(|open| open == &*name) {
            return None;
        }
        tracing::debug!(?parent, close = &*name, "mismatched close tag");
        accept(input, TokenKind::MismatchedStartCloseTag, 0)
    } else if let Some(raw) = RawTextTag::from_name(&name) {
        accept(input, raw.opener(), 0)
    } else if is_self_closing(&name) {
        accept(input, TokenKind::StartSelfClosingTag, 0)
    } else if parent.is_some_and(|parent| closes_on_open(parent, &name)) {
        tracing::debug!(?parent, open = &*name, "closing element before open tag");
        accept(input, TokenKind::MissingCloseTag, -1)
    } else {
        accept(input, TokenKind::StartTag, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StrInput;

    fn context(names: &[&str]) -> ElementContext {
        names
            .iter()
            .fold(ElementContext::empty(), |context, name| context.push(*name))
    }

    fn scan(source: &str, open: &[&str]) -> Option<(TokenKind, usize)> {
        let mut input = StrInput::new(source);
        scan_tag_start(&mut NameCache::new(), &mut input, &context(open))
            .map(|accepted| (accepted.kind, accepted.end))
    }

    #[test]
    fn open_tags() {
        assert_eq!(scan("<div>", &[]), Some((TokenKind::StartTag, 1)));
        assert_eq!(scan("<Widget />", &["div"]), Some((TokenKind::StartTag, 1)));
        assert_eq!(scan("<script>", &[]), Some((TokenKind::StartScriptTag, 1)));
        assert_eq!(scan("<style>", &[]), Some((TokenKind::StartStyleTag, 1)));
        assert_eq!(scan("<textarea>", &[]), Some((TokenKind::StartTextareaTag, 1)));
    }

    #[test]
    fn self_closing_names() {
        for name in ["br", "img", "path", "input", "use"] {
            assert_eq!(
                scan(&format!("<{name}>"), &["div"]),
                Some((TokenKind::StartSelfClosingTag, 1)),
                "{name}"
            );
        }
    }

    #[test]
    fn implicit_close_on_open() {
        assert_eq!(scan("<li>b", &["ul", "li"]), Some((TokenKind::MissingCloseTag, 0)));
        assert_eq!(scan("<div>", &["p"]), Some((TokenKind::MissingCloseTag, 0)));
        assert_eq!(scan("<span>", &["p"]), Some((TokenKind::StartTag, 1)));
        // digits are name characters, so `h1` reaches the close-on-open table
        assert_eq!(scan("<h1>", &["p"]), Some((TokenKind::MissingCloseTag, 0)));
        assert_eq!(scan("<h1>", &[]), Some((TokenKind::StartTag, 1)));
    }

    #[test]
    fn close_tags() {
        assert_eq!(scan("</span>", &["div", "span"]), Some((TokenKind::StartCloseTag, 2)));
        assert_eq!(scan("</ span>", &["span"]), Some((TokenKind::StartCloseTag, 2)));
        assert_eq!(scan("</table>", &[]), Some((TokenKind::MismatchedStartCloseTag, 2)));
        assert_eq!(
            scan("</table>", &["div"]),
            Some((TokenKind::MismatchedStartCloseTag, 2))
        );
    }

    #[test]
    fn close_tag_matching_an_ancestor_defers() {
        assert_eq!(scan("</div>", &["div", "span"]), None);
    }

    #[test]
    fn close_tag_inside_implicitly_closed_element() {
        assert_eq!(scan("</ul>", &["ul", "li"]), Some((TokenKind::MissingCloseTag, 0)));
    }

    #[test]
    fn missing_names() {
        assert_eq!(scan("</>", &[]), Some((TokenKind::IncompleteCloseTag, 2)));
        assert_eq!(scan("<>", &[]), Some((TokenKind::StartTag, 1)));
        assert_eq!(scan("< =", &[]), Some((TokenKind::StartTag, 1)));
        assert_eq!(scan("<!-- x -->", &[]), None);
        assert_eq!(scan("<?xml ?>", &[]), None);
    }

    #[test]
    fn end_of_input() {
        assert_eq!(scan("", &["div"]), Some((TokenKind::MissingCloseTag, 0)));
        assert_eq!(scan("", &[]), None);
        assert_eq!(scan("div", &["div"]), None);
    }
}
