/// Characters that may appear in a tag name.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | ':' | '_') || c >= '\u{a1}'
}

/// Whitespace inside tags and between `</` and the tag name.
pub fn is_tag_space(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | ' ')
}

static EXPRESSION_SPACES: [char; 25] = [
    '\u{9}', '\u{a}', '\u{b}', '\u{c}', '\u{d}', '\u{20}', '\u{85}', '\u{a0}', '\u{1680}',
    '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}',
    '\u{2007}', '\u{2008}', '\u{2009}', '\u{200a}', '\u{2028}', '\u{2029}', '\u{202f}',
    '\u{205f}', '\u{3000}',
];

/// Whitespace that ends a short expression.
pub fn is_expression_space(c: char) -> bool {
    EXPRESSION_SPACES.contains(&c)
}

/// Characters that start a block, directive or closing form instead of an
/// expression, such as `{#if`, `{:else`, `{@html` and `{/if`.
pub fn is_expression_prefix(c: char) -> bool {
    matches!(c, ':' | '#' | '@' | '/')
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bracket {
    Paren,
    Square,
    Curly,
}

impl Bracket {
    pub fn opening(c: char) -> Option<Self> {
        match c {
            '(' => Some(Bracket::Paren),
            '[' => Some(Bracket::Square),
            '{' => Some(Bracket::Curly),
            _ => None,
        }
    }

    pub fn closing(c: char) -> Option<Self> {
        match c {
            ')' => Some(Bracket::Paren),
            ']' => Some(Bracket::Square),
            '}' => Some(Bracket::Curly),
            _ => None,
        }
    }
}
