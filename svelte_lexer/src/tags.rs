use crate::token::TokenKind;

static SELF_CLOSING_TAGS: [&str; 27] = [
    "area",
    "base",
    "br",
    "col",
    "command",
    "embed",
    "frame",
    "hr",
    "img",
    "input",
    "keygen",
    "link",
    "meta",
    "param",
    "source",
    "track",
    "wbr",
    "menuitem",
    // SVG
    "circle",
    "ellipse",
    "line",
    "path",
    "polygon",
    "polyline",
    "rect",
    "stop",
    "use",
];

pub fn is_self_closing(name: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&name)
}

static IMPLICITLY_CLOSED_TAGS: [&str; 12] = [
    "dd", "li", "optgroup", "option", "p", "rp", "rt", "tbody", "td", "tfoot", "th", "tr",
];

/// Tags whose close tag may be omitted.
pub fn is_implicitly_closed(name: &str) -> bool {
    IMPLICITLY_CLOSED_TAGS.contains(&name)
}

static CLOSED_BY_BLOCK_FOR_P: [&str; 27] = [
    "address",
    "article",
    "aside",
    "blockquote",
    "dir",
    "div",
    "dl",
    "fieldset",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "menu",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

static CLOSE_ON_OPEN: [(&str, &[&str]); 14] = [
    ("dd", &["dd", "dt"]),
    ("dt", &["dd", "dt"]),
    ("li", &["li"]),
    ("option", &["option", "optgroup"]),
    ("optgroup", &["optgroup"]),
    ("p", &CLOSED_BY_BLOCK_FOR_P),
    ("rp", &["rp", "rt"]),
    ("rt", &["rp", "rt"]),
    ("tbody", &["tbody", "tfoot"]),
    ("td", &["td", "th"]),
    ("tfoot", &["tbody"]),
    ("th", &["td", "th"]),
    ("thead", &["tbody", "tfoot"]),
    ("tr", &["tr"]),
];

/// Whether opening `incoming` while `open` is the innermost element closes `open` first.
pub fn closes_on_open(open: &str, incoming: &str) -> bool {
    CLOSE_ON_OPEN
        .iter()
        .find(|(parent, _)| *parent == open)
        .is_some_and(|(_, closers)| closers.contains(&incoming))
}

/// Elements whose content is raw text up to the literal close tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawTextTag {
    Script,
    Style,
    Textarea,
}

impl RawTextTag {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "script" => Some(RawTextTag::Script),
            "style" => Some(RawTextTag::Style),
            "textarea" => Some(RawTextTag::Textarea),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RawTextTag::Script => "script",
            RawTextTag::Style => "style",
            RawTextTag::Textarea => "textarea",
        }
    }

    pub fn opener(self) -> TokenKind {
        match self {
            RawTextTag::Script => TokenKind::StartScriptTag,
            RawTextTag::Style => TokenKind::StartStyleTag,
            RawTextTag::Textarea => TokenKind::StartTextareaTag,
        }
    }

    pub fn text(self) -> TokenKind {
        match self {
            RawTextTag::Script => TokenKind::ScriptText,
            RawTextTag::Style => TokenKind::StyleText,
            RawTextTag::Textarea => TokenKind::TextareaText,
        }
    }

    pub fn close(self) -> TokenKind {
        match self {
            RawTextTag::Script => TokenKind::StartCloseScriptTag,
            RawTextTag::Style => TokenKind::StartCloseStyleTag,
            RawTextTag::Textarea => TokenKind::StartCloseTextareaTag,
        }
    }

    pub fn from_opener(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::StartScriptTag => Some(RawTextTag::Script),
            TokenKind::StartStyleTag => Some(RawTextTag::Style),
            TokenKind::StartTextareaTag => Some(RawTextTag::Textarea),
            _ => None,
        }
    }
}
