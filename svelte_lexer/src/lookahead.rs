use crate::{
    chars::{is_name_char, is_tag_space},
    input::{Input, InputId},
};
use std::rc::Rc;

/// Result of reading a tag name ahead of the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagName {
    Name(Rc<str>),
    /// No name, and the next character is `?` or `!`.
    Declaration,
    Missing,
}

impl TagName {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            TagName::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// Single-slot memo of the last lookahead, keyed by stream identity and absolute position.
#[derive(Debug, Default)]
pub struct NameCache {
    slot: Option<(InputId, usize, TagName)>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, id: InputId, position: usize) -> Option<&TagName> {
        match &self.slot {
            Some((cached_id, cached_position, name))
                if *cached_id == id && *cached_position == position =>
            {
                Some(name)
            }
            _ => None,
        }
    }
}

/// Read the tag name starting `offset` code points after the cursor, without moving it.
///
/// Leading whitespace is skipped. A name whose first character is an ASCII
/// uppercase letter keeps its case so components stay distinguishable from
/// HTML elements; every other name is lowercased.
pub fn tag_name_after(cache: &mut NameCache, input: &impl Input, offset: isize) -> TagName {
    let position = input.pos().saturating_add_signed(offset);
    if let Some(name) = cache.get(input.id(), position) {
        return name.clone();
    }

    let mut offset = offset;
    let mut next = input.peek(offset);
    while next.is_some_and(is_tag_space) {
        offset += 1;
        next = input.peek(offset);
    }
    let mut name = String::new();
    while let Some(c) = next.filter(|c| is_name_char(*c)) {
        name.push(c);
        offset += 1;
        next = input.peek(offset);
    }

    let result = if name.starts_with(|c: char| c.is_ascii_uppercase()) {
        TagName::Name(name.into())
    } else if !name.is_empty() {
        TagName::Name(name.to_lowercase().into())
    } else if matches!(next, Some('?' | '!')) {
        TagName::Declaration
    } else {
        TagName::Missing
    };
    cache.slot = Some((input.id(), position, result.clone()));
    result
}
