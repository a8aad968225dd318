//! Element nesting context.
//!
//! The context is a persistent stack: every push allocates one frame that
//! points at its parent, frames are never mutated, and popping is just
//! following the parent link. Parser states that explore different
//! alternatives can hold on to the same frames without copying.

use crate::{
    input::Input,
    lookahead::{NameCache, tag_name_after},
    token::{Term, TokenKind},
};
use std::{fmt, rc::Rc};

#[derive(Clone, Default)]
pub struct ElementContext(Option<Rc<Frame>>);

struct Frame {
    name: Rc<str>,
    parent: ElementContext,
    hash: u64,
}

impl ElementContext {
    pub fn empty() -> Self {
        ElementContext(None)
    }

    pub fn push(&self, name: impl Into<Rc<str>>) -> Self {
        ElementContext(Some(Rc::new(Frame {
            name: name.into(),
            parent: self.clone(),
            hash: self.hash(),
        })))
    }

    /// The enclosing context; popping the empty context yields the empty context.
    pub fn pop(&self) -> Self {
        self.parent().unwrap_or_default()
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.as_ref().map(|frame| frame.parent.clone())
    }

    /// Name of the innermost open element.
    pub fn name(&self) -> Option<&str> {
        self.0.as_deref().map(|frame| &*frame.name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Names of the open elements, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &str> {
        let mut frame = self.0.as_deref();
        std::iter::from_fn(move || {
            let current = frame?;
            frame = current.parent.0.as_deref();
            Some(&*current.name)
        })
    }

    /// Inherited from the parent, `0` for the empty stack. Tag names never
    /// contribute, so contexts of any shape hash alike; only equality tells
    /// them apart.
    pub fn hash(&self) -> u64 {
        self.0.as_ref().map_or(0, |frame| frame.hash)
    }
}

impl PartialEq for ElementContext {
    // Walks both chains in step so deep stacks compare without recursion.
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self.0.as_ref(), other.0.as_ref());
        loop {
            match (a, b) {
                (None, None) => return true,
                (Some(x), Some(y)) if Rc::ptr_eq(x, y) => return true,
                (Some(x), Some(y)) if x.name == y.name => {
                    a = x.parent.0.as_ref();
                    b = y.parent.0.as_ref();
                }
                _ => return false,
            }
        }
    }
}

impl Eq for ElementContext {}

impl fmt::Debug for ElementContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.ancestors().collect::<Vec<_>>();
        names.reverse();
        f.debug_list().entries(names).finish()
    }
}

impl Drop for ElementContext {
    // Unlink frames one at a time so dropping a deep stack does not recurse.
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(frame) = next {
            next = match Rc::try_unwrap(frame) {
                Ok(mut frame) => frame.parent.0.take(),
                Err(_) => None,
            };
        }
    }
}

fn push_name_after_opener(
    cache: &mut NameCache,
    context: &ElementContext,
    input: &impl Input,
) -> ElementContext {
    let name = tag_name_after(cache, input, 1);
    context.push(name.as_name().unwrap_or_default())
}

/// A start-tag opener was shifted; `input` is positioned at its `<`.
pub fn shift(
    cache: &mut NameCache,
    context: &ElementContext,
    kind: TokenKind,
    input: &impl Input,
) -> ElementContext {
    if kind.is_start_tag_opener() {
        push_name_after_opener(cache, context, input)
    } else {
        context.clone()
    }
}

pub fn reduce(context: &ElementContext, term: Term) -> ElementContext {
    if term == Term::Element {
        context.pop()
    } else {
        context.clone()
    }
}

/// A previously parsed node was reused; `input` is positioned at its start.
pub fn reuse(
    cache: &mut NameCache,
    context: &ElementContext,
    term: Term,
    input: &impl Input,
) -> ElementContext {
    match term {
        Term::Token(TokenKind::StartTag) | Term::OpenTag => {
            push_name_after_opener(cache, context, input)
        }
        _ => context.clone(),
    }
}
