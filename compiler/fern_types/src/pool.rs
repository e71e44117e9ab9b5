//! Type pool: slot storage for one inference run.

use fern_ir::Name;
use std::fmt;

/// Index of a type slot in a [`Pool`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Idx(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.0)
    }
}

/// Content of one type slot.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Content {
    /// Unbound type variable, optionally carrying a user-facing name.
    FlexVar(Option<Name>),
    /// Union-find link to another slot. Chains are compressed on resolve.
    Link(Idx),
    /// Numeric family over an inner variable: `Num(*)` until constrained.
    Num(Idx),
    /// Concrete nominal type (a tag's type).
    Nominal(Name),
    /// Function type.
    Func(Vec<Idx>, Idx),
    /// Tuple type.
    Tuple(Vec<Idx>),
    /// The error type. Absorbs everything in unification.
    Error,
}

/// Slot storage for one inference run.
///
/// Created fresh per run and discarded at its end; never shared across
/// runs.
#[derive(Default)]
pub struct Pool {
    slots: Vec<Content>,
}

impl Pool {
    pub fn new() -> Self {
        Pool::default()
    }

    fn push(&mut self, content: Content) -> Idx {
        let idx = Idx::from_raw(u32::try_from(self.slots.len()).unwrap_or(u32::MAX));
        self.slots.push(content);
        idx
    }

    /// Fresh unbound type variable.
    pub fn fresh_var(&mut self) -> Idx {
        self.push(Content::FlexVar(None))
    }

    /// Fresh numeric family over a fresh inner variable: `Num(*)`.
    pub fn fresh_num(&mut self) -> Idx {
        let inner = self.fresh_var();
        self.push(Content::Num(inner))
    }

    /// The error type.
    pub fn error(&mut self) -> Idx {
        self.push(Content::Error)
    }

    /// Nominal type for a tag name.
    pub fn nominal(&mut self, name: Name) -> Idx {
        self.push(Content::Nominal(name))
    }

    /// Function type.
    pub fn func(&mut self, params: Vec<Idx>, ret: Idx) -> Idx {
        self.push(Content::Func(params, ret))
    }

    /// Tuple type.
    pub fn tuple(&mut self, items: Vec<Idx>) -> Idx {
        self.push(Content::Tuple(items))
    }

    /// Content of a slot, without following links.
    #[inline]
    pub fn content(&self, idx: Idx) -> &Content {
        &self.slots[idx.index()]
    }

    pub(crate) fn set(&mut self, idx: Idx, content: Content) {
        self.slots[idx.index()] = content;
    }

    /// Follow links to the representative slot, compressing the path.
    pub fn resolve(&mut self, idx: Idx) -> Idx {
        let mut root = idx;
        while let Content::Link(next) = self.slots[root.index()] {
            root = next;
        }
        // Path compression: point every slot on the walked chain at the
        // root so later resolves are O(1).
        let mut cur = idx;
        while let Content::Link(next) = self.slots[cur.index()] {
            self.slots[cur.index()] = Content::Link(root);
            cur = next;
        }
        root
    }

    /// Follow links without mutating (no compression).
    pub fn resolve_ref(&self, idx: Idx) -> Idx {
        let mut root = idx;
        while let Content::Link(next) = self.slots[root.index()] {
            root = next;
        }
        root
    }

    /// Resolved content of a slot.
    pub fn resolved_content(&self, idx: Idx) -> &Content {
        self.content(self.resolve_ref(idx))
    }

    /// Whether `var` occurs inside the type rooted at `idx`.
    pub fn occurs(&self, var: Idx, idx: Idx) -> bool {
        let root = self.resolve_ref(idx);
        if root == var {
            return true;
        }
        match self.content(root) {
            Content::FlexVar(_) | Content::Nominal(_) | Content::Error => false,
            Content::Link(_) => false, // unreachable after resolve
            Content::Num(inner) => self.occurs(var, *inner),
            Content::Func(params, ret) => {
                params.iter().any(|&p| self.occurs(var, p)) || self.occurs(var, *ret)
            }
            Content::Tuple(items) => items.iter().any(|&i| self.occurs(var, i)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
