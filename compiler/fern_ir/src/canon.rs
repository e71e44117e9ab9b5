//! Canonical IR node types.
//!
//! The canonical IR mirrors the CST's expression forms with identifiers
//! resolved to binding references and operators renamed to canonical names.
//! Two diagnostic variants are distinguished:
//!
//! - a *runtime-error* node stands for a syntactically valid construct whose
//!   meaning could not be resolved (or a malformed CST region that survived
//!   into an otherwise canonicalizable tree), and
//! - the *empty* root marks a unit with no canonicalizable content at all
//!   (e.g. a whole-unit parse failure). Empty is a terminal state of the
//!   unit, not an error node, and is preserved as such in output.

use crate::{Name, Span};
use std::fmt;

/// Index of a node in a [`CanArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct CanId(u32);

impl CanId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        CanId(raw)
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

impl fmt::Debug for CanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanId({})", self.0)
    }
}

/// A contiguous run of child `CanId`s.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CanRange {
    pub start: u32,
    pub len: u32,
}

impl CanRange {
    pub const EMPTY: CanRange = CanRange { start: 0, len: 0 };

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Reference to a binding site introduced during canonicalization.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct BindingId(u32);

impl BindingId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        BindingId(raw)
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

impl fmt::Debug for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BindingId({})", self.0)
    }
}

/// What introduced a binding.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindingKind {
    Def,
    LambdaParam,
}

/// A binding site: the defining occurrence of a name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Binding {
    pub name: Name,
    pub span: Span,
    pub kind: BindingKind,
}

/// Canonical operator names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CanOp {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
}

impl CanOp {
    /// Canonical name rendered in the CANONICALIZE golden section.
    pub const fn name(&self) -> &'static str {
        match self {
            CanOp::Add => "add",
            CanOp::Sub => "sub",
            CanOp::Mul => "mul",
            CanOp::Div => "div",
            CanOp::Neg => "neg",
        }
    }
}

/// Stable tags for runtime-error nodes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RuntimeErrorTag {
    /// A lower-case identifier with no match in any enclosing scope.
    IdentNotInScope,
    /// An integer literal outside the representable range.
    IntLiteralOutOfRange,
    /// A malformed CST region; carries the parser's original reason code.
    Malformed(crate::MalformedReason),
}

impl RuntimeErrorTag {
    /// The stable code rendered in the CANONICALIZE golden section.
    pub const fn code(&self) -> &'static str {
        match self {
            RuntimeErrorTag::IdentNotInScope => "ident_not_in_scope",
            RuntimeErrorTag::IntLiteralOutOfRange => "int_literal_out_of_range",
            RuntimeErrorTag::Malformed(reason) => reason.code(),
        }
    }
}

/// Canonical expression forms.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum CanExpr {
    /// Integer literal with its parsed value.
    Int(i64),

    /// Resolved identifier reference.
    Lookup { name: Name, binding: BindingId },

    /// Tag (upper-case identifier), a nominal constant.
    Tag(Name),

    /// Unary operation, canonical op name.
    Unop { op: CanOp, operand: CanId },

    /// Binary operation, canonical op name.
    Binop { op: CanOp, lhs: CanId, rhs: CanId },

    /// Lambda with its parameter bindings.
    Lambda { params: CanRange, body: CanId },

    /// Call.
    Call { func: CanId, args: CanRange },

    /// Tuple.
    Tuple { items: CanRange },

    /// Valid syntax, unresolved meaning. Evaluating this node at runtime
    /// would be an error; type inference assigns it the error type.
    RuntimeError(RuntimeErrorTag),
}

/// One canonical node: kind plus span preserved from the CST.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct CanNode {
    pub kind: CanExpr,
    pub span: Span,
}

impl CanNode {
    #[inline]
    pub fn new(kind: CanExpr, span: Span) -> Self {
        CanNode { kind, span }
    }
}

/// A canonicalized top-level definition.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct CanDef {
    pub name: Name,
    pub binding: BindingId,
    pub body: CanId,
    pub span: Span,
}

/// Root of a canonicalized unit.
#[derive(Clone, Debug)]
pub enum CanRoot {
    /// No canonicalizable content. Distinct from a runtime-error node.
    Empty,
    /// A single-expression unit.
    Expr(CanId),
    /// A file unit's definitions.
    File(Vec<CanDef>),
}

impl CanRoot {
    pub fn is_empty(&self) -> bool {
        match self {
            CanRoot::Empty => true,
            CanRoot::Expr(_) => false,
            CanRoot::File(defs) => defs.is_empty(),
        }
    }
}

/// Arena of canonical nodes for one unit, plus binding and param storage.
#[derive(Clone, Debug, Default)]
pub struct CanArena {
    nodes: Vec<CanNode>,
    extra: Vec<CanId>,
    bindings: Vec<Binding>,
    /// Lambda parameter lists: ranges into `bindings` are not contiguous in
    /// general, so parameter lists store explicit binding ids.
    param_bindings: Vec<BindingId>,
}

impl CanArena {
    pub fn new() -> Self {
        CanArena::default()
    }

    pub fn alloc(&mut self, node: CanNode) -> CanId {
        let id = CanId::from_raw(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    pub fn alloc_range(&mut self, ids: &[CanId]) -> CanRange {
        let start = u32::try_from(self.extra.len()).unwrap_or(u32::MAX);
        self.extra.extend_from_slice(ids);
        CanRange {
            start,
            len: u32::try_from(ids.len()).unwrap_or(u32::MAX),
        }
    }

    pub fn alloc_binding(&mut self, binding: Binding) -> BindingId {
        let id = BindingId::from_raw(u32::try_from(self.bindings.len()).unwrap_or(u32::MAX));
        self.bindings.push(binding);
        id
    }

    /// Store a lambda's parameter binding list, returning the covering range.
    pub fn alloc_param_range(&mut self, params: &[BindingId]) -> CanRange {
        let start = u32::try_from(self.param_bindings.len()).unwrap_or(u32::MAX);
        self.param_bindings.extend_from_slice(params);
        CanRange {
            start,
            len: u32::try_from(params.len()).unwrap_or(u32::MAX),
        }
    }

    #[inline]
    pub fn get(&self, id: CanId) -> &CanNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn range(&self, range: CanRange) -> &[CanId] {
        let start = range.start as usize;
        &self.extra[start..start + range.len as usize]
    }

    #[inline]
    pub fn param_range(&self, range: CanRange) -> &[BindingId] {
        let start = range.start as usize;
        &self.param_bindings[start..start + range.len as usize]
    }

    #[inline]
    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
