//! Lexical scope stack.
//!
//! An explicit stack of name → binding maps, passed through the
//! canonicalization pass rather than held in any ambient state, so multiple
//! units can canonicalize concurrently without interference. Entering a
//! binding construct pushes a child scope; lookup walks outward from the
//! innermost scope and the first match wins (shadowing, no ambiguity
//! errors). The stack lives exactly as long as the pass that created it.

use fern_ir::{BindingId, Name};
use rustc_hash::FxHashMap;

/// Stack of nested scopes.
pub struct ScopeStack {
    scopes: Vec<FxHashMap<Name, BindingId>>,
}

impl ScopeStack {
    /// Create a stack with one root scope.
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Enter a child scope.
    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Leave the innermost scope.
    ///
    /// The root scope is never popped; an unbalanced pop is a no-op.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind a name in the innermost scope, shadowing any outer binding.
    pub fn bind(&mut self, name: Name, binding: BindingId) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, binding);
        }
    }

    /// Resolve a name, innermost scope first.
    pub fn lookup(&self, name: Name) -> Option<BindingId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name).copied())
    }

    /// Current nesting depth (root scope is depth 1).
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
