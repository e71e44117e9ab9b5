//! Canonical IR lowering for the Fern compiler.
//!
//! Consumes a CST and produces canonical IR plus diagnostics. Identifiers
//! resolve against an explicit lexical scope stack; operators are renamed to
//! canonical names; literal text is parsed to values. Failures stay local:
//! an unresolved identifier becomes a runtime-error node and its siblings
//! still canonicalize. Only a unit whose entire CST is malformed lowers to
//! the distinguished empty IR, which is a different terminal state from a
//! runtime-error node and is preserved as such in output.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lex → Parse → **Canonicalize** → Type Inference
//! ```

mod lower;
pub mod render;
mod scope;

pub use lower::{canonicalize_expr_unit, canonicalize_file_unit, CanonResult};
pub use scope::ScopeStack;
