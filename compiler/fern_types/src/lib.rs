//! Fern type system.
//!
//! Types live in a [`Pool`] local to one inference run, addressed by
//! [`Idx`]. Unification is link-based union-find with path compression;
//! there is no global substitution table, so inference is reentrant and
//! units can be inferred in parallel.
//!
//! Numeric-literal polymorphism: an integer literal gets `Num(*)`, a
//! numeric family over a fresh inner variable, which stays polymorphic
//! until constrained by use.
//!
//! The error type is absorbing: unifying it with anything succeeds and
//! yields the error type. This is what keeps one ill-typed or unresolved
//! sub-expression from cascading spurious errors through its siblings.

mod format;
mod pool;
mod unify;

pub use format::{format_type, format_type_generalized};
pub use pool::{Content, Idx, Pool};
pub use unify::{unify, UnifyError};
