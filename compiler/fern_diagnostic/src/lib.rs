//! Diagnostic system for the Fern compiler.
//!
//! Diagnostics are accumulated values, never thrown: every stage returns its
//! best-effort output plus a list of these. The PROBLEMS golden section is
//! rendered from them deterministically, so category labels and message
//! wording are part of the stable interface.

mod diagnostic;
mod render;
pub mod span_utils;

pub use diagnostic::{Category, Diagnostic, Severity};
pub use render::render_problems;
pub use span_utils::LineIndex;
