//! CANONICALIZE section rendering.
//!
//! Same s-expression style as the PARSE section, over canonical nodes. The
//! all-empty IR renders as `(can-ir (empty true))`; that sentinel, like the
//! runtime-error tags, is part of the golden interface.

use crate::CanonResult;
use fern_diagnostic::LineIndex;
use fern_ir::{CanArena, CanExpr, CanId, CanRoot, StringInterner};

/// Render the CANONICALIZE section for one unit.
pub fn render_canon(result: &CanonResult, interner: &StringInterner, index: &LineIndex) -> String {
    let mut out = String::new();
    match &result.root {
        CanRoot::Empty => out.push_str("(can-ir (empty true))"),
        CanRoot::Expr(root) => render_node(&result.arena, *root, interner, index, &mut out),
        CanRoot::File(defs) => {
            out.push_str("(can-ir");
            for def in defs {
                out.push_str(" (def @");
                out.push_str(&index.render_dot(def.span));
                out.push_str(" (name \"");
                out.push_str(&interner.lookup(def.name));
                out.push_str("\") ");
                render_node(&result.arena, def.body, interner, index, &mut out);
                out.push(')');
            }
            out.push(')');
        }
    }
    out
}

fn render_node(
    arena: &CanArena,
    id: CanId,
    interner: &StringInterner,
    index: &LineIndex,
    out: &mut String,
) {
    let node = arena.get(id);
    let span = index.render_dot(node.span);
    match node.kind {
        CanExpr::Int(value) => {
            out.push_str("(e-int @");
            out.push_str(&span);
            out.push_str(" (value \"");
            out.push_str(&value.to_string());
            out.push_str("\"))");
        }
        CanExpr::Lookup { name, .. } => {
            out.push_str("(e-lookup @");
            out.push_str(&span);
            out.push_str(" (name \"");
            out.push_str(&interner.lookup(name));
            out.push_str("\"))");
        }
        CanExpr::Tag(name) => {
            out.push_str("(e-tag @");
            out.push_str(&span);
            out.push_str(" (name \"");
            out.push_str(&interner.lookup(name));
            out.push_str("\"))");
        }
        CanExpr::Unop { op, operand } => {
            out.push_str("(e-unop @");
            out.push_str(&span);
            out.push_str(" (op \"");
            out.push_str(op.name());
            out.push_str("\") ");
            render_node(arena, operand, interner, index, out);
            out.push(')');
        }
        CanExpr::Binop { op, lhs, rhs } => {
            out.push_str("(e-binop @");
            out.push_str(&span);
            out.push_str(" (op \"");
            out.push_str(op.name());
            out.push_str("\") ");
            render_node(arena, lhs, interner, index, out);
            out.push(' ');
            render_node(arena, rhs, interner, index, out);
            out.push(')');
        }
        CanExpr::Lambda { params, body } => {
            out.push_str("(e-lambda @");
            out.push_str(&span);
            out.push_str(" (params");
            for &binding in arena.param_range(params) {
                let b = arena.binding(binding);
                out.push_str(" (p-assign @");
                out.push_str(&index.render_dot(b.span));
                out.push_str(" (name \"");
                out.push_str(&interner.lookup(b.name));
                out.push_str("\"))");
            }
            out.push_str(") ");
            render_node(arena, body, interner, index, out);
            out.push(')');
        }
        CanExpr::Call { func, args } => {
            out.push_str("(e-call @");
            out.push_str(&span);
            out.push(' ');
            render_node(arena, func, interner, index, out);
            for &arg in arena.range(args) {
                out.push(' ');
                render_node(arena, arg, interner, index, out);
            }
            out.push(')');
        }
        CanExpr::Tuple { items } => {
            out.push_str("(e-tuple @");
            out.push_str(&span);
            for &item in arena.range(items) {
                out.push(' ');
                render_node(arena, item, interner, index, out);
            }
            out.push(')');
        }
        CanExpr::RuntimeError(tag) => {
            out.push_str("(e-runtime-error @");
            out.push_str(&span);
            out.push_str(" (tag \"");
            out.push_str(tag.code());
            out.push_str("\"))");
        }
    }
}
