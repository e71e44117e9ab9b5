//! PARSE section rendering.
//!
//! Renders the CST as s-expressions: `(tag @span (field value) …)`, with
//! malformed nodes as `(e-malformed @span (reason "<code>"))`. Spans use the
//! dot form `@1.1-1.2` against the original source's line index.

use crate::ParsedUnit;
use fern_diagnostic::LineIndex;
use fern_ir::{ExprArena, ExprId, ExprKind, Item, StringInterner};

/// Render the PARSE section for one unit.
pub fn render_parse(
    arena: &ExprArena,
    unit: &ParsedUnit,
    interner: &StringInterner,
    index: &LineIndex,
) -> String {
    let mut out = String::new();
    match unit {
        ParsedUnit::Expr(root) => render_expr(arena, *root, interner, index, &mut out),
        ParsedUnit::File(file) => {
            out.push_str("(file");
            for item in &file.items {
                out.push(' ');
                match item {
                    Item::Def(def) => {
                        out.push_str("(def @");
                        out.push_str(&index.render_dot(def.span));
                        out.push_str(" (name \"");
                        out.push_str(&interner.lookup(def.name));
                        out.push_str("\") ");
                        render_expr(arena, def.body, interner, index, &mut out);
                        out.push(')');
                    }
                    Item::Malformed(id) => render_expr(arena, *id, interner, index, &mut out),
                }
            }
            out.push(')');
        }
    }
    out
}

fn render_expr(
    arena: &ExprArena,
    id: ExprId,
    interner: &StringInterner,
    index: &LineIndex,
    out: &mut String,
) {
    let expr = arena.get(id);
    let span = index.render_dot(expr.span);
    match expr.kind {
        ExprKind::Int(name) => {
            out.push_str("(e-int @");
            out.push_str(&span);
            out.push_str(" (raw \"");
            out.push_str(&interner.lookup(name));
            out.push_str("\"))");
        }
        ExprKind::LowerIdent(name) => {
            out.push_str("(e-ident @");
            out.push_str(&span);
            out.push_str(" (raw \"");
            out.push_str(&interner.lookup(name));
            out.push_str("\"))");
        }
        ExprKind::UpperIdent(name) => {
            out.push_str("(e-tag @");
            out.push_str(&span);
            out.push_str(" (raw \"");
            out.push_str(&interner.lookup(name));
            out.push_str("\"))");
        }
        ExprKind::Unary { op, operand } => {
            out.push_str("(e-unary @");
            out.push_str(&span);
            out.push_str(" (op \"");
            out.push_str(op.symbol());
            out.push_str("\") ");
            render_expr(arena, operand, interner, index, out);
            out.push(')');
        }
        ExprKind::Binary { op, left, right } => {
            out.push_str("(e-binop @");
            out.push_str(&span);
            out.push_str(" (op \"");
            out.push_str(op.symbol());
            out.push_str("\") ");
            render_expr(arena, left, interner, index, out);
            out.push(' ');
            render_expr(arena, right, interner, index, out);
            out.push(')');
        }
        ExprKind::Lambda { params, body } => {
            out.push_str("(e-lambda @");
            out.push_str(&span);
            out.push_str(" (params");
            for param in arena.param_range(params) {
                out.push_str(" (p-ident @");
                out.push_str(&index.render_dot(param.span));
                out.push_str(" (raw \"");
                out.push_str(&interner.lookup(param.name));
                out.push_str("\"))");
            }
            out.push_str(") ");
            render_expr(arena, body, interner, index, out);
            out.push(')');
        }
        ExprKind::Call { func, args } => {
            out.push_str("(e-call @");
            out.push_str(&span);
            out.push(' ');
            render_expr(arena, func, interner, index, out);
            for &arg in arena.range(args) {
                out.push(' ');
                render_expr(arena, arg, interner, index, out);
            }
            out.push(')');
        }
        ExprKind::Tuple { items } => {
            out.push_str("(e-tuple @");
            out.push_str(&span);
            for &item in arena.range(items) {
                out.push(' ');
                render_expr(arena, item, interner, index, out);
            }
            out.push(')');
        }
        ExprKind::Malformed(reason) => {
            out.push_str("(e-malformed @");
            out.push_str(&span);
            out.push_str(" (reason \"");
            out.push_str(reason.code());
            out.push_str("\"))");
        }
    }
}
