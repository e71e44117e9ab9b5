//! Fern formatter.
//!
//! Pure CST-to-text rendering: no diagnostics, no mutation. Canonical style
//! puts single spaces around binary operators, keeps unary minus attached,
//! and re-inserts parentheses only where precedence requires them, so
//! formatting is idempotent and re-parsing the output yields an isomorphic
//! CST.
//!
//! Malformed nodes render their original source slice (best-effort
//! reconstruction); the formatter does not try to repair them.

pub mod emitter;

pub use emitter::{Emitter, StringEmitter};

use fern_ir::{ExprArena, ExprId, ExprKind, Item, SourceFile, StringInterner};

/// Sentinel used by the golden harness when formatting is the identity.
pub const NO_CHANGE: &str = "NO CHANGE";

/// Binding strength of each expression form. Parentheses are required
/// wherever a child binds more weakly than its context demands.
fn expr_prec(kind: &ExprKind) -> u8 {
    match kind {
        ExprKind::Lambda { .. } => 0,
        ExprKind::Binary { op, .. } => match op {
            fern_ir::BinaryOp::Add | fern_ir::BinaryOp::Sub => 1,
            fern_ir::BinaryOp::Mul | fern_ir::BinaryOp::Div => 2,
        },
        ExprKind::Unary { .. } => 3,
        ExprKind::Call { .. } => 4,
        ExprKind::Int(_)
        | ExprKind::LowerIdent(_)
        | ExprKind::UpperIdent(_)
        | ExprKind::Tuple { .. }
        | ExprKind::Malformed(_) => 5,
    }
}

/// Format a single-expression unit to canonical source text.
pub fn format_expr(
    arena: &ExprArena,
    root: ExprId,
    interner: &StringInterner,
    source: &str,
) -> String {
    let mut emitter = StringEmitter::with_capacity(source.len());
    let fmt = Formatter {
        arena,
        interner,
        source,
    };
    fmt.write_expr(root, 0, &mut emitter);
    emitter.into_string()
}

/// Format a file unit: one definition per line, trailing newline.
pub fn format_file(
    arena: &ExprArena,
    file: &SourceFile,
    interner: &StringInterner,
    source: &str,
) -> String {
    let mut emitter = StringEmitter::with_capacity(source.len());
    let fmt = Formatter {
        arena,
        interner,
        source,
    };
    for item in &file.items {
        match item {
            Item::Def(def) => {
                emitter.emit(&interner.lookup(def.name));
                emitter.emit(" = ");
                fmt.write_expr(def.body, 0, &mut emitter);
            }
            Item::Malformed(id) => fmt.write_expr(*id, 0, &mut emitter),
        }
        emitter.emit_newline();
    }
    emitter.into_string()
}

struct Formatter<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    source: &'a str,
}

impl Formatter<'_> {
    /// Render one expression, parenthesizing if it binds more weakly than
    /// the context requires.
    fn write_expr(&self, id: ExprId, min_prec: u8, out: &mut impl Emitter) {
        let expr = self.arena.get(id);
        let prec = expr_prec(&expr.kind);
        let parens = prec < min_prec;
        if parens {
            out.emit("(");
        }
        match expr.kind {
            ExprKind::Int(name)
            | ExprKind::LowerIdent(name)
            | ExprKind::UpperIdent(name) => {
                out.emit(&self.interner.lookup(name));
            }
            ExprKind::Unary { op, operand } => {
                out.emit(op.symbol());
                self.write_expr(operand, 3, out);
            }
            ExprKind::Binary { op, left, right } => {
                self.write_expr(left, prec, out);
                out.emit_space();
                out.emit(op.symbol());
                out.emit_space();
                self.write_expr(right, prec + 1, out);
            }
            ExprKind::Lambda { params, body } => {
                out.emit("\\");
                for (i, param) in self.arena.param_range(params).iter().enumerate() {
                    if i > 0 {
                        out.emit(", ");
                    }
                    out.emit(&self.interner.lookup(param.name));
                }
                out.emit(" -> ");
                self.write_expr(body, 0, out);
            }
            ExprKind::Call { func, args } => {
                self.write_expr(func, 4, out);
                out.emit("(");
                for (i, &arg) in self.arena.range(args).iter().enumerate() {
                    if i > 0 {
                        out.emit(", ");
                    }
                    self.write_expr(arg, 0, out);
                }
                out.emit(")");
            }
            ExprKind::Tuple { items } => {
                out.emit("(");
                for (i, &item) in self.arena.range(items).iter().enumerate() {
                    if i > 0 {
                        out.emit(", ");
                    }
                    self.write_expr(item, 0, out);
                }
                out.emit(")");
            }
            ExprKind::Malformed(_) => {
                // Best-effort reconstruction from the original text.
                let start = expr.span.start as usize;
                let end = (expr.span.end as usize).min(self.source.len());
                if start <= end {
                    out.emit(self.source.get(start..end).unwrap_or(""));
                }
            }
        }
        if parens {
            out.emit(")");
        }
    }
}
