//! CST → canonical IR lowering.

use crate::scope::ScopeStack;
use fern_diagnostic::{Category, Diagnostic};
use fern_ir::{
    Binding, BindingKind, CanArena, CanDef, CanExpr, CanId, CanNode, CanOp, CanRoot, ExprArena,
    ExprId, ExprKind, Item, RuntimeErrorTag, SourceFile, StringInterner,
};
use tracing::trace;

/// Result of canonicalizing one unit.
pub struct CanonResult {
    pub arena: CanArena,
    pub root: CanRoot,
    pub diagnostics: Vec<Diagnostic>,
}

impl CanonResult {
    /// Whether the unit lowered to the distinguished empty IR.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Canonicalize a single-expression unit.
///
/// A malformed root means the unit has no canonicalizable content: the
/// result is the empty IR, not a runtime-error node.
pub fn canonicalize_expr_unit(
    src: &ExprArena,
    root: ExprId,
    interner: &StringInterner,
) -> CanonResult {
    if let ExprKind::Malformed(_) = src.get(root).kind {
        return CanonResult {
            arena: CanArena::new(),
            root: CanRoot::Empty,
            diagnostics: Vec::new(),
        };
    }

    let mut lowerer = Lowerer::new(src, interner);
    let can_root = lowerer.lower_expr(root);
    CanonResult {
        arena: lowerer.arena,
        root: CanRoot::Expr(can_root),
        diagnostics: lowerer.diagnostics,
    }
}

/// Canonicalize a file unit.
///
/// Each definition's name is bound before its body is lowered, so a body
/// may refer to its own definition and to every earlier one. Malformed
/// top-level items contribute nothing; a file with no surviving definitions
/// lowers to the empty IR.
pub fn canonicalize_file_unit(
    src: &ExprArena,
    file: &SourceFile,
    interner: &StringInterner,
) -> CanonResult {
    let mut lowerer = Lowerer::new(src, interner);
    let mut defs = Vec::new();

    for item in &file.items {
        let Item::Def(def) = item else {
            continue;
        };
        let binding = lowerer.arena.alloc_binding(Binding {
            name: def.name,
            span: def.name_span,
            kind: BindingKind::Def,
        });
        lowerer.scopes.bind(def.name, binding);
        let body = lowerer.lower_expr(def.body);
        defs.push(CanDef {
            name: def.name,
            binding,
            body,
            span: def.span,
        });
    }

    let root = if defs.is_empty() {
        CanRoot::Empty
    } else {
        CanRoot::File(defs)
    };
    CanonResult {
        arena: lowerer.arena,
        root,
        diagnostics: lowerer.diagnostics,
    }
}

struct Lowerer<'a> {
    src: &'a ExprArena,
    interner: &'a StringInterner,
    arena: CanArena,
    scopes: ScopeStack,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lowerer<'a> {
    fn new(src: &'a ExprArena, interner: &'a StringInterner) -> Self {
        Lowerer {
            src,
            interner,
            arena: CanArena::new(),
            scopes: ScopeStack::new(),
            diagnostics: Vec::new(),
        }
    }

    fn lower_expr(&mut self, id: ExprId) -> CanId {
        let expr = self.src.get(id);
        let span = expr.span;
        match expr.kind {
            ExprKind::Int(raw) => {
                let text = self.interner.lookup(raw);
                let digits: String = text.chars().filter(|&c| c != '_').collect();
                match digits.parse::<i64>() {
                    Ok(value) => self.arena.alloc(CanNode::new(CanExpr::Int(value), span)),
                    Err(_) => {
                        self.diagnostics.push(Diagnostic::error(
                            Category::InvalidNumber,
                            format!("The number `{text}` is outside the representable integer range."),
                            span,
                        ));
                        self.arena.alloc(CanNode::new(
                            CanExpr::RuntimeError(RuntimeErrorTag::IntLiteralOutOfRange),
                            span,
                        ))
                    }
                }
            }
            ExprKind::LowerIdent(name) => match self.scopes.lookup(name) {
                Some(binding) => self
                    .arena
                    .alloc(CanNode::new(CanExpr::Lookup { name, binding }, span)),
                None => {
                    let text = self.interner.lookup(name);
                    trace!(ident = %text, "unresolved identifier");
                    self.diagnostics.push(Diagnostic::error(
                        Category::UndefinedVariable,
                        format!(
                            "Nothing is named `{text}` in this scope.\n\
                             Is there an `import` or `exposing` missing up-top?"
                        ),
                        span,
                    ));
                    self.arena.alloc(CanNode::new(
                        CanExpr::RuntimeError(RuntimeErrorTag::IdentNotInScope),
                        span,
                    ))
                }
            },
            ExprKind::UpperIdent(name) => {
                self.arena.alloc(CanNode::new(CanExpr::Tag(name), span))
            }
            ExprKind::Unary { op: _, operand } => {
                let operand = self.lower_expr(operand);
                self.arena.alloc(CanNode::new(
                    CanExpr::Unop {
                        op: CanOp::Neg,
                        operand,
                    },
                    span,
                ))
            }
            ExprKind::Binary { op, left, right } => {
                let op = match op {
                    fern_ir::BinaryOp::Add => CanOp::Add,
                    fern_ir::BinaryOp::Sub => CanOp::Sub,
                    fern_ir::BinaryOp::Mul => CanOp::Mul,
                    fern_ir::BinaryOp::Div => CanOp::Div,
                };
                let lhs = self.lower_expr(left);
                let rhs = self.lower_expr(right);
                self.arena
                    .alloc(CanNode::new(CanExpr::Binop { op, lhs, rhs }, span))
            }
            ExprKind::Lambda { params, body } => {
                let src = self.src;
                self.scopes.push();
                let mut bindings = Vec::new();
                for param in src.param_range(params) {
                    let binding = self.arena.alloc_binding(Binding {
                        name: param.name,
                        span: param.span,
                        kind: BindingKind::LambdaParam,
                    });
                    self.scopes.bind(param.name, binding);
                    bindings.push(binding);
                }
                let body = self.lower_expr(body);
                self.scopes.pop();
                let param_range = self.arena.alloc_param_range(&bindings);
                self.arena.alloc(CanNode::new(
                    CanExpr::Lambda {
                        params: param_range,
                        body,
                    },
                    span,
                ))
            }
            ExprKind::Call { func, args } => {
                let src = self.src;
                let func = self.lower_expr(func);
                let lowered: Vec<CanId> = src
                    .range(args)
                    .iter()
                    .map(|&arg| self.lower_expr(arg))
                    .collect();
                let args = self.arena.alloc_range(&lowered);
                self.arena
                    .alloc(CanNode::new(CanExpr::Call { func, args }, span))
            }
            ExprKind::Tuple { items } => {
                let src = self.src;
                let lowered: Vec<CanId> = src
                    .range(items)
                    .iter()
                    .map(|&item| self.lower_expr(item))
                    .collect();
                let items = self.arena.alloc_range(&lowered);
                self.arena
                    .alloc(CanNode::new(CanExpr::Tuple { items }, span))
            }
            ExprKind::Malformed(reason) => self.arena.alloc(CanNode::new(
                CanExpr::RuntimeError(RuntimeErrorTag::Malformed(reason)),
                span,
            )),
        }
    }
}
