//! Type inference for the Fern compiler.
//!
//! A single forward pass over canonical IR, Hindley-Milner style, extended
//! with numeric-literal polymorphism: an integer literal gets `Num(*)` (a
//! deferred-resolution numeric family) and stays polymorphic until use
//! constrains it. Arithmetic unifies its operands with a fresh numeric
//! family and propagates the unified, possibly still polymorphic, type.
//!
//! Runtime-error nodes and the empty unit always infer to the error type,
//! and the error type unifies with anything, so one unresolved identifier
//! does not cascade spurious type errors through well-typed siblings.
//!
//! The substitution state lives in a [`Pool`] owned by this run and
//! discarded with it; re-running inference on unchanged IR produces
//! identical assignments and printed type strings.

use fern_diagnostic::{Category, Diagnostic};
use fern_ir::{BindingId, CanArena, CanExpr, CanId, CanRoot, StringInterner};
use fern_types::{format_type, unify, Idx, Pool, UnifyError};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Result of inferring one unit: the pool, one type per canonical node,
/// and accumulated diagnostics.
pub struct TypeCheckResult {
    pub pool: Pool,
    /// Type of each canonical node, indexed by `CanId`.
    types: Vec<Idx>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TypeCheckResult {
    /// Type assigned to a canonical node.
    pub fn ty(&self, id: CanId) -> Idx {
        self.types[id.index()]
    }
}

/// Infer types for a canonicalized unit.
pub fn infer_unit(
    arena: &CanArena,
    root: &CanRoot,
    interner: &StringInterner,
) -> TypeCheckResult {
    let mut ctx = Inferrer {
        arena,
        interner,
        pool: Pool::new(),
        types: vec![Idx::from_raw(0); arena.len()],
        bindings: FxHashMap::default(),
        diagnostics: Vec::new(),
    };

    match root {
        CanRoot::Empty => {}
        CanRoot::Expr(id) => {
            ctx.infer(*id);
        }
        CanRoot::File(defs) => {
            for def in defs {
                // The def's own variable is bound before its body so a
                // body may refer to itself (monomorphic recursion).
                let var = ctx.pool.fresh_var();
                ctx.bindings.insert(def.binding, var);
                let body_ty = ctx.infer(def.body);
                ctx.unify_or_report(var, body_ty, arena.get(def.body).span);
            }
        }
    }

    TypeCheckResult {
        pool: ctx.pool,
        types: ctx.types,
        diagnostics: ctx.diagnostics,
    }
}

struct Inferrer<'a> {
    arena: &'a CanArena,
    interner: &'a StringInterner,
    pool: Pool,
    types: Vec<Idx>,
    /// Type variable for each binding site seen so far.
    bindings: FxHashMap<BindingId, Idx>,
    diagnostics: Vec<Diagnostic>,
}

impl Inferrer<'_> {
    fn infer(&mut self, id: CanId) -> Idx {
        let node = *self.arena.get(id);
        let ty = match node.kind {
            CanExpr::Int(_) => self.pool.fresh_num(),

            CanExpr::Lookup { binding, .. } => match self.bindings.get(&binding) {
                Some(&ty) => ty,
                // A lookup can only reference an already-seen binding;
                // anything else is a canonicalization bug, kept total here.
                None => self.pool.error(),
            },

            CanExpr::Tag(name) => self.pool.nominal(name),

            CanExpr::Unop { op: _, operand } => {
                let operand_ty = self.infer(operand);
                let num = self.pool.fresh_num();
                self.unify_or_report(operand_ty, num, self.arena.get(operand).span)
            }

            CanExpr::Binop { op: _, lhs, rhs } => {
                let lhs_ty = self.infer(lhs);
                let rhs_ty = self.infer(rhs);
                // Arithmetic: the operand types unify with each other and
                // with a fresh numeric family; the unified (possibly still
                // polymorphic) type is the result.
                let operands = self.unify_or_report(lhs_ty, rhs_ty, node.span);
                let num = self.pool.fresh_num();
                self.unify_or_report(operands, num, node.span)
            }

            CanExpr::Lambda { params, body } => {
                let param_ids = self.arena.param_range(params).to_vec();
                let mut param_tys = Vec::with_capacity(param_ids.len());
                for binding in param_ids {
                    let var = self.pool.fresh_var();
                    self.bindings.insert(binding, var);
                    param_tys.push(var);
                }
                let body_ty = self.infer(body);
                self.pool.func(param_tys, body_ty)
            }

            CanExpr::Call { func, args } => {
                let func_ty = self.infer(func);
                let arg_ids = self.arena.range(args).to_vec();
                let arg_tys: Vec<Idx> = arg_ids.iter().map(|&arg| self.infer(arg)).collect();
                let ret = self.pool.fresh_var();
                let expected = self.pool.func(arg_tys, ret);
                let merged = self.unify_or_report(func_ty, expected, node.span);
                // Calling an error-typed callee yields the error type, not
                // a fresh unknown.
                if matches!(
                    self.pool.resolved_content(merged),
                    fern_types::Content::Error
                ) {
                    merged
                } else {
                    ret
                }
            }

            CanExpr::Tuple { items } => {
                let item_ids = self.arena.range(items).to_vec();
                let item_tys: Vec<Idx> = item_ids.iter().map(|&item| self.infer(item)).collect();
                self.pool.tuple(item_tys)
            }

            CanExpr::RuntimeError(tag) => {
                trace!(code = tag.code(), "error type for runtime-error node");
                self.pool.error()
            }
        };
        self.types[id.index()] = ty;
        ty
    }

    /// Unify, reporting a `TYPE MISMATCH` diagnostic on conflict.
    ///
    /// Returns the unified representative, or the error type at this
    /// constraint site on conflict. The conflicting slots themselves keep
    /// their shapes, so one conflict yields one diagnostic and leaves
    /// sibling types intact.
    fn unify_or_report(&mut self, a: Idx, b: Idx, span: fern_ir::Span) -> Idx {
        match unify(&mut self.pool, a, b) {
            Ok(merged) => merged,
            Err(UnifyError::Occurs { .. }) => {
                self.diagnostics.push(Diagnostic::error(
                    Category::TypeMismatch,
                    "This expression's type would contain itself.",
                    span,
                ));
                self.pool.error()
            }
            Err(UnifyError::Mismatch { .. } | UnifyError::Arity { .. }) => {
                let left = format_type(&self.pool, a, self.interner);
                let right = format_type(&self.pool, b, self.interner);
                self.diagnostics.push(Diagnostic::error(
                    Category::TypeMismatch,
                    format!("These types are not compatible: `{left}` vs `{right}`."),
                    span,
                ));
                self.pool.error()
            }
        }
    }
}
