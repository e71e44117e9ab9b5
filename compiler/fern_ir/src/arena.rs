//! Flat arena for CST expressions.
//!
//! One arena per unit. Parents reference children through `ExprId` indices;
//! variable-arity children live in a side list addressed by `ExprRange`.
//! The whole arena is discarded at the end of the pipeline run.

use crate::{Expr, ExprId, ExprRange, Param, ParamRange};

/// Arena of CST expressions for one unit.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    /// Child id lists for variable-arity nodes.
    extra: Vec<ExprId>,
    /// Lambda parameter lists.
    params: Vec<Param>,
}

impl ExprArena {
    pub fn new() -> Self {
        ExprArena::default()
    }

    /// Allocate an expression, returning its id.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::from_raw(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(expr);
        id
    }

    /// Store a list of child ids, returning the covering range.
    pub fn alloc_range(&mut self, ids: &[ExprId]) -> ExprRange {
        let start = u32::try_from(self.extra.len()).unwrap_or(u32::MAX);
        self.extra.extend_from_slice(ids);
        ExprRange {
            start,
            len: u32::try_from(ids.len()).unwrap_or(u32::MAX),
        }
    }

    /// Store a lambda parameter list, returning the covering range.
    pub fn alloc_params(&mut self, params: &[Param]) -> ParamRange {
        let start = u32::try_from(self.params.len()).unwrap_or(u32::MAX);
        self.params.extend_from_slice(params);
        ParamRange {
            start,
            len: u32::try_from(params.len()).unwrap_or(u32::MAX),
        }
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn range(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.extra[start..start + range.len as usize]
    }

    #[inline]
    pub fn param_range(&self, range: ParamRange) -> &[Param] {
        let start = range.start as usize;
        &self.params[start..start + range.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
