//! Link-based unification.

use crate::{Content, Idx, Pool};
use tracing::trace;

/// Why two types failed to unify.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum UnifyError {
    /// Structurally incompatible types.
    Mismatch { left: Idx, right: Idx },
    /// Function or tuple arity disagreement.
    Arity {
        left: Idx,
        right: Idx,
        left_arity: usize,
        right_arity: usize,
    },
    /// Occurs-check failure (infinite type).
    Occurs { var: Idx, ty: Idx },
}

/// Unify two types, returning the representative of the unified type.
///
/// The error type absorbs: unifying it with anything succeeds and yields
/// the error slot — without linking the other side, so an error in one
/// sub-expression never rewrites the already-inferred type of a sibling.
///
/// On failure neither root is mutated (structure unified before the point
/// of conflict stays unified); the caller reports one diagnostic and uses
/// the error type at the conflicting constraint site.
pub fn unify(pool: &mut Pool, a: Idx, b: Idx) -> Result<Idx, UnifyError> {
    let a = pool.resolve(a);
    let b = pool.resolve(b);
    if a == b {
        return Ok(a);
    }

    let a_content = pool.content(a).clone();
    let b_content = pool.content(b).clone();
    match (a_content, b_content) {
        // Error absorbs, and leaves the other side alone.
        (Content::Error, _) => Ok(a),
        (_, Content::Error) => Ok(b),

        // Variables link to the other side, after the occurs check.
        (Content::FlexVar(_), _) => {
            if pool.occurs(a, b) {
                trace!(?a, ?b, "occurs check failed");
                return Err(UnifyError::Occurs { var: a, ty: b });
            }
            pool.set(a, Content::Link(b));
            Ok(b)
        }
        (_, Content::FlexVar(_)) => {
            if pool.occurs(b, a) {
                trace!(?a, ?b, "occurs check failed");
                return Err(UnifyError::Occurs { var: b, ty: a });
            }
            pool.set(b, Content::Link(a));
            Ok(a)
        }

        (Content::Num(a_inner), Content::Num(b_inner)) => {
            unify(pool, a_inner, b_inner)?;
            pool.set(b, Content::Link(a));
            Ok(a)
        }

        (Content::Nominal(a_name), Content::Nominal(b_name)) if a_name == b_name => {
            pool.set(b, Content::Link(a));
            Ok(a)
        }

        (Content::Func(a_params, a_ret), Content::Func(b_params, b_ret)) => {
            if a_params.len() != b_params.len() {
                return Err(UnifyError::Arity {
                    left: a,
                    right: b,
                    left_arity: a_params.len(),
                    right_arity: b_params.len(),
                });
            }
            for (&ap, &bp) in a_params.iter().zip(&b_params) {
                unify(pool, ap, bp)?;
            }
            unify(pool, a_ret, b_ret)?;
            pool.set(b, Content::Link(a));
            Ok(a)
        }

        (Content::Tuple(a_items), Content::Tuple(b_items)) => {
            if a_items.len() != b_items.len() {
                return Err(UnifyError::Arity {
                    left: a,
                    right: b,
                    left_arity: a_items.len(),
                    right_arity: b_items.len(),
                });
            }
            for (&ai, &bi) in a_items.iter().zip(&b_items) {
                unify(pool, ai, bi)?;
            }
            pool.set(b, Content::Link(a));
            Ok(a)
        }

        // Links cannot appear: both sides were resolved above.
        _ => {
            trace!(?a, ?b, "type mismatch");
            Err(UnifyError::Mismatch { left: a, right: b })
        }
    }
}
