//! Type rendering.
//!
//! Produces the stable strings used in diagnostics and in the TYPES golden
//! section. Free variables render as `*` when they occur once in a type and
//! as `a`, `b`, … (first-appearance order) when shared. The numeric family
//! over a free variable renders as `Num(*)`.
//!
//! Two entry points differ only for derived expressions whose whole type is
//! an unconstrained numeric family: [`format_type`] keeps the literal
//! anchored form `Num(*)`, while [`format_type_generalized`] renders the
//! fully-generalized `*`.

use crate::{Content, Idx, Pool};
use fern_ir::StringInterner;
use rustc_hash::FxHashMap;

/// Render a type at a literal occurrence.
pub fn format_type(pool: &Pool, idx: Idx, interner: &StringInterner) -> String {
    let vars = VarNames::collect(pool, idx);
    let mut out = String::new();
    write_type(pool, idx, interner, &vars, false, &mut out);
    out
}

/// Render a type for a derived (non-literal) expression entry.
///
/// A type that is entirely an unconstrained numeric family renders as the
/// fully-generalized `*`; everything else renders as in [`format_type`].
pub fn format_type_generalized(pool: &Pool, idx: Idx, interner: &StringInterner) -> String {
    let root = pool.resolve_ref(idx);
    if let Content::Num(inner) = pool.content(root) {
        if matches!(pool.resolved_content(*inner), Content::FlexVar(_)) {
            return "*".to_owned();
        }
    }
    format_type(pool, idx, interner)
}

/// Deterministic naming for free variables within one rendered type.
///
/// Variables occurring once render as `*`; shared variables get letters in
/// first-appearance order.
struct VarNames {
    letters: FxHashMap<u32, char>,
}

impl VarNames {
    fn collect(pool: &Pool, idx: Idx) -> Self {
        let mut counts = FxHashMap::default();
        let mut order = Vec::new();
        count_vars(pool, idx, &mut counts, &mut order);

        let mut letters = FxHashMap::default();
        let mut next = b'a';
        for var in order {
            if counts.get(&var).copied().unwrap_or(0) >= 2 {
                letters.insert(var, char::from(next));
                next = next.saturating_add(1);
            }
        }
        VarNames { letters }
    }

    fn render(&self, var: Idx) -> String {
        match self.letters.get(&var.raw()) {
            Some(&letter) => letter.to_string(),
            None => "*".to_owned(),
        }
    }
}

fn count_vars(pool: &Pool, idx: Idx, counts: &mut FxHashMap<u32, usize>, order: &mut Vec<u32>) {
    let root = pool.resolve_ref(idx);
    match pool.content(root) {
        Content::FlexVar(_) => {
            let entry = counts.entry(root.raw()).or_insert(0);
            if *entry == 0 {
                order.push(root.raw());
            }
            *entry += 1;
        }
        Content::Num(inner) => count_vars(pool, *inner, counts, order),
        Content::Func(params, ret) => {
            for &p in params {
                count_vars(pool, p, counts, order);
            }
            count_vars(pool, *ret, counts, order);
        }
        Content::Tuple(items) => {
            for &i in items {
                count_vars(pool, i, counts, order);
            }
        }
        Content::Nominal(_) | Content::Error | Content::Link(_) => {}
    }
}

fn write_type(
    pool: &Pool,
    idx: Idx,
    interner: &StringInterner,
    vars: &VarNames,
    nested: bool,
    out: &mut String,
) {
    let root = pool.resolve_ref(idx);
    match pool.content(root) {
        Content::FlexVar(_) => out.push_str(&vars.render(root)),
        Content::Link(_) => {} // unreachable after resolve
        Content::Num(inner) => {
            out.push_str("Num(");
            write_type(pool, *inner, interner, vars, true, out);
            out.push(')');
        }
        Content::Nominal(name) => out.push_str(&interner.lookup(*name)),
        Content::Func(params, ret) => {
            if nested {
                out.push('(');
            }
            for (i, &p) in params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(pool, p, interner, vars, true, out);
            }
            out.push_str(" -> ");
            write_type(pool, *ret, interner, vars, true, out);
            if nested {
                out.push(')');
            }
        }
        Content::Tuple(items) => {
            out.push('(');
            for (i, &item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(pool, item, interner, vars, true, out);
            }
            out.push(')');
        }
        Content::Error => out.push_str("Error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unify;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal_num_renders_star_inside() {
        let mut pool = Pool::new();
        let interner = StringInterner::new();
        let n = pool.fresh_num();
        assert_eq!(format_type(&pool, n, &interner), "Num(*)");
    }

    #[test]
    fn generalized_num_renders_bare_star() {
        let mut pool = Pool::new();
        let interner = StringInterner::new();
        let n = pool.fresh_num();
        assert_eq!(format_type_generalized(&pool, n, &interner), "*");
    }

    #[test]
    fn lone_var_renders_star() {
        let mut pool = Pool::new();
        let interner = StringInterner::new();
        let v = pool.fresh_var();
        assert_eq!(format_type(&pool, v, &interner), "*");
        assert_eq!(format_type_generalized(&pool, v, &interner), "*");
    }

    #[test]
    fn shared_vars_get_letters() {
        let mut pool = Pool::new();
        let interner = StringInterner::new();
        let v = pool.fresh_var();
        let f = pool.func(vec![v], v);
        assert_eq!(format_type(&pool, f, &interner), "a -> a");
    }

    #[test]
    fn identity_over_num_shares_the_inner_var() {
        let mut pool = Pool::new();
        let interner = StringInterner::new();
        let v = pool.fresh_var();
        let n = pool.fresh_num();
        let _ = unify(&mut pool, v, n);
        let f = pool.func(vec![v], v);
        // Same Num on both sides: the inner variable is shared.
        assert_eq!(format_type(&pool, f, &interner), "Num(a) -> Num(a)");
    }

    #[test]
    fn nominal_renders_its_name() {
        let mut pool = Pool::new();
        let interner = StringInterner::new();
        let name = interner.intern("Foo");
        let t = pool.nominal(name);
        assert_eq!(format_type(&pool, t, &interner), "Foo");
    }

    #[test]
    fn error_renders_error() {
        let mut pool = Pool::new();
        let interner = StringInterner::new();
        let e = pool.error();
        assert_eq!(format_type(&pool, e, &interner), "Error");
        assert_eq!(format_type_generalized(&pool, e, &interner), "Error");
    }

    #[test]
    fn tuple_and_nested_function() {
        let mut pool = Pool::new();
        let interner = StringInterner::new();
        let a = pool.fresh_var();
        let b = pool.fresh_var();
        let f = pool.func(vec![a], b);
        let n = pool.fresh_num();
        let t = pool.tuple(vec![f, n]);
        assert_eq!(format_type(&pool, t, &interner), "((* -> *), Num(*))");
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut pool = Pool::new();
        let interner = StringInterner::new();
        let a = pool.fresh_var();
        let b = pool.fresh_var();
        let f = pool.func(vec![a, b, a], b);
        let first = format_type(&pool, f, &interner);
        let second = format_type(&pool, f, &interner);
        assert_eq!(first, "a, b, a -> b");
        assert_eq!(first, second);
    }
}
