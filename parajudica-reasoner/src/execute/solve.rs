//! Conjunctive pattern matching with variable bindings.
//!
//! `solve` evaluates a body conjunction against the full store;
//! `solve_seminaive` evaluates it once per pivot position, restricting the
//! pivot pattern to the previous round's delta, so every produced binding
//! uses at least one new quad. Duplicate bindings across pivots are
//! harmless: emitted quads are deduplicated against the store.

use hashbrown::HashMap;
use parajudica_core::{Graph, GraphStore, Quad, QuadPattern, TermValue};
use std::sync::Arc;

use crate::rule::{Pattern, PatternGraph, Term};

use super::delta::DeltaSet;

pub use crate::rule::SCOPE_VAR;

/// A binding from variable names to values.
pub type Bindings = HashMap<Arc<str>, TermValue>;

/// Resolve a term under the given bindings: `Some` for constants and bound
/// variables, `None` for unbound variables.
pub fn resolve(term: &Term, bindings: &Bindings) -> Option<TermValue> {
    match term {
        Term::Var(name) => bindings.get(name.as_ref()).cloned(),
        Term::Sid(sid) => Some(TermValue::Ref(sid.clone())),
        Term::Value(v) => Some(v.clone()),
    }
}

/// Unify one position of a pattern with a concrete value, extending the
/// bindings. Returns false on mismatch.
fn unify_position(term: &Term, value: &TermValue, bindings: &mut Bindings) -> bool {
    match term {
        Term::Var(name) => match bindings.get(name.as_ref()) {
            Some(bound) => bound == value,
            None => {
                bindings.insert(name.clone(), value.clone());
                true
            }
        },
        Term::Sid(sid) => matches!(value, TermValue::Ref(r) if r == sid),
        Term::Value(v) => v == value,
    }
}

/// Unify a pattern with a quad under existing bindings.
///
/// Returns the extended bindings on success. Scoped patterns only match
/// scope-graph quads and bind [`SCOPE_VAR`] to the scope.
pub fn unify(pattern: &Pattern, quad: &Quad, bindings: &Bindings) -> Option<Bindings> {
    let mut out = bindings.clone();

    match (&pattern.graph, &quad.g) {
        (PatternGraph::Data, Graph::Data) => {}
        (PatternGraph::Scope(term), Graph::Scope(scope)) => {
            if !unify_position(term, &TermValue::Ref(scope.clone()), &mut out) {
                return None;
            }
        }
        _ => return None,
    }

    if !unify_position(&pattern.s, &TermValue::Ref(quad.s.clone()), &mut out) {
        return None;
    }
    if !unify_position(&pattern.p, &TermValue::Ref(quad.p.clone()), &mut out) {
        return None;
    }
    if !unify_position(&pattern.o, &quad.o, &mut out) {
        return None;
    }
    Some(out)
}

/// Build the most selective store pattern for a rule pattern under the
/// current bindings. Graph and non-Ref subject/predicate resolutions that
/// can never match yield an empty pattern handled by the caller.
fn to_quad_pattern(pattern: &Pattern, bindings: &Bindings) -> Option<QuadPattern> {
    let s = match resolve(&pattern.s, bindings) {
        Some(TermValue::Ref(sid)) => Some(sid),
        Some(_) => return None,
        None => None,
    };
    let p = match resolve(&pattern.p, bindings) {
        Some(TermValue::Ref(sid)) => Some(sid),
        Some(_) => return None,
        None => None,
    };
    let o = resolve(&pattern.o, bindings);
    let g = match &pattern.graph {
        PatternGraph::Data => Some(Graph::Data),
        PatternGraph::Scope(term) => match resolve(term, bindings) {
            Some(TermValue::Ref(scope)) => Some(Graph::Scope(scope)),
            Some(_) => return None,
            // Unbound scope: any scope graph; unify() filters out Data quads.
            None => None,
        },
    };
    Some(QuadPattern { s, p, o, g })
}

/// Extend each partial binding by matching one pattern against the store.
fn extend_with_store(
    store: &GraphStore,
    pattern: &Pattern,
    partial: Vec<Bindings>,
) -> Vec<Bindings> {
    let mut next = Vec::new();
    for bindings in &partial {
        let Some(qp) = to_quad_pattern(pattern, bindings) else {
            continue;
        };
        for quad in store.matching(&qp) {
            if let Some(extended) = unify(pattern, quad, bindings) {
                next.push(extended);
            }
        }
    }
    next
}

/// Extend each partial binding by matching one pattern against the delta.
fn extend_with_delta(delta: &DeltaSet, pattern: &Pattern, partial: Vec<Bindings>) -> Vec<Bindings> {
    let mut next = Vec::new();
    for bindings in &partial {
        match resolve(&pattern.p, bindings) {
            Some(TermValue::Ref(p)) => {
                for quad in delta.get_by_p(&p) {
                    if let Some(extended) = unify(pattern, quad, bindings) {
                        next.push(extended);
                    }
                }
            }
            Some(_) => {}
            None => {
                for quad in delta.iter() {
                    if let Some(extended) = unify(pattern, quad, bindings) {
                        next.push(extended);
                    }
                }
            }
        }
    }
    next
}

/// Solve a body conjunction against the full store.
pub fn solve(store: &GraphStore, body: &[Pattern]) -> Vec<Bindings> {
    let mut partial = vec![Bindings::new()];
    for pattern in body {
        partial = extend_with_store(store, pattern, partial);
        if partial.is_empty() {
            break;
        }
    }
    partial
}

/// Solve a body conjunction seminaively: one evaluation per pivot
/// position, with the pivot pattern restricted to the delta.
pub fn solve_seminaive(store: &GraphStore, delta: &DeltaSet, body: &[Pattern]) -> Vec<Bindings> {
    let mut rows = Vec::new();
    for pivot in 0..body.len() {
        let mut partial = vec![Bindings::new()];
        for (i, pattern) in body.iter().enumerate() {
            partial = if i == pivot {
                extend_with_delta(delta, pattern, partial)
            } else {
                extend_with_store(store, pattern, partial)
            };
            if partial.is_empty() {
                break;
            }
        }
        rows.extend(partial);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use parajudica_core::Sid;

    fn sid(n: &str) -> Sid {
        Sid::new(9, n)
    }

    #[test]
    fn test_unify_binds_variables() {
        let pattern = Pattern::data(Term::var("?c"), Term::Sid(sid("hasFacet")), Term::var("?f"));
        let quad = Quad::data(sid("t"), sid("hasFacet"), sid("Healthcare"));
        let bindings = unify(&pattern, &quad, &Bindings::new()).unwrap();
        assert_eq!(bindings["?c"], TermValue::Ref(sid("t")));
        assert_eq!(bindings["?f"], TermValue::Ref(sid("Healthcare")));
    }

    #[test]
    fn test_unify_scoped_binds_scope_var() {
        let pattern = Pattern::scoped(Term::var("?c"), Term::Sid(sid("hasLabel")), Term::Sid(sid("PHI")));
        let quad = Quad::scoped(sid("t"), sid("hasLabel"), sid("PHI"), sid("research"));
        let bindings = unify(&pattern, &quad, &Bindings::new()).unwrap();
        assert_eq!(bindings[SCOPE_VAR], TermValue::Ref(sid("research")));
    }

    #[test]
    fn test_unify_scoped_rejects_data_quads() {
        let pattern = Pattern::scoped(Term::var("?c"), Term::Sid(sid("hasLabel")), Term::var("?l"));
        let quad = Quad::data(sid("t"), sid("hasLabel"), sid("PHI"));
        assert!(unify(&pattern, &quad, &Bindings::new()).is_none());
    }

    #[test]
    fn test_solve_join() {
        let mut store = GraphStore::new();
        store.insert(Quad::data(sid("t"), sid("hasFacet"), sid("Healthcare")));
        store.insert(Quad::data(sid("t"), sid("hasFacet"), sid("Individual")));
        store.insert(Quad::data(sid("u"), sid("hasFacet"), sid("Individual")));

        let body = vec![
            Pattern::data(Term::var("?c"), Term::Sid(sid("hasFacet")), Term::Sid(sid("Healthcare"))),
            Pattern::data(Term::var("?c"), Term::Sid(sid("hasFacet")), Term::Sid(sid("Individual"))),
        ];
        let rows = solve(&store, &body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["?c"], TermValue::Ref(sid("t")));
    }

    #[test]
    fn test_solve_seminaive_requires_delta_use() {
        let mut store = GraphStore::new();
        store.insert(Quad::data(sid("t"), sid("hasFacet"), sid("Healthcare")));
        let body = vec![Pattern::data(
            Term::var("?c"),
            Term::Sid(sid("hasFacet")),
            Term::var("?f"),
        )];

        // Empty delta: no derivations even though the store matches.
        let rows = solve_seminaive(&store, &DeltaSet::new(), &body);
        assert!(rows.is_empty());

        let delta = DeltaSet::from_quads([Quad::data(sid("t"), sid("hasFacet"), sid("Healthcare"))]);
        let rows = solve_seminaive(&store, &delta, &body);
        assert_eq!(rows.len(), 1);
    }
}
