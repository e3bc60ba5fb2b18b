//! Declarative rule model.
//!
//! Framework bundles describe their derivations with three rule kinds:
//!
//! - [`RuleDef::Implication`]: a conjunction of triple patterns implies a
//!   set of head templates, once per distinct variable binding.
//! - [`RuleDef::Conditional`]: an implication whose firing also requires a
//!   predicate over the anchor container's children, evaluated against the
//!   current store.
//! - [`RuleDef::Propagation`]: a label spreads along one or more
//!   relationship axes, staying inside the scope it was derived in.
//!
//! Rules are data: the compiler (see `compile`) lowers all three kinds to
//! a uniform match-and-emit form.

use parajudica_core::{Graph, GraphStore, QuadPattern, Sid, TermValue};
use parajudica_vocab::{namespaces, predicates};
use std::sync::Arc;

/// A term in a pattern position: a variable, a node reference, or a
/// literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Variable binding (e.g., "?container")
    Var(Arc<str>),
    /// Constant node reference
    Sid(Sid),
    /// Constant literal value
    Value(TermValue),
}

impl Term {
    /// Create a variable term
    pub fn var(name: &str) -> Self {
        Term::Var(Arc::from(name))
    }

    /// Check if this term is a variable
    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Get the variable name if this is a variable
    pub fn var_name(&self) -> Option<&str> {
        match self {
            Term::Var(name) => Some(name.as_ref()),
            _ => None,
        }
    }
}

impl From<Sid> for Term {
    fn from(sid: Sid) -> Self {
        Term::Sid(sid)
    }
}

/// Reserved variable name bound to the scope a rule is firing in.
///
/// Every scope-graph pattern in a rule uses this one variable, so a single
/// firing reads and writes exactly one scope. Queries may use other
/// variables (or constants) in the graph position.
pub const SCOPE_VAR: &str = "?scope";

/// Which graph a pattern addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternGraph {
    /// The shared data graph (structure, facets, membership)
    Data,
    /// A scope graph; the term unifies with the scope's SID
    Scope(Term),
}

/// A single triple pattern with its graph position.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub graph: PatternGraph,
    pub s: Term,
    pub p: Term,
    pub o: Term,
}

impl Pattern {
    /// Pattern over the shared data graph
    pub fn data(s: impl Into<Term>, p: impl Into<Term>, o: impl Into<Term>) -> Self {
        Self {
            graph: PatternGraph::Data,
            s: s.into(),
            p: p.into(),
            o: o.into(),
        }
    }

    /// Pattern over the rule's scope graph (graph term is [`SCOPE_VAR`])
    pub fn scoped(s: impl Into<Term>, p: impl Into<Term>, o: impl Into<Term>) -> Self {
        Self {
            graph: PatternGraph::Scope(Term::var(SCOPE_VAR)),
            s: s.into(),
            p: p.into(),
            o: o.into(),
        }
    }
}

impl From<&str> for Term {
    /// Bare strings are variables when they start with `?`, otherwise a
    /// malformed term; rule bundles are authored in code so this keeps the
    /// constructors readable.
    fn from(s: &str) -> Self {
        debug_assert!(s.starts_with('?'), "bare term {s:?} is not a variable");
        Term::var(s)
    }
}

/// The four propagation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Parent to children
    Inward,
    /// Children to parent
    Outward,
    /// Sibling to sibling (shared parent)
    Peer,
    /// Across a joinable edge
    Joinable,
}

impl Axis {
    /// Short name used in compiled rule names and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Inward => "inward",
            Axis::Outward => "outward",
            Axis::Peer => "peer",
            Axis::Joinable => "joinable",
        }
    }
}

/// A monotone predicate over a container's children.
///
/// Conditions are evaluated against the current store, and only positive
/// forms exist: facts only accumulate, so a condition that holds keeps
/// holding and the fixed point stays monotone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildCondition {
    /// Some contained child carries the facet
    AnyChildFacet(Sid),
    /// The container has children and every one carries the facet
    AllChildrenFacet(Sid),
}

impl ChildCondition {
    /// Evaluate the condition for a container against the store.
    pub fn holds(&self, store: &GraphStore, container: &Sid) -> bool {
        let contains = Sid::new(namespaces::PJ, predicates::CONTAINS);
        let has_facet = Sid::new(namespaces::PJ, predicates::HAS_FACET);

        let children: Vec<&Sid> = store
            .objects(container, &contains, &Graph::Data)
            .filter_map(|o| o.as_ref_sid())
            .collect();

        let child_has = |child: &Sid, facet: &Sid| {
            let pat = QuadPattern {
                s: Some(child.clone()),
                p: Some(has_facet.clone()),
                o: Some(TermValue::Ref(facet.clone())),
                g: Some(Graph::Data),
            };
            let found = store.matching(&pat).next().is_some();
            found
        };

        match self {
            ChildCondition::AnyChildFacet(facet) => {
                children.iter().any(|c| child_has(c, facet))
            }
            ChildCondition::AllChildrenFacet(facet) => {
                !children.is_empty() && children.iter().all(|c| child_has(c, facet))
            }
        }
    }

    /// The facet this condition inspects.
    pub fn facet(&self) -> &Sid {
        match self {
            ChildCondition::AnyChildFacet(f) | ChildCondition::AllChildrenFacet(f) => f,
        }
    }
}

/// A declarative rule as authored in a framework bundle.
#[derive(Debug, Clone)]
pub enum RuleDef {
    /// Body conjunction implies head templates.
    Implication {
        name: Arc<str>,
        body: Vec<Pattern>,
        head: Vec<Pattern>,
    },
    /// Implication gated by a child condition on the anchor variable.
    Conditional {
        name: Arc<str>,
        body: Vec<Pattern>,
        anchor: Arc<str>,
        condition: ChildCondition,
        head: Vec<Pattern>,
    },
    /// Spread a label along the given axes, scope-locally.
    Propagation {
        name: Arc<str>,
        label: Sid,
        axes: Vec<Axis>,
    },
}

impl RuleDef {
    /// The rule's name, used in diagnostics and error messages.
    pub fn name(&self) -> &str {
        match self {
            RuleDef::Implication { name, .. }
            | RuleDef::Conditional { name, .. }
            | RuleDef::Propagation { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parajudica_core::Quad;
    use parajudica_vocab::facets;

    fn app(n: &str) -> Sid {
        Sid::new(namespaces::APP, n)
    }

    fn pj(n: &str) -> Sid {
        Sid::new(namespaces::PJ, n)
    }

    fn sdc(n: &str) -> Sid {
        Sid::new(namespaces::SDC, n)
    }

    #[test]
    fn test_any_child_facet() {
        let mut store = GraphStore::new();
        store.insert(Quad::data(app("t"), pj(predicates::CONTAINS), app("f1")));
        store.insert(Quad::data(app("t"), pj(predicates::CONTAINS), app("f2")));
        store.insert(Quad::data(
            app("f2"),
            pj(predicates::HAS_FACET),
            sdc(facets::MOMENT_DATA),
        ));

        let cond = ChildCondition::AnyChildFacet(sdc(facets::MOMENT_DATA));
        assert!(cond.holds(&store, &app("t")));
        assert!(!cond.holds(&store, &app("f1")));
    }

    #[test]
    fn test_all_children_facet_requires_children() {
        let store = GraphStore::new();
        let cond = ChildCondition::AllChildrenFacet(sdc(facets::MOMENT_DATA));
        assert!(!cond.holds(&store, &app("empty")));
    }

    #[test]
    fn test_all_children_facet() {
        let mut store = GraphStore::new();
        store.insert(Quad::data(app("t"), pj(predicates::CONTAINS), app("f1")));
        store.insert(Quad::data(
            app("f1"),
            pj(predicates::HAS_FACET),
            sdc(facets::INDIVIDUAL),
        ));
        let cond = ChildCondition::AllChildrenFacet(sdc(facets::INDIVIDUAL));
        assert!(cond.holds(&store, &app("t")));

        store.insert(Quad::data(app("t"), pj(predicates::CONTAINS), app("f2")));
        assert!(!cond.holds(&store, &app("t")));
    }
}
