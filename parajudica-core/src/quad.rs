//! Scope-tagged assertions.
//!
//! A `Quad` is a triple plus a graph tag. Structural facts (containment,
//! facets, joinability, scope membership) live in the shared `Data` graph;
//! derived labels and k-anonymity results are qualified by the scope they
//! were derived in and live in that scope's graph.

use crate::sid::Sid;
use crate::value::TermValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The graph a quad is asserted in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Graph {
    /// Shared, scope-independent graph
    Data,
    /// Scope-qualified graph, tagged with the scope's SID
    Scope(Sid),
}

impl Graph {
    /// Get the scope SID if this is a scope graph
    pub fn scope(&self) -> Option<&Sid> {
        match self {
            Graph::Scope(sid) => Some(sid),
            Graph::Data => None,
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Graph::Data => write!(f, "data"),
            Graph::Scope(sid) => write!(f, "{sid}"),
        }
    }
}

/// A single assertion: subject, predicate, object, graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quad {
    pub s: Sid,
    pub p: Sid,
    pub o: TermValue,
    pub g: Graph,
}

impl Quad {
    /// Create a quad in the shared data graph
    pub fn data(s: Sid, p: Sid, o: impl Into<TermValue>) -> Self {
        Self {
            s,
            p,
            o: o.into(),
            g: Graph::Data,
        }
    }

    /// Create a quad in a scope graph
    pub fn scoped(s: Sid, p: Sid, o: impl Into<TermValue>, scope: Sid) -> Self {
        Self {
            s,
            p,
            o: o.into(),
            g: Graph::Scope(scope),
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} @ {}", self.s, self.p, self.o, self.g)
    }
}

/// A match pattern over quads: each position is concrete or a wildcard.
///
/// Used by `GraphStore::matching`; rule variables are resolved to concrete
/// values (or left as wildcards) by the caller before matching.
#[derive(Clone, Debug, Default)]
pub struct QuadPattern {
    pub s: Option<Sid>,
    pub p: Option<Sid>,
    pub o: Option<TermValue>,
    pub g: Option<Graph>,
}

impl QuadPattern {
    /// Pattern matching any quad with the given predicate
    pub fn with_p(p: Sid) -> Self {
        Self {
            p: Some(p),
            ..Default::default()
        }
    }

    /// Check whether a quad satisfies every concrete position.
    pub fn matches(&self, quad: &Quad) -> bool {
        if let Some(s) = &self.s {
            if s != &quad.s {
                return false;
            }
        }
        if let Some(p) = &self.p {
            if p != &quad.p {
                return false;
            }
        }
        if let Some(o) = &self.o {
            if o != &quad.o {
                return false;
            }
        }
        if let Some(g) = &self.g {
            if g != &quad.g {
                return false;
            }
        }
        true
    }
}
