//! Predicate-indexed delta set for seminaive evaluation.
//!
//! Each round's newly inserted quads are indexed by predicate so a rule
//! can (a) cheaply decide whether any of its dependencies changed and
//! (b) enumerate only the new quads for its pivot pattern.

use hashbrown::{HashMap, HashSet};
use parajudica_core::{Quad, Sid};

/// The quads added in the previous round, indexed by predicate.
#[derive(Debug, Default)]
pub struct DeltaSet {
    quads: Vec<Quad>,
    by_p: HashMap<Sid, Vec<usize>>,
    predicates: HashSet<Sid>,
}

impl DeltaSet {
    /// Create an empty delta set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a delta set from a quad iterator
    pub fn from_quads(quads: impl IntoIterator<Item = Quad>) -> Self {
        let mut delta = Self::new();
        for quad in quads {
            delta.push(quad);
        }
        delta
    }

    /// Add a quad to the delta set
    pub fn push(&mut self, quad: Quad) {
        let idx = self.quads.len();
        self.by_p.entry(quad.p.clone()).or_default().push(idx);
        self.predicates.insert(quad.p.clone());
        self.quads.push(quad);
    }

    /// All quads with a specific predicate
    pub fn get_by_p(&self, p: &Sid) -> impl Iterator<Item = &Quad> {
        self.by_p
            .get(p)
            .into_iter()
            .flat_map(|indices| indices.iter().map(|&i| &self.quads[i]))
    }

    /// Iterate over all quads
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Number of quads
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// The set of predicates present in this delta
    pub fn predicates(&self) -> &HashSet<Sid> {
        &self.predicates
    }

    /// Whether any of the given predicates changed this round.
    pub fn touches(&self, predicates: &HashSet<Sid>) -> bool {
        predicates.iter().any(|p| self.predicates.contains(p))
    }
}
