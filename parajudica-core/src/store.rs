//! In-memory quad store with pattern matching and epoch deltas.
//!
//! The store is append-only: inference never retracts, so an epoch is just
//! an insertion watermark and a delta is a contiguous slice of the quad
//! vector. Duplicate detection is O(1) via a hash set; pattern matches are
//! served from predicate-keyed indexes.

use crate::error::{Error, Result};
use crate::quad::{Graph, Quad, QuadPattern};
use crate::sid::Sid;
use crate::value::TermValue;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

/// An insertion watermark, used for quiescence detection and seminaive
/// delta restriction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Epoch(usize);

impl Epoch {
    /// The epoch before any insertion.
    pub const ZERO: Epoch = Epoch(0);
}

/// The quad store.
#[derive(Debug, Default)]
pub struct GraphStore {
    quads: Vec<Quad>,
    seen: HashSet<Quad>,
    /// Index by predicate
    by_p: HashMap<Sid, Vec<usize>>,
    /// Index by (subject, predicate)
    by_sp: HashMap<(Sid, Sid), Vec<usize>>,
    /// Index by (predicate, object)
    by_po: HashMap<(Sid, TermValue), Vec<usize>>,
}

impl GraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a quad. Returns true if it was new; re-inserting an existing
    /// quad is a no-op.
    pub fn insert(&mut self, quad: Quad) -> bool {
        if self.seen.contains(&quad) {
            return false;
        }
        self.seen.insert(quad.clone());

        let idx = self.quads.len();
        self.by_p.entry(quad.p.clone()).or_default().push(idx);
        self.by_sp
            .entry((quad.s.clone(), quad.p.clone()))
            .or_default()
            .push(idx);
        self.by_po
            .entry((quad.p.clone(), quad.o.clone()))
            .or_default()
            .push(idx);
        self.quads.push(quad);
        true
    }

    /// Insert every quad from an iterator; returns how many were new.
    pub fn extend(&mut self, quads: impl IntoIterator<Item = Quad>) -> usize {
        quads.into_iter().filter(|q| self.insert(q.clone())).count()
    }

    /// Check membership without mutating.
    pub fn contains(&self, quad: &Quad) -> bool {
        self.seen.contains(quad)
    }

    /// Number of distinct quads.
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Iterate over all quads in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Current insertion watermark.
    pub fn snapshot(&self) -> Epoch {
        Epoch(self.quads.len())
    }

    /// Quads inserted since the given epoch.
    pub fn since(&self, epoch: Epoch) -> &[Quad] {
        &self.quads[epoch.0.min(self.quads.len())..]
    }

    /// All quads matching the pattern, in no guaranteed order.
    ///
    /// The most selective available index serves the scan: (s,p), then
    /// (p,o), then p alone, then a full scan when the predicate is a
    /// wildcard.
    pub fn matching<'a>(&'a self, pattern: &'a QuadPattern) -> Box<dyn Iterator<Item = &'a Quad> + 'a> {
        let indices: Option<&Vec<usize>> = match (&pattern.s, &pattern.p, &pattern.o) {
            (Some(s), Some(p), _) => self.by_sp.get(&(s.clone(), p.clone())),
            (_, Some(p), Some(o)) => self.by_po.get(&(p.clone(), o.clone())),
            (_, Some(p), None) => self.by_p.get(p),
            _ => {
                return Box::new(self.quads.iter().filter(move |q| pattern.matches(q)));
            }
        };
        match indices {
            Some(indices) => Box::new(
                indices
                    .iter()
                    .map(move |&i| &self.quads[i])
                    .filter(move |q| pattern.matches(q)),
            ),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Objects of all `(s, p, ·)` quads in the given graph.
    pub fn objects<'a>(&'a self, s: &Sid, p: &Sid, g: &'a Graph) -> impl Iterator<Item = &'a TermValue> + 'a {
        let key = (s.clone(), p.clone());
        self.by_sp
            .get(&key)
            .into_iter()
            .flatten()
            .map(move |&i| &self.quads[i])
            .filter(move |q| &q.g == g)
            .map(|q| &q.o)
    }

    /// Serialize the store to canonical JSON: quads sorted by their total
    /// order, so two equal stores produce byte-identical output.
    pub fn to_canonical_json(&self) -> Result<String> {
        let mut sorted: Vec<&Quad> = self.quads.iter().collect();
        sorted.sort();
        Ok(serde_json::to_string(&sorted)?)
    }

    /// Rebuild a store from canonical JSON.
    pub fn from_canonical_json(json: &str) -> Result<Self> {
        let quads: Vec<Quad> = serde_json::from_str(json)?;
        let mut store = GraphStore::new();
        store.extend(quads);
        Ok(store)
    }
}

/// Validate that `pj:contains` forms a forest: every container has at most
/// one parent, and no containment cycles exist.
///
/// A violation is a configuration error reported with the offending
/// containers, per the load-phase failure policy.
pub fn validate_containment(store: &GraphStore) -> Result<()> {
    use parajudica_vocab::{namespaces, predicates};
    let contains = Sid::new(namespaces::PJ, predicates::CONTAINS);

    let mut parent: HashMap<Sid, Sid> = HashMap::new();
    for quad in store.matching(&QuadPattern::with_p(contains.clone())) {
        let child = match quad.o.as_ref_sid() {
            Some(c) => c.clone(),
            None => {
                return Err(Error::InvalidContainment(format!(
                    "containment object is not a container reference: {quad}"
                )))
            }
        };
        if let Some(prev) = parent.get(&child) {
            if prev != &quad.s {
                return Err(Error::InvalidContainment(format!(
                    "container {child} has two parents: {prev} and {}",
                    quad.s
                )));
            }
        }
        parent.insert(child, quad.s.clone());
    }

    // Walk each chain to the root; a chain longer than the map has a cycle.
    for start in parent.keys() {
        let mut cursor = start;
        let mut hops = 0usize;
        while let Some(next) = parent.get(cursor) {
            cursor = next;
            hops += 1;
            if hops > parent.len() {
                return Err(Error::InvalidContainment(format!(
                    "containment cycle through {start}"
                )));
            }
        }
    }
    Ok(())
}
