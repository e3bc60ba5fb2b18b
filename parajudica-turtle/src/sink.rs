//! The narrow loader seam.
//!
//! The parser emits through `TripleSink`; the engine only ever sees
//! `GraphStore::insert`. Any other triple syntax can sit behind the same
//! trait.

use parajudica_core::{GraphStore, Quad, Sid, SidInterner, TermValue};

/// Receiver for parsed triples.
///
/// Loader-asserted facts are scope-independent, so the sink receives
/// plain triples; scope qualification only ever comes from inference.
pub trait TripleSink {
    /// A prefix declaration was parsed
    fn prefix(&mut self, label: &str, iri: &str);

    /// A triple was parsed
    fn triple(&mut self, s: Sid, p: Sid, o: TermValue);
}

/// Sink inserting into a `GraphStore`'s data graph, interning names.
pub struct StoreSink<'a> {
    store: &'a mut GraphStore,
    interner: SidInterner,
    inserted: usize,
}

impl<'a> StoreSink<'a> {
    /// Create a sink over a store
    pub fn new(store: &'a mut GraphStore) -> Self {
        Self {
            store,
            interner: SidInterner::new(),
            inserted: 0,
        }
    }

    /// Number of distinct triples inserted through this sink
    pub fn inserted(&self) -> usize {
        self.inserted
    }
}

impl TripleSink for StoreSink<'_> {
    fn prefix(&mut self, _label: &str, _iri: &str) {}

    fn triple(&mut self, s: Sid, p: Sid, o: TermValue) {
        let s = self.interner.intern(s.namespace_code, s.name_str());
        let p = self.interner.intern(p.namespace_code, p.name_str());
        let o = match o {
            TermValue::Ref(sid) => {
                TermValue::Ref(self.interner.intern(sid.namespace_code, sid.name_str()))
            }
            other => other,
        };
        if self.store.insert(Quad::data(s, p, o)) {
            self.inserted += 1;
        }
    }
}

/// Sink collecting triples into a vector (tests and tooling).
#[derive(Debug, Default)]
pub struct CollectorSink {
    pub prefixes: Vec<(String, String)>,
    pub triples: Vec<(Sid, Sid, TermValue)>,
}

impl TripleSink for CollectorSink {
    fn prefix(&mut self, label: &str, iri: &str) {
        self.prefixes.push((label.to_string(), iri.to_string()));
    }

    fn triple(&mut self, s: Sid, p: Sid, o: TermValue) {
        self.triples.push((s, p, o));
    }
}
