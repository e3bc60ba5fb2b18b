//! K-anonymity analysis.
//!
//! For every table with quasi-identifier fields, the analyzer computes the
//! anonymity-set size k (declared, or the minimum equivalence-class size
//! over sample rows) and emits, per scope the table belongs to:
//!
//! - `(table, pj:kAnonymityAnalysis, k)`
//! - a skolemized `pj:KAnonymityResult` node carrying the container and k
//! - per registered framework policy, `HighReidentificationRisk` when k is
//!   below the framework's threshold, or `AcceptableDeidentification` when
//!   k meets it and the singling-out check (where the policy applies one)
//!   passes.
//!
//! The analyzer runs inside every fixed-point round. Its inputs - declared
//! k, sample rows, and the identifier facets, which rule heads are
//! forbidden to derive - are stable within a run, so the pass is
//! idempotent and independent of rule firing order.

use hashbrown::HashMap;
use parajudica_core::{Graph, GraphStore, Quad, QuadPattern, Sid, TermValue};
use parajudica_vocab::{facets, kinds, labels, namespaces, predicates};
use std::sync::Arc;

use crate::skolem::skolem_node;

/// Rule id used for skolemizing result nodes.
const ANALYSIS_RULE_ID: &str = "k-anonymity";

/// A framework's registered k-anonymity thresholds.
#[derive(Debug, Clone)]
pub struct KPolicy {
    /// Framework the labels are minted for
    pub framework: Arc<str>,
    /// Namespace the labels are minted in
    pub namespace: u16,
    /// Minimum acceptable anonymity-set size
    pub min_k: i64,
    /// Whether a unique-valued field defeats deidentification acceptance
    pub singling_out: bool,
}

/// The k-anonymity analyzer, parameterized by the loaded policies.
#[derive(Debug, Default)]
pub struct KAnonymityAnalyzer {
    policies: Vec<KPolicy>,
}

struct Vocab {
    rdf_type: Sid,
    table: Sid,
    contains: Sid,
    has_facet: Sid,
    has_label: Sid,
    includes: Sid,
    k_anonymity: Sid,
    k_analysis: Sid,
    sample_row: Sid,
    container: Sid,
    k: Sid,
    result_kind: Sid,
    indirect: Sid,
    internal: Sid,
    unique: Sid,
}

impl Vocab {
    fn new() -> Self {
        Self {
            rdf_type: Sid::new(namespaces::RDF, predicates::RDF_TYPE),
            table: Sid::new(namespaces::PJ, kinds::TABLE),
            contains: Sid::new(namespaces::PJ, predicates::CONTAINS),
            has_facet: Sid::new(namespaces::PJ, predicates::HAS_FACET),
            has_label: Sid::new(namespaces::PJ, predicates::HAS_LABEL),
            includes: Sid::new(namespaces::PJ, predicates::INCLUDES),
            k_anonymity: Sid::new(namespaces::PJ, predicates::K_ANONYMITY),
            k_analysis: Sid::new(namespaces::PJ, predicates::K_ANONYMITY_ANALYSIS),
            sample_row: Sid::new(namespaces::PJ, predicates::SAMPLE_ROW),
            container: Sid::new(namespaces::PJ, predicates::CONTAINER),
            k: Sid::new(namespaces::PJ, predicates::K),
            result_kind: Sid::new(namespaces::PJ, kinds::K_ANONYMITY_RESULT),
            indirect: Sid::new(namespaces::SDC, facets::INDIRECT_IDENTIFIER),
            internal: Sid::new(namespaces::SDC, facets::INTERNAL_IDENTIFIER),
            unique: Sid::new(namespaces::SDC, facets::UNIQUE_IDENTIFIER),
        }
    }
}

impl KAnonymityAnalyzer {
    /// Create an analyzer for the given policies.
    pub fn new(policies: Vec<KPolicy>) -> Self {
        Self { policies }
    }

    /// Run the analysis over the store, returning candidate quads.
    ///
    /// The caller deduplicates against the store; re-running on an already
    /// analyzed store contributes nothing new.
    pub fn run(&self, store: &GraphStore) -> Vec<Quad> {
        let v = Vocab::new();
        let mut out = Vec::new();

        for table in self.tables(store, &v) {
            let fields = self.children(store, &v, &table);
            let rows = self.sample_rows(store, &v, &table);

            // Fields whose sampled values never repeat are unique-valued;
            // assert the facet so downstream singling-out checks see it.
            let mut unique_fields: Vec<Sid> = fields
                .iter()
                .filter(|f| self.has_facet(store, &v, f, &v.unique))
                .cloned()
                .collect();
            if rows.len() >= 2 {
                for field in &fields {
                    if unique_fields.contains(field) {
                        continue;
                    }
                    if self.values_all_distinct(store, &rows, field) {
                        out.push(Quad::data(
                            field.clone(),
                            v.has_facet.clone(),
                            v.unique.clone(),
                        ));
                        unique_fields.push(field.clone());
                    }
                }
            }

            let quasi: Vec<Sid> = fields
                .iter()
                .filter(|f| {
                    self.has_facet(store, &v, f, &v.indirect)
                        && !self.has_facet(store, &v, f, &v.internal)
                })
                .cloned()
                .collect();
            if quasi.is_empty() {
                continue;
            }

            let Some(k) = self.anonymity_set_size(store, &v, &table, &rows, &quasi) else {
                continue;
            };
            let singled_out = !unique_fields.is_empty();

            for scope in self.scopes_of(store, &v, &table) {
                out.push(Quad::scoped(
                    table.clone(),
                    v.k_analysis.clone(),
                    k,
                    scope.clone(),
                ));

                let result = skolem_node(ANALYSIS_RULE_ID, &[&scope, &table]);
                out.push(Quad::scoped(
                    result.clone(),
                    v.rdf_type.clone(),
                    v.result_kind.clone(),
                    scope.clone(),
                ));
                out.push(Quad::scoped(
                    result.clone(),
                    v.container.clone(),
                    table.clone(),
                    scope.clone(),
                ));
                out.push(Quad::scoped(result, v.k.clone(), k, scope.clone()));

                for policy in &self.policies {
                    if k < policy.min_k {
                        out.push(Quad::scoped(
                            table.clone(),
                            v.has_label.clone(),
                            Sid::new(policy.namespace, labels::HIGH_REIDENTIFICATION_RISK),
                            scope.clone(),
                        ));
                    } else if !(policy.singling_out && singled_out) {
                        out.push(Quad::scoped(
                            table.clone(),
                            v.has_label.clone(),
                            Sid::new(policy.namespace, labels::ACCEPTABLE_DEIDENTIFICATION),
                            scope.clone(),
                        ));
                    }
                }
            }
        }
        out
    }

    fn tables(&self, store: &GraphStore, v: &Vocab) -> Vec<Sid> {
        let pat = QuadPattern {
            p: Some(v.rdf_type.clone()),
            o: Some(TermValue::Ref(v.table.clone())),
            g: Some(Graph::Data),
            ..Default::default()
        };
        store.matching(&pat).map(|q| q.s.clone()).collect()
    }

    fn children(&self, store: &GraphStore, v: &Vocab, table: &Sid) -> Vec<Sid> {
        store
            .objects(table, &v.contains, &Graph::Data)
            .filter_map(|o| o.as_ref_sid())
            .cloned()
            .collect()
    }

    fn sample_rows(&self, store: &GraphStore, v: &Vocab, table: &Sid) -> Vec<Sid> {
        store
            .objects(table, &v.sample_row, &Graph::Data)
            .filter_map(|o| o.as_ref_sid())
            .cloned()
            .collect()
    }

    fn scopes_of(&self, store: &GraphStore, v: &Vocab, table: &Sid) -> Vec<Sid> {
        let pat = QuadPattern {
            p: Some(v.includes.clone()),
            o: Some(TermValue::Ref(table.clone())),
            g: Some(Graph::Data),
            ..Default::default()
        };
        store.matching(&pat).map(|q| q.s.clone()).collect()
    }

    fn has_facet(&self, store: &GraphStore, v: &Vocab, container: &Sid, facet: &Sid) -> bool {
        let pat = QuadPattern {
            s: Some(container.clone()),
            p: Some(v.has_facet.clone()),
            o: Some(TermValue::Ref(facet.clone())),
            g: Some(Graph::Data),
        };
        let found = store.matching(&pat).next().is_some();
        found
    }

    fn cell(&self, store: &GraphStore, row: &Sid, field: &Sid) -> Option<TermValue> {
        store.objects(row, field, &Graph::Data).next().cloned()
    }

    fn values_all_distinct(&self, store: &GraphStore, rows: &[Sid], field: &Sid) -> bool {
        let mut seen: Vec<TermValue> = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(value) = self.cell(store, row, field) else {
                return false;
            };
            if seen.contains(&value) {
                return false;
            }
            seen.push(value);
        }
        true
    }

    /// The anonymity-set size: declared k wins over computed.
    fn anonymity_set_size(
        &self,
        store: &GraphStore,
        v: &Vocab,
        table: &Sid,
        rows: &[Sid],
        quasi: &[Sid],
    ) -> Option<i64> {
        if let Some(declared) = store
            .objects(table, &v.k_anonymity, &Graph::Data)
            .find_map(|o| o.as_long())
        {
            return Some(declared);
        }
        if rows.is_empty() {
            return None;
        }
        let mut classes: HashMap<Vec<Option<TermValue>>, i64> = HashMap::new();
        for row in rows {
            let key: Vec<Option<TermValue>> =
                quasi.iter().map(|f| self.cell(store, row, f)).collect();
            *classes.entry(key).or_insert(0) += 1;
        }
        classes.values().min().copied()
    }
}
