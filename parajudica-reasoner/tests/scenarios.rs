//! End-to-end inference scenarios over the medical example dataset.
//!
//! The dataset mirrors the canonical walkthrough: patient tables in a
//! healthcare context, a providers table joinable with encounters, and
//! two governance scopes (HR sees only the providers table, Research
//! sees everything).

use parajudica_core::{Graph, GraphStore, Quad, QuadPattern, Sid, TermValue};
use parajudica_reasoner::{infer, FrameworkSet};
use parajudica_vocab::{facets, kinds, labels, namespaces, predicates};

fn app(n: &str) -> Sid {
    Sid::new(namespaces::APP, n)
}

fn pj(n: &str) -> Sid {
    Sid::new(namespaces::PJ, n)
}

fn sdc(n: &str) -> Sid {
    Sid::new(namespaces::SDC, n)
}

fn table(store: &mut GraphStore, name: &str, table_facets: &[&str]) {
    store.insert(Quad::data(
        app(name),
        Sid::new(namespaces::RDF, predicates::RDF_TYPE),
        pj(kinds::TABLE),
    ));
    for f in table_facets {
        store.insert(Quad::data(app(name), pj(predicates::HAS_FACET), sdc(f)));
    }
}

fn joinable(store: &mut GraphStore, a: &str, b: &str) {
    store.insert(Quad::data(app(a), pj(predicates::JOINABLE_WITH), app(b)));
}

fn scope(store: &mut GraphStore, name: &str, members: &[&str]) {
    for m in members {
        store.insert(Quad::data(app(name), pj(predicates::INCLUDES), app(m)));
    }
}

/// The shared medical dataset. `with_join` controls the
/// ProvidersInfo-PatientEncounters joinable edge (scenario 3 ablates it).
fn medical_dataset(with_join: bool) -> GraphStore {
    let mut store = GraphStore::new();
    table(
        &mut store,
        "PatientInfo",
        &[
            facets::HEALTHCARE,
            facets::INDIVIDUAL,
            facets::DIRECT_IDENTIFIER,
        ],
    );
    table(
        &mut store,
        "PatientEncounters",
        &[facets::HEALTHCARE, facets::INDIVIDUAL],
    );
    table(
        &mut store,
        "PatientTreatments",
        &[facets::HEALTHCARE, facets::INDIVIDUAL],
    );
    table(
        &mut store,
        "ProvidersInfo",
        &[facets::INDIVIDUAL, facets::DIRECT_IDENTIFIER],
    );
    if with_join {
        joinable(&mut store, "ProvidersInfo", "PatientEncounters");
    }
    joinable(&mut store, "PatientTreatments", "PatientInfo");

    scope(&mut store, "HR", &["ProvidersInfo"]);
    scope(
        &mut store,
        "Research",
        &[
            "PatientInfo",
            "PatientEncounters",
            "PatientTreatments",
            "ProvidersInfo",
        ],
    );
    store
}

fn run(frameworks: &[&str], mut store: GraphStore) -> GraphStore {
    let names: Vec<String> = frameworks.iter().map(|s| s.to_string()).collect();
    let set = FrameworkSet::from_names(&names).unwrap();
    let diagnostics = infer(&mut store, &set).unwrap();
    assert!(diagnostics.converged, "inference did not converge");
    store
}

fn has_label(store: &GraphStore, container: &str, ns: u16, label: &str, in_scope: &str) -> bool {
    store.contains(&Quad::scoped(
        app(container),
        pj(predicates::HAS_LABEL),
        Sid::new(ns, label),
        app(in_scope),
    ))
}

#[test]
fn scenario_context_dependence() {
    let store = run(&["hipaa", "gdpr"], medical_dataset(true));

    // HR sees only ProvidersInfo: identifiable, but not health data.
    assert!(!has_label(&store, "ProvidersInfo", namespaces::HIPAA, labels::PHI, "HR"));

    // In Research the same table joins into the healthcare graph.
    assert!(has_label(
        &store,
        "ProvidersInfo",
        namespaces::HIPAA,
        labels::PHI,
        "Research"
    ));
    assert!(has_label(
        &store,
        "ProvidersInfo",
        namespaces::GDPR,
        labels::PERSONAL_DATA,
        "Research"
    ));
}

#[test]
fn scenario_framework_divergence_on_joined_data() {
    let store = run(&["hipaa", "gdpr"], medical_dataset(true));

    // HIPAA spreads PHI across the join; GDPR's PersonalData declares no
    // joinable axis.
    assert!(has_label(
        &store,
        "ProvidersInfo",
        namespaces::HIPAA,
        labels::PHI,
        "Research"
    ));
    assert!(has_label(
        &store,
        "ProvidersInfo",
        namespaces::GDPR,
        labels::PERSONAL_DATA,
        "Research"
    ));
    assert!(!has_label(
        &store,
        "ProvidersInfo",
        namespaces::GDPR,
        labels::SPECIAL_CATEGORY_DATA,
        "Research"
    ));

    assert!(has_label(
        &store,
        "PatientTreatments",
        namespaces::HIPAA,
        labels::PHI,
        "Research"
    ));
    assert!(has_label(
        &store,
        "PatientTreatments",
        namespaces::GDPR,
        labels::PERSONAL_DATA,
        "Research"
    ));
    assert!(has_label(
        &store,
        "PatientTreatments",
        namespaces::GDPR,
        labels::SPECIAL_CATEGORY_DATA,
        "Research"
    ));
}

#[test]
fn scenario_propagation_ablation() {
    let store = run(&["hipaa", "gdpr"], medical_dataset(false));

    // Without the join, nothing carries identifiability into
    // PatientEncounters and nothing carries PHI back out.
    assert!(!has_label(
        &store,
        "ProvidersInfo",
        namespaces::HIPAA,
        labels::PHI,
        "Research"
    ));
    assert!(!has_label(
        &store,
        "PatientEncounters",
        namespaces::HIPAA,
        labels::PHI,
        "Research"
    ));

    // GDPR output is unchanged by the ablation.
    assert!(has_label(
        &store,
        "ProvidersInfo",
        namespaces::GDPR,
        labels::PERSONAL_DATA,
        "Research"
    ));

    // PatientInfo is PHI on its own facets either way.
    assert!(has_label(
        &store,
        "PatientInfo",
        namespaces::HIPAA,
        labels::PHI,
        "Research"
    ));
}

fn aggregated_health(unique_field: bool) -> GraphStore {
    let mut store = GraphStore::new();
    table(&mut store, "AggregatedHealth", &[facets::HEALTHCARE]);
    store.insert(Quad::data(
        app("AggregatedHealth"),
        pj(predicates::CONTAINS),
        app("zip"),
    ));
    store.insert(Quad::data(
        app("zip"),
        pj(predicates::HAS_FACET),
        sdc(facets::INDIRECT_IDENTIFIER),
    ));
    if unique_field {
        store.insert(Quad::data(
            app("AggregatedHealth"),
            pj(predicates::CONTAINS),
            app("mrn"),
        ));
        store.insert(Quad::data(
            app("mrn"),
            pj(predicates::HAS_FACET),
            sdc(facets::UNIQUE_IDENTIFIER),
        ));
    }
    store.insert(Quad::data(
        app("AggregatedHealth"),
        pj(predicates::K_ANONYMITY),
        3i64,
    ));
    scope(&mut store, "Research", &["AggregatedHealth"]);
    store
}

#[test]
fn scenario_k_anonymity_thresholds() {
    let store = run(&["hipaa", "ema", "italy"], aggregated_health(false));

    assert!(store.contains(&Quad::scoped(
        app("AggregatedHealth"),
        pj(predicates::K_ANONYMITY_ANALYSIS),
        3i64,
        app("Research"),
    )));

    assert!(!has_label(
        &store,
        "AggregatedHealth",
        namespaces::HIPAA,
        labels::HIGH_REIDENTIFICATION_RISK,
        "Research"
    ));
    assert!(has_label(
        &store,
        "AggregatedHealth",
        namespaces::EMA,
        labels::HIGH_REIDENTIFICATION_RISK,
        "Research"
    ));
    // k = 3 >= 2 and no unique-valued field: Italy accepts.
    assert!(!has_label(
        &store,
        "AggregatedHealth",
        namespaces::ITALY,
        labels::HIGH_REIDENTIFICATION_RISK,
        "Research"
    ));
    assert!(has_label(
        &store,
        "AggregatedHealth",
        namespaces::ITALY,
        labels::ACCEPTABLE_DEIDENTIFICATION,
        "Research"
    ));
    assert!(has_label(
        &store,
        "AggregatedHealth",
        namespaces::HIPAA,
        labels::ACCEPTABLE_DEIDENTIFICATION,
        "Research"
    ));
}

#[test]
fn scenario_k_anonymity_singling_out() {
    let store = run(&["hipaa", "ema", "italy"], aggregated_health(true));

    // A unique-valued field trips the Italy check regardless of k.
    assert!(has_label(
        &store,
        "AggregatedHealth",
        namespaces::ITALY,
        labels::HIGH_REIDENTIFICATION_RISK,
        "Research"
    ));
    assert!(!has_label(
        &store,
        "AggregatedHealth",
        namespaces::ITALY,
        labels::ACCEPTABLE_DEIDENTIFICATION,
        "Research"
    ));
    // HIPAA's policy has no singling-out component.
    assert!(!has_label(
        &store,
        "AggregatedHealth",
        namespaces::HIPAA,
        labels::HIGH_REIDENTIFICATION_RISK,
        "Research"
    ));
}

#[test]
fn scenario_safe_harbor_all_18_removed() {
    // A healthcare table with no identifier facets at all: the identifier
    // chain never starts, so the table emerges without HIPAA labels.
    let mut store = GraphStore::new();
    table(
        &mut store,
        "VisitStats",
        &[facets::HEALTHCARE, facets::INDIVIDUAL],
    );
    store.insert(Quad::data(
        app("VisitStats"),
        pj(predicates::CONTAINS),
        app("visit_count"),
    ));
    scope(&mut store, "Research", &["VisitStats"]);

    let store = run(&["hipaa"], store);
    for label in [
        labels::SAFE_HARBOR_IDENTIFIER,
        labels::HIPAA_IDENTIFIER,
        labels::PHI,
    ] {
        assert!(
            !has_label(&store, "VisitStats", namespaces::HIPAA, label, "Research"),
            "unexpected {label}"
        );
    }
}

#[test]
fn scenario_determinism() {
    let first = run(&["hipaa", "gdpr", "ema", "italy"], medical_dataset(true));
    let second = run(&["hipaa", "gdpr", "ema", "italy"], medical_dataset(true));
    assert_eq!(
        first.to_canonical_json().unwrap(),
        second.to_canonical_json().unwrap()
    );
}

#[test]
fn rule_order_does_not_change_fixpoint() {
    let set = FrameworkSet::from_names(&["hipaa".into(), "gdpr".into()]).unwrap();
    let mut rules = set.compile().unwrap();
    let analyzer = parajudica_reasoner::KAnonymityAnalyzer::new(set.k_policies());

    let run_with = |rules: &[parajudica_reasoner::CompiledRule]| {
        let mut store = medical_dataset(true);
        parajudica_reasoner::run_fixpoint(
            &mut store,
            rules,
            &analyzer,
            &parajudica_reasoner::InferenceBudget::default(),
            &parajudica_reasoner::CancelToken::new(),
        );
        store.to_canonical_json().unwrap()
    };

    let forward = run_with(&rules);
    rules.reverse();
    let reversed = run_with(&rules);
    assert_eq!(forward, reversed);
}

#[test]
fn boundary_bare_container_derives_nothing() {
    let mut store = GraphStore::new();
    store.insert(Quad::data(
        app("Bare"),
        Sid::new(namespaces::RDF, predicates::RDF_TYPE),
        pj(kinds::TABLE),
    ));
    scope(&mut store, "S", &["Bare"]);

    let store = run(&["hipaa", "gdpr", "ema", "italy"], store);
    let pat = QuadPattern {
        s: Some(app("Bare")),
        p: Some(pj(predicates::HAS_LABEL)),
        ..Default::default()
    };
    assert_eq!(store.matching(&pat).count(), 0);
}

#[test]
fn boundary_isolated_scope_unaffected_by_others() {
    let isolated = |extra: bool| {
        let mut store = GraphStore::new();
        table(
            &mut store,
            "Registry",
            &[facets::HEALTHCARE, facets::INDIVIDUAL, facets::DIRECT_IDENTIFIER],
        );
        scope(&mut store, "Island", &["Registry"]);
        if extra {
            table(&mut store, "Other", &[facets::INDIVIDUAL]);
            scope(&mut store, "Mainland", &["Other"]);
        }
        let store = run(&["hipaa", "gdpr"], store);
        let pat = QuadPattern {
            g: Some(Graph::Scope(app("Island"))),
            ..Default::default()
        };
        let mut labels: Vec<String> =
            store.matching(&pat).map(|q| q.to_string()).collect();
        labels.sort();
        labels
    };
    assert_eq!(isolated(false), isolated(true));
}

#[test]
fn invariant_scope_isolation() {
    // Every derived label sits on a container the scope includes.
    let store = run(&["hipaa", "gdpr", "ema", "italy"], medical_dataset(true));
    let pat = QuadPattern::with_p(pj(predicates::HAS_LABEL));
    for quad in store.matching(&pat) {
        let Graph::Scope(scope) = &quad.g else {
            panic!("label outside a scope graph: {quad}");
        };
        assert!(
            store.contains(&Quad::data(
                scope.clone(),
                pj(predicates::INCLUDES),
                quad.s.clone()
            )),
            "label on container outside its scope: {quad}"
        );
    }
}

#[test]
fn invariant_label_ownership() {
    let store = run(&["hipaa", "gdpr", "ema", "italy"], medical_dataset(true));
    let owned = [
        namespaces::HIPAA,
        namespaces::GDPR,
        namespaces::EMA,
        namespaces::ITALY,
    ];
    let pat = QuadPattern::with_p(pj(predicates::HAS_LABEL));
    for quad in store.matching(&pat) {
        let TermValue::Ref(label) = &quad.o else {
            panic!("non-reference label: {quad}");
        };
        assert!(
            owned.contains(&label.namespace_code),
            "label outside framework namespaces: {quad}"
        );
    }
}

#[test]
fn compositionality_fresh_namespace_changes_nothing() {
    let label_quads = |frameworks: &[&str]| {
        let store = run(frameworks, medical_dataset(true));
        let pat = QuadPattern::with_p(pj(predicates::HAS_LABEL));
        let mut quads: Vec<String> = store
            .matching(&pat)
            .filter(|q| match &q.o {
                TermValue::Ref(l) => l.namespace_code != namespaces::EMA,
                _ => true,
            })
            .map(|q| q.to_string())
            .collect();
        quads.sort();
        quads
    };
    assert_eq!(
        label_quads(&["hipaa", "gdpr"]),
        label_quads(&["hipaa", "gdpr", "ema"])
    );
}
