//! Tests for the four propagation axes.

use std::sync::Arc;

use parajudica_core::{Graph, GraphStore, Quad, Sid};
use parajudica_vocab::{namespaces, predicates};

use crate::compile::{compile_rule, CompiledRule};
use crate::rule::{Axis, RuleDef};

use super::{app, contain, full_delta, include, pj};

fn phi() -> Sid {
    Sid::new(namespaces::HIPAA, "PHI")
}

fn compile_axes(axes: Vec<Axis>) -> Vec<CompiledRule> {
    let def = RuleDef::Propagation {
        name: Arc::from("hipaa/phi-propagation"),
        label: phi(),
        axes,
    };
    compile_rule(&Arc::from("hipaa"), namespaces::HIPAA, &def).unwrap()
}

fn label(store: &mut GraphStore, container: &str, scope: &str) {
    store.insert(Quad::scoped(
        app(container),
        pj(predicates::HAS_LABEL),
        phi(),
        app(scope),
    ));
}

fn fire_all(rules: &[CompiledRule], store: &GraphStore) -> Vec<Quad> {
    let delta = full_delta(store);
    rules.iter().flat_map(|r| r.fire(store, &delta)).collect()
}

fn labelled(quads: &[Quad], container: &str, scope: &str) -> bool {
    quads.iter().any(|q| {
        q.s == app(container)
            && q.o == parajudica_core::TermValue::Ref(phi())
            && q.g == Graph::Scope(app(scope))
    })
}

#[test]
fn test_inward_axis() {
    let mut store = GraphStore::new();
    contain(&mut store, "table", "field");
    include(&mut store, "s", "table");
    include(&mut store, "s", "field");
    label(&mut store, "table", "s");

    let out = fire_all(&compile_axes(vec![Axis::Inward]), &store);
    assert!(labelled(&out, "field", "s"));
}

#[test]
fn test_outward_axis() {
    let mut store = GraphStore::new();
    contain(&mut store, "table", "field");
    include(&mut store, "s", "table");
    include(&mut store, "s", "field");
    label(&mut store, "field", "s");

    let out = fire_all(&compile_axes(vec![Axis::Outward]), &store);
    assert!(labelled(&out, "table", "s"));
}

#[test]
fn test_peer_axis() {
    let mut store = GraphStore::new();
    contain(&mut store, "table", "a");
    contain(&mut store, "table", "b");
    include(&mut store, "s", "a");
    include(&mut store, "s", "b");
    label(&mut store, "a", "s");

    let out = fire_all(&compile_axes(vec![Axis::Peer]), &store);
    assert!(labelled(&out, "b", "s"));
}

#[test]
fn test_joinable_axis() {
    let mut store = GraphStore::new();
    store.insert(Quad::data(
        app("a"),
        pj(predicates::JOINABLE_WITH),
        app("b"),
    ));
    include(&mut store, "s", "a");
    include(&mut store, "s", "b");
    label(&mut store, "a", "s");

    let out = fire_all(&compile_axes(vec![Axis::Joinable]), &store);
    assert!(labelled(&out, "b", "s"));
}

#[test]
fn test_propagation_stays_inside_scope() {
    // b is joinable with a but only belongs to another scope: the label
    // must not cross.
    let mut store = GraphStore::new();
    store.insert(Quad::data(
        app("a"),
        pj(predicates::JOINABLE_WITH),
        app("b"),
    ));
    include(&mut store, "s", "a");
    include(&mut store, "other", "b");
    label(&mut store, "a", "s");

    let out = fire_all(&compile_axes(vec![Axis::Joinable]), &store);
    assert!(!labelled(&out, "b", "s"));
    assert!(!labelled(&out, "b", "other"));
}

#[test]
fn test_axis_order_irrelevant_at_fixpoint() {
    // chain: parent contains a, parent contains b; label starts on a.
    // Peer then Outward must equal Outward then Peer once both have run.
    let build = || {
        let mut store = GraphStore::new();
        contain(&mut store, "parent", "a");
        contain(&mut store, "parent", "b");
        for c in ["parent", "a", "b"] {
            include(&mut store, "s", c);
        }
        label(&mut store, "a", "s");
        store
    };

    let run = |axes: Vec<Axis>| {
        let rules = compile_axes(axes);
        let mut store = build();
        // Two rounds are enough for this chain.
        for _ in 0..2 {
            let out = fire_all(&rules, &store);
            store.extend(out);
        }
        store.to_canonical_json().unwrap()
    };

    assert_eq!(
        run(vec![Axis::Peer, Axis::Outward]),
        run(vec![Axis::Outward, Axis::Peer])
    );
}
