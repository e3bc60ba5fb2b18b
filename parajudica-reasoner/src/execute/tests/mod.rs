//! Rule-application tests.
//!
//! These exercise compiled rules directly against hand-built stores:
//! - implication and conditional firing (implication_tests)
//! - the four propagation axes and scope locality (propagation_tests)

mod propagation_tests;

use parajudica_core::{GraphStore, Quad, Sid};
use parajudica_vocab::{namespaces, predicates};

use super::delta::DeltaSet;

pub(crate) fn app(n: &str) -> Sid {
    Sid::new(namespaces::APP, n)
}

pub(crate) fn pj(n: &str) -> Sid {
    Sid::new(namespaces::PJ, n)
}

pub(crate) fn sdc(n: &str) -> Sid {
    Sid::new(namespaces::SDC, n)
}

pub(crate) fn include(store: &mut GraphStore, scope: &str, container: &str) {
    store.insert(Quad::data(app(scope), pj(predicates::INCLUDES), app(container)));
}

pub(crate) fn facet(store: &mut GraphStore, container: &str, facet: &str) {
    store.insert(Quad::data(app(container), pj(predicates::HAS_FACET), sdc(facet)));
}

pub(crate) fn contain(store: &mut GraphStore, parent: &str, child: &str) {
    store.insert(Quad::data(app(parent), pj(predicates::CONTAINS), app(child)));
}

/// Delta covering the whole store, as in the first fixpoint round.
pub(crate) fn full_delta(store: &GraphStore) -> DeltaSet {
    DeltaSet::from_quads(store.iter().cloned())
}
