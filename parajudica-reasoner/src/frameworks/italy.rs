//! The Italy framework bundle.
//!
//! The Garante's singling-out concern: a table with any unique-valued
//! field carries re-identification risk regardless of its k value. The
//! check is a child condition on the bundle, so deployments can swap the
//! predicate without touching the engine.

use parajudica_core::Sid;
use parajudica_vocab::{facets, kinds, labels, namespaces, predicates};
use std::sync::Arc;

use crate::framework::Framework;
use crate::kanon::KPolicy;
use crate::rule::{ChildCondition, Pattern, RuleDef, Term};

/// Build the Italy framework bundle.
pub fn italy() -> Framework {
    italy_with_singling_out(ChildCondition::AnyChildFacet(Sid::new(
        namespaces::SDC,
        facets::UNIQUE_IDENTIFIER,
    )))
}

/// Build the Italy bundle with a custom singling-out predicate.
pub fn italy_with_singling_out(condition: ChildCondition) -> Framework {
    let has_label = Sid::new(namespaces::PJ, predicates::HAS_LABEL);
    let rdf_type = Sid::new(namespaces::RDF, predicates::RDF_TYPE);
    let table = Sid::new(namespaces::PJ, kinds::TABLE);

    let rules = vec![RuleDef::Conditional {
        name: Arc::from("italy/singling-out"),
        body: vec![Pattern::data(
            Term::var("?t"),
            Term::Sid(rdf_type),
            Term::Sid(table),
        )],
        anchor: Arc::from("?t"),
        condition,
        head: vec![Pattern::scoped(
            Term::var("?t"),
            Term::Sid(has_label),
            Term::Sid(Sid::new(
                namespaces::ITALY,
                labels::HIGH_REIDENTIFICATION_RISK,
            )),
        )],
    }];

    Framework {
        name: Arc::from("italy"),
        namespace: namespaces::ITALY,
        rules,
        k_policy: Some(KPolicy {
            framework: Arc::from("italy"),
            namespace: namespaces::ITALY,
            min_k: 2,
            singling_out: true,
        }),
    }
}
