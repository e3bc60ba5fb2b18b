//! The Base framework: structural metamodel rules.
//!
//! Base mints no labels. Its rules close the structural relations every
//! other framework relies on:
//!
//! - scope membership follows containment downward (a scope that includes
//!   a table includes its fields);
//! - joinability is symmetric;
//! - context facets (Healthcare, Individual, OpenGroup) flow from a
//!   container to everything it contains.

use parajudica_core::Sid;
use parajudica_vocab::{facets, namespaces, predicates};
use std::sync::Arc;

use crate::framework::Framework;
use crate::rule::{Pattern, RuleDef, Term};

/// Context facets that flow parent-to-child. Identifier facets stay where
/// the loader asserted them.
const INWARD_FACETS: [&str; 3] = [facets::HEALTHCARE, facets::INDIVIDUAL, facets::OPEN_GROUP];

/// Build the Base framework bundle.
pub fn base() -> Framework {
    let contains = Sid::new(namespaces::PJ, predicates::CONTAINS);
    let includes = Sid::new(namespaces::PJ, predicates::INCLUDES);
    let joinable = Sid::new(namespaces::PJ, predicates::JOINABLE_WITH);
    let has_facet = Sid::new(namespaces::PJ, predicates::HAS_FACET);

    let mut rules = vec![
        RuleDef::Implication {
            name: Arc::from("base/scope-closure"),
            body: vec![
                Pattern::data(Term::var("?scope"), Term::Sid(includes.clone()), Term::var("?c")),
                Pattern::data(Term::var("?c"), Term::Sid(contains.clone()), Term::var("?child")),
            ],
            head: vec![Pattern::data(
                Term::var("?scope"),
                Term::Sid(includes),
                Term::var("?child"),
            )],
        },
        RuleDef::Implication {
            name: Arc::from("base/joinable-symmetry"),
            body: vec![Pattern::data(
                Term::var("?a"),
                Term::Sid(joinable.clone()),
                Term::var("?b"),
            )],
            head: vec![Pattern::data(
                Term::var("?b"),
                Term::Sid(joinable),
                Term::var("?a"),
            )],
        },
    ];

    for facet in INWARD_FACETS {
        let facet_sid = Sid::new(namespaces::SDC, facet);
        rules.push(RuleDef::Implication {
            name: Arc::from(format!("base/facet-inward/{facet}")),
            body: vec![
                Pattern::data(
                    Term::var("?c"),
                    Term::Sid(has_facet.clone()),
                    Term::Sid(facet_sid.clone()),
                ),
                Pattern::data(Term::var("?c"), Term::Sid(contains.clone()), Term::var("?child")),
            ],
            head: vec![Pattern::data(
                Term::var("?child"),
                Term::Sid(has_facet.clone()),
                Term::Sid(facet_sid),
            )],
        });
    }

    Framework {
        name: Arc::from("base"),
        namespace: namespaces::PJ,
        rules,
        k_policy: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_compiles() {
        let compiled = base().compile().unwrap();
        assert_eq!(compiled.len(), 2 + INWARD_FACETS.len());
    }
}
