//! The HIPAA framework bundle.
//!
//! Label chain per 45 CFR 164.514: each of the Safe Harbor identifier
//! facets makes a container a `SafeHarborIdentifier`; every Safe Harbor
//! identifier is a `HIPAAIdentifier`; health information about
//! individuals that carries (or is joined to) a HIPAA identifier is
//! `PHI`. Identifiability travels across joins, PHI across all four
//! axes.

use parajudica_core::Sid;
use parajudica_vocab::{facets, labels, namespaces, predicates};
use std::sync::Arc;

use crate::framework::Framework;
use crate::kanon::KPolicy;
use crate::rule::{Axis, ChildCondition, Pattern, RuleDef, Term};

/// Build the HIPAA framework bundle.
pub fn hipaa() -> Framework {
    let has_facet = Sid::new(namespaces::PJ, predicates::HAS_FACET);
    let has_label = Sid::new(namespaces::PJ, predicates::HAS_LABEL);
    let rdf_type = Sid::new(namespaces::RDF, predicates::RDF_TYPE);
    let table = Sid::new(namespaces::PJ, parajudica_vocab::kinds::TABLE);

    let safe_harbor = Sid::new(namespaces::HIPAA, labels::SAFE_HARBOR_IDENTIFIER);
    let identifier = Sid::new(namespaces::HIPAA, labels::HIPAA_IDENTIFIER);
    let phi = Sid::new(namespaces::HIPAA, labels::PHI);

    let mut rules = Vec::new();

    // One rule per Safe Harbor facet, plus the generic direct-identifier
    // facet the loaders commonly assert.
    let mut identifying_facets: Vec<&str> = facets::SAFE_HARBOR.to_vec();
    identifying_facets.push(facets::DIRECT_IDENTIFIER);
    for facet in identifying_facets {
        rules.push(RuleDef::Implication {
            name: Arc::from(format!("hipaa/safe-harbor/{facet}")),
            body: vec![Pattern::data(
                Term::var("?c"),
                Term::Sid(has_facet.clone()),
                Term::Sid(Sid::new(namespaces::SDC, facet)),
            )],
            head: vec![Pattern::scoped(
                Term::var("?c"),
                Term::Sid(has_label.clone()),
                Term::Sid(safe_harbor.clone()),
            )],
        });
    }

    // A table is a Safe Harbor identifier when any of its fields carries
    // date/moment data (identifier #3 of the eighteen).
    rules.push(RuleDef::Conditional {
        name: Arc::from("hipaa/safe-harbor/field-dates"),
        body: vec![Pattern::data(
            Term::var("?t"),
            Term::Sid(rdf_type),
            Term::Sid(table),
        )],
        anchor: Arc::from("?t"),
        condition: ChildCondition::AnyChildFacet(Sid::new(namespaces::SDC, facets::MOMENT_DATA)),
        head: vec![Pattern::scoped(
            Term::var("?t"),
            Term::Sid(has_label.clone()),
            Term::Sid(safe_harbor.clone()),
        )],
    });

    rules.push(RuleDef::Implication {
        name: Arc::from("hipaa/identifier"),
        body: vec![Pattern::scoped(
            Term::var("?c"),
            Term::Sid(has_label.clone()),
            Term::Sid(safe_harbor),
        )],
        head: vec![Pattern::scoped(
            Term::var("?c"),
            Term::Sid(has_label.clone()),
            Term::Sid(identifier.clone()),
        )],
    });

    rules.push(RuleDef::Implication {
        name: Arc::from("hipaa/phi"),
        body: vec![
            Pattern::data(
                Term::var("?c"),
                Term::Sid(has_facet.clone()),
                Term::Sid(Sid::new(namespaces::SDC, facets::HEALTHCARE)),
            ),
            Pattern::data(
                Term::var("?c"),
                Term::Sid(has_facet),
                Term::Sid(Sid::new(namespaces::SDC, facets::INDIVIDUAL)),
            ),
            Pattern::scoped(
                Term::var("?c"),
                Term::Sid(has_label.clone()),
                Term::Sid(identifier.clone()),
            ),
        ],
        head: vec![Pattern::scoped(
            Term::var("?c"),
            Term::Sid(has_label),
            Term::Sid(phi.clone()),
        )],
    });

    // Joined tables share identifiability.
    rules.push(RuleDef::Propagation {
        name: Arc::from("hipaa/identifier-propagation"),
        label: identifier,
        axes: vec![Axis::Joinable],
    });

    // PHI contaminates along every axis.
    rules.push(RuleDef::Propagation {
        name: Arc::from("hipaa/phi-propagation"),
        label: phi,
        axes: vec![Axis::Inward, Axis::Outward, Axis::Peer, Axis::Joinable],
    });

    Framework {
        name: Arc::from("hipaa"),
        namespace: namespaces::HIPAA,
        rules,
        k_policy: Some(KPolicy {
            framework: Arc::from("hipaa"),
            namespace: namespaces::HIPAA,
            // Expert Determination working threshold
            min_k: 3,
            singling_out: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hipaa_compiles() {
        let compiled = hipaa().compile().unwrap();
        // 19 facet rules + field-dates + identifier + phi + 1 joinable
        // axis + 4 phi axes
        assert_eq!(compiled.len(), 27);
    }

    #[test]
    fn test_phi_declares_all_four_axes() {
        let compiled = hipaa().compile().unwrap();
        for axis in ["inward", "outward", "peer", "joinable"] {
            let name = format!("hipaa/phi-propagation/{axis}");
            assert!(
                compiled.iter().any(|r| r.name.as_ref() == name),
                "missing {name}"
            );
        }
    }
}
