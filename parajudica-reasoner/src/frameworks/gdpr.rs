//! The GDPR framework bundle.
//!
//! Data about individuals is `PersonalData` (Art. 4(1)); health data about
//! individuals is additionally `SpecialCategoryData` (Art. 9). Both flow
//! inward only: a personal-data table has personal-data fields, but
//! joinability does not spread GDPR labels.

use parajudica_core::Sid;
use parajudica_vocab::{facets, labels, namespaces, predicates};
use std::sync::Arc;

use crate::framework::Framework;
use crate::rule::{Axis, Pattern, RuleDef, Term};

/// Build the GDPR framework bundle.
pub fn gdpr() -> Framework {
    let has_facet = Sid::new(namespaces::PJ, predicates::HAS_FACET);
    let has_label = Sid::new(namespaces::PJ, predicates::HAS_LABEL);
    let personal = Sid::new(namespaces::GDPR, labels::PERSONAL_DATA);
    let special = Sid::new(namespaces::GDPR, labels::SPECIAL_CATEGORY_DATA);

    let rules = vec![
        RuleDef::Implication {
            name: Arc::from("gdpr/personal-data"),
            body: vec![Pattern::data(
                Term::var("?c"),
                Term::Sid(has_facet.clone()),
                Term::Sid(Sid::new(namespaces::SDC, facets::INDIVIDUAL)),
            )],
            head: vec![Pattern::scoped(
                Term::var("?c"),
                Term::Sid(has_label.clone()),
                Term::Sid(personal.clone()),
            )],
        },
        RuleDef::Implication {
            name: Arc::from("gdpr/special-category"),
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
            ],
            head: vec![Pattern::scoped(
                Term::var("?c"),
                Term::Sid(has_label),
                Term::Sid(special.clone()),
            )],
        },
        RuleDef::Propagation {
            name: Arc::from("gdpr/personal-data-propagation"),
            label: personal,
            axes: vec![Axis::Inward],
        },
        RuleDef::Propagation {
            name: Arc::from("gdpr/special-category-propagation"),
            label: special,
            axes: vec![Axis::Inward],
        },
    ];

    Framework {
        name: Arc::from("gdpr"),
        namespace: namespaces::GDPR,
        rules,
        k_policy: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gdpr_compiles_inward_only() {
        let compiled = gdpr().compile().unwrap();
        assert_eq!(compiled.len(), 4);
        assert!(compiled
            .iter()
            .all(|r| !r.name.contains("joinable") && !r.name.contains("peer")));
    }
}
