//! # Parajudica Query
//!
//! Pattern queries over a finished inference store, with tabular answers.
//!
//! A query is a conjunction of quad patterns plus the variables to
//! project. The compact text form used by the CLI:
//!
//! ```text
//! SELECT ?c ?l WHERE { ?c pj:hasLabel ?l @ ?scope . ?c pj:hasFacet sdc:Healthcare }
//! ```
//!
//! Each pattern is `subject predicate object`, optionally `@ graph` for
//! scope-qualified facts (a variable or a constant scope; no `@` means
//! the shared data graph). Prefixed names resolve against the registered
//! namespaces. A query returning zero rows is an answer, not an error.

pub mod error;
pub mod parse;
pub mod table;

pub use error::{QueryError, Result};
pub use parse::parse_query;
pub use table::Table;

use parajudica_core::{GraphStore, TermValue};
use parajudica_reasoner::execute::solve;
use parajudica_reasoner::Pattern;
use std::sync::Arc;

/// A parsed pattern query.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    /// Output variables, in projection order
    pub outputs: Vec<Arc<str>>,
    /// Body patterns, all of which must match
    pub patterns: Vec<Pattern>,
}

/// Execute a query against a store.
///
/// Rows are sorted and deduplicated, so answers are deterministic
/// regardless of match order.
pub fn execute(store: &GraphStore, query: &SelectQuery) -> Table {
    let mut rows: Vec<Vec<Option<TermValue>>> = solve(store, &query.patterns)
        .into_iter()
        .map(|bindings| {
            query
                .outputs
                .iter()
                .map(|var| bindings.get(var.as_ref()).cloned())
                .collect()
        })
        .collect();
    rows.sort();
    rows.dedup();

    Table {
        columns: query.outputs.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parajudica_core::{Quad, Sid};
    use parajudica_vocab::{namespaces, predicates};

    fn app(n: &str) -> Sid {
        Sid::new(namespaces::APP, n)
    }

    fn store_with_labels() -> GraphStore {
        let has_label = Sid::new(namespaces::PJ, predicates::HAS_LABEL);
        let mut store = GraphStore::new();
        store.insert(Quad::scoped(
            app("t"),
            has_label.clone(),
            Sid::new(namespaces::HIPAA, "PHI"),
            app("research"),
        ));
        store.insert(Quad::scoped(
            app("t"),
            has_label,
            Sid::new(namespaces::GDPR, "PersonalData"),
            app("research"),
        ));
        store
    }

    #[test]
    fn test_execute_projects_and_sorts() {
        let store = store_with_labels();
        let query = parse_query("SELECT ?c ?l WHERE { ?c pj:hasLabel ?l @ ?scope }").unwrap();
        let table = execute(&store, &query);
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.rows.len(), 2);
        // Sorted: GDPR namespace code sorts after HIPAA's? Codes: HIPAA=5,
        // GDPR=6; rows sort by (?c, ?l) so HIPAA label first.
        assert_eq!(
            table.rows[0][1],
            Some(TermValue::Ref(Sid::new(namespaces::HIPAA, "PHI")))
        );
    }

    #[test]
    fn test_zero_rows_is_not_an_error() {
        let store = GraphStore::new();
        let query = parse_query("SELECT ?c WHERE { ?c pj:hasLabel hipaa:PHI @ ?scope }").unwrap();
        let table = execute(&store, &query);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_constant_scope_filter() {
        let store = store_with_labels();
        let query =
            parse_query("SELECT ?l WHERE { ?c pj:hasLabel ?l @ app:research }").unwrap();
        assert_eq!(execute(&store, &query).rows.len(), 2);

        let query = parse_query("SELECT ?l WHERE { ?c pj:hasLabel ?l @ app:hr }").unwrap();
        assert!(execute(&store, &query).rows.is_empty());
    }
}
