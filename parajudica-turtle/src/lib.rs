//! Turtle (TTL) loader for Parajudica.
//!
//! This crate parses a Turtle subset and emits to a [`TripleSink`], plus a
//! convenience function loading straight into a `GraphStore`. The parser
//! is a replaceable collaborator: the engine only depends on the sink
//! seam.
//!
//! # Example
//!
//! ```
//! use parajudica_core::GraphStore;
//! use parajudica_turtle::parse_into_store;
//!
//! let turtle = r#"
//!     @prefix app: <https://example.org/medical#> .
//!
//!     app:PatientInfo a pj:Table ;
//!         pj:hasFacet sdc:Healthcare, sdc:Individual .
//!
//!     app:Research pj:includes app:PatientInfo .
//! "#;
//!
//! let mut store = GraphStore::new();
//! let inserted = parse_into_store(turtle, &mut store).unwrap();
//! assert_eq!(inserted, 4);
//! ```

pub mod error;
pub mod parser;
pub mod sink;

pub use error::{Result, TurtleError};
pub use parser::parse;
pub use sink::{CollectorSink, StoreSink, TripleSink};

use parajudica_core::GraphStore;

/// Parse a Turtle document directly into a store's data graph.
///
/// Returns the number of distinct triples inserted.
pub fn parse_into_store(input: &str, store: &mut GraphStore) -> Result<usize> {
    let mut sink = StoreSink::new(store);
    parse(input, &mut sink)?;
    Ok(sink.inserted())
}
