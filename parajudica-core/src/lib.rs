//! # Parajudica Core
//!
//! Core types for the Parajudica compliance-reasoning engine.
//!
//! This crate provides:
//! - Compact IRI identifiers: `Sid`, `SidInterner`
//! - Object values: `TermValue`
//! - Scope-tagged assertions: `Quad`, `Graph`, `QuadPattern`
//! - The append-only `GraphStore` with pattern matching and epoch deltas
//!
//! ## Design Principles
//!
//! 1. **Append-only**: inference never retracts, so deltas are slices and
//!    epochs are insertion watermarks.
//! 2. **Identity, not references**: containers, labels, and scopes are
//!    referenced by `Sid` everywhere; the store owns all assertions.
//! 3. **Deterministic canonical form**: a store serializes to sorted JSON
//!    so identical runs are byte-comparable.

pub mod error;
pub mod quad;
pub mod sid;
pub mod store;
pub mod value;

pub use error::{Error, Result};
pub use quad::{Graph, Quad, QuadPattern};
pub use sid::{Sid, SidInterner};
pub use store::{validate_containment, Epoch, GraphStore};
pub use value::TermValue;
