//! # Parajudica Reasoner
//!
//! The fixed-point inference engine and declarative rule model.
//!
//! An inference run:
//!
//! 1. Select framework bundles ([`FrameworkSet::from_names`]; Base is
//!    always included) and compile them - label ownership and vocabulary
//!    are validated here, before any inference.
//! 2. Load initial assertions into a [`GraphStore`]
//!    (`parajudica_core`) and validate the containment forest.
//! 3. [`run_fixpoint`] evaluates every compiled rule seminaively and runs
//!    the k-anonymity analyzer each round, until a round adds nothing.
//!
//! The final store holds the initial assertions plus every derivable
//! label, scope-qualified. Determinism: re-running on the same inputs
//! yields the same quad set regardless of rule ordering.

pub mod compile;
pub mod error;
pub mod execute;
pub mod fixpoint;
pub mod framework;
pub mod frameworks;
pub mod kanon;
pub mod rule;
pub mod skolem;

pub use compile::CompiledRule;
pub use error::{ReasonerError, Result};
pub use execute::{Bindings, DeltaSet, SCOPE_VAR};
pub use fixpoint::{run_fixpoint, CancelToken, InferenceBudget, InferenceDiagnostics};
pub use framework::{Framework, FrameworkSet};
pub use kanon::{KAnonymityAnalyzer, KPolicy};
pub use rule::{Axis, ChildCondition, Pattern, PatternGraph, RuleDef, Term};
pub use skolem::skolem_node;

use parajudica_core::GraphStore;

/// Compile a framework selection, validate the store, and run inference
/// to fixpoint with default budget and no cancellation.
///
/// This is the one-call entry point used by the CLI and the cache layer.
pub fn infer(store: &mut GraphStore, frameworks: &FrameworkSet) -> Result<InferenceDiagnostics> {
    parajudica_core::validate_containment(store)?;
    let rules = frameworks.compile()?;
    let analyzer = KAnonymityAnalyzer::new(frameworks.k_policies());
    Ok(run_fixpoint(
        store,
        &rules,
        &analyzer,
        &InferenceBudget::default(),
        &CancelToken::new(),
    ))
}
