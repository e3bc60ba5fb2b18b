//! Seminaive fixed-point iteration.
//!
//! The driver repeatedly evaluates every compiled rule against the store,
//! restricting at least one body pattern to the previous round's delta,
//! buffers candidate quads, and commits them at the round boundary. It
//! halts when a round contributes nothing new. The store only grows and
//! the derivable vocabulary is finite, so the loop terminates.

use hashbrown::{HashMap, HashSet};
use parajudica_core::{Epoch, GraphStore, Quad};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::compile::CompiledRule;
use crate::execute::delta::DeltaSet;
use crate::kanon::KAnonymityAnalyzer;

/// External cancellation flag, checked at the start of each round.
///
/// A cancelled run returns the partial store: monotone-consistent (a
/// prefix of the fixpoint), just not closed.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Budget constraints for an inference run.
///
/// Realistic inputs converge within a handful of rounds; the defaults are
/// backstops, not tuning knobs.
#[derive(Clone, Debug)]
pub struct InferenceBudget {
    /// Max fixed-point rounds
    pub max_rounds: usize,
    /// Max derived quads before stopping
    pub max_facts: usize,
    /// Max wall-clock time
    pub max_duration: Duration,
}

impl Default for InferenceBudget {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            max_facts: 1_000_000,
            max_duration: Duration::from_secs(30),
        }
    }
}

impl InferenceBudget {
    /// A budget that will not interfere (for tests and small datasets)
    pub fn unlimited() -> Self {
        Self {
            max_rounds: usize::MAX,
            max_facts: usize::MAX,
            max_duration: Duration::from_secs(3600),
        }
    }
}

/// Diagnostics from an inference run, always returned alongside the store.
#[derive(Clone, Debug, Default)]
pub struct InferenceDiagnostics {
    /// Number of rounds executed
    pub rounds: usize,
    /// Total quads derived (beyond the initial assertions)
    pub facts_derived: usize,
    /// Whether the run reached a fixed point
    pub converged: bool,
    /// Why the run stopped early, if it did
    pub capped_reason: Option<String>,
    /// Wall-clock duration
    pub duration: Duration,
    /// Per-rule count of new quads attributed to it
    pub rules_fired: HashMap<String, usize>,
}

/// Run the rules and the analyzer to a fixed point over the store.
pub fn run_fixpoint(
    store: &mut GraphStore,
    rules: &[CompiledRule],
    analyzer: &KAnonymityAnalyzer,
    budget: &InferenceBudget,
    cancel: &CancelToken,
) -> InferenceDiagnostics {
    let start = Instant::now();
    let mut diagnostics = InferenceDiagnostics::default();

    // Round 1 treats every initial assertion as new.
    let mut delta = DeltaSet::from_quads(store.since(Epoch::ZERO).iter().cloned());

    while !delta.is_empty() {
        if cancel.is_cancelled() {
            diagnostics.capped_reason = Some("cancelled".into());
            break;
        }
        if diagnostics.rounds >= budget.max_rounds {
            diagnostics.capped_reason = Some("rounds".into());
            break;
        }
        if diagnostics.facts_derived >= budget.max_facts {
            diagnostics.capped_reason = Some("facts".into());
            break;
        }
        if start.elapsed() > budget.max_duration {
            diagnostics.capped_reason = Some("time".into());
            break;
        }
        diagnostics.rounds += 1;

        let mut candidates: HashSet<Quad> = HashSet::new();

        for rule in rules {
            if !rule.depends_on.is_empty() && !delta.touches(&rule.depends_on) {
                continue;
            }
            for quad in rule.fire(store, &delta) {
                if !store.contains(&quad) && candidates.insert(quad) {
                    *diagnostics
                        .rules_fired
                        .entry(rule.name.to_string())
                        .or_insert(0) += 1;
                }
            }
        }

        for quad in analyzer.run(store) {
            if !store.contains(&quad) && candidates.insert(quad) {
                *diagnostics
                    .rules_fired
                    .entry("k-anonymity".to_string())
                    .or_insert(0) += 1;
            }
        }

        if candidates.is_empty() {
            diagnostics.converged = true;
            break;
        }

        let epoch = store.snapshot();
        let round_new = candidates.len();
        for quad in candidates {
            store.insert(quad);
        }
        diagnostics.facts_derived += round_new;
        delta = DeltaSet::from_quads(store.since(epoch).iter().cloned());

        debug!(
            round = diagnostics.rounds,
            new = round_new,
            total = store.len(),
            "fixpoint round committed"
        );
    }

    if delta.is_empty() {
        // The final delta produced nothing new without a budget stop.
        diagnostics.converged = diagnostics.capped_reason.is_none();
    }
    diagnostics.duration = start.elapsed();
    diagnostics
}
