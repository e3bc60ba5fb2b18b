//! Rule compilation: declarative definitions to match-and-emit form.
//!
//! Compilation does three jobs:
//!
//! 1. **Lowering.** Propagation rules become body/head conjunctions: the
//!    label fact in the scope graph is joined with the relationship edge
//!    in the data graph. One compiled rule per declared axis.
//! 2. **Scope guards.** Every subject receiving a scoped head gets an
//!    injected `(?scope pj:includes subject)` membership pattern, so a
//!    firing can only place labels on containers inside the scope it is
//!    reading from.
//! 3. **Validation.** Unknown vocabulary, labels minted outside the owning
//!    framework's namespace, head variables unbound by the body, and rule
//!    heads that would destabilize the k-anonymity analyzer's inputs are
//!    all rejected at load time.

use hashbrown::HashSet;
use parajudica_core::{Graph, GraphStore, Quad, Sid, TermValue};
use parajudica_vocab::{facets, namespaces, predicates};
use std::sync::Arc;

use crate::error::{ReasonerError, Result};
use crate::execute::delta::DeltaSet;
use crate::execute::solve::{resolve, solve, solve_seminaive, Bindings, SCOPE_VAR};
use crate::rule::{Axis, ChildCondition, Pattern, PatternGraph, RuleDef, Term};

/// A rule in executable form: body patterns, optional child condition,
/// head templates, and the predicates it depends on.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: Arc<str>,
    pub framework: Arc<str>,
    pub body: Vec<Pattern>,
    pub condition: Option<(Arc<str>, ChildCondition)>,
    pub head: Vec<Pattern>,
    /// Constant body predicates (plus condition predicates); the driver
    /// skips the rule when none of these changed in a round.
    pub depends_on: HashSet<Sid>,
}

impl CompiledRule {
    /// Evaluate the rule against the store and the current round's delta,
    /// returning candidate output quads. Duplicates within the firing
    /// (the same binding reached through different pivots) are collapsed;
    /// deduplication against the store is the driver's job.
    pub fn fire(&self, store: &GraphStore, delta: &DeltaSet) -> Vec<Quad> {
        // Conditional rules re-solve against the full store: a condition
        // can flip to true on facts the body patterns matched in an
        // earlier round, which a delta-restricted join would miss.
        let rows = if self.condition.is_some() {
            solve(store, &self.body)
        } else {
            solve_seminaive(store, delta, &self.body)
        };

        let mut out = Vec::new();
        let mut emitted: HashSet<Quad> = HashSet::new();
        for bindings in rows {
            if let Some((anchor, condition)) = &self.condition {
                match bindings.get(anchor.as_ref()) {
                    Some(TermValue::Ref(container)) => {
                        if !condition.holds(store, container) {
                            continue;
                        }
                    }
                    _ => continue,
                }
            }
            for template in &self.head {
                if let Some(quad) = instantiate(template, &bindings) {
                    if emitted.insert(quad.clone()) {
                        out.push(quad);
                    }
                }
            }
        }
        out
    }
}

/// Instantiate a head template under the bindings.
fn instantiate(template: &Pattern, bindings: &Bindings) -> Option<Quad> {
    let s = match resolve(&template.s, bindings)? {
        TermValue::Ref(sid) => sid,
        _ => return None,
    };
    let p = match resolve(&template.p, bindings)? {
        TermValue::Ref(sid) => sid,
        _ => return None,
    };
    let o = resolve(&template.o, bindings)?;
    let g = match &template.graph {
        PatternGraph::Data => Graph::Data,
        PatternGraph::Scope(term) => match resolve(term, bindings) {
            Some(TermValue::Ref(scope)) => Graph::Scope(scope),
            _ => return None,
        },
    };
    Some(Quad { s, p, o, g })
}

/// Compile one rule definition into executable rules (propagation yields
/// one compiled rule per axis).
pub fn compile_rule(
    framework: &Arc<str>,
    framework_ns: u16,
    def: &RuleDef,
) -> Result<Vec<CompiledRule>> {
    match def {
        RuleDef::Implication { name, body, head } => Ok(vec![assemble(
            framework,
            framework_ns,
            name.clone(),
            body.clone(),
            None,
            head.clone(),
        )?]),
        RuleDef::Conditional {
            name,
            body,
            anchor,
            condition,
            head,
        } => Ok(vec![assemble(
            framework,
            framework_ns,
            name.clone(),
            body.clone(),
            Some((anchor.clone(), condition.clone())),
            head.clone(),
        )?]),
        RuleDef::Propagation { name, label, axes } => {
            let mut compiled = Vec::with_capacity(axes.len());
            for axis in axes {
                let (body, head) = lower_axis(*axis, label);
                compiled.push(assemble(
                    framework,
                    framework_ns,
                    Arc::from(format!("{name}/{}", axis.name())),
                    body,
                    None,
                    head,
                )?);
            }
            Ok(compiled)
        }
    }
}

/// Lower one propagation axis to body/head pattern form.
///
/// The source label is read from the scope graph; the relationship edge
/// from the data graph. The receiving container's scope membership guard
/// is injected later by `assemble`, like for any scoped head.
fn lower_axis(axis: Axis, label: &Sid) -> (Vec<Pattern>, Vec<Pattern>) {
    let has_label = Sid::new(namespaces::PJ, predicates::HAS_LABEL);
    let contains = Sid::new(namespaces::PJ, predicates::CONTAINS);
    let joinable = Sid::new(namespaces::PJ, predicates::JOINABLE_WITH);

    let labelled = |var: &str| {
        Pattern::scoped(Term::var(var), Term::Sid(has_label.clone()), Term::Sid(label.clone()))
    };

    match axis {
        Axis::Inward => (
            vec![
                labelled("?parent"),
                Pattern::data(Term::var("?parent"), Term::Sid(contains), Term::var("?child")),
            ],
            vec![labelled("?child")],
        ),
        Axis::Outward => (
            vec![
                labelled("?child"),
                Pattern::data(Term::var("?parent"), Term::Sid(contains), Term::var("?child")),
            ],
            vec![labelled("?parent")],
        ),
        Axis::Peer => (
            vec![
                labelled("?sibling"),
                Pattern::data(Term::var("?parent"), Term::Sid(contains.clone()), Term::var("?sibling")),
                Pattern::data(Term::var("?parent"), Term::Sid(contains), Term::var("?peer")),
            ],
            vec![labelled("?peer")],
        ),
        Axis::Joinable => (
            vec![
                labelled("?table"),
                Pattern::data(Term::var("?table"), Term::Sid(joinable), Term::var("?other")),
            ],
            vec![labelled("?other")],
        ),
    }
}

/// Assemble and validate a compiled rule from its parts.
fn assemble(
    framework: &Arc<str>,
    framework_ns: u16,
    name: Arc<str>,
    mut body: Vec<Pattern>,
    condition: Option<(Arc<str>, ChildCondition)>,
    head: Vec<Pattern>,
) -> Result<CompiledRule> {
    let includes = Sid::new(namespaces::PJ, predicates::INCLUDES);

    // Inject a scope membership guard for every scoped head subject.
    for template in &head {
        if !matches!(template.graph, PatternGraph::Scope(_)) {
            continue;
        }
        let guard = Pattern::data(
            Term::var(SCOPE_VAR),
            Term::Sid(includes.clone()),
            template.s.clone(),
        );
        if !body.iter().any(|p| pattern_eq(p, &guard)) {
            body.push(guard);
        }
    }

    validate(&name, framework, framework_ns, &body, &condition, &head)?;

    let mut depends_on: HashSet<Sid> = body
        .iter()
        .filter_map(|p| match &p.p {
            Term::Sid(sid) => Some(sid.clone()),
            _ => None,
        })
        .collect();
    if condition.is_some() {
        depends_on.insert(Sid::new(namespaces::PJ, predicates::CONTAINS));
        depends_on.insert(Sid::new(namespaces::PJ, predicates::HAS_FACET));
    }

    Ok(CompiledRule {
        name,
        framework: framework.clone(),
        body,
        condition,
        head,
        depends_on,
    })
}

fn pattern_eq(a: &Pattern, b: &Pattern) -> bool {
    a.graph == b.graph && a.s == b.s && a.p == b.p && a.o == b.o
}

/// Load-time rule validation.
fn validate(
    name: &Arc<str>,
    framework: &Arc<str>,
    framework_ns: u16,
    body: &[Pattern],
    condition: &Option<(Arc<str>, ChildCondition)>,
    head: &[Pattern],
) -> Result<()> {
    let has_label = Sid::new(namespaces::PJ, predicates::HAS_LABEL);
    let has_facet = Sid::new(namespaces::PJ, predicates::HAS_FACET);

    // Every constant must come from a registered namespace; pj-namespace
    // predicates must be part of the metamodel vocabulary. Scope-graph
    // patterns in rules must all share the one reserved scope variable.
    for pattern in body.iter().chain(head) {
        for term in [&pattern.s, &pattern.p, &pattern.o] {
            if let Term::Sid(sid) = term {
                check_term(name, sid)?;
            }
        }
        if let PatternGraph::Scope(term) = &pattern.graph {
            if term.var_name() != Some(SCOPE_VAR) {
                return Err(ReasonerError::InvalidRule {
                    rule: name.to_string(),
                    message: format!("scope-graph patterns must use {SCOPE_VAR}"),
                });
            }
        }
    }

    // Head variables must be bound by the body.
    let mut bound: HashSet<&str> = HashSet::new();
    bound.insert(SCOPE_VAR);
    for pattern in body {
        for term in [&pattern.s, &pattern.p, &pattern.o] {
            if let Some(var) = term.var_name() {
                bound.insert(var);
            }
        }
    }
    for template in head {
        for term in [&template.s, &template.p, &template.o] {
            if let Some(var) = term.var_name() {
                if !bound.contains(var) {
                    return Err(ReasonerError::InvalidRule {
                        rule: name.to_string(),
                        message: format!("head variable {var} is not bound by the body"),
                    });
                }
            }
        }
    }

    // The condition anchor must be a body variable.
    if let Some((anchor, condition)) = condition {
        if !bound.contains(anchor.as_ref()) {
            return Err(ReasonerError::InvalidRule {
                rule: name.to_string(),
                message: format!("condition anchor {anchor} is not bound by the body"),
            });
        }
        check_term(name, condition.facet())?;
    }

    for template in head {
        let minted_label = matches!(&template.p, Term::Sid(p) if p == &has_label);
        if minted_label {
            // Labels are always scope-qualified and constant, and the
            // label's namespace is the framework's namespace.
            if !matches!(template.graph, PatternGraph::Scope(_)) {
                return Err(ReasonerError::InvalidRule {
                    rule: name.to_string(),
                    message: "labels must be emitted into a scope graph".into(),
                });
            }
            match &template.o {
                Term::Sid(label) if label.namespace_code == framework_ns => {}
                Term::Sid(label) => {
                    return Err(ReasonerError::LabelOwnership {
                        rule: name.to_string(),
                        framework: framework.to_string(),
                        label: label.to_string(),
                    })
                }
                _ => {
                    return Err(ReasonerError::InvalidRule {
                        rule: name.to_string(),
                        message: "label heads must name a constant label".into(),
                    })
                }
            }
        }

        // Facet heads may not assert the analyzer's quasi-identifier
        // inputs; those stay loader-asserted so k analysis is stable.
        let minted_facet = matches!(&template.p, Term::Sid(p) if p == &has_facet);
        if minted_facet {
            let stable = [
                facets::INDIRECT_IDENTIFIER,
                facets::INTERNAL_IDENTIFIER,
                facets::UNIQUE_IDENTIFIER,
            ];
            match &template.o {
                Term::Sid(facet)
                    if facet.namespace_code == namespaces::SDC
                        && stable.contains(&facet.name_str()) =>
                {
                    return Err(ReasonerError::InvalidRule {
                        rule: name.to_string(),
                        message: format!("rules may not derive identifier facet {facet}"),
                    });
                }
                Term::Sid(_) => {}
                _ => {
                    return Err(ReasonerError::InvalidRule {
                        rule: name.to_string(),
                        message: "facet heads must name a constant facet".into(),
                    })
                }
            }
        }
    }

    Ok(())
}

/// Check a constant term against the registered vocabulary.
fn check_term(rule: &Arc<str>, sid: &Sid) -> Result<()> {
    if parajudica_vocab::prefix_iri(sid.namespace_code).is_none() {
        return Err(ReasonerError::UnknownTerm {
            rule: rule.to_string(),
            term: sid.to_string(),
        });
    }
    if sid.namespace_code == namespaces::PJ {
        let known_predicate = [
            predicates::CONTAINS,
            predicates::INCLUDES,
            predicates::HAS_FACET,
            predicates::HAS_LABEL,
            predicates::JOINABLE_WITH,
            predicates::K_ANONYMITY,
            predicates::K_ANONYMITY_ANALYSIS,
            predicates::SAMPLE_ROW,
            predicates::CONTAINER,
            predicates::K,
        ]
        .contains(&sid.name_str());
        let known_kind = [
            parajudica_vocab::kinds::DATABASE,
            parajudica_vocab::kinds::TABLE,
            parajudica_vocab::kinds::FIELD,
            parajudica_vocab::kinds::SCOPE,
            parajudica_vocab::kinds::K_ANONYMITY_RESULT,
        ]
        .contains(&sid.name_str());
        if !known_predicate && !known_kind {
            return Err(ReasonerError::UnknownTerm {
                rule: rule.to_string(),
                term: sid.to_string(),
            });
        }
    }
    Ok(())
}
