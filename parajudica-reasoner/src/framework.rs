//! Framework bundles: named rule sets owning a label namespace.

use std::sync::Arc;

use crate::compile::{compile_rule, CompiledRule};
use crate::error::{ReasonerError, Result};
use crate::kanon::KPolicy;
use crate::rule::RuleDef;

/// A rule framework: a name, the namespace it may mint labels in, its
/// rules, and an optional k-anonymity policy.
#[derive(Debug, Clone)]
pub struct Framework {
    pub name: Arc<str>,
    pub namespace: u16,
    pub rules: Vec<RuleDef>,
    pub k_policy: Option<KPolicy>,
}

impl Framework {
    /// Compile every rule in the bundle, enforcing label ownership and
    /// vocabulary checks.
    pub fn compile(&self) -> Result<Vec<CompiledRule>> {
        let mut compiled = Vec::new();
        for def in &self.rules {
            compiled.extend(compile_rule(&self.name, self.namespace, def)?);
        }
        Ok(compiled)
    }

    /// Stable fingerprint of the bundle's content, for cache keys.
    pub fn fingerprint(&self) -> String {
        let mut parts = vec![format!("{}@{}", self.name, self.namespace)];
        parts.extend(self.rules.iter().map(|r| r.name().to_string()));
        if let Some(policy) = &self.k_policy {
            parts.push(format!("k:{}:{}", policy.min_k, policy.singling_out));
        }
        parts.join(";")
    }
}

/// An ordered framework selection: Base first, then the requested bundles.
#[derive(Debug, Default)]
pub struct FrameworkSet {
    frameworks: Vec<Framework>,
}

impl FrameworkSet {
    /// Create a set containing only the Base framework.
    pub fn base_only() -> Self {
        Self {
            frameworks: vec![crate::frameworks::base()],
        }
    }

    /// Add a framework bundle. Duplicate names are a configuration error.
    pub fn push(&mut self, framework: Framework) -> Result<()> {
        if self.frameworks.iter().any(|f| f.name == framework.name) {
            return Err(ReasonerError::FrameworkSelection(format!(
                "framework {} selected twice",
                framework.name
            )));
        }
        self.frameworks.push(framework);
        Ok(())
    }

    /// Resolve named bundles from the builtin registry. Base is always
    /// included and need not be named.
    pub fn from_names(names: &[String]) -> Result<Self> {
        let mut set = Self::base_only();
        for name in names {
            if name.as_str() == "base" {
                continue;
            }
            let framework = crate::frameworks::by_name(name).ok_or_else(|| {
                ReasonerError::FrameworkSelection(format!(
                    "unknown framework {name:?} (available: {})",
                    crate::frameworks::available().join(", ")
                ))
            })?;
            set.push(framework)?;
        }
        Ok(set)
    }

    /// The loaded frameworks, in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Framework> {
        self.frameworks.iter()
    }

    /// Compile all bundles into one rule list.
    pub fn compile(&self) -> Result<Vec<CompiledRule>> {
        let mut rules = Vec::new();
        for framework in &self.frameworks {
            rules.extend(framework.compile()?);
        }
        Ok(rules)
    }

    /// The k policies registered across the selection.
    pub fn k_policies(&self) -> Vec<KPolicy> {
        self.frameworks
            .iter()
            .filter_map(|f| f.k_policy.clone())
            .collect()
    }

    /// Fingerprint of the entire selection, for cache keys.
    pub fn fingerprint(&self) -> String {
        self.frameworks
            .iter()
            .map(|f| f.fingerprint())
            .collect::<Vec<_>>()
            .join("|")
    }
}
