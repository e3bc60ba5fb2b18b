//! Subject ID (SID) - compact IRI representation
//!
//! A SID is composed of:
//! - `namespace_code`: u16 mapping to a registered namespace prefix
//!   (see `parajudica_vocab::registered_namespaces`)
//! - `name`: Arc<str> local part after the namespace prefix (cheap clones)
//!
//! ## Ordering
//!
//! SIDs use strict total ordering: namespace_code first, then name. The
//! canonical store serialization relies on this for byte-stable output.
//!
//! ## Interning
//!
//! `SidInterner` deduplicates local names while loading, so the many quads
//! that share a subject or predicate also share one allocation.

use hashbrown::HashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Subject ID - compact IRI representation
///
/// Uses `Arc<str>` for the name to enable cheap clones and interning.
/// Serializes as a `[namespace_code, name]` tuple in JSON.
#[derive(Clone, Debug)]
pub struct Sid {
    pub namespace_code: u16,
    pub name: Arc<str>,
}

impl Sid {
    /// Create a new SID
    pub fn new(namespace_code: u16, name: impl AsRef<str>) -> Self {
        Self {
            namespace_code,
            name: Arc::from(name.as_ref()),
        }
    }

    /// Create a new SID with a pre-interned name
    pub fn with_arc(namespace_code: u16, name: Arc<str>) -> Self {
        Self {
            namespace_code,
            name,
        }
    }

    /// Get the name as a string slice
    pub fn name_str(&self) -> &str {
        &self.name
    }

    /// Expand to the full IRI, if the namespace code is registered.
    pub fn to_iri(&self) -> Option<String> {
        parajudica_vocab::prefix_iri(self.namespace_code).map(|prefix| format!("{prefix}{}", self.name))
    }
}

impl PartialEq for Sid {
    fn eq(&self, other: &Self) -> bool {
        self.namespace_code == other.namespace_code && self.name == other.name
    }
}

impl Eq for Sid {}

impl Ord for Sid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace_code
            .cmp(&other.namespace_code)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Sid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Sid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace_code.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Sid {
    /// Render as `prefix:local` for registered namespaces, falling back to
    /// `[code:local]` for unregistered codes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = parajudica_vocab::registered_namespaces()
            .iter()
            .find(|(code, _, _)| *code == self.namespace_code)
            .map(|(_, label, _)| *label);
        match label {
            Some(label) => write!(f, "{label}:{}", self.name),
            None => write!(f, "[{}:{}]", self.namespace_code, self.name),
        }
    }
}

impl Serialize for Sid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.namespace_code)?;
        tuple.serialize_element(self.name.as_ref())?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Sid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (namespace_code, name): (u16, String) = Deserialize::deserialize(deserializer)?;
        Ok(Sid {
            namespace_code,
            name: Arc::from(name),
        })
    }
}

/// Interner deduplicating SID local names.
///
/// Thread-safe via a read-write lock; reads (cache hits) dominate during
/// loading, so lookups take the read path first.
#[derive(Debug, Default)]
pub struct SidInterner {
    names: RwLock<HashMap<(u16, String), Arc<str>>>,
}

impl SidInterner {
    /// Create a new empty interner
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a SID, returning a SID with a shared name Arc.
    pub fn intern(&self, namespace_code: u16, name: &str) -> Sid {
        let key = (namespace_code, name.to_owned());
        if let Some(arc) = self.names.read().get(&key) {
            return Sid::with_arc(namespace_code, arc.clone());
        }
        let arc = self
            .names
            .write()
            .entry(key)
            .or_insert_with(|| Arc::from(name))
            .clone();
        Sid::with_arc(namespace_code, arc)
    }

    /// Number of unique interned names
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    /// Check if the interner is empty
    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}
