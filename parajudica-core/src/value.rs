//! Object values for quads.
//!
//! The domain needs a small closed value set: references to other nodes,
//! integers (k values), strings (sample cell values), and booleans. Values
//! are totally ordered so the canonical store serialization is stable.

use crate::sid::Sid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An object-position value in a quad.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TermValue {
    /// Reference to another node
    Ref(Sid),
    /// Integer literal (xsd:long)
    Long(i64),
    /// String literal
    String(Arc<str>),
    /// Boolean literal
    Boolean(bool),
}

impl TermValue {
    /// Create a string value
    pub fn string(s: impl AsRef<str>) -> Self {
        TermValue::String(Arc::from(s.as_ref()))
    }

    /// Get the referenced SID if this is a Ref
    pub fn as_ref_sid(&self) -> Option<&Sid> {
        match self {
            TermValue::Ref(sid) => Some(sid),
            _ => None,
        }
    }

    /// Get the integer value if this is a Long
    pub fn as_long(&self) -> Option<i64> {
        match self {
            TermValue::Long(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<Sid> for TermValue {
    fn from(sid: Sid) -> Self {
        TermValue::Ref(sid)
    }
}

impl From<i64> for TermValue {
    fn from(n: i64) -> Self {
        TermValue::Long(n)
    }
}

impl From<bool> for TermValue {
    fn from(b: bool) -> Self {
        TermValue::Boolean(b)
    }
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Ref(sid) => write!(f, "{sid}"),
            TermValue::Long(n) => write!(f, "{n}"),
            TermValue::String(s) => write!(f, "{s:?}"),
            TermValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}
