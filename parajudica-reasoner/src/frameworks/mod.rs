//! Builtin framework bundles.
//!
//! Frameworks are data: each bundle is a `Framework` value holding its
//! rule definitions and optional k-anonymity policy. Base carries the
//! structural metamodel rules and is always loaded; the privacy bundles
//! are selected by name.

mod base;
mod ema;
mod gdpr;
mod hipaa;
mod italy;

pub use base::base;
pub use ema::ema;
pub use gdpr::gdpr;
pub use hipaa::hipaa;
pub use italy::italy;

use crate::framework::Framework;

/// Names of the selectable bundles (Base excluded: it is always loaded).
pub fn available() -> &'static [&'static str] {
    &["hipaa", "gdpr", "ema", "italy"]
}

/// Resolve a bundle by name.
pub fn by_name(name: &str) -> Option<Framework> {
    match name {
        "base" => Some(base()),
        "hipaa" => Some(hipaa()),
        "gdpr" => Some(gdpr()),
        "ema" => Some(ema()),
        "italy" => Some(italy()),
        _ => None,
    }
}
