//! Content-derived identifiers for derived nodes.
//!
//! A derived entity (currently only k-anonymity result nodes) gets its
//! identity from a SHA-256 digest over its determining inputs, so two
//! derivations of the same semantic result produce the same SID and the
//! second insertion collapses into a no-op. This is what makes fixed-point
//! detection work in the presence of freshly minted nodes.

use parajudica_core::Sid;
use parajudica_vocab::namespaces;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
const SKOLEM_HEX_LEN: usize = 16;

/// Mint a stable identifier for a derived node.
///
/// The digest covers the rule id and each determining SID (namespace code
/// plus local name, length-delimited so concatenations cannot collide).
pub fn skolem_node(rule_id: &str, inputs: &[&Sid]) -> Sid {
    let mut hasher = Sha256::new();
    hasher.update(rule_id.as_bytes());
    hasher.update([0u8]);
    for sid in inputs {
        hasher.update(sid.namespace_code.to_le_bytes());
        hasher.update((sid.name.len() as u64).to_le_bytes());
        hasher.update(sid.name.as_bytes());
    }
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(SKOLEM_HEX_LEN);
    for byte in digest.iter().take(SKOLEM_HEX_LEN / 2) {
        hex.push_str(&format!("{byte:02x}"));
    }
    Sid::new(namespaces::SKOLEM, format!("{rule_id}-{hex}"))
}
