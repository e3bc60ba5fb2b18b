//! The EMA framework bundle.
//!
//! EMA Policy 0070 external guidance sets the strictest anonymity-set
//! threshold in the bundle set; the framework contributes no derivation
//! rules of its own, only the analyzer policy.

use parajudica_vocab::namespaces;
use std::sync::Arc;

use crate::framework::Framework;
use crate::kanon::KPolicy;

/// Build the EMA framework bundle.
pub fn ema() -> Framework {
    Framework {
        name: Arc::from("ema"),
        namespace: namespaces::EMA,
        rules: Vec::new(),
        k_policy: Some(KPolicy {
            framework: Arc::from("ema"),
            namespace: namespaces::EMA,
            min_k: 12,
            singling_out: false,
        }),
    }
}
