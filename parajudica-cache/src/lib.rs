//! # Parajudica Cache
//!
//! Content-addressed cache for inference results.
//!
//! A cache entry is the canonical JSON serialization of a finished store,
//! stored as a blob whose name is the SHA-256 digest of every input that
//! determines the result: the framework selection fingerprint and the
//! data file contents. Entries are safe to delete at any time; writes go
//! through a `.tmp` rename so a crash never leaves a torn entry.

use parajudica_core::GraphStore;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem error
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry exists but does not deserialize
    #[error("Corrupt cache entry: {0}")]
    Corrupt(#[from] parajudica_core::Error),
}

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// A content hash in hex form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey(String);

impl CacheKey {
    /// Digest the inputs that determine an inference result.
    ///
    /// `framework_fingerprint` identifies the rule content; `data` holds
    /// the (name, bytes) of each loaded data file, hashed in the caller's
    /// load order since order never affects the fixpoint but does identify
    /// the run's inputs.
    pub fn compute(framework_fingerprint: &str, data: &[(String, Vec<u8>)]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(framework_fingerprint.as_bytes());
        hasher.update([0u8]);
        for (name, bytes) in data {
            hasher.update(name.as_bytes());
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(64);
        for byte in digest {
            hex.push_str(&format!("{byte:02x}"));
        }
        CacheKey(hex)
    }

    /// The hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Manages the cache blob directory.
#[derive(Debug)]
pub struct CacheManager {
    dir: PathBuf,
}

impl CacheManager {
    /// Open (creating if needed) a cache directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Blob path for a key.
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("cache-{}.json", key.as_str()))
    }

    /// Whether an entry exists.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entry_path(key).exists()
    }

    /// Load a cached store, or `None` on a miss.
    pub fn load(&self, key: &CacheKey) -> Result<Option<GraphStore>> {
        let path = self.entry_path(key);
        if !path.exists() {
            debug!(key = key.as_str(), "cache miss");
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        let store = GraphStore::from_canonical_json(&json)?;
        debug!(key = key.as_str(), quads = store.len(), "cache hit");
        Ok(Some(store))
    }

    /// Persist a finished store under the key.
    pub fn save(&self, key: &CacheKey, store: &GraphStore) -> Result<PathBuf> {
        let path = self.entry_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, store.to_canonical_json()?)?;
        fs::rename(&tmp, &path)?;
        debug!(key = key.as_str(), quads = store.len(), "cache write");
        Ok(path)
    }

    /// Remove one entry, if present.
    pub fn remove(&self, key: &CacheKey) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parajudica_core::{Quad, Sid};

    fn sample_store() -> GraphStore {
        let mut store = GraphStore::new();
        store.insert(Quad::data(
            Sid::new(9, "t"),
            Sid::new(3, "hasFacet"),
            Sid::new(4, "Healthcare"),
        ));
        store
    }

    fn sample_data() -> Vec<(String, Vec<u8>)> {
        vec![("data.ttl".into(), b"app:t pj:hasFacet sdc:Healthcare .".to_vec())]
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::open(dir.path()).unwrap();
        let key = CacheKey::compute("base|hipaa", &sample_data());

        assert!(cache.load(&key).unwrap().is_none());
        cache.save(&key, &sample_store()).unwrap();
        let loaded = cache.load(&key).unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(
            loaded.to_canonical_json().unwrap(),
            sample_store().to_canonical_json().unwrap()
        );
    }

    #[test]
    fn test_key_sensitive_to_inputs() {
        let base = CacheKey::compute("base|hipaa", &sample_data());
        let other_rules = CacheKey::compute("base|gdpr", &sample_data());
        let mut changed = sample_data();
        changed[0].1.push(b' ');
        let other_data = CacheKey::compute("base|hipaa", &changed);

        assert_ne!(base, other_rules);
        assert_ne!(base, other_data);
        assert_eq!(base, CacheKey::compute("base|hipaa", &sample_data()));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::open(dir.path()).unwrap();
        let key = CacheKey::compute("base", &[]);
        cache.save(&key, &sample_store()).unwrap();
        assert!(cache.contains(&key));
        cache.remove(&key).unwrap();
        assert!(!cache.contains(&key));
    }

    #[test]
    fn test_corrupt_entry_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::open(dir.path()).unwrap();
        let key = CacheKey::compute("base", &[]);
        std::fs::write(cache.entry_path(&key), "not json").unwrap();
        assert!(matches!(cache.load(&key), Err(CacheError::Corrupt(_))));
    }
}
