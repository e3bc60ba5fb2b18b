//! `parajudica infer` - load, infer, answer queries.

use std::fs;
use std::path::PathBuf;

use parajudica_cache::{CacheKey, CacheManager};
use parajudica_core::GraphStore;
use parajudica_query::parse_query;
use parajudica_reasoner::{infer, FrameworkSet};
use tracing::info;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::print_table;

pub struct InferOpts {
    pub frameworks: Vec<String>,
    pub data: Vec<PathBuf>,
    pub queries: Vec<String>,
    pub cache: bool,
    pub rm_cache: bool,
    pub cache_dir: PathBuf,
    pub format: OutputFormat,
    pub export: Option<PathBuf>,
}

pub fn run(opts: InferOpts) -> CliResult<()> {
    let set = FrameworkSet::from_names(&opts.frameworks)?;

    // Read data files up front: their bytes feed both the loader and the
    // cache key.
    let mut data: Vec<(String, Vec<u8>)> = Vec::with_capacity(opts.data.len());
    for path in &opts.data {
        let bytes = fs::read(path)
            .map_err(|e| CliError::Input(format!("{}: {e}", path.display())))?;
        data.push((path.display().to_string(), bytes));
    }

    let cache = if opts.cache || opts.rm_cache {
        Some(CacheManager::open(&opts.cache_dir)?)
    } else {
        None
    };
    let key = CacheKey::compute(&set.fingerprint(), &data);

    let store = match &cache {
        Some(cache) => {
            if opts.rm_cache {
                cache.remove(&key)?;
            }
            match cache.load(&key)? {
                Some(store) => {
                    info!(quads = store.len(), "reusing cached result store");
                    store
                }
                None => {
                    let store = compute(&set, &data)?;
                    cache.save(&key, &store)?;
                    store
                }
            }
        }
        None => compute(&set, &data)?,
    };

    if let Some(path) = &opts.export {
        fs::write(path, store.to_canonical_json()?)?;
        info!(path = %path.display(), "exported final store");
    }

    for (i, text) in opts.queries.iter().enumerate() {
        let query = parse_query(text)?;
        let table = parajudica_query::execute(&store, &query);
        print_table(&format!("query {}", i + 1), &table, opts.format);
    }
    Ok(())
}

/// Load the data files and run inference to fixpoint.
fn compute(set: &FrameworkSet, data: &[(String, Vec<u8>)]) -> CliResult<GraphStore> {
    let mut store = GraphStore::new();
    for (name, bytes) in data {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CliError::Input(format!("{name}: not valid UTF-8: {e}")))?;
        let inserted = parajudica_turtle::parse_into_store(text, &mut store)
            .map_err(|source| CliError::Turtle {
                file: name.clone(),
                source,
            })?;
        info!(file = name.as_str(), triples = inserted, "loaded data file");
    }

    let diagnostics = infer(&mut store, set)?;
    info!(
        rounds = diagnostics.rounds,
        derived = diagnostics.facts_derived,
        total = store.len(),
        converged = diagnostics.converged,
        "inference finished"
    );
    for (rule, count) in &diagnostics.rules_fired {
        tracing::debug!(rule = rule.as_str(), fired = count, "rule contribution");
    }
    Ok(store)
}
