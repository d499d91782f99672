//! CLI command implementations.

pub mod convert;
pub mod explain;
pub mod merge;
pub mod serve;
pub mod transform;

use std::path::PathBuf;

use curvemerge::{CurveMerger, MergeConfig};

/// Build a merger from an optional rules file.
pub fn load_merger(rules: Option<&PathBuf>) -> Result<CurveMerger, Box<dyn std::error::Error>> {
    let config = match rules {
        Some(path) => {
            let config = MergeConfig::load(path)?;
            tracing::info!(path = %path.display(), rules = config.rules.len(), "loaded rules");
            config
        }
        None => MergeConfig::default(),
    };
    Ok(CurveMerger::with_config(config))
}
