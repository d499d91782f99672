//! Merge configuration.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::{DepthMarkers, SemanticRule, default_rules};
use crate::error::{CurveMergeError, Result};
use crate::input::DEFAULT_PARTITION;

/// Configuration for a [`CurveMerger`](crate::CurveMerger).
///
/// Every field has a default, so a config file only needs the parts it
/// changes. Supplying `rules` replaces the built-in rule list entirely.
///
/// ```json
/// {
///   "rules": [
///     {
///       "name": "deep_resistivity",
///       "triggers": [{"kind": "curve_id_equals", "value": "IND"}],
///       "target": {"curve_id": "RDEP"}
///     }
///   ],
///   "depth_markers": {"contains": ["DEPT"], "tokens": ["MD"]}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Semantic rules in priority order, evaluated after direct matching.
    pub rules: Vec<SemanticRule>,
    /// How the master depth curve is recognized.
    pub depth_markers: DepthMarkers,
    /// List the `CurveID`s of dropped child records in reports.
    pub include_unmatched_in_report: bool,
    /// Data partition used for unit references when reading LAS files.
    pub data_partition_id: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            depth_markers: DepthMarkers::default(),
            include_unmatched_in_report: true,
            data_partition_id: DEFAULT_PARTITION.to_string(),
        }
    }
}

impl MergeConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: MergeConfig = serde_json::from_str(text)
            .map_err(|e| CurveMergeError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CurveMergeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|e| match e {
            CurveMergeError::Config(msg) => {
                CurveMergeError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Check rules are well-formed and uniquely named.
    pub fn validate(&self) -> Result<()> {
        if self.data_partition_id.trim().is_empty() {
            return Err(CurveMergeError::Config(
                "data_partition_id must not be empty".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for rule in &self.rules {
            rule.validate().map_err(CurveMergeError::Config)?;
            if !names.insert(rule.name.as_str()) {
                return Err(CurveMergeError::Config(format!(
                    "duplicate rule name '{}'",
                    rule.name
                )));
            }
        }
        Ok(())
    }
}
