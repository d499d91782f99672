//! Main merge engine and public API.

use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::{Classification, Classifier};
use crate::config::MergeConfig;
use crate::error::Result;
use crate::input::{MergeRequest, SourceMetadata, load_curve_list_in};
use crate::record::{
    CurveList, CurveRecord, MasterIndex, MergedRecord, SkippedRecord, parse_indexed_records,
    parse_records,
};

/// Result of merging a master and a child list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeReport {
    /// Merged output rows, in child list order.
    pub records: Vec<MergedRecord>,
    /// Record-level problems found while merging.
    pub diagnostics: MergeDiagnostics,
    /// Counts describing the merge.
    pub summary: MergeSummary,
    /// Files the lists were loaded from, when merged from disk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceMetadata>,
}

/// Record-level problems. None of these stop a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeDiagnostics {
    /// Malformed entries excluded from either list.
    pub skipped: Vec<SkippedRecord>,
    /// Master `CurveID`s that appeared more than once (last one wins).
    pub duplicate_master_keys: Vec<String>,
    /// `CurveID`s of valid child records that matched nothing.
    pub unmatched_children: Vec<String>,
}

impl MergeDiagnostics {
    /// True when no entries were skipped and no master keys were duplicated.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.duplicate_master_keys.is_empty()
    }

    /// Skipped entries from one list.
    pub fn skipped_in(&self, list: CurveList) -> impl Iterator<Item = &SkippedRecord> {
        self.skipped.iter().filter(move |s| s.list == list)
    }
}

/// Summary counts for a merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSummary {
    /// Entries in the master list, valid or not.
    pub master_total: usize,
    pub master_valid: usize,
    /// Distinct master `CurveID`s.
    pub master_unique: usize,
    /// Entries in the child list, valid or not.
    pub child_total: usize,
    pub child_valid: usize,
    pub direct_matches: usize,
    pub semantic_matches: usize,
    /// Semantic matches per rule name, in order of first use.
    pub semantic_by_rule: IndexMap<String, usize>,
    /// Valid child records that matched nothing.
    pub dropped: usize,
    pub merged_at: DateTime<Utc>,
}

impl MergeSummary {
    /// Number of merged output rows.
    pub fn merged(&self) -> usize {
        self.direct_matches + self.semantic_matches
    }
}

/// Classification of one child record, for previews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildClassification {
    /// Position in the child list.
    pub index: usize,
    pub curve_id: String,
    pub description: Option<String>,
    pub classification: Classification,
}

/// Every child record's classification, without producing output rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classifications: Vec<ChildClassification>,
    pub diagnostics: MergeDiagnostics,
}

/// The merge engine.
///
/// Holds only configuration, so one instance can serve any number of merges,
/// including concurrently. Each merge builds its own master index.
///
/// # Example
///
/// ```
/// use curvemerge::{CurveMerger, CurveRecord};
///
/// let master = vec![CurveRecord::new("RDEP"), CurveRecord::new("GR")];
/// let child = vec![CurveRecord::new("IND")
///     .with_mnemonic("ILD")
///     .with_unit("OHMM")
///     .with_description("deep resistivity reading")];
///
/// let merged = CurveMerger::new().merge(&master, &child);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].curve_id, "RDEP");
/// assert_eq!(merged[0].mnemonic.as_deref(), Some("ILD"));
/// ```
#[derive(Debug, Clone)]
pub struct CurveMerger {
    config: MergeConfig,
    classifier: Classifier,
}

impl CurveMerger {
    /// Create a merger with the built-in rules.
    pub fn new() -> Self {
        Self::with_config(MergeConfig::default())
    }

    /// Create a merger with custom configuration.
    pub fn with_config(config: MergeConfig) -> Self {
        let classifier = Classifier::with_rules(config.rules.clone(), config.depth_markers.clone());
        Self { config, classifier }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Merge already-validated records and return only the output rows.
    pub fn merge(&self, master: &[CurveRecord], child: &[CurveRecord]) -> Vec<MergedRecord> {
        self.run(master, child, Vec::new(), master.len(), child.len())
            .records
    }

    /// Merge a raw request, skipping malformed entries.
    pub fn merge_request(&self, request: &MergeRequest) -> MergeReport {
        let (master, mut skipped) = parse_records(CurveList::Master, &request.master_logs);
        let (child, child_skipped) = parse_records(CurveList::Child, &request.child_logs);
        skipped.extend(child_skipped);

        self.run(
            &master,
            &child,
            skipped,
            request.master_logs.len(),
            request.child_logs.len(),
        )
    }

    /// Merge a request given as a JSON value.
    ///
    /// Fails only when the value does not have the request shape.
    pub fn merge_value(&self, value: Value) -> Result<MergeReport> {
        let request = MergeRequest::from_value(value)?;
        Ok(self.merge_request(&request))
    }

    /// Merge a request given as JSON text.
    pub fn merge_json(&self, text: &str) -> Result<MergeReport> {
        let request = MergeRequest::from_json(text)?;
        Ok(self.merge_request(&request))
    }

    /// Load a master and a child curve list file and merge them.
    pub fn merge_files(
        &self,
        master_path: impl AsRef<Path>,
        child_path: impl AsRef<Path>,
    ) -> Result<MergeReport> {
        let partition = self.config.data_partition_id.as_str();
        let master = load_curve_list_in(master_path, partition)?;
        let child = load_curve_list_in(child_path, partition)?;

        let request = MergeRequest::new(master.records, child.records);
        let mut report = self.merge_request(&request);
        report.sources = vec![master.source, child.source];
        Ok(report)
    }

    /// Classify every valid child record without building output.
    pub fn classify_request(&self, request: &MergeRequest) -> ClassificationReport {
        let (master, mut skipped) = parse_records(CurveList::Master, &request.master_logs);
        let (child, child_skipped) = parse_indexed_records(CurveList::Child, &request.child_logs);
        skipped.extend(child_skipped);

        let index = MasterIndex::build(master);
        let mut unmatched_children = Vec::new();

        let classifications = child
            .into_iter()
            .map(|(position, record)| {
                let classification = self.classifier.classify(&record, &index);
                if !classification.is_match() {
                    unmatched_children.push(record.curve_id.clone());
                }
                ChildClassification {
                    index: position,
                    curve_id: record.curve_id,
                    description: record.description,
                    classification,
                }
            })
            .collect();

        if !self.config.include_unmatched_in_report {
            unmatched_children.clear();
        }

        ClassificationReport {
            classifications,
            diagnostics: MergeDiagnostics {
                skipped,
                duplicate_master_keys: index.duplicate_keys().to_vec(),
                unmatched_children,
            },
        }
    }

    /// Single pass over the child list.
    fn run(
        &self,
        master: &[CurveRecord],
        child: &[CurveRecord],
        skipped: Vec<SkippedRecord>,
        master_total: usize,
        child_total: usize,
    ) -> MergeReport {
        let index = MasterIndex::build(master.iter().cloned());

        let mut records = Vec::with_capacity(child.len());
        let mut direct_matches = 0;
        let mut semantic_matches = 0;
        let mut semantic_by_rule: IndexMap<String, usize> = IndexMap::new();
        let mut unmatched_children = Vec::new();

        for record in child {
            match self.classifier.classify(record, &index) {
                Classification::DirectMatch { master_id } => {
                    direct_matches += 1;
                    records.push(MergedRecord::from_child(record, master_id));
                }
                Classification::SemanticMatch { master_id, rule } => {
                    semantic_matches += 1;
                    *semantic_by_rule.entry(rule).or_insert(0) += 1;
                    records.push(MergedRecord::from_child(record, master_id));
                }
                Classification::NoMatch => {
                    unmatched_children.push(record.curve_id.clone());
                }
            }
        }

        let dropped = unmatched_children.len();
        if !self.config.include_unmatched_in_report {
            unmatched_children.clear();
        }

        tracing::info!(
            master = master.len(),
            child = child.len(),
            merged = records.len(),
            direct = direct_matches,
            semantic = semantic_matches,
            dropped,
            skipped = skipped.len(),
            "merge complete"
        );

        let summary = MergeSummary {
            master_total,
            master_valid: master.len(),
            master_unique: index.len(),
            child_total,
            child_valid: child.len(),
            direct_matches,
            semantic_matches,
            semantic_by_rule,
            dropped,
            merged_at: Utc::now(),
        };

        MergeReport {
            records,
            diagnostics: MergeDiagnostics {
                skipped,
                duplicate_master_keys: index.duplicate_keys().to_vec(),
                unmatched_children,
            },
            summary,
            sources: Vec::new(),
        }
    }
}

impl Default for CurveMerger {
    fn default() -> Self {
        Self::new()
    }
}
