//! curvemerge: deterministic merge of well-log curve metadata.
//!
//! A master list defines the reference curves; a child list brings new
//! curve metadata. Each child record is matched to a master curve, either
//! directly by `CurveID` or through an ordered list of semantic keyword
//! rules, and emitted under the master's identity with its own mnemonic,
//! unit and description. Children that match nothing are dropped.
//!
//! # Core Principles
//!
//! - **Deterministic**: matching is plain string comparison over a fixed,
//!   ordered rule list
//! - **Child-driven**: output follows child list order; unmatched masters never appear
//! - **Partial results**: malformed records are skipped and reported, never fatal
//!
//! # Example
//!
//! ```
//! use curvemerge::CurveMerger;
//!
//! let report = CurveMerger::new()
//!     .merge_json(r#"{
//!         "masterLogs": [{"CurveID": "RDEP"}, {"CurveID": "GR"}],
//!         "childLogs": [{"CurveID": "IND", "description": "deep resistivity reading"}]
//!     }"#)
//!     .unwrap();
//!
//! assert_eq!(report.records.len(), 1);
//! assert_eq!(report.records[0].curve_id, "RDEP");
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod record;

mod merger;

pub use crate::merger::{
    ChildClassification, ClassificationReport, CurveMerger, MergeDiagnostics, MergeReport,
    MergeSummary,
};
pub use classify::{Classification, Classifier, DepthMarkers, SemanticRule, Target, Trigger};
pub use config::MergeConfig;
pub use error::{CurveMergeError, Result};
pub use export::{OutputFormat, records_to_json, save_records, write_records};
pub use input::{
    LasCurve, MergeRequest, SourceMetadata, load_curve_list, load_curve_list_in, load_request,
};
pub use record::{CurveList, CurveRecord, MasterIndex, MergedRecord, SkipReason, SkippedRecord};
