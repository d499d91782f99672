//! Curve records, merged output rows and record-level validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata for one logging curve, as read from a master or child list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveRecord {
    /// Primary matching key.
    #[serde(rename = "CurveID")]
    pub curve_id: String,
    /// Short curve code. Carried through, never matched on.
    #[serde(rename = "Mnemonic", default)]
    pub mnemonic: Option<String>,
    /// Unit-of-measure descriptor.
    #[serde(rename = "CurveUnit", default)]
    pub curve_unit: Option<String>,
    /// Free-text description. Read from `description`, with `Description`
    /// accepted so merged output can be merged again.
    #[serde(rename = "description", alias = "Description", default)]
    pub description: Option<String>,
}

impl CurveRecord {
    /// Create a record with only a curve ID.
    pub fn new(curve_id: impl Into<String>) -> Self {
        Self {
            curve_id: curve_id.into(),
            mnemonic: None,
            curve_unit: None,
            description: None,
        }
    }

    pub fn with_mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = Some(mnemonic.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.curve_unit = Some(unit.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description text, or an empty string when absent.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Validate and convert one raw JSON entry.
    ///
    /// Optional fields that are strings are taken as-is, numbers and booleans
    /// are kept as their JSON text, and anything else is treated as absent.
    pub fn from_value(value: &Value) -> Result<Self, SkipReason> {
        let obj = value.as_object().ok_or(SkipReason::NotAnObject)?;

        let curve_id = match obj.get("CurveID") {
            None | Some(Value::Null) => return Err(SkipReason::MissingCurveId),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(SkipReason::BlankCurveId);
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(SkipReason::InvalidCurveId),
        };

        let description = obj
            .get("description")
            .and_then(scalar_text)
            .or_else(|| obj.get("Description").and_then(scalar_text));

        Ok(Self {
            curve_id,
            mnemonic: obj.get("Mnemonic").and_then(scalar_text),
            curve_unit: obj.get("CurveUnit").and_then(scalar_text),
            description,
        })
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One row of merge output.
///
/// Always serializes exactly the four keys below; absent values become `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    #[serde(rename = "CurveID")]
    pub curve_id: String,
    #[serde(rename = "Mnemonic")]
    pub mnemonic: Option<String>,
    #[serde(rename = "CurveUnit")]
    pub curve_unit: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

impl MergedRecord {
    /// Column order used by tabular exports.
    pub const FIELDS: [&'static str; 4] = ["CurveID", "Mnemonic", "CurveUnit", "Description"];

    /// Build an output row from a child record under the given master identity.
    pub fn from_child(child: &CurveRecord, curve_id: impl Into<String>) -> Self {
        Self {
            curve_id: curve_id.into(),
            mnemonic: child.mnemonic.clone(),
            curve_unit: child.curve_unit.clone(),
            description: child.description.clone(),
        }
    }
}

/// Which input list a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveList {
    Master,
    Child,
}

impl CurveList {
    /// Key of this list in a merge request.
    pub fn request_key(&self) -> &'static str {
        match self {
            CurveList::Master => "masterLogs",
            CurveList::Child => "childLogs",
        }
    }
}

impl fmt::Display for CurveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveList::Master => write!(f, "master"),
            CurveList::Child => write!(f, "child"),
        }
    }
}

/// Why a record was excluded from the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Entry is not a JSON object.
    NotAnObject,
    /// `CurveID` is absent or null.
    MissingCurveId,
    /// `CurveID` is present but not a string.
    InvalidCurveId,
    /// `CurveID` is an empty or whitespace-only string.
    BlankCurveId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NotAnObject => "entry is not an object",
            SkipReason::MissingCurveId => "missing CurveID",
            SkipReason::InvalidCurveId => "CurveID is not a string",
            SkipReason::BlankCurveId => "CurveID is blank",
        };
        f.write_str(text)
    }
}

/// A malformed record that was excluded from the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// List the record came from.
    pub list: CurveList,
    /// Zero-based position within that list.
    pub index: usize,
    pub reason: SkipReason,
}

/// Validate every entry of a raw list.
///
/// Returns the valid records in list order and the skipped entries.
pub fn parse_records(list: CurveList, values: &[Value]) -> (Vec<CurveRecord>, Vec<SkippedRecord>) {
    let (indexed, skipped) = parse_indexed_records(list, values);
    (indexed.into_iter().map(|(_, record)| record).collect(), skipped)
}

/// Like [`parse_records`], keeping each valid record's position in the list.
pub fn parse_indexed_records(
    list: CurveList,
    values: &[Value],
) -> (Vec<(usize, CurveRecord)>, Vec<SkippedRecord>) {
    let mut records = Vec::with_capacity(values.len());
    let mut skipped = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match CurveRecord::from_value(value) {
            Ok(record) => records.push((index, record)),
            Err(reason) => {
                tracing::warn!(%list, index, %reason, "skipping malformed curve record");
                skipped.push(SkippedRecord {
                    list,
                    index,
                    reason,
                });
            }
        }
    }

    (records, skipped)
}
