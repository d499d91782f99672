//! Lenient loading of curve list files.
//!
//! Curve lists often come out of other tools wrapped in markdown fences or
//! surrounded by commentary, and in a few different envelopes. The loader
//! finds the JSON body and the curve array inside it. LAS files are read
//! from their `~Curve` section instead.

use std::fmt;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::las::{DEFAULT_PARTITION, decode_las_text, is_las_file, las_records, parse_las_curves};
use super::request::{MergeRequest, json_kind};
use super::source::SourceMetadata;
use crate::error::{CurveMergeError, Result};

// Body of the first ```json ... ``` (or bare ```) fence.
static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").unwrap());

/// Where the curve array sits inside a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveListLayout {
    /// The document is the array.
    Array,
    /// `{ "enrichedCurves": [...] }`, as written by the enrichment step.
    EnrichedCurves,
    /// `{ "Curves": [...] }`
    Curves,
    /// A well-log record, `{ "data": { "Curves": [...] } }`.
    WellLogData,
    /// The `~Curve` section of a LAS file.
    Las,
}

impl fmt::Display for CurveListLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveListLayout::Array => write!(f, "array"),
            CurveListLayout::EnrichedCurves => write!(f, "enrichedCurves"),
            CurveListLayout::Curves => write!(f, "Curves"),
            CurveListLayout::WellLogData => write!(f, "data.Curves"),
            CurveListLayout::Las => write!(f, "las"),
        }
    }
}

/// A curve list read from disk.
#[derive(Debug, Clone)]
pub struct LoadedCurves {
    /// Raw entries, not yet validated.
    pub records: Vec<Value>,
    pub source: SourceMetadata,
}

/// Locate the JSON body in raw text.
///
/// Text that already starts with `[` or `{` is used as-is. Otherwise the body
/// of the first markdown code fence is used, and failing that the span from
/// the first `[`/`{` to the last `]`/`}`.
pub fn extract_json_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Some(trimmed);
    }

    if let Some(body) = FENCED_JSON
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|body| !body.is_empty())
    {
        return Some(body);
    }

    let start = trimmed.find(['[', '{'])?;
    let end = trimmed.rfind([']', '}'])?;
    (end > start).then(|| &trimmed[start..=end])
}

/// Parse JSON out of raw text, tolerating fences and surrounding prose.
///
/// `origin` names the input in error messages.
pub fn parse_lenient(raw: &str, origin: &str) -> Result<Value> {
    let text =
        extract_json_text(raw).ok_or_else(|| CurveMergeError::NoJsonContent(origin.to_string()))?;
    Ok(serde_json::from_str(text)?)
}

/// Find the curve array in a parsed document.
pub fn extract_curve_list(value: Value) -> Result<(Vec<Value>, CurveListLayout)> {
    let kind = json_kind(&value);
    match value {
        Value::Array(items) => Ok((items, CurveListLayout::Array)),
        Value::Object(mut obj) => {
            if let Some(Value::Array(items)) = obj.remove("enrichedCurves") {
                return Ok((items, CurveListLayout::EnrichedCurves));
            }
            if let Some(Value::Array(items)) = obj.remove("Curves") {
                return Ok((items, CurveListLayout::Curves));
            }
            if let Some(Value::Object(mut data)) = obj.remove("data") {
                if let Some(Value::Array(items)) = data.remove("Curves") {
                    return Ok((items, CurveListLayout::WellLogData));
                }
            }
            Err(CurveMergeError::InvalidInputShape(
                "no curve list found: expected an array, or an object with \
                 'enrichedCurves', 'Curves' or 'data.Curves'"
                    .to_string(),
            ))
        }
        _ => Err(CurveMergeError::InvalidInputShape(format!(
            "expected a curve list, got {}",
            kind
        ))),
    }
}

fn decode_utf8<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|source| CurveMergeError::InvalidEncoding {
        path: path.to_path_buf(),
        source,
    })
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| CurveMergeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a curve list file, with LAS units in the default partition.
pub fn load_curve_list(path: impl AsRef<Path>) -> Result<LoadedCurves> {
    load_curve_list_in(path, DEFAULT_PARTITION)
}

/// Load a curve list file.
///
/// JSON files must be UTF-8. LAS files become one entry per curve, with
/// unit references in `partition`.
pub fn load_curve_list_in(path: impl AsRef<Path>, partition: &str) -> Result<LoadedCurves> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let origin = path.display().to_string();

    let (records, layout) = if is_las_file(path, &bytes) {
        let curves = parse_las_curves(&decode_las_text(&bytes))?;
        (las_records(&curves, partition), CurveListLayout::Las)
    } else {
        let value = parse_lenient(decode_utf8(path, &bytes)?, &origin)?;
        extract_curve_list(value)?
    };

    tracing::debug!(
        path = %origin,
        %layout,
        records = records.len(),
        "loaded curve list"
    );

    let source = SourceMetadata::new(path.to_path_buf(), &bytes, layout.to_string(), records.len());
    Ok(LoadedCurves { records, source })
}

/// Parse a combined request from raw text.
pub fn parse_request_text(raw: &str, origin: &str) -> Result<MergeRequest> {
    let value = parse_lenient(raw, origin)?;
    MergeRequest::from_value(value)
}

/// Load a combined `{ masterLogs, childLogs }` request file.
pub fn load_request(path: impl AsRef<Path>) -> Result<MergeRequest> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    parse_request_text(decode_utf8(path, &bytes)?, &path.display().to_string())
}
