//! Curve lists from LAS 2.0 well-log files.
//!
//! Only the `~Curve` information section is read. Each curve becomes a record
//! whose `CurveID` and `Mnemonic` are the LAS mnemonic and whose `CurveUnit`
//! is a unit-of-measure reference in a data partition, e.g.
//! `opendes:reference-data--UnitOfMeasure:G%2FC3:`.

use std::borrow::Cow;
use std::path::Path;

use serde_json::{Map, Value, json};

use crate::error::{CurveMergeError, Result};

/// Partition used for unit references when none is configured.
pub const DEFAULT_PARTITION: &str = "opendes";

const UNITLESS: &str = "UNITLESS";

/// Mnemonic given to curve lines with an empty mnemonic field.
const UNKNOWN_MNEMONIC: &str = "UNKNOWN";

/// One line of a `~Curve` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LasCurve {
    pub mnemonic: String,
    /// Unit as written in the file, empty when the curve has none.
    pub unit: String,
    pub description: String,
}

impl LasCurve {
    /// `<partition>:reference-data--UnitOfMeasure:<unit>:` with the unit
    /// percent-encoded, or `UNITLESS` when the curve has no unit.
    pub fn unit_reference(&self, partition: &str) -> String {
        let unit = if self.unit.is_empty() {
            Cow::Borrowed(UNITLESS)
        } else {
            urlencoding::encode(&self.unit)
        };
        format!("{}:reference-data--UnitOfMeasure:{}:", partition, unit)
    }

    /// The curve as a raw curve-list entry.
    pub fn to_record(&self, partition: &str) -> Value {
        let mut obj = Map::new();
        obj.insert("CurveID".into(), Value::String(self.mnemonic.clone()));
        obj.insert("Mnemonic".into(), Value::String(self.mnemonic.clone()));
        obj.insert(
            "CurveUnit".into(),
            Value::String(self.unit_reference(partition)),
        );
        if !self.description.is_empty() {
            obj.insert(
                "description".into(),
                Value::String(self.description.clone()),
            );
        }
        Value::Object(obj)
    }
}

/// Whether a file should be read as LAS rather than JSON.
///
/// Decided by a `.las` extension (any case) or content opening with the
/// `~V` version section.
pub fn is_las_file(path: &Path, bytes: &[u8]) -> bool {
    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("las"));

    by_extension
        || bytes
            .trim_ascii_start()
            .get(..2)
            .is_some_and(|head| head.eq_ignore_ascii_case(b"~v"))
}

/// Decode LAS bytes. Files that are not UTF-8 are read as Latin-1, which
/// maps every byte to a character.
pub fn decode_las_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Parse the `~Curve` section of LAS text.
///
/// Reading stops at the `~A` data section. A curve line is
/// `MNEM.UNIT  API CODE : DESCRIPTION`; the unit runs from the first `.` to
/// the next whitespace and the description follows the first `:` after it.
pub fn parse_las_curves(text: &str) -> Result<Vec<LasCurve>> {
    let mut curves = Vec::new();
    let mut in_curves = false;
    let mut saw_curve_section = false;

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(section) = line.strip_prefix('~') {
            let kind = section.chars().next().map(|c| c.to_ascii_uppercase());
            if kind == Some('A') {
                break;
            }
            in_curves = kind == Some('C');
            saw_curve_section |= in_curves;
            continue;
        }

        if in_curves {
            curves.push(parse_curve_line(line).ok_or_else(|| {
                CurveMergeError::InvalidInputShape(format!(
                    "malformed LAS curve line {}: '{}'",
                    number + 1,
                    line
                ))
            })?);
        }
    }

    if !saw_curve_section {
        return Err(CurveMergeError::InvalidInputShape(
            "no ~Curve section found in LAS file".to_string(),
        ));
    }

    tracing::debug!(curves = curves.len(), "parsed LAS curve section");
    Ok(curves)
}

fn parse_curve_line(line: &str) -> Option<LasCurve> {
    let (mnemonic, rest) = line.split_once('.')?;
    let unit_end = rest
        .find(|c: char| c.is_whitespace() || c == ':')
        .unwrap_or(rest.len());
    let (unit, rest) = rest.split_at(unit_end);
    let (_, description) = rest.split_once(':')?;

    let mnemonic = match mnemonic.trim() {
        "" => UNKNOWN_MNEMONIC,
        m => m,
    };

    Some(LasCurve {
        mnemonic: mnemonic.to_string(),
        unit: unit.to_string(),
        description: description.trim().to_string(),
    })
}

/// Curve-list entries for parsed LAS curves.
pub fn las_records(curves: &[LasCurve], partition: &str) -> Vec<Value> {
    curves.iter().map(|c| c.to_record(partition)).collect()
}

/// A well-log document, `{ "data": { "ReferenceCurveID", "Curves" } }`,
/// whose reference curve is the first curve in the file.
pub fn well_log_document(curves: &[LasCurve], partition: &str) -> Result<Value> {
    let reference = curves.first().ok_or_else(|| {
        CurveMergeError::InvalidInputShape(
            "LAS file has no curves to take a reference curve from".to_string(),
        )
    })?;

    Ok(json!({
        "data": {
            "ReferenceCurveID": reference.mnemonic,
            "Curves": las_records(curves, partition),
        }
    }))
}
