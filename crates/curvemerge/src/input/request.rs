//! The combined `{ masterLogs, childLogs }` merge request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CurveMergeError, Result};
use crate::record::{CurveList, CurveRecord};

/// Raw master and child lists, before record validation.
///
/// Entries are kept as JSON values so malformed records can be skipped
/// individually instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    #[serde(rename = "masterLogs")]
    pub master_logs: Vec<Value>,
    #[serde(rename = "childLogs")]
    pub child_logs: Vec<Value>,
}

impl MergeRequest {
    pub fn new(master_logs: Vec<Value>, child_logs: Vec<Value>) -> Self {
        Self {
            master_logs,
            child_logs,
        }
    }

    /// Build a request from already-valid records.
    pub fn from_records(master: &[CurveRecord], child: &[CurveRecord]) -> Result<Self> {
        let to_values = |records: &[CurveRecord]| -> Result<Vec<Value>> {
            records
                .iter()
                .map(|r| serde_json::to_value(r).map_err(CurveMergeError::from))
                .collect()
        };
        Ok(Self::new(to_values(master)?, to_values(child)?))
    }

    /// Check the top-level shape of a request value.
    ///
    /// Fails with [`CurveMergeError::InvalidInputShape`] unless the value is
    /// an object whose `masterLogs` and `childLogs` are both arrays.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut obj) = value else {
            return Err(CurveMergeError::InvalidInputShape(format!(
                "expected an object with 'masterLogs' and 'childLogs', got {}",
                json_kind(&value)
            )));
        };

        let master_logs = take_array(&mut obj, CurveList::Master)?;
        let child_logs = take_array(&mut obj, CurveList::Child)?;

        Ok(Self::new(master_logs, child_logs))
    }

    /// Parse a request from strict JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }
}

fn take_array(obj: &mut serde_json::Map<String, Value>, list: CurveList) -> Result<Vec<Value>> {
    let key = list.request_key();
    match obj.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(CurveMergeError::InvalidInputShape(format!(
            "'{}' must be an array, got {}",
            key,
            json_kind(&other)
        ))),
        None => Err(CurveMergeError::InvalidInputShape(format!(
            "missing '{}'",
            key
        ))),
    }
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
