//! Master index: `CurveID -> CurveRecord` lookup built from the master list.

use indexmap::IndexMap;

use super::curve::CurveRecord;

/// Lookup from master `CurveID` to its record.
///
/// Duplicate IDs resolve last-write-wins. A key keeps the position of its
/// first occurrence, so iteration follows master list order.
#[derive(Debug, Clone, Default)]
pub struct MasterIndex {
    entries: IndexMap<String, CurveRecord>,
    duplicates: Vec<String>,
}

impl MasterIndex {
    /// Build an index from master records in list order.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CurveRecord>,
    {
        let mut index = Self::default();
        for record in records {
            index.insert(record);
        }
        index
    }

    fn insert(&mut self, record: CurveRecord) {
        let key = record.curve_id.clone();
        if self.entries.insert(key.clone(), record).is_some() {
            tracing::warn!(curve_id = %key, "duplicate master CurveID, keeping the later record");
            if !self.duplicates.contains(&key) {
                self.duplicates.push(key);
            }
        }
    }

    pub fn contains(&self, curve_id: &str) -> bool {
        self.entries.contains_key(curve_id)
    }

    pub fn get(&self, curve_id: &str) -> Option<&CurveRecord> {
        self.entries.get(curve_id)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in master list order, one per key.
    pub fn iter(&self) -> impl Iterator<Item = &CurveRecord> {
        self.entries.values()
    }

    /// Keys that appeared more than once, in order of first duplication.
    pub fn duplicate_keys(&self) -> &[String] {
        &self.duplicates
    }
}
