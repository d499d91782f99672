//! Curve record model and master index.

mod curve;
mod index;

pub use curve::{
    CurveList, CurveRecord, MergedRecord, SkipReason, SkippedRecord, parse_indexed_records,
    parse_records,
};
pub use index::MasterIndex;
