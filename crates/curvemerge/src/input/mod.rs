//! Input loading: request parsing, lenient file loading, LAS curve sections
//! and source metadata.

mod las;
mod loader;
mod request;
mod source;

pub use las::{
    DEFAULT_PARTITION, LasCurve, decode_las_text, is_las_file, las_records, parse_las_curves,
    well_log_document,
};
pub use loader::{
    CurveListLayout, LoadedCurves, extract_curve_list, extract_json_text, load_curve_list,
    load_curve_list_in, load_request, parse_lenient, parse_request_text,
};
pub use request::MergeRequest;
pub use source::{SourceMetadata, content_hash};
