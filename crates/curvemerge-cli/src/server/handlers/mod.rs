//! API request handlers.

mod merge;
mod rules;

pub use merge::*;
pub use rules::*;
