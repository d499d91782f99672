//! Semantic classification of child curve records.

mod classifier;
mod rules;

pub use classifier::{Classification, Classifier};
pub use rules::{ChildView, DepthMarkers, SemanticRule, Target, Trigger, default_rules};
