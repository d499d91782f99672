//! Semantic rule definitions.
//!
//! A semantic rule maps a child record onto a master curve with a different
//! `CurveID`. Rules are plain data: an ordered list, each with any-of
//! triggers and a target. They can be loaded from a config file, so new
//! mappings are added as explicit prioritized clauses.

use serde::{Deserialize, Serialize};

use crate::record::CurveRecord;

/// Condition that fires a rule for a child record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Trigger {
    /// Child `CurveID` equals the value exactly.
    CurveIdEquals(String),
    /// Child description contains the value, ignoring case.
    DescriptionContains(String),
    /// Child description contains the value, case-sensitive.
    DescriptionContainsExact(String),
}

impl Trigger {
    /// Check this trigger against a child record.
    pub fn matches(&self, child: &ChildView<'_>) -> bool {
        match self {
            Trigger::CurveIdEquals(id) => child.curve_id == id.as_str(),
            Trigger::DescriptionContains(needle) => {
                child.description_lower.contains(&needle.to_lowercase())
            }
            Trigger::DescriptionContainsExact(needle) => child.description.contains(needle.as_str()),
        }
    }

    fn value(&self) -> &str {
        match self {
            Trigger::CurveIdEquals(v)
            | Trigger::DescriptionContains(v)
            | Trigger::DescriptionContainsExact(v) => v,
        }
    }
}

/// Which master curve a rule maps onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A fixed master `CurveID`; applies only when the master list has it.
    CurveId(String),
    /// Whichever master record represents the depth curve.
    DepthCurve,
}

/// One prioritized semantic mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticRule {
    /// Name reported in classifications and summaries.
    pub name: String,
    /// The rule fires when any trigger matches.
    pub triggers: Vec<Trigger>,
    pub target: Target,
}

impl SemanticRule {
    pub fn new(name: impl Into<String>, triggers: Vec<Trigger>, target: Target) -> Self {
        Self {
            name: name.into(),
            triggers,
            target,
        }
    }

    /// True when any trigger matches the child.
    pub fn fires(&self, child: &ChildView<'_>) -> bool {
        self.triggers.iter().any(|t| t.matches(child))
    }

    /// Check the rule is usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("rule name must not be empty".to_string());
        }
        if self.triggers.is_empty() {
            return Err(format!("rule '{}' has no triggers", self.name));
        }
        if self.triggers.iter().any(|t| t.value().is_empty()) {
            return Err(format!("rule '{}' has an empty trigger value", self.name));
        }
        if let Target::CurveId(id) = &self.target {
            if id.trim().is_empty() {
                return Err(format!("rule '{}' targets an empty CurveID", self.name));
            }
        }
        Ok(())
    }
}

/// Child record view with the description lower-cased once.
#[derive(Debug)]
pub struct ChildView<'a> {
    pub curve_id: &'a str,
    pub description: &'a str,
    pub description_lower: String,
}

impl<'a> ChildView<'a> {
    pub fn new(child: &'a CurveRecord) -> Self {
        let description = child.description_text();
        Self {
            curve_id: &child.curve_id,
            description,
            description_lower: description.to_lowercase(),
        }
    }
}

/// How a master record is recognized as the depth curve.
///
/// A `CurveID` or `Mnemonic` qualifies when, upper-cased, it contains one of
/// `contains`, or one of its alphanumeric tokens equals one of `tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthMarkers {
    pub contains: Vec<String>,
    pub tokens: Vec<String>,
}

impl Default for DepthMarkers {
    fn default() -> Self {
        Self {
            contains: vec!["DEPT".to_string()],
            tokens: vec!["MD".to_string()],
        }
    }
}

impl DepthMarkers {
    /// Whether an identifier names a depth curve.
    pub fn identifies(&self, value: &str) -> bool {
        let upper = value.to_uppercase();

        if self
            .contains
            .iter()
            .any(|m| !m.is_empty() && upper.contains(&m.to_uppercase()))
        {
            return true;
        }

        upper
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .any(|token| self.tokens.iter().any(|m| m.eq_ignore_ascii_case(token)))
    }

    /// Whether a master record represents the depth curve.
    pub fn identifies_record(&self, record: &CurveRecord) -> bool {
        self.identifies(&record.curve_id)
            || record
                .mnemonic
                .as_deref()
                .is_some_and(|m| self.identifies(m))
    }
}

/// Built-in semantic rules, in priority order.
pub fn default_rules() -> Vec<SemanticRule> {
    vec![
        SemanticRule::new(
            "deep_resistivity",
            vec![
                Trigger::CurveIdEquals("IND".to_string()),
                Trigger::DescriptionContains("deep resistivity".to_string()),
            ],
            Target::CurveId("RDEP".to_string()),
        ),
        SemanticRule::new(
            "invaded_zone",
            vec![
                Trigger::CurveIdEquals("SN18".to_string()),
                Trigger::DescriptionContains("invaded zone".to_string()),
                Trigger::DescriptionContainsExact("(Rxo)".to_string()),
            ],
            Target::CurveId("RXO".to_string()),
        ),
        SemanticRule::new(
            "depth",
            vec![Trigger::DescriptionContains("depth".to_string())],
            Target::DepthCurve,
        ),
    ]
}
