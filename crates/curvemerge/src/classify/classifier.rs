//! Classification of child records against the master index.

use serde::{Deserialize, Serialize};

use super::rules::{ChildView, DepthMarkers, SemanticRule, Target, default_rules};
use crate::record::{CurveRecord, MasterIndex};

/// Outcome of classifying one child record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Classification {
    /// The child's `CurveID` is a master key.
    DirectMatch { master_id: String },
    /// A semantic rule mapped the child onto a different master curve.
    SemanticMatch { master_id: String, rule: String },
    /// No rule applies; the child is dropped.
    NoMatch,
}

impl Classification {
    /// Master `CurveID` the child maps to, if any.
    pub fn master_id(&self) -> Option<&str> {
        match self {
            Classification::DirectMatch { master_id }
            | Classification::SemanticMatch { master_id, .. } => Some(master_id),
            Classification::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, Classification::NoMatch)
    }
}

/// Decides how each child record relates to the master list.
///
/// Direct identity always wins. Semantic rules follow in their listed order;
/// a rule whose trigger fires but whose target is not in the master list is
/// passed over.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<SemanticRule>,
    depth_markers: DepthMarkers,
}

impl Classifier {
    /// Classifier with the built-in rules.
    pub fn new() -> Self {
        Self::with_rules(default_rules(), DepthMarkers::default())
    }

    pub fn with_rules(rules: Vec<SemanticRule>, depth_markers: DepthMarkers) -> Self {
        Self {
            rules,
            depth_markers,
        }
    }

    pub fn rules(&self) -> &[SemanticRule] {
        &self.rules
    }

    /// Classify one child record.
    pub fn classify(&self, child: &CurveRecord, index: &MasterIndex) -> Classification {
        if index.contains(&child.curve_id) {
            tracing::debug!(curve_id = %child.curve_id, "direct match");
            return Classification::DirectMatch {
                master_id: child.curve_id.clone(),
            };
        }

        let view = ChildView::new(child);
        for rule in &self.rules {
            if !rule.fires(&view) {
                continue;
            }
            match self.resolve_target(&rule.target, index) {
                Some(master_id) => {
                    tracing::debug!(
                        curve_id = %child.curve_id,
                        rule = %rule.name,
                        master_id,
                        "semantic match"
                    );
                    return Classification::SemanticMatch {
                        master_id: master_id.to_string(),
                        rule: rule.name.clone(),
                    };
                }
                None => {
                    tracing::debug!(
                        curve_id = %child.curve_id,
                        rule = %rule.name,
                        "rule fired but its target is not in the master list"
                    );
                }
            }
        }

        tracing::debug!(curve_id = %child.curve_id, "no match");
        Classification::NoMatch
    }

    /// Resolve a rule target to a master key present in the index.
    fn resolve_target<'a>(&self, target: &'a Target, index: &'a MasterIndex) -> Option<&'a str> {
        match target {
            Target::CurveId(id) => index.contains(id).then_some(id.as_str()),
            Target::DepthCurve => self.depth_curve(index),
        }
    }

    /// First master record, in list order, that represents the depth curve.
    pub fn depth_curve<'a>(&self, index: &'a MasterIndex) -> Option<&'a str> {
        index
            .iter()
            .find(|record| self.depth_markers.identifies_record(record))
            .map(|record| record.curve_id.as_str())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Trigger;

    fn index(ids: &[&str]) -> MasterIndex {
        MasterIndex::build(ids.iter().map(|id| CurveRecord::new(*id)))
    }

    fn semantic(master_id: &str, rule: &str) -> Classification {
        Classification::SemanticMatch {
            master_id: master_id.to_string(),
            rule: rule.to_string(),
        }
    }

    #[test]
    fn test_direct_match() {
        let classifier = Classifier::new();
        let child = CurveRecord::new("GR").with_description("gamma ray");

        assert_eq!(
            classifier.classify(&child, &index(&["GR", "RDEP"])),
            Classification::DirectMatch {
                master_id: "GR".to_string()
            }
        );
    }

    #[test]
    fn test_direct_match_beats_semantic_triggers() {
        let classifier = Classifier::new();
        let child = CurveRecord::new("IND").with_description("deep resistivity at depth");

        let result = classifier.classify(&child, &index(&["IND", "RDEP", "DEPT"]));
        assert_eq!(result.master_id(), Some("IND"));
        assert!(matches!(result, Classification::DirectMatch { .. }));
    }

    #[test]
    fn test_deep_resistivity_by_id() {
        let classifier = Classifier::new();
        let child = CurveRecord::new("IND");
        assert_eq!(
            classifier.classify(&child, &index(&["RDEP"])),
            semantic("RDEP", "deep_resistivity")
        );
    }

    #[test]
    fn test_deep_resistivity_by_description() {
        let classifier = Classifier::new();
        let child = CurveRecord::new("ILD").with_description("Induction DEEP RESISTIVITY");
        assert_eq!(
            classifier.classify(&child, &index(&["RDEP", "GR"])),
            semantic("RDEP", "deep_resistivity")
        );
    }

    #[test]
    fn test_deep_resistivity_requires_master_key() {
        let classifier = Classifier::new();
        let child = CurveRecord::new("IND").with_description("deep resistivity");
        assert_eq!(
            classifier.classify(&child, &index(&["GR"])),
            Classification::NoMatch
        );
    }

    #[test]
    fn test_invaded_zone_triggers() {
        let classifier = Classifier::new();
        let master = index(&["RXO"]);

        let by_id = CurveRecord::new("SN18");
        let by_text = CurveRecord::new("MSFL").with_description("Invaded Zone resistivity");
        let by_literal = CurveRecord::new("MLL").with_description("micro laterolog (Rxo)");
        let wrong_case = CurveRecord::new("MLL").with_description("micro laterolog (rxo)");

        assert_eq!(classifier.classify(&by_id, &master), semantic("RXO", "invaded_zone"));
        assert_eq!(classifier.classify(&by_text, &master), semantic("RXO", "invaded_zone"));
        assert_eq!(classifier.classify(&by_literal, &master), semantic("RXO", "invaded_zone"));
        assert_eq!(classifier.classify(&wrong_case, &master), Classification::NoMatch);
    }

    #[test]
    fn test_fired_rule_without_target_falls_through() {
        let classifier = Classifier::new();
        // Fires deep_resistivity (no RDEP) and invaded_zone (RXO present).
        let child = CurveRecord::new("IND").with_description("invaded zone");
        assert_eq!(
            classifier.classify(&child, &index(&["RXO"])),
            semantic("RXO", "invaded_zone")
        );
    }

    #[test]
    fn test_resistivity_rules_beat_depth() {
        let classifier = Classifier::new();
        let child = CurveRecord::new("X1").with_description("deep resistivity vs depth");
        assert_eq!(
            classifier.classify(&child, &index(&["DEPT", "RDEP"])),
            semantic("RDEP", "deep_resistivity")
        );
    }

    #[test]
    fn test_depth_match_resolves_master_depth_curve() {
        let classifier = Classifier::new();
        let child = CurveRecord::new("DEPTH_MD").with_description("Measured Depth");
        assert_eq!(
            classifier.classify(&child, &index(&["GR", "DEPT"])),
            semantic("DEPT", "depth")
        );
    }

    #[test]
    fn test_depth_match_uses_master_mnemonic() {
        let classifier = Classifier::new();
        let master = MasterIndex::build(vec![
            CurveRecord::new("C1").with_mnemonic("GR"),
            CurveRecord::new("C2").with_mnemonic("MD"),
        ]);
        let child = CurveRecord::new("TDEP").with_description("depth index");
        assert_eq!(classifier.classify(&child, &master), semantic("C2", "depth"));
    }

    #[test]
    fn test_depth_without_depth_master_is_no_match() {
        let classifier = Classifier::new();
        let child = CurveRecord::new("TDEP").with_description("depth");
        assert_eq!(
            classifier.classify(&child, &index(&["GR", "RDEP"])),
            Classification::NoMatch
        );
    }

    #[test]
    fn test_unrelated_child_is_no_match() {
        let classifier = Classifier::new();
        let child = CurveRecord::new("XYZ").with_description("unrelated tool reading");
        let result = classifier.classify(&child, &index(&["RDEP", "GR"]));
        assert_eq!(result, Classification::NoMatch);
        assert!(!result.is_match());
        assert_eq!(result.master_id(), None);
    }

    #[test]
    fn test_custom_rule_order() {
        let rules = vec![SemanticRule::new(
            "neutron",
            vec![Trigger::DescriptionContains("neutron".to_string())],
            Target::CurveId("NPHI".to_string()),
        )];
        let classifier = Classifier::with_rules(rules, DepthMarkers::default());

        let child = CurveRecord::new("CNC").with_description("Compensated Neutron");
        assert_eq!(
            classifier.classify(&child, &index(&["NPHI"])),
            semantic("NPHI", "neutron")
        );

        // Built-in rules are not active when replaced.
        let ind = CurveRecord::new("IND");
        assert_eq!(
            classifier.classify(&ind, &index(&["RDEP"])),
            Classification::NoMatch
        );
    }

    #[test]
    fn test_classification_serde_shape() {
        let value = serde_json::to_value(semantic("RDEP", "deep_resistivity")).unwrap();
        assert_eq!(value["outcome"], "semantic_match");
        assert_eq!(value["master_id"], "RDEP");

        let none = serde_json::to_value(Classification::NoMatch).unwrap();
        assert_eq!(none["outcome"], "no_match");
    }
}
