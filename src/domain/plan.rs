//! Plan and decision models.
//!
//! Raw model output is decoded here into strict internal types. Shape
//! violations (missing subject, empty sequence, missing slots object) are
//! contract failures and abort the run; everything softer is handled by the
//! normalizer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AppError, SectionId};

/// Copy destined for the hero section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroSlot {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, alias = "ctaText")]
    pub cta_text: String,
    #[serde(default, alias = "ctaUrl")]
    pub cta_url: String,
}

impl HeroSlot {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.subtitle.is_empty()
            && self.cta_text.is_empty()
            && self.cta_url.is_empty()
    }
}

/// One block of free-form body HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyBlock {
    pub html: String,
}

/// One cell of the six-card takeaway grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCard {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emoji: String,
}

/// Slot payloads keyed by section, with type-correct defaults for every
/// known slot and pass-through storage for keys this version doesn't know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSlots {
    pub hero: HeroSlot,
    pub simple_body: Vec<BodyBlock>,
    pub six_summary_cards: Vec<SummaryCard>,
    pub book_a_call: serde_json::Map<String, Value>,
    pub contact: serde_json::Map<String, Value>,
    pub signature: serde_json::Map<String, Value>,
    pub footer: serde_json::Map<String, Value>,
    /// Slot keys outside the known set, kept verbatim for forward
    /// compatibility with future sections.
    pub extra: BTreeMap<String, Value>,
}

/// Fully-resolved plan, ready for assembly once normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailPlan {
    pub subject: String,
    pub preview: String,
    pub email_goal: String,
    pub sequence: Vec<SectionId>,
    pub slots: SectionSlots,
}

/// Lightweight structure-only decision.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureDecision {
    pub sequence: Vec<SectionId>,
    pub email_goal: String,
    pub use_summary_cards: bool,
    pub reasoning: String,
}

/// Shape-validated full plan straight off the wire, before normalization.
#[derive(Debug)]
pub(crate) struct RawPlan {
    pub subject: String,
    pub preview: String,
    pub email_goal: String,
    pub sequence: Vec<String>,
    pub slots: serde_json::Map<String, Value>,
}

impl RawPlan {
    pub fn from_value(value: Value) -> Result<RawPlan, AppError> {
        let obj = value
            .as_object()
            .ok_or_else(|| AppError::InvalidPlan("plan is not a JSON object".to_string()))?;

        let subject = required_string(obj, "subject")?;
        let preview = required_string(obj, "preview")?;
        let email_goal = obj
            .get("email_goal")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        let sequence = required_sequence(obj)?;
        let slots = obj
            .get("slots")
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| AppError::InvalidPlan("missing 'slots' object".to_string()))?;

        Ok(RawPlan { subject, preview, email_goal, sequence, slots })
    }
}

/// Shape-validated structure decision straight off the wire.
#[derive(Debug)]
pub(crate) struct RawStructure {
    pub sequence: Vec<String>,
    pub email_goal: String,
    pub reasoning: String,
}

impl RawStructure {
    pub fn from_value(value: Value) -> Result<RawStructure, AppError> {
        let obj = value
            .as_object()
            .ok_or_else(|| AppError::InvalidPlan("decision is not a JSON object".to_string()))?;

        let sequence = required_sequence(obj)?;
        let email_goal = obj
            .get("email_goal")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        let reasoning = obj
            .get("reasoning")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        Ok(RawStructure { sequence, email_goal, reasoning })
    }
}

fn required_string(obj: &serde_json::Map<String, Value>, key: &str) -> Result<String, AppError> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::InvalidPlan(format!("missing or empty '{}' string", key)))
}

fn required_sequence(obj: &serde_json::Map<String, Value>) -> Result<Vec<String>, AppError> {
    let arr = obj
        .get("sequence")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::InvalidPlan("missing 'sequence' array".to_string()))?;

    if arr.is_empty() {
        return Err(AppError::InvalidPlan("'sequence' is empty".to_string()));
    }

    arr.iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| AppError::InvalidPlan("non-string entry in 'sequence'".to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_plan_accepts_minimal_shape() {
        let raw = RawPlan::from_value(json!({
            "subject": "S",
            "preview": "P",
            "sequence": ["hero"],
            "slots": {}
        }))
        .unwrap();
        assert_eq!(raw.subject, "S");
        assert_eq!(raw.sequence, vec!["hero"]);
        assert!(raw.email_goal.is_empty());
    }

    #[test]
    fn raw_plan_rejects_missing_subject() {
        let err = RawPlan::from_value(json!({
            "preview": "P",
            "sequence": ["hero"],
            "slots": {}
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidPlan(_)));
    }

    #[test]
    fn raw_plan_rejects_blank_preview() {
        let err = RawPlan::from_value(json!({
            "subject": "S",
            "preview": "   ",
            "sequence": ["hero"],
            "slots": {}
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidPlan(_)));
    }

    #[test]
    fn raw_plan_rejects_empty_sequence() {
        let err = RawPlan::from_value(json!({
            "subject": "S",
            "preview": "P",
            "sequence": [],
            "slots": {}
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidPlan(_)));
    }

    #[test]
    fn raw_plan_rejects_missing_slots() {
        let err = RawPlan::from_value(json!({
            "subject": "S",
            "preview": "P",
            "sequence": ["hero"]
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidPlan(_)));
    }

    #[test]
    fn raw_structure_defaults_optional_fields() {
        let raw = RawStructure::from_value(json!({ "sequence": ["hero", "footer"] })).unwrap();
        assert!(raw.email_goal.is_empty());
        assert!(raw.reasoning.is_empty());
    }

    #[test]
    fn hero_slot_accepts_camel_case_aliases() {
        let hero: HeroSlot = serde_json::from_value(json!({
            "title": "T",
            "subtitle": "S",
            "ctaText": "Go",
            "ctaUrl": "https://lumail.io"
        }))
        .unwrap();
        assert_eq!(hero.cta_text, "Go");
        assert_eq!(hero.cta_url, "https://lumail.io");
    }
}
