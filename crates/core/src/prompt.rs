//! Typed prompt content model and authoring-time validation.
//!
//! A prompt template's `prompt_content` column is a JSON structure with
//! exactly three named phases. Malformed shapes are rejected when a
//! template is created or updated, not discovered at execution time.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::splice::has_paste_zone;

/// Number of sequential execution phases per template.
pub const PHASE_COUNT: i32 = 3;

/// One named sub-prompt inside a template's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptPhase {
    pub title: String,
    pub content: String,
}

/// The three-phase prompt content of a template.
///
/// All three phase keys are required; deserialization fails if any is
/// absent, which is how malformed templates are rejected at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptContent {
    pub phase1: PromptPhase,
    pub phase2: PromptPhase,
    pub phase3: PromptPhase,
}

impl PromptContent {
    /// Parse a raw JSON value into typed prompt content.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CoreError> {
        serde_json::from_value(value.clone()).map_err(|e| {
            CoreError::Validation(format!("prompt_content must contain phase1..phase3: {e}"))
        })
    }

    /// Look up the sub-prompt for an execution phase (1..=3).
    pub fn phase(&self, phase: i32) -> Option<&PromptPhase> {
        match phase {
            1 => Some(&self.phase1),
            2 => Some(&self.phase2),
            3 => Some(&self.phase3),
            _ => None,
        }
    }

    /// Authoring-time validation.
    ///
    /// Every phase needs a non-empty body, and phase 2/3 bodies must carry
    /// a paste zone so the splicer has somewhere to inject the previous
    /// phase's output. Catching this here removes the splicer's silent
    /// no-op from normal operation.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (n, p) in [(1, &self.phase1), (2, &self.phase2), (3, &self.phase3)] {
            if p.content.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "phase{n} content must not be empty"
                )));
            }
        }
        for (n, p) in [(2, &self.phase2), (3, &self.phase3)] {
            if !has_paste_zone(&p.content) {
                return Err(CoreError::Validation(format!(
                    "phase{n} content is missing the paste zone markers"
                )));
            }
        }
        Ok(())
    }
}

/// Validate an execution phase number (1..=3).
pub fn validate_phase_number(phase: i32) -> Result<(), CoreError> {
    if (1..=PHASE_COUNT).contains(&phase) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Phase must be between 1 and {PHASE_COUNT} (got {phase})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content() -> PromptContent {
        PromptContent {
            phase1: PromptPhase {
                title: "Market overview".into(),
                content: "Describe [industry].".into(),
            },
            phase2: PromptPhase {
                title: "Deep dive".into(),
                content: "Context:\n### ▼▼▼ paste ▼▼▼\nx\n### ▲▲▲ end ▲▲▲\nGo deeper.".into(),
            },
            phase3: PromptPhase {
                title: "Synthesis".into(),
                content: "### ▼▼▼ paste ▼▼▼\nx\n### ▲▲▲ end ▲▲▲\nSummarize.".into(),
            },
        }
    }

    #[test]
    fn parses_well_formed_json() {
        let value = serde_json::to_value(content()).unwrap();
        let parsed = PromptContent::from_json(&value).unwrap();
        assert_eq!(parsed.phase1.title, "Market overview");
    }

    #[test]
    fn rejects_missing_phase_key() {
        let value = json!({
            "phase1": {"title": "a", "content": "b"},
            "phase2": {"title": "c", "content": "d"},
        });
        let err = PromptContent::from_json(&value).unwrap_err();
        assert!(err.to_string().contains("phase1..phase3"));
    }

    #[test]
    fn phase_lookup() {
        let c = content();
        assert_eq!(c.phase(1).unwrap().title, "Market overview");
        assert_eq!(c.phase(3).unwrap().title, "Synthesis");
        assert!(c.phase(0).is_none());
        assert!(c.phase(4).is_none());
    }

    #[test]
    fn validate_accepts_well_formed_content() {
        assert!(content().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_phase_body() {
        let mut c = content();
        c.phase1.content = "   ".into();
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("phase1"));
    }

    #[test]
    fn validate_rejects_missing_paste_zone() {
        let mut c = content();
        c.phase3.content = "No markers".into();
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("paste zone"));
    }

    #[test]
    fn phase_number_bounds() {
        assert!(validate_phase_number(1).is_ok());
        assert!(validate_phase_number(3).is_ok());
        assert!(validate_phase_number(0).is_err());
        assert!(validate_phase_number(4).is_err());
    }
}
