//! Assessment data model.
//!
//! [`AssessmentInput`] is the payload posted to the evaluation service,
//! [`EvaluationResult`] is what comes back, and [`History`] keeps the
//! session's completed evaluations newest-first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The five form fields sent for evaluation.
///
/// Field names serialize in camelCase to match the service contract:
///
/// ```
/// use preop::assessment::AssessmentInput;
///
/// let input = AssessmentInput {
///     age: 45,
///     comorbidities: "diabetes".to_owned(),
///     ..Default::default()
/// };
/// let json = serde_json::to_value(&input)?;
/// assert_eq!(json["age"], 45);
/// assert_eq!(json["functionalStatus"], "");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    pub age: u32,
    /// Comma separated, e.g. "diabetes, CAD, COPD".
    pub comorbidities: String,
    /// Free text, e.g. "METs <4, ADLs".
    pub functional_status: String,
    /// ASA physical status, expected "1" to "4".
    pub asa_class: String,
    /// Always lower-case; see [`AssessmentInput::set_procedure_type`].
    pub procedure_type: String,
}

impl AssessmentInput {
    /// Store a procedure type the way it is entered: lower-cased.
    pub fn set_procedure_type(&mut self, value: &str) {
        self.procedure_type = normalize_procedure_type(value);
    }

    /// Re-applies entry normalization to fields edited in place.
    pub fn normalize(&mut self) {
        self.procedure_type = normalize_procedure_type(&self.procedure_type);
    }
}

/// Lower-cases a procedure type ("Vascular" becomes "vascular").
pub fn normalize_procedure_type(value: &str) -> String {
    value.to_lowercase()
}

/// Response body of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Server-supplied, shown verbatim.
    pub timestamp: String,
    pub recommendations: Vec<String>,
}

/// One completed evaluation: what was sent and what came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub input: AssessmentInput,
    pub recommendations: Vec<String>,
}

impl HistoryEntry {
    pub fn new(input: AssessmentInput, result: EvaluationResult) -> Self {
        Self {
            timestamp: result.timestamp,
            input,
            recommendations: result.recommendations,
        }
    }
}

/// In-memory decision history, newest entry first. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
