//! Client-side state of one assessment session.
//!
//! The GUI and the CLI both drive a [`Session`]: edit the input, send it,
//! then hand the finished [`EvaluationReply`] back to
//! [`Session::apply_reply`]. Nothing here is persisted.

use crate::assessment::{AssessmentInput, History, HistoryEntry};
use crate::client::EvaluationOutcome;
use crate::error::Result;
use crate::summary;
use std::path::{Path, PathBuf};

/// A finished evaluation, paired with the input that was actually sent.
///
/// The form may have been edited while the request was in flight, so the
/// snapshot travels with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationReply {
    pub sent: AssessmentInput,
    pub outcome: EvaluationOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub input: AssessmentInput,
    recommendations: Vec<String>,
    history: History,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current form, as it would be sent.
    pub fn request_payload(&self) -> AssessmentInput {
        let mut payload = self.input.clone();
        payload.normalize();
        payload
    }

    /// Show the outcome and, on success, prepend it to the history.
    ///
    /// Replies are applied in arrival order; the last one wins the display.
    pub fn apply_reply(&mut self, reply: EvaluationReply) {
        self.recommendations = reply.outcome.recommendations();
        if let EvaluationOutcome::Success(result) = reply.outcome {
            self.history.prepend(HistoryEntry::new(reply.sent, result));
        }
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn summary_text(&self) -> String {
        summary::render_summary(&self.input, &self.recommendations)
    }

    /// # Errors
    ///
    /// See [`summary::export_summary`].
    pub fn export_summary(&self, dir: &Path) -> Result<PathBuf> {
        summary::export_summary(dir, &self.input, &self.recommendations)
    }
}
