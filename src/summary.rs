//! Plain-text summary export.
//!
//! The summary mirrors what is on screen: the current form values and the
//! currently displayed recommendations (including a synthetic `Error:` line
//! if the last evaluation failed).

use crate::assessment::AssessmentInput;
use crate::error::{PreopError, Result, ResultExt as _};
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE_PREFIX: &str = "preanesthesia_summary_";
pub const SUMMARY_FILE_EXTENSION: &str = "txt";

/// Render the summary document. No trailing newline.
pub fn render_summary(input: &AssessmentInput, recommendations: &[String]) -> String {
    format!(
        "Pre-Anesthesia Evaluation Summary\n\n\
         Age: {}\n\
         Comorbidities: {}\n\
         Functional Status: {}\n\
         ASA Class: {}\n\
         Procedure Type: {}\n\n\
         Recommendations:\n- {}",
        input.age,
        input.comorbidities,
        input.functional_status,
        input.asa_class,
        input.procedure_type,
        recommendations.join("\n- ")
    )
}

/// `preanesthesia_summary_<epoch_ms>.txt`
pub fn summary_file_name(epoch_ms: i64) -> String {
    format!("{SUMMARY_FILE_PREFIX}{epoch_ms}.{SUMMARY_FILE_EXTENSION}")
}

/// Write the summary into `dir`, named after the current time in
/// milliseconds. Returns the path written.
///
/// # Errors
///
/// Returns an error if `dir` cannot be created or the file cannot be written.
pub fn export_summary(
    dir: &Path,
    input: &AssessmentInput,
    recommendations: &[String],
) -> Result<PathBuf> {
    export_summary_at(dir, input, recommendations, chrono::Utc::now().timestamp_millis())
}

/// [`export_summary`] with an explicit timestamp.
///
/// # Errors
///
/// Returns an error if `dir` cannot be created, is not a directory, or the
/// file cannot be written.
pub fn export_summary_at(
    dir: &Path,
    input: &AssessmentInput,
    recommendations: &[String],
    epoch_ms: i64,
) -> Result<PathBuf> {
    if dir.exists() && !dir.is_dir() {
        return Err(PreopError::Export(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(summary_file_name(epoch_ms));
    std::fs::write(&path, render_summary(input, recommendations))
        .with_context(|| format!("Failed to write summary {}", path.display()))?;

    tracing::info!("Summary exported to {}", path.display());
    Ok(path)
}
