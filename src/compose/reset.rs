//! Template reset step.
//!
//! Restores both live documents to their pristine baseline content at the
//! start of every pipeline run, so no run ever sees residue from a prior
//! one.

use std::path::Path;

use crate::document::{self, DocumentPaths};
use crate::error::ComposeError;

/// Overwrite both live documents with their baselines.
///
/// # Errors
/// `MissingResource` if a baseline is unreadable; this halts the pipeline
/// before any merge step.
pub fn reset_documents(paths: &DocumentPaths) -> Result<(), ComposeError> {
    reset_one(&paths.collector_baseline, &paths.collector)?;
    reset_one(&paths.cloudwatch_baseline, &paths.cloudwatch)?;
    Ok(())
}

fn reset_one(baseline: &Path, live: &Path) -> Result<(), ComposeError> {
    let content = std::fs::read_to_string(baseline)
        .map_err(|e| ComposeError::read(baseline.to_path_buf(), e))?;
    document::write_atomic(live, &content)?;
    tracing::debug!(
        baseline = %baseline.display(),
        live = %live.display(),
        "Document reset from baseline"
    );
    Ok(())
}
