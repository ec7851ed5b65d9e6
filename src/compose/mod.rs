//! Document compose pipeline.
//!
//! Single-pass, synchronous:
//! `VALIDATE → RESET → MERGE_COLLECTOR → MERGE_EXPORTER(custom|generated)`.
//! Validation happens before this module is entered (see
//! [`crate::params::ValidatedParams::from_raw`]); any failure here aborts
//! the run immediately with no retry and no rollback, so a document touched
//! by an earlier step may remain in its reset or partially-merged state.

pub mod cloudwatch;
pub mod collector;
pub mod reset;

use crate::document::DocumentPaths;
use crate::error::ComposeError;
use crate::params::ValidatedParams;

/// Run the full pipeline against the given document set.
///
/// # Errors
/// Propagates the first `MissingResource`/`ParseFailure`/`WriteFailure`
/// from any step.
pub fn run(params: &ValidatedParams, paths: &DocumentPaths) -> Result<(), ComposeError> {
    reset::reset_documents(paths)?;
    collector::merge(params, paths)?;
    cloudwatch::merge(params, paths)?;
    Ok(())
}
