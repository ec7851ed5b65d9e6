//! On-disk configuration documents.
//!
//! Each document is modeled as a typed tree covering exactly the schema
//! paths the mergers touch; everything else in a template survives
//! untouched in serde-flattened pass-through mappings. Documents are read
//! fully into memory, mutated, and rewritten through a temp-file plus
//! atomic-rename step so a consumer never observes a torn write.

mod cloudwatch;
mod collector;

pub use cloudwatch::CloudwatchDocument;
pub use collector::{
    CollectorDocument, ExternalLabels, Exporters, GlobalSettings, Headers, MetricsReceiver,
    ReceiverConfig, Receivers, RemoteWrite, ScrapeJob,
};

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ComposeError;

/// Fixed filesystem locations of the live documents, their baselines, and
/// the namespace catalog.
#[derive(Debug, Clone)]
pub struct DocumentPaths {
    /// Live metrics-collector document.
    pub collector: PathBuf,
    /// Pristine baseline for the collector document.
    pub collector_baseline: PathBuf,
    /// Live cloudwatch-exporter document.
    pub cloudwatch: PathBuf,
    /// Pristine baseline for the exporter document.
    pub cloudwatch_baseline: PathBuf,
    /// Directory of per-namespace metric-list files.
    pub namespace_dir: PathBuf,
}

impl DocumentPaths {
    /// Lay out document paths under the given directories.
    pub fn new(
        configuration_dir: impl AsRef<Path>,
        baseline_dir: impl AsRef<Path>,
        namespace_dir: impl AsRef<Path>,
    ) -> Self {
        let configuration_dir = configuration_dir.as_ref();
        let baseline_dir = baseline_dir.as_ref();
        Self {
            collector: configuration_dir.join("collector.yml"),
            collector_baseline: baseline_dir.join("collector.yml"),
            cloudwatch: configuration_dir.join("cloudwatch.yml"),
            cloudwatch_baseline: baseline_dir.join("cloudwatch.yml"),
            namespace_dir: namespace_dir.as_ref().to_path_buf(),
        }
    }
}

impl Default for DocumentPaths {
    fn default() -> Self {
        Self::new("configuration", "baseline", "namespaces")
    }
}

/// Read and parse a document.
///
/// # Errors
/// `MissingResource` if the file is unreadable, `ParseFailure` if it does
/// not parse as the expected shape.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ComposeError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ComposeError::read(path.to_path_buf(), e))?;
    serde_yaml::from_str(&content).map_err(|e| ComposeError::parse(path.to_path_buf(), e))
}

/// Serialize and write a document atomically.
pub fn store<T: Serialize>(path: &Path, document: &T) -> Result<(), ComposeError> {
    let content = serde_yaml::to_string(document)
        .map_err(|e| ComposeError::write(path.to_path_buf(), std::io::Error::other(e)))?;
    write_atomic(path, &content)
}

/// Write content through a temp file in the destination directory, then
/// rename over the target.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), ComposeError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| ComposeError::write(path.to_path_buf(), e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| ComposeError::write(path.to_path_buf(), e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| ComposeError::write(path.to_path_buf(), e))?;
    tmp.persist(path)
        .map_err(|e| ComposeError::write(path.to_path_buf(), e.error))?;
    Ok(())
}
