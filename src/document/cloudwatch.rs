//! Typed model of the cloudwatch-exporter document.
//!
//! The merger sets the region and period scalars and appends per-namespace
//! metric lists. Metric entries are opaque beyond equality comparison.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Cloudwatch-exporter document root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudwatchDocument {
    #[serde(default)]
    pub region: String,

    #[serde(rename = "periodSeconds", default)]
    pub period_seconds: i64,

    #[serde(default)]
    pub metrics: Vec<Value>,

    /// Unknown remainder of the template, passed through unmodified.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl CloudwatchDocument {
    /// Append a namespace metric list unless an identical contiguous run of
    /// entries is already present in `metrics`. Returns whether the list
    /// was appended.
    ///
    /// Dedup is by content equality, not namespace identity: two
    /// namespaces whose catalog entries happen to be identical collapse to
    /// one appended run.
    pub fn append_metric_list(&mut self, list: &[Value]) -> bool {
        if contains_run(&self.metrics, list) {
            return false;
        }
        self.metrics.extend_from_slice(list);
        true
    }
}

/// Whether `haystack` contains `needle` as a contiguous run.
fn contains_run(haystack: &[Value], needle: &[Value]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}
