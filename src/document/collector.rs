//! Typed model of the metrics-collector document.
//!
//! Only the paths the merger writes are typed: the remote-write exporter
//! endpoint and auth header, the global external labels, and the scrape-job
//! list. Scrape jobs themselves stay opaque [`Value`]s so baseline jobs of
//! any shape survive a merge.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Metrics-collector document root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectorDocument {
    #[serde(default)]
    pub exporters: Exporters,

    #[serde(default)]
    pub receivers: Receivers,

    /// Unknown remainder of the template, passed through unmodified.
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exporters {
    #[serde(rename = "remoteWrite", default)]
    pub remote_write: RemoteWrite,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteWrite {
    #[serde(default)]
    pub endpoint: String,

    #[serde(default)]
    pub headers: Headers,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headers {
    #[serde(rename = "Authorization", default)]
    pub authorization: String,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receivers {
    #[serde(default)]
    pub metrics: MetricsReceiver,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsReceiver {
    #[serde(default)]
    pub config: ReceiverConfig,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    #[serde(default)]
    pub global: GlobalSettings,

    #[serde(rename = "scrapeJobs", default)]
    pub scrape_jobs: Vec<Value>,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(rename = "externalLabels", default)]
    pub external_labels: ExternalLabels,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalLabels {
    #[serde(rename = "datasetLabel", default)]
    pub dataset_label: String,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Scrape-job descriptor appended by enabled modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeJob {
    pub name: String,
    pub interval: String,
    pub timeout: String,
    #[serde(rename = "staticTargets")]
    pub static_targets: Vec<String>,
}

impl ScrapeJob {
    /// Convert into the opaque form stored in the scrape-job list.
    pub fn into_value(self) -> Value {
        let mut map = Mapping::new();
        map.insert("name".into(), self.name.into());
        map.insert("interval".into(), self.interval.into());
        map.insert("timeout".into(), self.timeout.into());
        map.insert(
            "staticTargets".into(),
            Value::Sequence(self.static_targets.into_iter().map(Value::from).collect()),
        );
        Value::Mapping(map)
    }
}

impl CollectorDocument {
    /// Append a scrape job unless an identical descriptor is already
    /// present. Returns whether the job was appended.
    pub fn push_scrape_job(&mut self, job: ScrapeJob) -> bool {
        let value = job.into_value();
        let jobs = &mut self.receivers.metrics.config.scrape_jobs;
        if jobs.contains(&value) {
            return false;
        }
        jobs.push(value);
        true
    }
}
