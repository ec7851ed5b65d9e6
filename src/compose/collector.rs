//! Metrics-collector document merge.
//!
//! Injects the resolved listener endpoint, the bearer auth header, the
//! dataset external label, and one scrape job per enabled module into the
//! freshly-reset collector document.

use crate::document::{self, CollectorDocument, DocumentPaths, ScrapeJob};
use crate::error::ComposeError;
use crate::params::{Module, ValidatedParams};

/// Base listener endpoint for the default (`us`) region.
pub const LISTENER_BASE_URL: &str = "https://listener.argus.io:8053";

/// Scrape job name contributed by the cloudwatch module.
const CLOUDWATCH_JOB_NAME: &str = "argus-cloudwatch";

/// Static scrape target of the cloudwatch-exporter sidecar.
const CLOUDWATCH_TARGET: &str = "cloudwatch-exporter:9106";

/// Merge validated parameters into the live collector document.
pub fn merge(params: &ValidatedParams, paths: &DocumentPaths) -> Result<(), ComposeError> {
    tracing::info!("Merging collector configuration");
    let mut doc: CollectorDocument = document::load(&paths.collector)?;

    let listener = resolve_listener(params.custom_listener.as_deref(), &params.region_code);
    tracing::info!(endpoint = %listener, "Setting remote-write listener");
    doc.exporters.remote_write.endpoint = listener;
    doc.exporters.remote_write.headers.authorization = format!("Bearer {}", params.token);
    doc.receivers
        .metrics
        .config
        .global
        .external_labels
        .dataset_label = params.dataset_label.clone();

    for module in &params.modules {
        let job = scrape_job(*module, params.scrape_interval);
        if doc.push_scrape_job(job) {
            tracing::debug!(module = module.as_str(), "Scrape job added");
        } else {
            tracing::debug!(module = module.as_str(), "Scrape job already present");
        }
    }

    document::store(&paths.collector, &doc)?;
    tracing::info!("Collector configuration ready");
    Ok(())
}

/// Resolve the listener endpoint.
///
/// A custom listener is used verbatim. Otherwise the region code is
/// inserted into the fixed hostname: `us` and the empty string map to the
/// bare listener, any other code `c` to `listener-{c}`.
pub fn resolve_listener(custom_listener: Option<&str>, region_code: &str) -> String {
    if let Some(url) = custom_listener {
        return url.to_string();
    }
    match region_code {
        "" | "us" => LISTENER_BASE_URL.to_string(),
        code => LISTENER_BASE_URL.replace("listener.", &format!("listener-{code}.")),
    }
}

/// Build the scrape-job descriptor a module contributes.
fn scrape_job(module: Module, scrape_interval: u64) -> ScrapeJob {
    match module {
        Module::Cloudwatch => ScrapeJob {
            name: CLOUDWATCH_JOB_NAME.to_string(),
            interval: format!("{scrape_interval}s"),
            timeout: format!("{scrape_interval}s"),
            static_targets: vec![CLOUDWATCH_TARGET.to_string()],
        },
    }
}
