//! Cloudwatch-exporter document merge.
//!
//! Two mutually exclusive paths, selected once per run: a supplied custom
//! document replaces the live document wholesale, otherwise the document is
//! generated from the validated region, interval, and namespace selection.

use std::path::Path;

use crate::catalog;
use crate::document::{self, CloudwatchDocument, DocumentPaths};
use crate::error::ComposeError;
use crate::params::ValidatedParams;

/// Merge validated parameters into the live exporter document.
pub fn merge(params: &ValidatedParams, paths: &DocumentPaths) -> Result<(), ComposeError> {
    match &params.custom_config_path {
        Some(custom) => replace_with_custom(custom, &paths.cloudwatch),
        None => generate(params, paths),
    }
}

/// Custom path: the supplied document becomes the live document verbatim.
///
/// The content is parse-checked but not schema-validated and not merged
/// with the reset baseline.
fn replace_with_custom(custom: &Path, live: &Path) -> Result<(), ComposeError> {
    tracing::info!(path = %custom.display(), "Assigning custom cloudwatch exporter configuration");
    let content = std::fs::read_to_string(custom)
        .map_err(|e| ComposeError::read(custom.to_path_buf(), e))?;
    serde_yaml::from_str::<serde_yaml::Value>(&content)
        .map_err(|e| ComposeError::parse(custom.to_path_buf(), e))?;
    document::write_atomic(live, &content)?;
    tracing::info!("Cloudwatch exporter configuration ready");
    Ok(())
}

/// Generated path: region and period scalars plus one catalog metric list
/// per supported namespace.
fn generate(params: &ValidatedParams, paths: &DocumentPaths) -> Result<(), ComposeError> {
    tracing::info!("Generating cloudwatch exporter configuration");
    let mut doc: CloudwatchDocument = document::load(&paths.cloudwatch)?;

    doc.region = params.aws_region.clone();
    doc.period_seconds = params.scrape_interval as i64;

    for namespace in &params.namespaces.supported {
        let list = catalog::load_metric_list(&paths.namespace_dir, namespace)?;
        if doc.append_metric_list(&list) {
            tracing::info!(namespace = %namespace, "Namespace metric list added");
        } else {
            tracing::debug!(namespace = %namespace, "Identical metric list already present");
        }
    }

    document::store(&paths.cloudwatch, &doc)?;
    tracing::info!("Cloudwatch exporter configuration ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{NamespaceSelection, RawParams, ValidatedParams};

    fn test_paths(root: &Path) -> DocumentPaths {
        DocumentPaths::new(
            root.join("configuration"),
            root.join("baseline"),
            root.join("namespaces"),
        )
    }

    fn test_params() -> ValidatedParams {
        ValidatedParams::from_raw(&RawParams {
            token: "rDRJEidvpIbecUwshyCnGkuUjbymiHev".to_string(),
            region_code: String::new(),
            scrape_interval: "300".to_string(),
            dataset_label: "test".to_string(),
            aws_region: "us-east-1".to_string(),
            namespaces: "AWS/EC2,AWS/RDS".to_string(),
            custom_listener: None,
            custom_config_path: None,
            modules: None,
        })
        .unwrap()
    }

    fn seed(paths: &DocumentPaths) {
        std::fs::create_dir_all(&paths.namespace_dir).unwrap();
        std::fs::create_dir_all(paths.cloudwatch.parent().unwrap()).unwrap();
        std::fs::write(
            &paths.cloudwatch,
            "region: \"\"\nperiodSeconds: 0\nmetrics: []\n",
        )
        .unwrap();
        std::fs::write(
            paths.namespace_dir.join("EC2.yml"),
            "- namespace: AWS/EC2\n  name: CPUUtilization\n",
        )
        .unwrap();
        std::fs::write(
            paths.namespace_dir.join("RDS.yml"),
            "- namespace: AWS/RDS\n  name: DatabaseConnections\n",
        )
        .unwrap();
    }

    #[test]
    fn test_generate_sets_scalars_and_appends_lists() {
        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());
        seed(&paths);

        merge(&test_params(), &paths).unwrap();

        let doc: CloudwatchDocument = document::load(&paths.cloudwatch).unwrap();
        assert_eq!(doc.region, "us-east-1");
        assert_eq!(doc.period_seconds, 300);
        assert_eq!(doc.metrics.len(), 2);
    }

    #[test]
    fn test_generate_missing_catalog_entry_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());
        seed(&paths);
        std::fs::remove_file(paths.namespace_dir.join("RDS.yml")).unwrap();

        let result = merge(&test_params(), &paths);
        assert!(matches!(result, Err(ComposeError::MissingResource { .. })));
    }

    #[test]
    fn test_custom_path_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());
        seed(&paths);

        let custom = dir.path().join("custom.yml");
        let custom_content = "region: eu-west-1\nperiodSeconds: 60\nmetrics:\n- name: Custom\n";
        std::fs::write(&custom, custom_content).unwrap();

        let mut params = test_params();
        params.custom_config_path = Some(custom);
        merge(&params, &paths).unwrap();

        // Verbatim replacement, no generated content
        assert_eq!(
            std::fs::read_to_string(&paths.cloudwatch).unwrap(),
            custom_content
        );
    }

    #[test]
    fn test_custom_path_missing_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());
        seed(&paths);

        let mut params = test_params();
        params.custom_config_path = Some(dir.path().join("absent.yml"));
        let result = merge(&params, &paths);
        assert!(matches!(result, Err(ComposeError::MissingResource { .. })));
    }

    #[test]
    fn test_custom_path_unparseable_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());
        seed(&paths);

        let custom = dir.path().join("broken.yml");
        std::fs::write(&custom, "metrics:\n  - : : :\n\t\u{0}").unwrap();

        let mut params = test_params();
        params.custom_config_path = Some(custom);
        let result = merge(&params, &paths);
        assert!(matches!(result, Err(ComposeError::ParseFailure { .. })));
    }

    #[test]
    fn test_identical_namespace_content_collapses() {
        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());
        seed(&paths);
        // Two namespaces with byte-identical catalog content
        let shared = "- namespace: shared\n  name: SameMetric\n";
        std::fs::write(paths.namespace_dir.join("EC2.yml"), shared).unwrap();
        std::fs::write(paths.namespace_dir.join("RDS.yml"), shared).unwrap();

        merge(&test_params(), &paths).unwrap();

        let doc: CloudwatchDocument = document::load(&paths.cloudwatch).unwrap();
        assert_eq!(doc.metrics.len(), 1);
    }

    #[test]
    fn test_unsupported_namespaces_skip_catalog_lookup() {
        // unsupported entries never reach the merge step's catalog lookups
        let mut params = test_params();
        params.namespaces = NamespaceSelection {
            supported: vec!["AWS/EC2".to_string()],
            unsupported: vec!["AWS/nosuch".to_string()],
        };

        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());
        seed(&paths);

        merge(&params, &paths).unwrap();
        let doc: CloudwatchDocument = document::load(&paths.cloudwatch).unwrap();
        assert_eq!(doc.metrics.len(), 1);
    }
}
