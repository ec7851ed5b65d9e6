//! Namespace metric catalog.
//!
//! The catalog is a directory of static YAML files, one per supported
//! namespace, each holding the ordered metric list the exporter scrapes for
//! that service. The composer treats the entries as opaque; it only loads
//! lists and compares them for equality.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::ComposeError;

/// Service-family prefix stripped from namespace names before file lookup.
pub const NAMESPACE_PREFIX: &str = "AWS/";

/// Namespaces with a metric list in the catalog.
///
/// Kept sorted; `validate_namespaces` relies on membership only.
pub const SUPPORTED_NAMESPACES: &[&str] = &[
    "AWS/ApiGateway",
    "AWS/ApplicationELB",
    "AWS/CloudFront",
    "AWS/DynamoDB",
    "AWS/EBS",
    "AWS/EC2",
    "AWS/ELB",
    "AWS/Kinesis",
    "AWS/Lambda",
    "AWS/NetworkELB",
    "AWS/RDS",
    "AWS/S3",
    "AWS/SNS",
    "AWS/SQS",
];

/// AWS regions the exporter can scrape.
pub const SUPPORTED_AWS_REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "eu-central-1",
    "eu-north-1",
    "eu-south-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "me-south-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
];

/// Resolve the catalog file for a namespace.
///
/// The `AWS/` prefix is stripped, so `AWS/EC2` maps to `<dir>/EC2.yml`.
pub fn metric_list_path(dir: &Path, namespace: &str) -> PathBuf {
    let stem = namespace
        .strip_prefix(NAMESPACE_PREFIX)
        .unwrap_or(namespace);
    dir.join(format!("{stem}.yml"))
}

/// Load the ordered metric list for a namespace.
///
/// # Errors
/// `MissingResource` if the catalog file is unreadable, `ParseFailure` if
/// it is not a YAML sequence.
pub fn load_metric_list(dir: &Path, namespace: &str) -> Result<Vec<Value>, ComposeError> {
    let path = metric_list_path(dir, namespace);
    let content =
        std::fs::read_to_string(&path).map_err(|e| ComposeError::read(path.clone(), e))?;
    serde_yaml::from_str(&content).map_err(|e| ComposeError::parse(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_list_path_strips_prefix() {
        let path = metric_list_path(Path::new("namespaces"), "AWS/EC2");
        assert_eq!(path, Path::new("namespaces/EC2.yml"));
    }

    #[test]
    fn test_metric_list_path_without_prefix() {
        let path = metric_list_path(Path::new("namespaces"), "Lambda");
        assert_eq!(path, Path::new("namespaces/Lambda.yml"));
    }

    #[test]
    fn test_load_metric_list_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_metric_list(dir.path(), "AWS/EC2");
        assert!(matches!(
            result,
            Err(ComposeError::MissingResource { .. })
        ));
    }

    #[test]
    fn test_load_metric_list_not_a_sequence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("EC2.yml"), "region: us-east-1\n").unwrap();
        let result = load_metric_list(dir.path(), "AWS/EC2");
        assert!(matches!(result, Err(ComposeError::ParseFailure { .. })));
    }

    #[test]
    fn test_load_metric_list_valid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("EC2.yml"),
            "- name: CPUUtilization\n- name: NetworkIn\n",
        )
        .unwrap();
        let list = load_metric_list(dir.path(), "AWS/EC2").unwrap();
        assert_eq!(list.len(), 2);
    }
}
