//! Parameter validation.
//!
//! Every externally supplied parameter passes through one of these
//! functions before the pipeline touches a document. Validators return the
//! normalized value on success so the caller never re-reads raw input.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::{SUPPORTED_AWS_REGIONS, SUPPORTED_NAMESPACES};
use crate::error::ComposeError;

use super::{Module, NamespaceSelection};

/// Listener region codes accepted by the ingestion backend.
/// The empty string selects the default (`us`) listener.
const LISTENER_REGION_CODES: &[&str] = &["au", "ca", "eu", "nl", "uk", "us", "wa"];

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{32}$").expect("failed to compile token regex")
    })
}

fn listener_url_regex() -> &'static Regex {
    static LISTENER_URL_REGEX: OnceLock<Regex> = OnceLock::new();
    LISTENER_URL_REGEX.get_or_init(|| {
        // scheme, dot-separated host labels (no leading/trailing hyphen),
        // optional numeric port, nothing after
        Regex::new(
            r"^https?://[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*(:[0-9]+)?$",
        )
        .expect("failed to compile listener url regex")
    })
}

/// Validate the ingestion token.
///
/// A token is exactly 32 contiguous ASCII letters with at least one
/// lowercase and one uppercase character.
pub fn validate_token(token: &str) -> Result<String, ComposeError> {
    let has_lower = token.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = token.chars().any(|c| c.is_ascii_uppercase());
    if !token_regex().is_match(token) || !has_lower || !has_upper {
        return Err(ComposeError::InvalidValue(format!(
            "invalid ingestion token: '{token}'"
        )));
    }
    Ok(token.to_string())
}

/// Validate the listener region code. The empty string is acceptable.
pub fn validate_region_code(code: &str) -> Result<String, ComposeError> {
    if !code.is_empty() && !LISTENER_REGION_CODES.contains(&code) {
        return Err(ComposeError::InvalidValue(format!(
            "invalid listener region code: '{code}'"
        )));
    }
    Ok(code.to_string())
}

/// Validate the scrape interval.
///
/// The raw value must parse as an integer (`InvalidType` otherwise) and be
/// a positive multiple of 60 seconds (`InvalidValue` otherwise).
pub fn validate_scrape_interval(raw: &str) -> Result<u64, ComposeError> {
    let interval: i64 = raw.trim().parse().map_err(|_| {
        ComposeError::InvalidType(format!("scrape interval must be an integer, got '{raw}'"))
    })?;
    if interval <= 0 || interval % 60 != 0 {
        return Err(ComposeError::InvalidValue(format!(
            "scrape interval must be a positive multiple of 60, got {interval}"
        )));
    }
    Ok(interval as u64)
}

/// Validate the AWS region against the supported-region set.
pub fn validate_aws_region(region: &str) -> Result<String, ComposeError> {
    if !SUPPORTED_AWS_REGIONS.contains(&region) {
        return Err(ComposeError::InvalidValue(format!(
            "unsupported AWS region: '{region}'"
        )));
    }
    Ok(region.to_string())
}

/// Validate the comma-separated namespace selection.
///
/// Supported entries are deduplicated and sorted; unsupported entries are
/// collected for reporting, not fatal. Only an empty selection or a
/// selection with no supported entry at all fails.
pub fn validate_namespaces(csv: &str) -> Result<NamespaceSelection, ComposeError> {
    if csv.trim().is_empty() {
        return Err(ComposeError::InvalidValue(
            "namespace selection is empty".to_string(),
        ));
    }

    let mut supported = std::collections::BTreeSet::new();
    let mut unsupported = Vec::new();
    for entry in csv.split(',') {
        let namespace = entry.trim();
        if namespace.is_empty() {
            continue;
        }
        if SUPPORTED_NAMESPACES.contains(&namespace) {
            supported.insert(namespace.to_string());
        } else {
            unsupported.push(namespace.to_string());
        }
    }

    if supported.is_empty() {
        return Err(ComposeError::InvalidValue(format!(
            "no supported namespace in selection '{csv}'"
        )));
    }

    Ok(NamespaceSelection {
        supported: supported.into_iter().collect(),
        unsupported,
    })
}

/// Validate a custom listener URL.
///
/// Accepts `http`/`https` URLs with a hostname of alphanumeric-hyphen
/// labels and an optional numeric port. A trailing dot, an empty port, or a
/// bare scheme fails.
pub fn validate_custom_listener(url: &str) -> Result<String, ComposeError> {
    if !listener_url_regex().is_match(url) {
        return Err(ComposeError::InvalidValue(format!(
            "invalid custom listener url: '{url}'"
        )));
    }
    Ok(url.to_string())
}

/// Validate the dataset label. Any string is acceptable.
pub fn validate_dataset_label(label: &str) -> Result<String, ComposeError> {
    Ok(label.to_string())
}

/// Validate the comma-separated enabled-module list.
///
/// An absent list enables every known module.
pub fn validate_modules(csv: Option<&str>) -> Result<Vec<Module>, ComposeError> {
    let Some(csv) = csv else {
        return Ok(Module::ALL.to_vec());
    };

    let mut modules = Vec::new();
    for entry in csv.split(',') {
        let name = entry.trim();
        let module = Module::from_str(name).map_err(|_| {
            ComposeError::InvalidValue(format!("unsupported module: '{name}'"))
        })?;
        if !modules.contains(&module) {
            modules.push(module);
        }
    }
    Ok(modules)
}
