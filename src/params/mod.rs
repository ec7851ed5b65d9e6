//! External parameters for the compose pipeline.
//!
//! Raw values arrive as environment-supplied strings; [`ValidatedParams`]
//! is the immutable, fully-checked form constructed once at startup and
//! passed into each pipeline step.

mod validate;

pub use validate::{
    validate_aws_region, validate_custom_listener, validate_dataset_label, validate_modules,
    validate_namespaces, validate_region_code, validate_scrape_interval, validate_token,
};

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ComposeError;

/// Optional agent modules that contribute scrape jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    /// CloudWatch exporter sidecar scrape.
    Cloudwatch,
}

impl Module {
    /// Every known module, the default when no explicit list is supplied.
    pub const ALL: &'static [Module] = &[Module::Cloudwatch];

    /// Get the module name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cloudwatch => "cloudwatch",
        }
    }
}

impl FromStr for Module {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cloudwatch" => Ok(Self::Cloudwatch),
            _ => Err(()),
        }
    }
}

/// Namespace selection split into supported and unsupported entries.
///
/// `supported` is deduplicated and lexicographically ordered. `unsupported`
/// keeps whatever did not match the catalog so the caller can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSelection {
    pub supported: Vec<String>,
    pub unsupported: Vec<String>,
}

/// Raw parameters exactly as supplied by the environment.
#[derive(Debug, Clone, Default)]
pub struct RawParams {
    pub token: String,
    pub region_code: String,
    pub scrape_interval: String,
    pub dataset_label: String,
    pub aws_region: String,
    pub namespaces: String,
    pub custom_listener: Option<String>,
    pub custom_config_path: Option<String>,
    pub modules: Option<String>,
}

/// Validated, normalized parameters.
///
/// Construction is the VALIDATE stage of the pipeline; no document is
/// touched until it succeeds.
#[derive(Debug, Clone)]
pub struct ValidatedParams {
    pub token: String,
    pub region_code: String,
    pub scrape_interval: u64,
    pub dataset_label: String,
    pub aws_region: String,
    pub namespaces: NamespaceSelection,
    pub custom_listener: Option<String>,
    pub custom_config_path: Option<PathBuf>,
    pub modules: Vec<Module>,
}

impl ValidatedParams {
    /// Validate every raw parameter.
    ///
    /// # Errors
    /// Returns the first `InvalidType`/`InvalidValue` encountered. The
    /// custom config path is taken as-is; its readability is checked by the
    /// merge step that consumes it.
    pub fn from_raw(raw: &RawParams) -> Result<Self, ComposeError> {
        let token = validate_token(&raw.token)?;
        let aws_region = validate_aws_region(&raw.aws_region)?;
        let dataset_label = validate_dataset_label(&raw.dataset_label)?;
        let custom_listener = raw
            .custom_listener
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(validate_custom_listener)
            .transpose()?;
        let region_code = validate_region_code(&raw.region_code)?;
        let scrape_interval = validate_scrape_interval(&raw.scrape_interval)?;
        let namespaces = validate_namespaces(&raw.namespaces)?;
        let modules = validate_modules(raw.modules.as_deref())?;

        let custom_config_path = raw
            .custom_config_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            token,
            region_code,
            scrape_interval,
            dataset_label,
            aws_region,
            namespaces,
            custom_listener,
            custom_config_path,
            modules,
        })
    }
}
