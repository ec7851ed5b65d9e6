//! Argus - Monitoring Agent Configuration Composer
//!
//! This crate assembles the agent's two configuration documents (the
//! metrics-collector document and the cloudwatch-exporter document) from
//! validated environment-supplied parameters, then serves the results
//! read-only. It can be used as a library by other Rust projects, or run
//! as a standalone binary with the `argus-config` executable.
//!
//! # Architecture
//!
//! - **Params**: validation of every external parameter into an immutable
//!   [`params::ValidatedParams`] value
//! - **Compose**: the reset-and-merge pipeline rebuilding both documents
//!   from pristine baselines on every run
//! - **Catalog**: static per-namespace metric lists the exporter merge
//!   consumes
//! - **Server**: read-only HTTP exposure of the finished documents

pub mod catalog;
pub mod compose;
pub mod document;
pub mod error;
pub mod params;
pub mod server;

pub use document::DocumentPaths;
pub use error::ComposeError;
pub use params::{RawParams, ValidatedParams};
