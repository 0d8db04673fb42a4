//! Shared building blocks for deploy-gate
//!
//! - **config**: deploy-gate.toml parsing and validation
//! - **context**: Working directory and configuration, built once per invocation
//! - **error**: Error types with contextual help messages and exit codes

pub mod config;
pub mod context;
pub mod error;
