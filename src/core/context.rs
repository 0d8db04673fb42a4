//! Invocation context - build once in main, pass to commands
//!
//! Holds the working directory and the resolved deploy-gate configuration so
//! commands never touch the current directory or the config search path
//! themselves.

use crate::core::config::GateConfig;
use crate::core::error::GateResult;
use std::path::{Path, PathBuf};

/// Working directory plus configuration for one invocation
#[derive(Debug, Clone)]
pub struct GateContext {
  /// Directory the command runs in (absolute path)
  pub root: PathBuf,

  /// Configuration (defaults when no deploy-gate.toml exists)
  pub config: GateConfig,
}

impl GateContext {
  /// Build context for a working directory, loading deploy-gate.toml if present
  pub fn build(root: &Path) -> GateResult<Self> {
    Ok(Self {
      root: root.to_path_buf(),
      config: GateConfig::load(root)?,
    })
  }

  /// Manifest to read: an explicit override (relative to the working
  /// directory) or the configured path
  pub fn manifest_path(&self, manifest_override: Option<&Path>) -> PathBuf {
    match manifest_override {
      Some(path) => self.root.join(path),
      None => self.config.manifest_path(&self.root),
    }
  }
}
