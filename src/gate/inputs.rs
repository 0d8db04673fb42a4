//! Inputs to the release gate
//!
//! The gate never reads the process environment itself. Callers build a
//! `ReleaseInputs` (from the environment, from a lookup closure in tests) and
//! hand it to `validate`.

use crate::core::config::EnvNames;
use serde::Serialize;

/// The three values the gate compares
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseInputs {
  /// Tag being built (e.g. `v1.2.3-4`)
  pub tag: Option<String>,
  /// Artifact version declared in the manifest (e.g. `1.2.3-4`)
  pub version: Option<String>,
  /// SCM tag declared in the manifest (e.g. `v1.2.3-4`)
  pub scm_tag: Option<String>,
}

impl ReleaseInputs {
  /// Build inputs from explicit values; empty strings count as absent
  pub fn new(tag: Option<&str>, version: Option<&str>, scm_tag: Option<&str>) -> Self {
    Self {
      tag: present(tag.map(str::to_string)),
      version: present(version.map(str::to_string)),
      scm_tag: present(scm_tag.map(str::to_string)),
    }
  }

  /// Build inputs by resolving each variable name through `lookup`
  pub fn from_lookup<F>(names: &EnvNames, mut lookup: F) -> Self
  where
    F: FnMut(&str) -> Option<String>,
  {
    Self {
      tag: present(lookup(&names.tag)),
      version: present(lookup(&names.version)),
      scm_tag: present(lookup(&names.scm_tag)),
    }
  }

  /// Build inputs from the process environment
  ///
  /// Variables holding non-UTF-8 data are treated as absent.
  pub fn from_env(names: &EnvNames) -> Self {
    Self::from_lookup(names, |name| std::env::var(name).ok())
  }

  /// Fill in the manifest-declared values that are still absent
  ///
  /// Values already present (from the environment) are never overwritten.
  pub fn or_manifest(mut self, version: Option<String>, scm_tag: Option<String>) -> Self {
    if self.version.is_none() {
      self.version = present(version);
    }
    if self.scm_tag.is_none() {
      self.scm_tag = present(scm_tag);
    }
    self
  }

  /// Whether any manifest-declared value is missing
  pub fn needs_manifest(&self) -> bool {
    self.version.is_none() || self.scm_tag.is_none()
  }
}

fn present(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}
