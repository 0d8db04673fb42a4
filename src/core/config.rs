use crate::core::error::{ConfigError, GateError, GateResult, ResultExt};
use crate::manifest::xpath::Query;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for deploy-gate
/// Searched in order: deploy-gate.toml, .deploy-gate.toml, .config/deploy-gate.toml
///
/// Every section is optional; a missing file means all defaults.
///
/// # Example
///
/// ```toml
/// [env]
/// tag = "CI_COMMIT_TAG"
///
/// [manifest]
/// path = "service/pom.xml"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
  #[serde(default)]
  pub env: EnvNames,
  #[serde(default)]
  pub manifest: ManifestConfig,
}

/// Names of the environment variables the release gate reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvNames {
  /// Tag being built (default: TRAVIS_TAG)
  #[serde(default = "default_tag_var")]
  pub tag: String,

  /// Artifact version declared in the manifest (default: POM_VERSION)
  #[serde(default = "default_version_var")]
  pub version: String,

  /// SCM tag declared in the manifest (default: POM_SCM_TAG)
  #[serde(default = "default_scm_tag_var")]
  pub scm_tag: String,
}

fn default_tag_var() -> String {
  "TRAVIS_TAG".to_string()
}

fn default_version_var() -> String {
  "POM_VERSION".to_string()
}

fn default_scm_tag_var() -> String {
  "POM_SCM_TAG".to_string()
}

impl Default for EnvNames {
  fn default() -> Self {
    Self {
      tag: default_tag_var(),
      version: default_version_var(),
      scm_tag: default_scm_tag_var(),
    }
  }
}

impl EnvNames {
  /// Validate variable names
  pub fn validate(&self) -> GateResult<()> {
    for (field, name) in [
      ("env.tag", &self.tag),
      ("env.version", &self.version),
      ("env.scm_tag", &self.scm_tag),
    ] {
      if name.is_empty() {
        return Err(invalid(field, "variable name must not be empty"));
      }
      if name.contains('=') || name.contains('\0') {
        return Err(invalid(field, format!("'{}' is not a valid environment variable name", name)));
      }
    }
    Ok(())
  }
}

/// Where the manifest lives and how to read release metadata from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
  /// Manifest path, relative to the working directory (default: pom.xml)
  #[serde(default = "default_manifest_path")]
  pub path: PathBuf,

  /// Query for the artifact version (used by `assert-ready --from-manifest`)
  #[serde(default = "default_version_query")]
  pub version_query: String,

  /// Query for the SCM tag (used by `assert-ready --from-manifest`)
  #[serde(default = "default_scm_tag_query")]
  pub scm_tag_query: String,
}

fn default_manifest_path() -> PathBuf {
  PathBuf::from("pom.xml")
}

fn default_version_query() -> String {
  "/project/version".to_string()
}

fn default_scm_tag_query() -> String {
  "/project/scm/tag".to_string()
}

impl Default for ManifestConfig {
  fn default() -> Self {
    Self {
      path: default_manifest_path(),
      version_query: default_version_query(),
      scm_tag_query: default_scm_tag_query(),
    }
  }
}

impl ManifestConfig {
  /// Validate manifest configuration
  pub fn validate(&self) -> GateResult<()> {
    if self.path.as_os_str().is_empty() {
      return Err(invalid("manifest.path", "path must not be empty"));
    }

    for (field, query) in [
      ("manifest.version_query", &self.version_query),
      ("manifest.scm_tag_query", &self.scm_tag_query),
    ] {
      if let Err(e) = Query::parse(query) {
        return Err(invalid(field, e.to_string()));
      }
    }

    Ok(())
  }
}

fn invalid(field: &str, reason: impl Into<String>) -> GateError {
  GateError::Config(ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.into(),
  })
}

impl GateConfig {
  /// Find config file in search order: deploy-gate.toml, .deploy-gate.toml, .config/deploy-gate.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("deploy-gate.toml"),
      path.join(".deploy-gate.toml"),
      path.join(".config").join("deploy-gate.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the first file found, or defaults when there is none
  pub fn load(path: &Path) -> GateResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: GateConfig = toml_edit::de::from_str(&content).map_err(|e| {
      GateError::Config(ConfigError::Parse {
        path: config_path.clone(),
        reason: e.to_string(),
      })
    })?;

    config.env.validate()?;
    config.manifest.validate()?;

    Ok(config)
  }

  /// Manifest path resolved against the working directory
  pub fn manifest_path(&self, cwd: &Path) -> PathBuf {
    cwd.join(&self.manifest.path)
  }
}
