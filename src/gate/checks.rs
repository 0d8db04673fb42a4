//! The ordered release gate checks
//!
//! Checks run in a fixed order and stop at the first failure. The order only
//! decides which diagnostic is reported; every check is safe to run on its own.

use super::inputs::ReleaseInputs;
use super::pattern::{is_release_tag, is_release_version, tag_for_version};
use crate::core::error::ReleaseError;
use serde::Serialize;
use std::fmt;

/// A single release gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateCheck {
  TagPresent,
  TagFormat,
  VersionPresent,
  VersionFormat,
  ScmTagPresent,
  ScmTagMatchesTag,
  ScmTagMatchesVersion,
}

impl GateCheck {
  /// Every check, in evaluation order
  pub const ALL: [GateCheck; 7] = [
    GateCheck::TagPresent,
    GateCheck::TagFormat,
    GateCheck::VersionPresent,
    GateCheck::VersionFormat,
    GateCheck::ScmTagPresent,
    GateCheck::ScmTagMatchesTag,
    GateCheck::ScmTagMatchesVersion,
  ];

  /// Unique name for this check (kebab-case)
  pub fn name(&self) -> &'static str {
    match self {
      GateCheck::TagPresent => "tag-present",
      GateCheck::TagFormat => "tag-format",
      GateCheck::VersionPresent => "version-present",
      GateCheck::VersionFormat => "version-format",
      GateCheck::ScmTagPresent => "scm-tag-present",
      GateCheck::ScmTagMatchesTag => "scm-tag-matches-tag",
      GateCheck::ScmTagMatchesVersion => "scm-tag-matches-version",
    }
  }

  /// Human-readable description of what this check validates
  pub fn description(&self) -> &'static str {
    match self {
      GateCheck::TagPresent => "A tag is being built",
      GateCheck::TagFormat => "Tag is a release tag (vX.Y.Z-N)",
      GateCheck::VersionPresent => "POM declares an artifact version",
      GateCheck::VersionFormat => "Artifact version is a release version (X.Y.Z-N)",
      GateCheck::ScmTagPresent => "POM declares an SCM tag",
      GateCheck::ScmTagMatchesTag => "SCM tag matches the tag being built",
      GateCheck::ScmTagMatchesVersion => "SCM tag matches the artifact version",
    }
  }

  /// Run the check against the inputs
  pub fn run(&self, inputs: &ReleaseInputs) -> Result<(), ReleaseError> {
    match self {
      GateCheck::TagPresent => tag(inputs).map(drop),
      GateCheck::TagFormat => {
        let tag = tag(inputs)?;
        if is_release_tag(tag) {
          Ok(())
        } else {
          Err(ReleaseError::MalformedTag { tag: tag.to_string() })
        }
      }
      GateCheck::VersionPresent => version(inputs).map(drop),
      GateCheck::VersionFormat => {
        let version = version(inputs)?;
        if is_release_version(version) {
          Ok(())
        } else {
          Err(ReleaseError::InvalidVersion {
            version: version.to_string(),
          })
        }
      }
      GateCheck::ScmTagPresent => scm_tag(inputs).map(drop),
      GateCheck::ScmTagMatchesTag => {
        let tag = tag(inputs)?;
        let scm_tag = scm_tag(inputs)?;
        if scm_tag == tag {
          Ok(())
        } else {
          Err(ReleaseError::ScmTagMismatchesTag {
            scm_tag: scm_tag.to_string(),
            tag: tag.to_string(),
          })
        }
      }
      GateCheck::ScmTagMatchesVersion => {
        let version = version(inputs)?;
        let scm_tag = scm_tag(inputs)?;
        if scm_tag == tag_for_version(version) {
          Ok(())
        } else {
          Err(ReleaseError::ScmTagMismatchesVersion {
            scm_tag: scm_tag.to_string(),
            version: version.to_string(),
          })
        }
      }
    }
  }
}

impl fmt::Display for GateCheck {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

fn tag(inputs: &ReleaseInputs) -> Result<&str, ReleaseError> {
  inputs.tag.as_deref().ok_or(ReleaseError::NotATag)
}

fn version(inputs: &ReleaseInputs) -> Result<&str, ReleaseError> {
  inputs.version.as_deref().ok_or(ReleaseError::MissingVersion)
}

fn scm_tag(inputs: &ReleaseInputs) -> Result<&str, ReleaseError> {
  inputs.scm_tag.as_deref().ok_or(ReleaseError::MissingScmTag)
}

/// Result of running a check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
  /// Check that ran
  pub check: GateCheck,
  /// Whether the check passed
  pub passed: bool,
  /// Human-readable message
  pub message: String,
}

impl CheckResult {
  fn pass(check: GateCheck) -> Self {
    Self {
      check,
      passed: true,
      message: check.description().to_string(),
    }
  }

  fn fail(check: GateCheck, err: &ReleaseError) -> Self {
    Self {
      check,
      passed: false,
      message: err.to_string(),
    }
  }
}

/// Outcome of a gate run
#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
  /// Inputs the gate saw
  pub inputs: ReleaseInputs,
  /// Checks that ran, in order; the last one failed if `passed` is false
  pub checks: Vec<CheckResult>,
  /// Whether every check passed
  pub passed: bool,
  #[serde(skip)]
  failure: Option<ReleaseError>,
}

impl GateReport {
  /// Turn a failed report into its error
  pub fn into_result(self) -> Result<Self, ReleaseError> {
    match self.failure {
      Some(err) => Err(err),
      None => Ok(self),
    }
  }
}

/// Run every check in order, stopping at the first failure
///
/// `on_result` sees each result as it is produced.
pub fn run_checks<F>(inputs: &ReleaseInputs, mut on_result: F) -> GateReport
where
  F: FnMut(&CheckResult),
{
  let mut checks = Vec::with_capacity(GateCheck::ALL.len());
  let mut failure = None;

  for check in GateCheck::ALL {
    let result = match check.run(inputs) {
      Ok(()) => CheckResult::pass(check),
      Err(err) => {
        let result = CheckResult::fail(check, &err);
        failure = Some(err);
        result
      }
    };
    on_result(&result);
    checks.push(result);

    if failure.is_some() {
      break;
    }
  }

  GateReport {
    inputs: inputs.clone(),
    checks,
    passed: failure.is_none(),
    failure,
  }
}

/// Validate the inputs, returning the first failing check's error
pub fn validate(inputs: &ReleaseInputs) -> Result<GateReport, ReleaseError> {
  run_checks(inputs, |_| {}).into_result()
}
