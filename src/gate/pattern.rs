//! Release tag and version patterns
//!
//! Both patterns are fixed-width: every numeric component is exactly one digit.
//! `v1.2.3-4` is a release tag, `v1.23.3-4` is not.

use regex::Regex;
use std::sync::LazyLock;

static RELEASE_TAG: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^v[0-9]\.[0-9]\.[0-9]-[0-9]$").expect("Failed to compile release tag regex"));

static RELEASE_VERSION: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[0-9]\.[0-9]\.[0-9]-[0-9]$").expect("Failed to compile release version regex"));

/// Check that a tag looks like `v1.2.3-4`
pub fn is_release_tag(tag: &str) -> bool {
  RELEASE_TAG.is_match(tag)
}

/// Check that a version looks like `1.2.3-4`
pub fn is_release_version(version: &str) -> bool {
  RELEASE_VERSION.is_match(version)
}

/// The tag a release version is expected to be published under
pub fn tag_for_version(version: &str) -> String {
  format!("v{}", version)
}
