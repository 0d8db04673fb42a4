//! Integration tests for `deploy-gate assert-ready`

use crate::helpers::{TestProject, release_env, run_deploy_gate, run_deploy_gate_ok, stderr, stdout};
use anyhow::Result;

#[test]
fn test_consistent_release_passes_silently() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate_ok(
    &project.path,
    &["assert-ready"],
    &release_env("v1.2.3-4", "1.2.3-4", "v1.2.3-4"),
  )?;

  assert!(stdout(&output).is_empty(), "Gate should print nothing on success");
  assert!(stderr(&output).is_empty(), "Gate should print nothing on success");
  Ok(())
}

#[test]
fn test_missing_tag_skips_deployment() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate(&project.path, &["assert-ready"], &[("POM_VERSION", "1.2.3-4")])?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("Skipping deployment: Not building a tag"));
  Ok(())
}

#[test]
fn test_empty_tag_counts_as_missing() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate(
    &project.path,
    &["assert-ready"],
    &release_env("", "1.2.3-4", "v1.2.3-4"),
  )?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("Not building a tag"));
  Ok(())
}

#[test]
fn test_malformed_tag() -> Result<()> {
  let project = TestProject::new()?;

  for tag in ["v1.2.3", "1.2.3-4", "v10.2.3-4", "release-1"] {
    let output = run_deploy_gate(&project.path, &["assert-ready"], &release_env(tag, "1.2.3-4", tag))?;
    assert!(!output.status.success(), "Tag {} should be rejected", tag);
    assert!(
      stderr(&output).contains(&format!("Tag '{}' is not a properly formatted release tag", tag)),
      "Unexpected diagnostic for {}: {}",
      tag,
      stderr(&output)
    );
  }
  Ok(())
}

#[test]
fn test_missing_version() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate(
    &project.path,
    &["assert-ready"],
    &[("TRAVIS_TAG", "v1.2.3-4"), ("POM_SCM_TAG", "v1.2.3-4")],
  )?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Artifact version is not specified in the POM"));
  Ok(())
}

#[test]
fn test_two_digit_version_component_rejected() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate(
    &project.path,
    &["assert-ready"],
    &release_env("v1.2.3-4", "1.23.3-4", "v1.2.3-4"),
  )?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("1.23.3-4 is not a valid release version"));
  Ok(())
}

#[test]
fn test_missing_scm_tag() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate(
    &project.path,
    &["assert-ready"],
    &[("TRAVIS_TAG", "v1.2.3-4"), ("POM_VERSION", "1.2.3-4")],
  )?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("SCM tag is not specified in the POM"));
  Ok(())
}

#[test]
fn test_scm_tag_must_match_build_tag() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate(
    &project.path,
    &["assert-ready"],
    &release_env("v1.2.3-4", "1.2.3-4", "v1.2.3-5"),
  )?;

  assert!(!output.status.success());
  let err = stderr(&output);
  assert!(err.contains("SCM tag 'v1.2.3-5' in the POM does not match the 'v1.2.3-4' tag being built"));
  Ok(())
}

#[test]
fn test_scm_tag_must_match_version() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate(
    &project.path,
    &["assert-ready"],
    &release_env("v1.2.3-9", "1.2.3-4", "v1.2.3-9"),
  )?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("SCM tag 'v1.2.3-9' in the POM does not match version '1.2.3-4' in the POM"));
  Ok(())
}

#[test]
fn test_verbose_lists_checks() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate_ok(
    &project.path,
    &["assert-ready", "--verbose"],
    &release_env("v1.2.3-4", "1.2.3-4", "v1.2.3-4"),
  )?;

  let err = stderr(&output);
  assert!(err.contains("tag-present"));
  assert!(err.contains("scm-tag-matches-version"));
  assert!(stdout(&output).is_empty());
  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate(
    &project.path,
    &["assert-ready", "--json"],
    &release_env("v1.2.3-4", "1.2.3-4", "v1.2.3-5"),
  )?;

  assert!(!output.status.success());
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["passed"], false);
  assert_eq!(report["inputs"]["scm_tag"], "v1.2.3-5");

  let checks = report["checks"].as_array().expect("checks should be an array");
  assert_eq!(checks.len(), 6);
  assert_eq!(checks[5]["check"], "scm-tag-matches-tag");
  assert_eq!(checks[5]["passed"], false);
  Ok(())
}

#[test]
fn test_from_manifest_fills_missing_values() -> Result<()> {
  let project = TestProject::with_pom("1.2.3-4", "v1.2.3-4")?;

  run_deploy_gate_ok(
    &project.path,
    &["assert-ready", "--from-manifest"],
    &[("TRAVIS_TAG", "v1.2.3-4")],
  )?;
  Ok(())
}

#[test]
fn test_from_manifest_environment_wins() -> Result<()> {
  let project = TestProject::with_pom("1.2.3-4", "v1.2.3-4")?;

  let output = run_deploy_gate(
    &project.path,
    &["assert-ready", "--from-manifest"],
    &[("TRAVIS_TAG", "v1.2.3-4"), ("POM_VERSION", "1.2.3-5")],
  )?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("does not match version '1.2.3-5'"));
  Ok(())
}

#[test]
fn test_from_manifest_custom_path() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("service/pom.xml", &crate::helpers::pom("2.0.1-0", "v2.0.1-0"))?;

  run_deploy_gate_ok(
    &project.path,
    &["assert-ready", "--from-manifest", "--manifest", "service/pom.xml"],
    &[("TRAVIS_TAG", "v2.0.1-0")],
  )?;
  Ok(())
}

#[test]
fn test_from_manifest_without_scm_tag() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file(
    "pom.xml",
    r#"<project xmlns="http://maven.apache.org/POM/4.0.0"><version>1.2.3-4</version></project>"#,
  )?;

  let output = run_deploy_gate(
    &project.path,
    &["assert-ready", "--from-manifest"],
    &[("TRAVIS_TAG", "v1.2.3-4")],
  )?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("SCM tag is not specified in the POM"));
  Ok(())
}

#[test]
fn test_without_from_manifest_pom_is_ignored() -> Result<()> {
  let project = TestProject::with_pom("1.2.3-4", "v1.2.3-4")?;

  let output = run_deploy_gate(&project.path, &["assert-ready"], &[("TRAVIS_TAG", "v1.2.3-4")])?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("Artifact version is not specified in the POM"));
  Ok(())
}
