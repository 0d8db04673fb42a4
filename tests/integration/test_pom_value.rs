//! Integration tests for `deploy-gate pom-value`

use crate::helpers::{TestProject, run_deploy_gate, run_deploy_gate_ok, stderr, stdout};
use anyhow::Result;

#[test]
fn test_prints_single_value() -> Result<()> {
  let project = TestProject::with_pom("2.0.1", "v2.0.1")?;

  let output = run_deploy_gate_ok(&project.path, &["pom-value", "/project/version"], &[])?;

  assert_eq!(stdout(&output), "2.0.1\n");
  Ok(())
}

#[test]
fn test_namespaces_are_stripped() -> Result<()> {
  let project = TestProject::with_pom("2.0.1", "v2.0.1")?;

  let output = run_deploy_gate_ok(&project.path, &["pom-value", "/project/scm/tag"], &[])?;
  assert_eq!(stdout(&output), "v2.0.1\n");

  let output = run_deploy_gate_ok(&project.path, &["pom-value", "/project/@schemaLocation"], &[])?;
  assert!(stdout(&output).starts_with("http://maven.apache.org/POM/4.0.0"));
  Ok(())
}

#[test]
fn test_predicate_query() -> Result<()> {
  let project = TestProject::with_pom("2.0.1", "v2.0.1")?;

  let output = run_deploy_gate_ok(
    &project.path,
    &["pom-value", "//dependency[artifactId='mockito-core']/version"],
    &[],
  )?;

  assert_eq!(stdout(&output), "1.10.19\n");
  Ok(())
}

#[test]
fn test_no_query() -> Result<()> {
  // No pom.xml at all: the missing query must be reported first
  let project = TestProject::new()?;

  let output = run_deploy_gate(&project.path, &["pom-value"], &[])?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("No XPath query provided"));
  assert!(stdout(&output).is_empty());
  Ok(())
}

#[test]
fn test_no_match() -> Result<()> {
  let project = TestProject::with_pom("2.0.1", "v2.0.1")?;

  let output = run_deploy_gate(&project.path, &["pom-value", "/project/description"], &[])?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("No match for the XPath query"));
  assert!(stdout(&output).is_empty());
  Ok(())
}

#[test]
fn test_more_than_one_match() -> Result<()> {
  let project = TestProject::with_pom("2.0.1", "v2.0.1")?;

  let output = run_deploy_gate(&project.path, &["pom-value", "//dependency/version"], &[])?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("More than one match for the XPath query"));
  assert!(stdout(&output).is_empty());
  Ok(())
}

#[test]
fn test_missing_manifest() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_deploy_gate(&project.path, &["pom-value", "/project/version"], &[])?;

  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("pom.xml"));
  Ok(())
}

#[test]
fn test_malformed_manifest() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("pom.xml", "<project><version>2.0.1</project>")?;

  let output = run_deploy_gate(&project.path, &["pom-value", "/project/version"], &[])?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("not well-formed XML"));
  Ok(())
}

#[test]
fn test_invalid_query() -> Result<()> {
  let project = TestProject::with_pom("2.0.1", "v2.0.1")?;

  let output = run_deploy_gate(&project.path, &["pom-value", "/project/version["], &[])?;

  assert!(!output.status.success());
  assert!(stderr(&output).contains("Invalid XPath query"));
  Ok(())
}

#[test]
fn test_manifest_override() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("modules/api/pom.xml", &crate::helpers::pom("3.0.0", "v3.0.0"))?;

  let output = run_deploy_gate_ok(
    &project.path,
    &["pom-value", "--manifest", "modules/api/pom.xml", "/project/version"],
    &[],
  )?;

  assert_eq!(stdout(&output), "3.0.0\n");
  Ok(())
}
