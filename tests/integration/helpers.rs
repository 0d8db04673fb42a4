//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables the gate reads by default
pub const GATE_VARS: [&str; 3] = ["TRAVIS_TAG", "POM_VERSION", "POM_SCM_TAG"];

/// A throwaway project directory
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create an empty project directory
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Create a project with a Maven POM declaring `version` and `scm_tag`
  pub fn with_pom(version: &str, scm_tag: &str) -> Result<Self> {
    let project = Self::new()?;
    project.write_file("pom.xml", &pom(version, scm_tag))?;
    Ok(project)
  }

  /// Write a file relative to the project root, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }
}

/// A namespaced Maven POM
pub fn pom(version: &str, scm_tag: &str) -> String {
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>example-service</artifactId>
  <version>{}</version>
  <packaging>jar</packaging>

  <scm>
    <connection>scm:git:git@github.com:example/example-service.git</connection>
    <tag>{}</tag>
  </scm>

  <dependencies>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.12</version>
      <scope>test</scope>
    </dependency>
    <dependency>
      <groupId>org.mockito</groupId>
      <artifactId>mockito-core</artifactId>
      <version>1.10.19</version>
      <scope>test</scope>
    </dependency>
  </dependencies>
</project>
"#,
    version, scm_tag
  )
}

/// Run deploy-gate with a clean gate environment plus `env`
///
/// Does not fail on a non-zero exit; inspect `status` yourself.
pub fn run_deploy_gate(cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> Result<Output> {
  let deploy_gate_bin = env!("CARGO_BIN_EXE_deploy-gate");

  let mut cmd = Command::new(deploy_gate_bin);
  cmd.current_dir(cwd).args(args);
  for var in GATE_VARS {
    cmd.env_remove(var);
  }
  for (key, value) in env {
    cmd.env(key, value);
  }

  cmd.output().context("Failed to run deploy-gate")
}

/// Run deploy-gate and fail unless it exits successfully
pub fn run_deploy_gate_ok(cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> Result<Output> {
  let output = run_deploy_gate(cwd, args, env)?;

  if !output.status.success() {
    anyhow::bail!(
      "deploy-gate command failed: deploy-gate {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout(&output),
      stderr(&output)
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}

/// Release environment with all three gate variables set
pub fn release_env<'a>(tag: &'a str, version: &'a str, scm_tag: &'a str) -> Vec<(&'a str, &'a str)> {
  vec![("TRAVIS_TAG", tag), ("POM_VERSION", version), ("POM_SCM_TAG", scm_tag)]
}
