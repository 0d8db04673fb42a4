//! `deploy-gate assert-ready` - Refuse to deploy anything but a consistent release
//!
//! Reads the build tag, POM version and POM SCM tag from the environment and
//! runs the release gate checks. Silent on success unless asked otherwise:
//! - `--verbose` lists each passed check on stderr
//! - `--json` prints the gate report on stdout
//! - `--from-manifest` reads the POM values from pom.xml when the
//!   environment does not provide them

use crate::core::context::GateContext;
use crate::core::error::GateResult;
use crate::gate::{CheckResult, ReleaseInputs, run_checks, validate};
use crate::manifest::{Manifest, Query};
use std::path::Path;

/// Run the assert-ready command
pub fn run_assert_ready(
  ctx: &GateContext,
  json: bool,
  verbose: bool,
  from_manifest: bool,
  manifest: Option<&Path>,
) -> GateResult<()> {
  let mut inputs = ReleaseInputs::from_env(&ctx.config.env);

  if from_manifest && inputs.needs_manifest() {
    inputs = fill_from_manifest(ctx, inputs, manifest)?;
  }

  if !json && !verbose {
    validate(&inputs)?;
    return Ok(());
  }

  let report = run_checks(&inputs, |result| {
    if verbose && result.passed {
      print_passed(result);
    }
  });

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  }

  report.into_result()?;
  Ok(())
}

/// Fill absent POM values from the manifest
///
/// A query that does not select exactly one node leaves the value absent, so
/// the gate reports it as not specified in the POM.
fn fill_from_manifest(ctx: &GateContext, inputs: ReleaseInputs, manifest: Option<&Path>) -> GateResult<ReleaseInputs> {
  let path = ctx.manifest_path(manifest);
  let manifest = Manifest::load(&path)?;

  let version_query = Query::parse(&ctx.config.manifest.version_query)?;
  let scm_tag_query = Query::parse(&ctx.config.manifest.scm_tag_query)?;

  Ok(inputs.or_manifest(
    manifest.value_if_unique(&version_query),
    manifest.value_if_unique(&scm_tag_query),
  ))
}

fn print_passed(result: &CheckResult) {
  eprintln!("✅ {}: {}", result.check, result.message);
}
