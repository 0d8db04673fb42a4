//! `deploy-gate pom-value` - Print one value from pom.xml
//!
//! ```text
//! $ deploy-gate pom-value /project/version
//! 2.0.1
//! ```
//!
//! Namespaces are stripped before the query runs, so `/project/version` works
//! on a POM declaring `xmlns="http://maven.apache.org/POM/4.0.0"`.

use crate::core::context::GateContext;
use crate::core::error::{GateResult, QueryError};
use crate::manifest::{Manifest, Query};
use std::path::Path;

/// Run the pom-value command
///
/// The query is checked before anything else is read: a missing query fails
/// without touching the manifest or the config file.
pub fn run_pom_value(root: &Path, query: Option<String>, manifest: Option<&Path>) -> GateResult<()> {
  let query = query.ok_or(QueryError::NoQuery)?;
  let query = Query::parse(&query)?;

  let ctx = GateContext::build(root)?;
  let manifest = Manifest::load(&ctx.manifest_path(manifest))?;
  let value = manifest.value(&query)?;

  // One line of output, even when the value already ends with a newline
  if value.ends_with('\n') {
    print!("{}", value);
  } else {
    println!("{}", value);
  }

  Ok(())
}
