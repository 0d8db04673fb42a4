//! Release gate
//!
//! Decides whether a CI build may deploy. The build must be running against a
//! release tag, and that tag, the artifact version and the SCM tag declared in
//! the manifest must all agree.
//!
//! # Example
//!
//! ```rust,ignore
//! use deploy_gate::gate::{ReleaseInputs, validate};
//!
//! let inputs = ReleaseInputs::new(Some("v1.2.3-4"), Some("1.2.3-4"), Some("v1.2.3-4"));
//! assert!(validate(&inputs).is_ok());
//! ```

mod checks;
mod inputs;
mod pattern;

pub use checks::{CheckResult, GateCheck, GateReport, run_checks, validate};
pub use inputs::ReleaseInputs;
