//! CLI commands for deploy-gate
//!
//! - **assert-ready**: Release gate; fails unless the build tag, POM version and
//!   POM SCM tag agree on a release
//! - **pom-value**: Print the single value an XPath query selects from pom.xml

pub mod assert_ready;
pub mod pom_value;

pub use assert_ready::run_assert_ready;
pub use pom_value::run_pom_value;
