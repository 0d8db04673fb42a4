//! Integration tests for deploy-gate
//!
//! Each test runs the real binary inside a temporary project directory.

mod helpers;
mod test_assert_ready;
mod test_pom_value;
