//! Manifest (pom.xml) access
//!
//! Parse the document, strip namespaces, evaluate an XPath query, then demand
//! exactly one match:
//!
//! ```text
//! pom.xml -> Document (namespace-free) -> select(Query) -> single() -> string value
//! ```

mod document;
mod eval;
mod extract;
pub mod xpath;

pub use extract::Manifest;
pub use xpath::Query;
