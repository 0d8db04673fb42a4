//! Single-value extraction from a manifest
//!
//! A query must select exactly one node. Zero matches and several matches are
//! both errors; there is no "first match wins".

use super::document::{Document, NodeId};
use super::eval::select;
use super::xpath::Query;
use crate::core::error::QueryError;
use std::fs;
use std::path::Path;

/// A parsed manifest file
#[derive(Debug, Clone)]
pub struct Manifest {
  document: Document,
}

impl Manifest {
  /// Read and parse a manifest file
  pub fn load(path: &Path) -> Result<Self, QueryError> {
    let content = fs::read_to_string(path).map_err(|source| QueryError::ManifestUnreadable {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(path, &content)
  }

  /// Parse manifest content; `path` is only used in error messages
  pub fn parse(path: &Path, content: &str) -> Result<Self, QueryError> {
    let document = Document::parse(content).map_err(|reason| QueryError::ManifestMalformed {
      path: path.to_path_buf(),
      reason,
    })?;
    Ok(Self { document })
  }

  /// Text value of the single node the query selects
  pub fn value(&self, query: &Query) -> Result<String, QueryError> {
    let node = single(select(&self.document, query))?;
    Ok(self.document.string_value(node))
  }

  /// Like `value`, but `None` unless the query selects exactly one node
  pub fn value_if_unique(&self, query: &Query) -> Option<String> {
    self.value(query).ok()
  }
}

/// Enforce the exactly-one cardinality contract
pub fn single(nodes: Vec<NodeId>) -> Result<NodeId, QueryError> {
  match nodes.as_slice() {
    [] => Err(QueryError::NoMatch),
    [node] => Ok(*node),
    _ => Err(QueryError::MultipleMatches { count: nodes.len() }),
  }
}
