//! Query evaluation over a `Document`

use super::document::{Document, NodeId, NodeKind};
use super::xpath::{Axis, CompareOp, LocationPath, NodeTest, Predicate, Query, Step};

/// Evaluate a query from the document root
///
/// Returns matched nodes in document order, without duplicates.
pub fn select(doc: &Document, query: &Query) -> Vec<NodeId> {
  let mut nodes: Vec<NodeId> = query
    .paths
    .iter()
    .flat_map(|path| select_path(doc, path, Document::ROOT))
    .collect();
  nodes.sort_unstable();
  nodes.dedup();
  nodes
}

fn select_path(doc: &Document, path: &LocationPath, context: NodeId) -> Vec<NodeId> {
  let mut current = vec![if path.absolute { Document::ROOT } else { context }];

  for step in &path.steps {
    let mut next = Vec::new();
    for &node in &current {
      next.extend(apply_step(doc, step, node));
    }
    next.sort_unstable();
    next.dedup();
    current = next;
  }

  current
}

fn apply_step(doc: &Document, step: &Step, node: NodeId) -> Vec<NodeId> {
  let mut candidates: Vec<NodeId> = axis_nodes(doc, step.axis, node)
    .into_iter()
    .filter(|&n| matches_test(doc, step.axis, &step.test, n))
    .collect();

  // Each predicate filters the survivors of the previous one, so positions
  // are relative to what is left at that point
  for predicate in &step.predicates {
    candidates = apply_predicate(doc, predicate, candidates);
  }

  candidates
}

fn axis_nodes(doc: &Document, axis: Axis, node: NodeId) -> Vec<NodeId> {
  let n = doc.node(node);
  match axis {
    Axis::Child => n.children.clone(),
    Axis::Descendant => doc.descendants(node),
    Axis::DescendantOrSelf => {
      let mut nodes = vec![node];
      nodes.extend(doc.descendants(node));
      nodes
    }
    Axis::SelfAxis => vec![node],
    Axis::Parent => n.parent.into_iter().collect(),
    Axis::Attribute => n.attributes.clone(),
  }
}

fn matches_test(doc: &Document, axis: Axis, test: &NodeTest, node: NodeId) -> bool {
  let kind = &doc.node(node).kind;
  // `*` and names select attributes on the attribute axis, elements elsewhere
  let principal = match axis {
    Axis::Attribute => matches!(kind, NodeKind::Attribute { .. }),
    _ => matches!(kind, NodeKind::Element { .. }),
  };
  match test {
    NodeTest::Node => true,
    NodeTest::Text => matches!(kind, NodeKind::Text(_)),
    NodeTest::Any => principal,
    NodeTest::Name(expected) => principal && doc.name(node) == Some(expected.as_str()),
  }
}

fn apply_predicate(doc: &Document, predicate: &Predicate, candidates: Vec<NodeId>) -> Vec<NodeId> {
  match predicate {
    Predicate::Position(position) => position
      .checked_sub(1)
      .and_then(|index| candidates.get(index).copied())
      .into_iter()
      .collect(),
    Predicate::Last => candidates.last().copied().into_iter().collect(),
    Predicate::Exists(path) => candidates
      .into_iter()
      .filter(|&n| !select_path(doc, path, n).is_empty())
      .collect(),
    Predicate::Compare { path, op, literal } => candidates
      .into_iter()
      .filter(|&n| {
        select_path(doc, path, n).into_iter().any(|m| {
          let value = doc.string_value(m);
          match op {
            CompareOp::Eq => value == *literal,
            CompareOp::NotEq => value != *literal,
          }
        })
      })
      .collect(),
  }
}
