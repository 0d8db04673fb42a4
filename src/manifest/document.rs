//! Namespace-free XML document tree
//!
//! The manifest is read with quick-xml's event reader into an arena of nodes.
//! Element and attribute names keep only their local part and `xmlns`
//! declarations are dropped, so `<pom:version>` under any namespace is just
//! `version`.
//!
//! Node ids are assigned in document order: an element comes before its
//! attributes, which come before its children. Sorting ids sorts nodes.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Index of a node in a `Document`
pub type NodeId = usize;

/// Kind and payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
  /// The document root (parent of the top-level element)
  Root,
  Element { name: String },
  Attribute { name: String, value: String },
  Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
  pub kind: NodeKind,
  pub parent: Option<NodeId>,
  pub children: Vec<NodeId>,
  pub attributes: Vec<NodeId>,
}

/// Parsed XML document
#[derive(Debug, Clone)]
pub struct Document {
  nodes: Vec<Node>,
}

impl Document {
  /// Id of the document root
  pub const ROOT: NodeId = 0;

  /// Parse XML text, stripping namespaces
  pub fn parse(xml: &str) -> Result<Self, String> {
    let mut reader = Reader::from_str(xml);
    let mut doc = Document {
      nodes: vec![Node {
        kind: NodeKind::Root,
        parent: None,
        children: Vec::new(),
        attributes: Vec::new(),
      }],
    };
    let mut open = vec![Self::ROOT];

    loop {
      let current = *open.last().unwrap_or(&Self::ROOT);
      match reader.read_event() {
        Ok(Event::Start(ref e)) => {
          let id = doc.push_element(current, e)?;
          open.push(id);
        }
        Ok(Event::Empty(ref e)) => {
          doc.push_element(current, e)?;
        }
        Ok(Event::End(_)) => {
          if open.len() <= 1 {
            return Err(format!("unexpected closing tag at byte {}", reader.buffer_position()));
          }
          open.pop();
        }
        Ok(Event::Text(ref e)) => {
          let text = e.unescape().map_err(|err| err.to_string())?;
          if current == Self::ROOT {
            if !text.trim().is_empty() {
              return Err("text outside of the root element".to_string());
            }
          } else {
            doc.push_text(current, &text);
          }
        }
        Ok(Event::CData(ref e)) => {
          if current == Self::ROOT {
            return Err("CDATA outside of the root element".to_string());
          }
          let text = String::from_utf8_lossy(e).into_owned();
          doc.push_text(current, &text);
        }
        Ok(Event::Eof) => break,
        Err(err) => {
          return Err(format!("{} (at byte {})", err, reader.error_position()));
        }
        // Comments, processing instructions, declarations and doctypes carry no values
        Ok(_) => {}
      }
    }

    if open.len() > 1 {
      return Err("unexpected end of document: unclosed element".to_string());
    }
    match doc.node(Self::ROOT).children.len() {
      0 => Err("document has no root element".to_string()),
      1 => Ok(doc),
      _ => Err("document has more than one root element".to_string()),
    }
  }

  fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
    let id = self.nodes.len();
    self.nodes.push(Node {
      kind,
      parent: Some(parent),
      children: Vec::new(),
      attributes: Vec::new(),
    });
    id
  }

  fn push_element(&mut self, parent: NodeId, e: &BytesStart<'_>) -> Result<NodeId, String> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let id = self.push(parent, NodeKind::Element { name });
    self.nodes[parent].children.push(id);

    for attr in e.attributes() {
      let attr = attr.map_err(|err| err.to_string())?;
      if attr.key.as_namespace_binding().is_some() {
        continue;
      }
      let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
      let value = attr.unescape_value().map_err(|err| err.to_string())?.into_owned();
      let attr_id = self.push(id, NodeKind::Attribute { name, value });
      self.nodes[id].attributes.push(attr_id);
    }

    Ok(id)
  }

  fn push_text(&mut self, parent: NodeId, text: &str) {
    // Adjacent text and CDATA form a single text node
    if let Some(&last) = self.nodes[parent].children.last()
      && let NodeKind::Text(existing) = &mut self.nodes[last].kind
    {
      existing.push_str(text);
      return;
    }
    let id = self.push(parent, NodeKind::Text(text.to_string()));
    self.nodes[parent].children.push(id);
  }

  /// Look up a node by id
  pub fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id]
  }

  /// Local name of an element or attribute
  pub fn name(&self, id: NodeId) -> Option<&str> {
    match &self.nodes[id].kind {
      NodeKind::Element { name } | NodeKind::Attribute { name, .. } => Some(name),
      _ => None,
    }
  }

  /// Every descendant of `id` (children, grandchildren, ...) in document order
  pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
    while let Some(next) = stack.pop() {
      out.push(next);
      stack.extend(self.nodes[next].children.iter().rev().copied());
    }
    out
  }

  /// String value of a node: concatenated descendant text for elements and
  /// the root, the value for attributes, the content for text nodes
  pub fn string_value(&self, id: NodeId) -> String {
    match &self.nodes[id].kind {
      NodeKind::Attribute { value, .. } => value.clone(),
      NodeKind::Text(text) => text.clone(),
      NodeKind::Root | NodeKind::Element { .. } => self
        .descendants(id)
        .into_iter()
        .filter_map(|d| match &self.nodes[d].kind {
          NodeKind::Text(text) => Some(text.as_str()),
          _ => None,
        })
        .collect(),
    }
  }
}
