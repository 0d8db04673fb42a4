//! XPath query parsing
//!
//! Supports the location-path subset of XPath 1.0 that build scripts use to
//! read values out of a manifest:
//!
//! - absolute and relative paths, `//` anywhere in a path
//! - `.`, `..`, `@name`, `*`, `@*`, `text()`, `node()`
//! - explicit axes: `child`, `descendant`, `descendant-or-self`, `self`,
//!   `parent`, `attribute`
//! - predicates: `[2]`, `[last()]`, `[scm]`, `[@id]`, `[artifactId='core']`,
//!   `[.!="x"]`
//! - unions: `/project/version | /project/parent/version`
//!
//! Names are matched on local names only. A prefixed name test such as
//! `pom:version` is rejected: the document has no namespaces left to bind it to.

use crate::core::error::QueryError;
use std::fmt;

/// A parsed query: one or more location paths joined by `|`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  source: String,
  pub paths: Vec<LocationPath>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationPath {
  /// Starts at the document root (`/...`)
  pub absolute: bool,
  pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
  pub axis: Axis,
  pub test: NodeTest,
  pub predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
  Child,
  Descendant,
  DescendantOrSelf,
  SelfAxis,
  Parent,
  Attribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
  /// Element (or attribute, on the attribute axis) with this local name
  Name(String),
  /// `*`
  Any,
  /// `text()`
  Text,
  /// `node()`
  Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
  /// `[n]`, 1-based
  Position(usize),
  /// `[last()]`
  Last,
  /// `[path]`: the path selects at least one node
  Exists(LocationPath),
  /// `[path = 'literal']` or `[path != 'literal']`
  Compare {
    path: LocationPath,
    op: CompareOp,
    literal: String,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
  Eq,
  NotEq,
}

impl Query {
  /// Parse a query string
  pub fn parse(source: &str) -> Result<Self, QueryError> {
    let invalid = |reason: String| QueryError::InvalidQuery {
      query: source.to_string(),
      reason,
    };

    let tokens = tokenize(source).map_err(invalid)?;
    let mut parser = Parser { tokens, pos: 0 };
    let paths = parser.parse_union().map_err(invalid)?;

    Ok(Self {
      source: source.to_string(),
      paths,
    })
  }
}

impl fmt::Display for Query {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.source)
  }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
  Slash,
  DoubleSlash,
  LBracket,
  RBracket,
  LParen,
  RParen,
  At,
  Star,
  Dot,
  DotDot,
  Pipe,
  Eq,
  NotEq,
  ColonColon,
  Name(String),
  Literal(String),
  Number(usize),
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Token::Slash => write!(f, "'/'"),
      Token::DoubleSlash => write!(f, "'//'"),
      Token::LBracket => write!(f, "'['"),
      Token::RBracket => write!(f, "']'"),
      Token::LParen => write!(f, "'('"),
      Token::RParen => write!(f, "')'"),
      Token::At => write!(f, "'@'"),
      Token::Star => write!(f, "'*'"),
      Token::Dot => write!(f, "'.'"),
      Token::DotDot => write!(f, "'..'"),
      Token::Pipe => write!(f, "'|'"),
      Token::Eq => write!(f, "'='"),
      Token::NotEq => write!(f, "'!='"),
      Token::ColonColon => write!(f, "'::'"),
      Token::Name(name) => write!(f, "name '{}'", name),
      Token::Literal(lit) => write!(f, "literal '{}'", lit),
      Token::Number(n) => write!(f, "number {}", n),
    }
  }
}

fn is_name_start(c: char) -> bool {
  c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
  c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn tokenize(source: &str) -> Result<Vec<Token>, String> {
  let chars: Vec<char> = source.chars().collect();
  let mut tokens = Vec::new();
  let mut i = 0;

  while i < chars.len() {
    let c = chars[i];
    let next = chars.get(i + 1).copied();
    match c {
      c if c.is_whitespace() => i += 1,
      '/' if next == Some('/') => {
        tokens.push(Token::DoubleSlash);
        i += 2;
      }
      '/' => {
        tokens.push(Token::Slash);
        i += 1;
      }
      '.' if next == Some('.') => {
        tokens.push(Token::DotDot);
        i += 2;
      }
      '.' if next.is_some_and(|n| n.is_ascii_digit()) => {
        return Err("decimal numbers are not supported".to_string());
      }
      '.' => {
        tokens.push(Token::Dot);
        i += 1;
      }
      '[' => {
        tokens.push(Token::LBracket);
        i += 1;
      }
      ']' => {
        tokens.push(Token::RBracket);
        i += 1;
      }
      '(' => {
        tokens.push(Token::LParen);
        i += 1;
      }
      ')' => {
        tokens.push(Token::RParen);
        i += 1;
      }
      '@' => {
        tokens.push(Token::At);
        i += 1;
      }
      '*' => {
        tokens.push(Token::Star);
        i += 1;
      }
      '|' => {
        tokens.push(Token::Pipe);
        i += 1;
      }
      '=' => {
        tokens.push(Token::Eq);
        i += 1;
      }
      '!' if next == Some('=') => {
        tokens.push(Token::NotEq);
        i += 2;
      }
      ':' if next == Some(':') => {
        tokens.push(Token::ColonColon);
        i += 2;
      }
      '\'' | '"' => {
        let end = chars[i + 1..]
          .iter()
          .position(|&ch| ch == c)
          .ok_or_else(|| "unterminated string literal".to_string())?;
        tokens.push(Token::Literal(chars[i + 1..i + 1 + end].iter().collect()));
        i += end + 2;
      }
      c if c.is_ascii_digit() => {
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
          i += 1;
        }
        if chars.get(i) == Some(&'.') && chars.get(i + 1) != Some(&'.') {
          return Err("decimal numbers are not supported".to_string());
        }
        let digits: String = chars[start..i].iter().collect();
        let n = digits
          .parse::<usize>()
          .map_err(|e| format!("invalid number '{}': {}", digits, e))?;
        tokens.push(Token::Number(n));
      }
      c if is_name_start(c) => {
        let start = i;
        i += 1;
        loop {
          match chars.get(i) {
            Some(&ch) if is_name_char(ch) => i += 1,
            // Keep a prefix separator so `pom:version` can be reported as such
            Some(&':') if chars.get(i + 1).is_some_and(|&n| is_name_start(n)) => i += 1,
            _ => break,
          }
        }
        tokens.push(Token::Name(chars[start..i].iter().collect()));
      }
      other => return Err(format!("unexpected character '{}'", other)),
    }
  }

  Ok(tokens)
}

struct Parser {
  tokens: Vec<Token>,
  pos: usize,
}

impl Parser {
  fn peek(&self) -> Option<&Token> {
    self.tokens.get(self.pos)
  }

  fn peek_at(&self, offset: usize) -> Option<&Token> {
    self.tokens.get(self.pos + offset)
  }

  fn next(&mut self) -> Option<Token> {
    let token = self.tokens.get(self.pos).cloned();
    if token.is_some() {
      self.pos += 1;
    }
    token
  }

  fn eat(&mut self, expected: &Token) -> bool {
    if self.peek() == Some(expected) {
      self.pos += 1;
      true
    } else {
      false
    }
  }

  fn expect(&mut self, expected: &Token) -> Result<(), String> {
    match self.next() {
      Some(ref token) if token == expected => Ok(()),
      Some(token) => Err(format!("expected {} but found {}", expected, token)),
      None => Err(format!("expected {} but the query ended", expected)),
    }
  }

  fn parse_union(&mut self) -> Result<Vec<LocationPath>, String> {
    if self.tokens.is_empty() {
      return Err("query is empty".to_string());
    }

    let mut paths = vec![self.parse_path()?];
    while self.eat(&Token::Pipe) {
      paths.push(self.parse_path()?);
    }

    match self.peek() {
      None => Ok(paths),
      Some(token) => Err(format!("unexpected {}", token)),
    }
  }

  fn parse_path(&mut self) -> Result<LocationPath, String> {
    match self.peek() {
      Some(Token::Slash) => {
        self.pos += 1;
        if self.starts_step() {
          let steps = self.parse_relative_steps()?;
          Ok(LocationPath { absolute: true, steps })
        } else {
          Ok(LocationPath {
            absolute: true,
            steps: Vec::new(),
          })
        }
      }
      Some(Token::DoubleSlash) => {
        self.pos += 1;
        let mut steps = vec![descendant_or_self()];
        steps.extend(self.parse_relative_steps()?);
        Ok(LocationPath { absolute: true, steps })
      }
      _ => {
        let steps = self.parse_relative_steps()?;
        Ok(LocationPath { absolute: false, steps })
      }
    }
  }

  fn starts_step(&self) -> bool {
    matches!(
      self.peek(),
      Some(Token::Name(_) | Token::Star | Token::At | Token::Dot | Token::DotDot)
    )
  }

  fn parse_relative_steps(&mut self) -> Result<Vec<Step>, String> {
    let mut steps = vec![self.parse_step()?];
    loop {
      if self.eat(&Token::Slash) {
        steps.push(self.parse_step()?);
      } else if self.eat(&Token::DoubleSlash) {
        steps.push(descendant_or_self());
        steps.push(self.parse_step()?);
      } else {
        return Ok(steps);
      }
    }
  }

  fn parse_step(&mut self) -> Result<Step, String> {
    if self.eat(&Token::Dot) {
      return Ok(Step {
        axis: Axis::SelfAxis,
        test: NodeTest::Node,
        predicates: Vec::new(),
      });
    }
    if self.eat(&Token::DotDot) {
      return Ok(Step {
        axis: Axis::Parent,
        test: NodeTest::Node,
        predicates: Vec::new(),
      });
    }

    let axis = if self.eat(&Token::At) {
      Axis::Attribute
    } else if let (Some(Token::Name(name)), Some(Token::ColonColon)) = (self.peek(), self.peek_at(1)) {
      let axis = parse_axis(name)?;
      self.pos += 2;
      axis
    } else {
      Axis::Child
    };

    let test = self.parse_node_test()?;

    let mut predicates = Vec::new();
    while self.eat(&Token::LBracket) {
      predicates.push(self.parse_predicate()?);
      self.expect(&Token::RBracket)?;
    }

    Ok(Step { axis, test, predicates })
  }

  fn parse_node_test(&mut self) -> Result<NodeTest, String> {
    match self.next() {
      Some(Token::Star) => Ok(NodeTest::Any),
      Some(Token::Name(name)) => {
        if self.peek() == Some(&Token::LParen) {
          let test = match name.as_str() {
            "text" => NodeTest::Text,
            "node" => NodeTest::Node,
            other => return Err(format!("unsupported function '{}()' in a location step", other)),
          };
          self.pos += 1;
          self.expect(&Token::RParen)?;
          return Ok(test);
        }
        if let Some((prefix, local)) = name.split_once(':') {
          return Err(format!(
            "namespace prefix '{}' cannot be used because namespaces are stripped; query '{}' instead",
            prefix, local
          ));
        }
        Ok(NodeTest::Name(name))
      }
      Some(token) => Err(format!("expected a node test but found {}", token)),
      None => Err("expected a node test but the query ended".to_string()),
    }
  }

  fn parse_predicate(&mut self) -> Result<Predicate, String> {
    match (self.peek(), self.peek_at(1)) {
      (Some(Token::Number(n)), _) => {
        let n = *n;
        self.pos += 1;
        Ok(Predicate::Position(n))
      }
      (Some(Token::Name(name)), Some(Token::LParen)) if name == "last" => {
        self.pos += 2;
        self.expect(&Token::RParen)?;
        Ok(Predicate::Last)
      }
      _ => {
        let path = self.parse_path()?;
        let op = if self.eat(&Token::Eq) {
          CompareOp::Eq
        } else if self.eat(&Token::NotEq) {
          CompareOp::NotEq
        } else {
          return Ok(Predicate::Exists(path));
        };
        match self.next() {
          Some(Token::Literal(literal)) => Ok(Predicate::Compare { path, op, literal }),
          Some(token) => Err(format!("expected a quoted string after comparison but found {}", token)),
          None => Err("expected a quoted string after comparison but the query ended".to_string()),
        }
      }
    }
  }
}

fn descendant_or_self() -> Step {
  Step {
    axis: Axis::DescendantOrSelf,
    test: NodeTest::Node,
    predicates: Vec::new(),
  }
}

fn parse_axis(name: &str) -> Result<Axis, String> {
  match name {
    "child" => Ok(Axis::Child),
    "descendant" => Ok(Axis::Descendant),
    "descendant-or-self" => Ok(Axis::DescendantOrSelf),
    "self" => Ok(Axis::SelfAxis),
    "parent" => Ok(Axis::Parent),
    "attribute" => Ok(Axis::Attribute),
    other => Err(format!("unsupported axis '{}'", other)),
  }
}
