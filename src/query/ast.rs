//! The query expression tree.
//!
//! The parser builds a `QueryNode` bottom-up from the token stream; the
//! evaluator walks it post-order. Trees are transient and live for a single
//! query.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a boolean query expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryNode {
  /// Documents containing the term.
  Term(String),
  /// Documents matched by both sides.
  And(Box<QueryNode>, Box<QueryNode>),
  /// Documents matched by either side.
  Or(Box<QueryNode>, Box<QueryNode>),
  /// Every indexed document the operand does not match.
  Not(Box<QueryNode>),
}

impl QueryNode {
  pub fn term(term: impl Into<String>) -> Self {
    QueryNode::Term(term.into())
  }

  pub fn and(left: QueryNode, right: QueryNode) -> Self {
    QueryNode::And(Box::new(left), Box::new(right))
  }

  pub fn or(left: QueryNode, right: QueryNode) -> Self {
    QueryNode::Or(Box::new(left), Box::new(right))
  }

  pub fn not(operand: QueryNode) -> Self {
    QueryNode::Not(Box::new(operand))
  }

  /// Term leaves in left-to-right order, duplicates included.
  pub fn terms(&self) -> Vec<&str> {
    let mut out = Vec::new();
    self.collect_terms(&mut out);
    out
  }

  fn collect_terms<'a>(&'a self, out: &mut Vec<&'a str>) {
    match self {
      QueryNode::Term(term) => out.push(term),
      QueryNode::And(left, right) | QueryNode::Or(left, right) => {
        left.collect_terms(out);
        right.collect_terms(out);
      }
      QueryNode::Not(operand) => operand.collect_terms(out),
    }
  }
}

/// Fully parenthesized form, e.g. `((a & b) | !c)`.
impl fmt::Display for QueryNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QueryNode::Term(term) => write!(f, "{}", term),
      QueryNode::And(left, right) => write!(f, "({} & {})", left, right),
      QueryNode::Or(left, right) => write!(f, "({} | {})", left, right),
      QueryNode::Not(operand) => write!(f, "!{}", operand),
    }
  }
}
