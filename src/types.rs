//! Core data types shared by the index, the query engine and the interpreter.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// Type alias for document identifiers.
///
/// A document name is interned once when the document is first indexed and
/// then shared by the document set, every posting that mentions it and every
/// query result that returns it.
pub type DocName = Arc<str>;

/// A single ranked hit returned from a query.
///
/// Higher score implies the document is more relevant. The list a query
/// returns is freshly built for every call and owned by the caller; the index
/// keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
  /// The name the document was indexed under.
  pub doc_name: DocName,
  /// Relevance score. Documents reached only through negation score `0.0`.
  pub score: f64,
}

impl QueryResult {
  /// Creates a new result for a document and its score.
  pub fn new(doc_name: DocName, score: f64) -> Self {
    Self { doc_name, score }
  }

  /// Ranking order: score descending, ties broken by document name ascending.
  pub fn rank_cmp(&self, other: &Self) -> Ordering {
    other
      .score
      .total_cmp(&self.score)
      .then_with(|| self.doc_name.cmp(&other.doc_name))
  }
}

/// Counters reported by [`Index::index_stat`](crate::index::Index::index_stat).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
  /// Number of distinct document names.
  pub documents: usize,
  /// Number of distinct terms.
  pub terms: usize,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn result(name: &str, score: f64) -> QueryResult {
    QueryResult::new(Arc::from(name), score)
  }

  #[test]
  fn test_rank_cmp_orders_by_score_then_name() {
    let mut results = vec![
      result("b", 1.0),
      result("c", 3.0),
      result("a", 1.0),
    ];
    results.sort_by(QueryResult::rank_cmp);

    let names: Vec<&str> = results.iter().map(|r| &*r.doc_name).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
  }

  #[test]
  fn test_result_serializes_flat() {
    let json = serde_json::to_string(&result("doc1", 2.0)).unwrap();
    assert_eq!(json, r#"{"doc_name":"doc1","score":2.0}"#);
  }
}
