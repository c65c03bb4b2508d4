//! Evaluates a query tree against an index.
//!
//! Each subtree evaluates to a score map (document → score). Its key set is the
//! subtree's document set, so the boolean operators are plain ordered-set
//! algebra on key sets and the scores ride along:
//!
//! - `a & b`: intersection, score is the sum of both sides.
//! - `a | b`: union, score is the sum of whichever sides matched.
//! - `!a`: every indexed document minus `a`'s set, scoring the baseline `0.0`.

use super::ast::QueryNode;
use crate::index::Index;
use crate::scoring::TermStats;
use crate::types::{DocName, QueryResult};
use std::collections::{BTreeMap, BTreeSet};

/// Score contributed by a document matched only through negation.
pub const NOT_BASELINE_SCORE: f64 = 0.0;

/// Per-document scores of an evaluated subtree.
pub type ScoreMap = BTreeMap<DocName, f64>;

/// Walks query trees against one index.
pub struct Evaluator<'a> {
  index: &'a Index,
}

impl<'a> Evaluator<'a> {
  pub fn new(index: &'a Index) -> Self {
    Self { index }
  }

  /// Evaluates `node` and ranks the matches: score descending, ties by name.
  pub fn evaluate(&self, node: &QueryNode) -> Vec<QueryResult> {
    let mut results: Vec<QueryResult> = self
      .scores(node)
      .into_iter()
      .map(|(doc, score)| QueryResult::new(doc, score))
      .collect();

    results.sort_by(QueryResult::rank_cmp);
    results
  }

  /// Evaluates `node` post-order into a score map.
  pub fn scores(&self, node: &QueryNode) -> ScoreMap {
    match node {
      QueryNode::Term(term) => self.term_scores(term),
      QueryNode::And(left, right) => intersection(&self.scores(left), &self.scores(right)),
      QueryNode::Or(left, right) => union(&self.scores(left), &self.scores(right)),
      QueryNode::Not(operand) => {
        let excluded = self.scores(operand);
        let all: BTreeSet<&DocName> = self.index.documents().collect();
        let excluded: BTreeSet<&DocName> = excluded.keys().collect();

        all
          .difference(&excluded)
          .map(|doc| ((*doc).clone(), NOT_BASELINE_SCORE))
          .collect()
      }
    }
  }

  /// A term absent from the dictionary matches nothing; that is not an error.
  fn term_scores(&self, term: &str) -> ScoreMap {
    let Some(posting) = self.index.posting(term) else {
      return ScoreMap::new();
    };

    let scoring = self.index.scoring();
    let doc_freq = posting.doc_freq();
    let total_docs = self.index.index_stat().documents;
    let avg_doc_len = self.index.avg_doc_len();

    posting
      .iter()
      .map(|(doc, term_freq)| {
        let stats = TermStats {
          term_freq,
          doc_freq,
          doc_len: self.index.doc_len(doc),
          avg_doc_len,
          total_docs,
        };
        (doc.clone(), scoring.score(&stats))
      })
      .collect()
  }
}

fn intersection(left: &ScoreMap, right: &ScoreMap) -> ScoreMap {
  let left_docs: BTreeSet<&DocName> = left.keys().collect();
  let right_docs: BTreeSet<&DocName> = right.keys().collect();

  left_docs
    .intersection(&right_docs)
    .map(|doc| ((*doc).clone(), left[*doc] + right[*doc]))
    .collect()
}

fn union(left: &ScoreMap, right: &ScoreMap) -> ScoreMap {
  let left_docs: BTreeSet<&DocName> = left.keys().collect();
  let right_docs: BTreeSet<&DocName> = right.keys().collect();

  left_docs
    .union(&right_docs)
    .map(|doc| {
      let score = left.get(*doc).copied().unwrap_or(0.0) + right.get(*doc).copied().unwrap_or(0.0);
      ((*doc).clone(), score)
    })
    .collect()
}
