//! Per-term relevance scoring.
//!
//! A term leaf of a query scores every document in its posting. Boolean
//! operators then only add these scores together (see the evaluator), so the
//! method chosen here decides the whole ranking.

use serde::{Deserialize, Serialize};

/// How a term leaf scores the documents that contain it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum ScoringMethod {
  /// Raw occurrence count of the term in the document.
  Frequency,
  /// Okapi BM25.
  Bm25 {
    /// Term frequency saturation. Higher keeps rewarding repeated terms.
    #[serde(default = "default_k1")]
    k1: f64,
    /// Document length normalization, 0.0 (none) to 1.0 (full).
    #[serde(default = "default_b")]
    b: f64,
  },
}

fn default_k1() -> f64 {
  1.5
}

fn default_b() -> f64 {
  0.75
}

impl Default for ScoringMethod {
  fn default() -> Self {
    ScoringMethod::Frequency
  }
}

impl ScoringMethod {
  /// BM25 with the usual `k1 = 1.5`, `b = 0.75`.
  pub fn bm25() -> Self {
    ScoringMethod::Bm25 {
      k1: default_k1(),
      b: default_b(),
    }
  }

  /// Scores one document for one term.
  ///
  /// # Arguments
  ///
  /// * `stats` - Corpus and document statistics for the term/document pair.
  pub fn score(&self, stats: &TermStats) -> f64 {
    match *self {
      ScoringMethod::Frequency => stats.term_freq as f64,
      ScoringMethod::Bm25 { k1, b } => {
        let tf = stats.term_freq as f64;
        if tf == 0.0 {
          return 0.0;
        }

        let avg_len = if stats.avg_doc_len > 0.0 {
          stats.avg_doc_len
        } else {
          1.0
        };
        let norm_tf =
          (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * (stats.doc_len as f64 / avg_len)));

        idf(stats.doc_freq, stats.total_docs) * norm_tf
      }
    }
  }
}

/// Everything a scorer may look at for a single (term, document) pair.
#[derive(Debug, Clone, Copy)]
pub struct TermStats {
  /// Occurrences of the term in the document.
  pub term_freq: u32,
  /// Number of documents containing the term.
  pub doc_freq: usize,
  /// Number of tokens ingested for the document.
  pub doc_len: usize,
  /// Mean tokens per document across the index.
  pub avg_doc_len: f64,
  /// Number of documents in the index.
  pub total_docs: usize,
}

/// Inverse document frequency, smoothed so it never goes negative.
fn idf(doc_freq: usize, total_docs: usize) -> f64 {
  let n = total_docs as f64;
  let df = doc_freq as f64;
  ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}
