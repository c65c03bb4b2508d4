//! Runtime configuration for the tokenizer, the index and the interpreter.

use crate::error::Result;
use crate::scoring::ScoringMethod;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level settings, loadable from a JSON file.
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Maximum rows printed per result table. 0 means unlimited.
  pub max_result_rows: usize,
  /// Report build progress every this many files. 0 disables progress.
  pub progress_interval: usize,
  /// How term leaves score documents.
  pub scoring: ScoringMethod,
  pub tokenizer: TokenizerConfig,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      max_result_rows: 20,
      progress_interval: 100,
      scoring: ScoringMethod::default(),
      tokenizer: TokenizerConfig::default(),
    }
  }
}

impl SearchConfig {
  /// Reads a config from a JSON file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
  }

  /// Sets the maximum number of rows printed per query.
  pub fn max_result_rows(mut self, rows: usize) -> Self {
    self.max_result_rows = rows;
    self
  }

  /// Sets the scoring method.
  pub fn scoring(mut self, scoring: ScoringMethod) -> Self {
    self.scoring = scoring;
    self
  }
}

/// Tokenizer configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
  /// Tokens shorter than this (in characters) are dropped.
  pub min_token_len: usize,
  /// Tokens longer than this (in characters) are dropped.
  pub max_token_len: usize,
}

impl Default for TokenizerConfig {
  fn default() -> Self {
    Self {
      min_token_len: 1,
      max_token_len: 1022,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn test_empty_json_is_default() {
    let config: SearchConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SearchConfig::default());
  }

  #[test]
  fn test_partial_json_keeps_other_defaults() {
    let config: SearchConfig =
      serde_json::from_str(r#"{"max_result_rows": 5, "tokenizer": {"min_token_len": 3}}"#).unwrap();
    assert_eq!(config.max_result_rows, 5);
    assert_eq!(config.progress_interval, 100);
    assert_eq!(config.tokenizer.min_token_len, 3);
    assert_eq!(config.tokenizer.max_token_len, 1022);
  }

  #[test]
  fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"scoring": {{"method": "bm25", "k1": 1.2}}}}"#).unwrap();

    let config = SearchConfig::from_file(file.path()).unwrap();
    assert_eq!(config.scoring, ScoringMethod::Bm25 { k1: 1.2, b: 0.75 });
  }

  #[test]
  fn test_from_file_rejects_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    let err = SearchConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, crate::error::IndexError::Config(_)));
  }
}
