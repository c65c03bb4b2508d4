//! Error types for indexing and querying.

use thiserror::Error;

/// Main error type for inverdex operations
#[derive(Error, Debug)]
pub enum IndexError {
  #[error("Invalid document: {0}")]
  InvalidDocument(String),

  #[error("{0}")]
  Query(#[from] ParseError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Config error: {0}")]
  Config(#[from] serde_json::Error),

  #[error("File discovery error: {0}")]
  Discovery(String),
}

/// Result type alias for inverdex operations
pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
  /// True when the error came from a malformed query rather than the index itself.
  ///
  /// Malformed queries are recoverable: the interpreter reports them and keeps going.
  pub fn is_query_error(&self) -> bool {
    matches!(self, IndexError::Query(_))
  }
}

/// Why a token stream could not be turned into a query tree.
///
/// Every message is a single line naming the offending token and what the
/// parser expected in its place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  #[error("empty query")]
  EmptyQuery,

  #[error("expected term after '{after}', found {}", found_display(.found))]
  MissingOperand {
    after: String,
    found: Option<String>,
  },

  #[error("expected term or '(', found '{found}'")]
  UnexpectedToken { found: String },

  #[error("expected ')' to close '(', found end of query")]
  UnclosedParen,

  #[error("unmatched ')'")]
  UnmatchedParen,

  #[error("expected operator between '{left}' and '{right}'")]
  MissingOperator { left: String, right: String },

  #[error("query nested too deeply (more than {limit} levels)")]
  TooDeep { limit: usize },
}

fn found_display(found: &Option<String>) -> String {
  match found {
    Some(token) => format!("'{}'", token),
    None => "end of query".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_operand_display() {
    let err = ParseError::MissingOperand {
      after: "&".to_string(),
      found: Some(")".to_string()),
    };
    assert_eq!(err.to_string(), "expected term after '&', found ')'");

    let err = ParseError::MissingOperand {
      after: "|".to_string(),
      found: None,
    };
    assert_eq!(err.to_string(), "expected term after '|', found end of query");
  }

  #[test]
  fn test_query_error_passes_diagnostic_through() {
    let err: IndexError = ParseError::UnmatchedParen.into();
    assert!(err.is_query_error());
    assert_eq!(err.to_string(), "unmatched ')'");
  }

  #[test]
  fn test_io_is_not_query_error() {
    let err: IndexError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(!err.is_query_error());
  }
}
