//! Query tokens.

use std::fmt;

/// One element of a tokenized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
  /// A normalized search term.
  Term(String),
  /// `&`
  And,
  /// `|`
  Or,
  /// `!`
  Not,
  /// `(`
  LParen,
  /// `)`
  RParen,
}

impl QueryToken {
  /// Classifies a raw token. Anything that is not exactly an operator is a term.
  pub fn parse(raw: &str) -> Self {
    match raw {
      "&" => QueryToken::And,
      "|" => QueryToken::Or,
      "!" => QueryToken::Not,
      "(" => QueryToken::LParen,
      ")" => QueryToken::RParen,
      term => QueryToken::Term(term.to_string()),
    }
  }

  /// True for tokens that can begin an operand: a term, `(` or `!`.
  pub fn starts_operand(&self) -> bool {
    matches!(self, QueryToken::Term(_) | QueryToken::LParen | QueryToken::Not)
  }
}

impl fmt::Display for QueryToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QueryToken::Term(term) => f.write_str(term),
      QueryToken::And => f.write_str("&"),
      QueryToken::Or => f.write_str("|"),
      QueryToken::Not => f.write_str("!"),
      QueryToken::LParen => f.write_str("("),
      QueryToken::RParen => f.write_str(")"),
    }
  }
}
