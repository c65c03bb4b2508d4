//! Recursive descent parser for boolean queries
//!
//! # Grammar
//!
//! ```text
//! expr     := or_expr
//! or_expr  := and_expr ('|' and_expr)*
//! and_expr := not_expr ('&' not_expr)*
//! not_expr := '!' not_expr | atom
//! atom     := TERM | '(' expr ')'
//! ```
//!
//! `!` binds tightest, then `&`, then `|`. Binary operators are
//! left-associative, so `a | b | c` is `(a | b) | c`.
//!
//! Both the nesting of `!` and `(` and the height of the resulting tree are
//! capped at [`MAX_QUERY_DEPTH`], since parsing, evaluating and dropping a tree
//! all recurse once per level.

use super::ast::QueryNode;
use super::token::QueryToken;
use crate::error::ParseError;

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Deepest query tree the parser will build.
pub const MAX_QUERY_DEPTH: usize = 256;

/// A parsed subtree and its height.
type Parsed = (QueryNode, usize);

/// Parses raw query tokens into an expression tree.
///
/// # Examples
///
/// ```rust
/// use inverdex::query::parse;
///
/// let tree = parse(&["(", "a", "&", "b", ")", "|", "!", "c"]).unwrap();
/// assert_eq!(tree.to_string(), "((a & b) | !c)");
/// ```
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> ParseResult<QueryNode> {
  let tokens: Vec<QueryToken> = tokens
    .iter()
    .map(|raw| QueryToken::parse(raw.as_ref()))
    .collect();
  QueryParser::new(&tokens).parse()
}

/// Parser over a classified token stream.
pub struct QueryParser<'a> {
  tokens: &'a [QueryToken],
  position: usize,
  /// Open `!` and `(` levels on the call stack.
  depth: usize,
}

impl<'a> QueryParser<'a> {
  pub fn new(tokens: &'a [QueryToken]) -> Self {
    Self {
      tokens,
      position: 0,
      depth: 0,
    }
  }

  /// Parse the whole token stream into a single expression.
  pub fn parse(mut self) -> ParseResult<QueryNode> {
    if self.tokens.is_empty() {
      return Err(ParseError::EmptyQuery);
    }

    let (expr, _) = self.parse_or_expr()?;

    // Ensure we've consumed all input
    match self.peek() {
      None => Ok(expr),
      Some(token) => Err(self.unexpected_after_expr(token)),
    }
  }

  /// Parse: or_expr := and_expr ('|' and_expr)*
  fn parse_or_expr(&mut self) -> ParseResult<Parsed> {
    let (mut left, mut height) = self.parse_and_expr()?;

    while self.peek() == Some(&QueryToken::Or) {
      self.advance();
      self.expect_operand("|")?;
      let (right, right_height) = self.parse_and_expr()?;
      height = check_height(height.max(right_height) + 1)?;
      left = QueryNode::or(left, right);
    }

    Ok((left, height))
  }

  /// Parse: and_expr := not_expr ('&' not_expr)*
  fn parse_and_expr(&mut self) -> ParseResult<Parsed> {
    let (mut left, mut height) = self.parse_not_expr()?;

    while self.peek() == Some(&QueryToken::And) {
      self.advance();
      self.expect_operand("&")?;
      let (right, right_height) = self.parse_not_expr()?;
      height = check_height(height.max(right_height) + 1)?;
      left = QueryNode::and(left, right);
    }

    Ok((left, height))
  }

  /// Parse: not_expr := '!' not_expr | atom
  fn parse_not_expr(&mut self) -> ParseResult<Parsed> {
    if self.peek() == Some(&QueryToken::Not) {
      self.advance();
      self.expect_operand("!")?;
      self.enter()?;
      let (operand, height) = self.parse_not_expr()?;
      self.depth -= 1;
      return Ok((QueryNode::not(operand), check_height(height + 1)?));
    }

    self.parse_atom()
  }

  /// Parse: atom := TERM | '(' expr ')'
  fn parse_atom(&mut self) -> ParseResult<Parsed> {
    match self.advance() {
      Some(QueryToken::Term(term)) => Ok((QueryNode::term(term.clone()), 1)),
      Some(QueryToken::LParen) => {
        self.expect_operand("(")?;
        self.enter()?;
        let expr = self.parse_or_expr()?;
        self.depth -= 1;
        match self.peek() {
          Some(QueryToken::RParen) => {
            self.advance();
            Ok(expr)
          }
          None => Err(ParseError::UnclosedParen),
          Some(token) => Err(self.unexpected_after_expr(token)),
        }
      }
      Some(QueryToken::RParen) => Err(ParseError::UnmatchedParen),
      Some(token) => Err(ParseError::UnexpectedToken {
        found: token.to_string(),
      }),
      None => Err(ParseError::EmptyQuery),
    }
  }

  /// Opens one `!` or `(` level.
  fn enter(&mut self) -> ParseResult<()> {
    self.depth += 1;
    if self.depth > MAX_QUERY_DEPTH {
      return Err(ParseError::TooDeep {
        limit: MAX_QUERY_DEPTH,
      });
    }
    Ok(())
  }

  /// Fails unless the next token can start an operand of `operator`.
  fn expect_operand(&self, operator: &str) -> ParseResult<()> {
    match self.peek() {
      Some(token) if token.starts_operand() => Ok(()),
      found => Err(ParseError::MissingOperand {
        after: operator.to_string(),
        found: found.map(ToString::to_string),
      }),
    }
  }

  /// Error for a token left over after a complete expression.
  ///
  /// Binary operators are always consumed by the loops above, so the leftover
  /// is either a stray `)` or the start of an operand with no operator before it.
  fn unexpected_after_expr(&self, token: &QueryToken) -> ParseError {
    if *token == QueryToken::RParen {
      return ParseError::UnmatchedParen;
    }

    let left = self
      .position
      .checked_sub(1)
      .and_then(|i| self.tokens.get(i))
      .map(ToString::to_string)
      .unwrap_or_default();

    ParseError::MissingOperator {
      left,
      right: token.to_string(),
    }
  }

  fn peek(&self) -> Option<&'a QueryToken> {
    self.tokens.get(self.position)
  }

  fn advance(&mut self) -> Option<&'a QueryToken> {
    let token = self.tokens.get(self.position);
    if token.is_some() {
      self.position += 1;
    }
    token
  }
}

fn check_height(height: usize) -> ParseResult<usize> {
  if height > MAX_QUERY_DEPTH {
    return Err(ParseError::TooDeep {
      limit: MAX_QUERY_DEPTH,
    });
  }
  Ok(height)
}
