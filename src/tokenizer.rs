//! Text tokenization utilities.

use crate::config::TokenizerConfig;
use unicode_segmentation::UnicodeSegmentation;

/// Characters that are query operators and always form a token of their own.
pub const OPERATOR_CHARS: [char; 5] = ['&', '|', '!', '(', ')'];

/// Splits documents and queries into normalized terms.
///
/// Documents and queries go through the same word normalization so that a term
/// typed in a query matches the term stored in the index.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
  config: TokenizerConfig,
}

impl Tokenizer {
  pub fn new(config: &TokenizerConfig) -> Self {
    Self {
      config: config.clone(),
    }
  }

  /// Tokenize document text into lower-cased words.
  ///
  /// Only whitespace separates words. Other punctuation is dropped from inside
  /// the word, so `e-mail` is the single term `email`.
  pub fn tokenize(&self, text: &str) -> Vec<String> {
    text
      .split_whitespace()
      .filter_map(|word| self.normalize(word))
      .collect()
  }

  /// Tokenize a query line.
  ///
  /// Whitespace separates words and every operator character becomes its own
  /// token, so `(cat&dog)` yields `(`, `cat`, `&`, `dog`, `)`.
  pub fn tokenize_query(&self, query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chunk = String::new();

    for c in query.chars() {
      if OPERATOR_CHARS.contains(&c) {
        self.flush_chunk(&mut chunk, &mut tokens);
        tokens.push(c.to_string());
      } else if c.is_whitespace() {
        self.flush_chunk(&mut chunk, &mut tokens);
      } else {
        chunk.push(c);
      }
    }
    self.flush_chunk(&mut chunk, &mut tokens);

    tokens
  }

  fn flush_chunk(&self, chunk: &mut String, tokens: &mut Vec<String>) {
    if !chunk.is_empty() {
      tokens.extend(self.normalize(chunk));
      chunk.clear();
    }
  }

  /// Keeps the alphanumeric grapheme clusters of `word`, lower-cased.
  ///
  /// Filtering by cluster keeps combining marks attached to their letter.
  fn normalize(&self, word: &str) -> Option<String> {
    let token: String = word
      .graphemes(true)
      .filter(|g| g.chars().next().is_some_and(char::is_alphanumeric))
      .flat_map(str::chars)
      .flat_map(char::to_lowercase)
      .collect();

    let len = token.chars().count();
    if len == 0 || len < self.config.min_token_len || len > self.config.max_token_len {
      return None;
    }
    Some(token)
  }
}
