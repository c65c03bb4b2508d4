//! Term dictionary: each unique term mapped to its posting.

use super::posting::Posting;
use crate::types::DocName;
use std::collections::HashMap;

/// Maps every indexed term to its [`Posting`].
///
/// Terms are opaque keys here; normalization is the tokenizer's job.
#[derive(Debug, Default)]
pub struct TermDictionary {
  terms: HashMap<String, Posting>,
}

impl TermDictionary {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records `count` occurrences of `term` in `doc`.
  ///
  /// Returns `true` when the term was not in the dictionary before.
  pub fn add(&mut self, term: String, doc: &DocName, count: u32) -> bool {
    let mut created = false;
    let posting = self.terms.entry(term).or_insert_with(|| {
      created = true;
      Posting::new()
    });
    posting.add(doc, count);
    created
  }

  pub fn posting(&self, term: &str) -> Option<&Posting> {
    self.terms.get(term)
  }

  pub fn contains(&self, term: &str) -> bool {
    self.terms.contains_key(term)
  }

  pub fn len(&self) -> usize {
    self.terms.len()
  }

  pub fn is_empty(&self) -> bool {
    self.terms.is_empty()
  }

  /// All indexed terms, in no particular order.
  pub fn terms(&self) -> impl Iterator<Item = &str> {
    self.terms.keys().map(String::as_str)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  #[test]
  fn test_add_reports_new_terms_once() {
    let doc1: DocName = Arc::from("doc1");
    let doc2: DocName = Arc::from("doc2");
    let mut dict = TermDictionary::new();

    assert!(dict.add("dog".to_string(), &doc1, 1));
    assert!(!dict.add("dog".to_string(), &doc2, 2));
    assert!(dict.add("cat".to_string(), &doc1, 1));

    assert_eq!(dict.len(), 2);
    let posting = dict.posting("dog").unwrap();
    assert_eq!(posting.doc_freq(), 2);
    assert_eq!(posting.frequency("doc2"), Some(2));
  }

  #[test]
  fn test_unknown_term() {
    let dict = TermDictionary::new();
    assert!(dict.posting("nope").is_none());
    assert!(!dict.contains("nope"));
    assert!(dict.is_empty());
  }
}
