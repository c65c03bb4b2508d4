//! Per-term posting: which documents contain a term, and how often.

use crate::types::DocName;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Document → occurrence count for one term.
///
/// The key set doubles as the term's document set for boolean algebra, while
/// the counts feed scoring. Counts are always at least 1: an entry is only
/// created when an occurrence is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Posting {
  entries: BTreeMap<DocName, u32>,
}

impl Posting {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records `count` more occurrences of the term in `doc`.
  ///
  /// A zero count is ignored so no zero-frequency entry is ever stored.
  pub fn add(&mut self, doc: &DocName, count: u32) {
    if count == 0 {
      return;
    }
    *self.entries.entry(doc.clone()).or_insert(0) += count;
  }

  /// Occurrences of the term in `doc`, if the document contains it.
  pub fn frequency(&self, doc: &str) -> Option<u32> {
    self.entries.get(doc).copied()
  }

  /// Number of documents containing the term.
  pub fn doc_freq(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Documents in name order, with their frequencies.
  pub fn iter(&self) -> PostingIter<'_> {
    PostingIter {
      inner: self.entries.iter(),
    }
  }

  /// Documents in name order.
  pub fn documents(&self) -> impl Iterator<Item = &DocName> {
    self.entries.keys()
  }
}

/// Iterator over `(document, frequency)` pairs of a [`Posting`].
pub struct PostingIter<'a> {
  inner: btree_map::Iter<'a, DocName, u32>,
}

impl<'a> Iterator for PostingIter<'a> {
  type Item = (&'a DocName, u32);

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(doc, count)| (doc, *count))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<'a> IntoIterator for &'a Posting {
  type Item = (&'a DocName, u32);
  type IntoIter = PostingIter<'a>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  #[test]
  fn test_add_accumulates() {
    let doc: DocName = Arc::from("doc1");
    let mut posting = Posting::new();
    posting.add(&doc, 1);
    posting.add(&doc, 2);

    assert_eq!(posting.frequency("doc1"), Some(3));
    assert_eq!(posting.doc_freq(), 1);
  }

  #[test]
  fn test_zero_count_is_never_stored() {
    let doc: DocName = Arc::from("doc1");
    let mut posting = Posting::new();
    posting.add(&doc, 0);

    assert!(posting.is_empty());
    assert_eq!(posting.frequency("doc1"), None);
  }

  #[test]
  fn test_iter_is_name_ordered() {
    let mut posting = Posting::new();
    posting.add(&Arc::from("b"), 1);
    posting.add(&Arc::from("a"), 4);

    let pairs: Vec<(&str, u32)> = posting.iter().map(|(d, c)| (&**d, c)).collect();
    assert_eq!(pairs, vec![("a", 4), ("b", 1)]);
  }
}
