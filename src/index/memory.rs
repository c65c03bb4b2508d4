//! In-memory inverted index.

use crate::error::{IndexError, Result};
use crate::index::dictionary::TermDictionary;
use crate::index::posting::Posting;
use crate::query::{self, Evaluator};
use crate::scoring::ScoringMethod;
use crate::types::{DocName, IndexStats, QueryResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// In-memory inverted index over a set of named documents.
///
/// The index only ever grows: documents are added with
/// [`index_document`](Index::index_document) and never removed. Build it
/// first, then query it; queries take `&self` so a fully built index can be
/// shared for reading.
#[derive(Debug, Default)]
pub struct Index {
    terms: TermDictionary,
    /// Known documents, each with the number of tokens ingested for it.
    documents: BTreeMap<DocName, usize>,
    doc_count: usize,
    term_count: usize,
    total_tokens: usize,
    scoring: ScoringMethod,
}

impl Index {
    /// Create a new empty index scoring by term frequency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty index with the given scoring method.
    pub fn with_scoring(scoring: ScoringMethod) -> Self {
        Self {
            scoring,
            ..Self::default()
        }
    }

    /// Index a document and its terms.
    ///
    /// The name and the term list are consumed whatever the outcome. Indexing
    /// a name that is already known adds its terms to the existing postings
    /// without counting a second document.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidDocument`] for an empty name. The index is
    /// left untouched in that case.
    pub fn index_document(&mut self, doc_name: impl Into<String>, terms: Vec<String>) -> Result<()> {
        let doc_name = doc_name.into();
        if doc_name.is_empty() {
            return Err(IndexError::InvalidDocument(
                "document name cannot be empty".to_string(),
            ));
        }

        let name = self.intern_document(doc_name);

        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in terms.into_iter().filter(|t| !t.is_empty()) {
            *counts.entry(term).or_insert(0) += 1;
        }

        let n_tokens: usize = counts.values().map(|c| *c as usize).sum();
        let n_unique = counts.len();

        for (term, count) in counts {
            if self.terms.add(term, &name, count) {
                self.term_count += 1;
            }
        }

        if let Some(len) = self.documents.get_mut(&name) {
            *len += n_tokens;
        }
        self.total_tokens += n_tokens;

        debug!(
            doc = %name,
            tokens = n_tokens,
            unique = n_unique,
            "indexed document"
        );

        Ok(())
    }

    /// Search the index for documents matching a boolean query.
    ///
    /// `query_tokens` is the query already split into terms and the operator
    /// tokens `&`, `|`, `!`, `(` and `)`. The slice is only read.
    ///
    /// Returns the matching documents ranked by score (descending, ties by
    /// name). An empty list means the query was valid but matched nothing.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Query`] when the query is malformed; its message
    /// names the offending token.
    pub fn index_query<S: AsRef<str>>(&self, query_tokens: &[S]) -> Result<Vec<QueryResult>> {
        let tree = query::parse(query_tokens)?;
        debug!(query = %tree, "evaluating query");

        let results = Evaluator::new(self).evaluate(&tree);
        debug!(hits = results.len(), "query finished");
        Ok(results)
    }

    /// Number of distinct documents and distinct terms indexed so far.
    pub fn index_stat(&self) -> IndexStats {
        IndexStats {
            documents: self.doc_count,
            terms: self.term_count,
        }
    }

    pub fn posting(&self, term: &str) -> Option<&Posting> {
        self.terms.posting(term)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn contains_document(&self, doc_name: &str) -> bool {
        self.documents.contains_key(doc_name)
    }

    /// All known documents in name order.
    pub fn documents(&self) -> impl Iterator<Item = &DocName> {
        self.documents.keys()
    }

    /// All indexed terms, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.terms()
    }

    /// Tokens ingested for a document, or 0 if it is unknown.
    pub fn doc_len(&self, doc_name: &str) -> usize {
        self.documents.get(doc_name).copied().unwrap_or(0)
    }

    pub fn avg_doc_len(&self) -> f64 {
        if self.doc_count == 0 {
            return 0.0;
        }
        self.total_tokens as f64 / self.doc_count as f64
    }

    pub fn scoring(&self) -> ScoringMethod {
        self.scoring
    }

    /// Indexed terms that look like `term`, best match first.
    #[cfg(feature = "fuzzy")]
    pub fn suggest(&self, term: &str, limit: usize) -> Vec<String> {
        crate::suggest::suggest_terms(term, self.terms(), limit)
    }

    /// Returns the shared name for `doc_name`, registering it if it is new.
    fn intern_document(&mut self, doc_name: String) -> DocName {
        if let Some((name, _)) = self.documents.get_key_value(doc_name.as_str()) {
            return name.clone();
        }

        let name: DocName = Arc::from(doc_name);
        self.documents.insert(name.clone(), 0);
        self.doc_count += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    fn names(results: &[QueryResult]) -> Vec<&str> {
        results.iter().map(|r| &*r.doc_name).collect()
    }

    fn pets() -> Index {
        let mut index = Index::new();
        index.index_document("doc1", words(&["cat", "dog"])).unwrap();
        index
            .index_document("doc2", words(&["dog", "dog", "bird"]))
            .unwrap();
        index
    }

    #[test]
    fn test_stat_counts_documents_and_terms() {
        let index = pets();
        assert_eq!(
            index.index_stat(),
            IndexStats {
                documents: 2,
                terms: 3
            }
        );
    }

    #[test]
    fn test_frequency_ranking() {
        let index = pets();
        let results = index.index_query(&["dog"]).unwrap();

        assert_eq!(names(&results), vec!["doc2", "doc1"]);
        assert_eq!(results[0].score, 2.0);
        assert_eq!(results[1].score, 1.0);
    }

    #[test]
    fn test_duplicate_name_accumulates_without_new_document() {
        let mut index = pets();
        index.index_document("doc1", words(&["dog", "fish"])).unwrap();

        let stats = index.index_stat();
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.terms, 4);
        assert_eq!(index.posting("dog").unwrap().frequency("doc1"), Some(2));
        assert_eq!(index.doc_len("doc1"), 4);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut index = Index::new();
        let err = index.index_document("", words(&["cat"])).unwrap_err();

        assert!(matches!(err, IndexError::InvalidDocument(_)));
        assert_eq!(index.index_stat(), IndexStats::default());
    }

    #[test]
    fn test_document_without_terms_is_known() {
        let mut index = pets();
        index.index_document("empty", Vec::new()).unwrap();

        assert!(index.contains_document("empty"));
        assert_eq!(index.index_stat().documents, 3);

        let results = index.index_query(&["!", "dog"]).unwrap();
        assert_eq!(names(&results), vec!["empty"]);
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn test_malformed_query_is_an_error() {
        let index = pets();
        let err = index.index_query(&["dog", "&"]).unwrap_err();
        assert!(err.is_query_error());
        assert_eq!(err.to_string(), "expected term after '&', found end of query");
    }

    #[test]
    fn test_avg_doc_len() {
        let index = pets();
        assert_eq!(index.avg_doc_len(), 2.5);
        assert_eq!(Index::new().avg_doc_len(), 0.0);
    }

    #[cfg(feature = "fuzzy")]
    #[test]
    fn test_suggest_close_terms() {
        let index = pets();
        assert_eq!(index.suggest("dogs", 3), vec!["dog".to_string()]);
    }
}
