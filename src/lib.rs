//! Inverdex - an in-memory inverted index with a boolean query language.
//!
//! Documents are ingested as a name plus a list of terms. Queries combine
//! terms with `&` (and), `|` (or), `!` (not) and parentheses, and return the
//! matching documents ranked by score.
//!
//! ```rust
//! use inverdex::prelude::*;
//!
//! let mut index = Index::new();
//! index.index_document("doc1", vec!["cat".into(), "dog".into()]).unwrap();
//! index.index_document("doc2", vec!["dog".into(), "dog".into(), "bird".into()]).unwrap();
//!
//! let results = index.index_query(&["dog", "&", "!", "cat"]).unwrap();
//! assert_eq!(&*results[0].doc_name, "doc2");
//! assert_eq!(results[0].score, 2.0);
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod query;
pub mod repl;
pub mod scoring;
#[cfg(feature = "fuzzy")]
pub mod suggest;
pub mod tokenizer;
pub mod types;

pub use config::{SearchConfig, TokenizerConfig};
pub use error::{IndexError, ParseError, Result};
pub use index::Index;
pub use scoring::ScoringMethod;
pub use types::{DocName, IndexStats, QueryResult};

pub mod prelude {
    //! Convenient re-exports for common types.

    pub use crate::config::*;
    pub use crate::error::{IndexError, ParseError};
    pub use crate::index::*;
    pub use crate::query::{QueryNode, QueryToken};
    pub use crate::scoring::*;
    pub use crate::tokenizer::*;
    pub use crate::types::*;
}
