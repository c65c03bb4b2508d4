//! The inverted index: postings, the term dictionary and the root `Index`.

pub mod dictionary;
pub mod memory;
pub mod posting;

pub use dictionary::TermDictionary;
pub use memory::Index;
pub use posting::Posting;
