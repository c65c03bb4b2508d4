//! Boolean query language: tokens, parser, expression tree and evaluator.

pub mod ast;
pub mod evaluator;
pub mod parser;
pub mod token;

pub use ast::QueryNode;
pub use evaluator::{Evaluator, ScoreMap, NOT_BASELINE_SCORE};
pub use parser::{parse, QueryParser, MAX_QUERY_DEPTH};
pub use token::QueryToken;
