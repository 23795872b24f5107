//! Natural Language Processing components
//!
//! Tokenization, single-token POS tagging, stopword lists and the text
//! cleaning pass.

pub mod clean;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;
