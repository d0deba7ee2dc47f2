//! Natural Language Processing components
//!
//! Tokenization and stopword classification feeding the document view.

pub mod stopwords;
pub mod tokenizer;
