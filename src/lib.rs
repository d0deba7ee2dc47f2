//! # entropy_keyphrase
//!
//! Unsupervised keyphrase extraction for a single document.
//!
//! Phrases are found without a lexicon by measuring the entropy of the words
//! surrounding candidate word sequences: a real phrase has diverse words on
//! both sides and a predictable inside. Candidates grow one word at a time,
//! breadth-first, while the algorithm tracks the exact positions each
//! candidate still occupies.
//!
//! ## Features
//!
//! - **Pooled**: candidate and phrase records live in resettable arenas
//! - **Unicode-aware**: UAX #29 tokenization, CJK handled per character
//! - **Parallel batches**: independent documents extracted with rayon
//! - **Optional tracing**: enable the `tracing` feature for debug spans and events

pub mod document;
pub mod errors;
pub mod nlp;
pub mod phrase;
pub mod pool;
pub mod types;

// Re-export commonly used types
pub use document::{Document, TokenizedDocument};
pub use errors::{KeyphraseError, Result};
pub use pool::{Pool, PoolId, Recycle};
pub use types::{DocumentId, ExtractorConfig, KeyPhrase, StringPool, WordId, MIN_OCCURRENCES};

// Re-export main functionality
pub use nlp::{stopwords::StopwordFilter, tokenizer::Tokenizer};
pub use phrase::adjacency::{calc_adjacent, left_adjacent, right_adjacent, Adjacent};
pub use phrase::boundary::Thresholds;
pub use phrase::candidate::{Phrase, PhraseCandidate, PhrasePool};
pub use phrase::extraction::{
    extract_batch, extract_keyphrases, extract_keyphrases_from_document,
    extract_keyphrases_with_info, ExtractionResult, ExtractionStats, PhraseExtractor,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
