//! Unicode-aware tokenization
//!
//! UAX #29 word segmentation producing the flat token stream a
//! [`TokenizedDocument`](crate::document::TokenizedDocument) is built from.
//! CJK ideographs come out as single-character words, so phrases in those
//! scripts are discovered as multi-character sequences.

use unicode_segmentation::UnicodeSegmentation;

/// A Unicode-aware tokenizer following UAX #29
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_token_length: usize,
    lowercase: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a new tokenizer with default settings
    pub fn new() -> Self {
        Self {
            min_token_length: 1,
            lowercase: true,
        }
    }

    /// Set minimum token length (in characters)
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_token_length = min_length;
        self
    }

    /// Keep the original case in the normalized form
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Tokenize text into a flat sequence of normalized words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for word in text.unicode_words() {
            if word.chars().count() < self.min_token_length {
                continue;
            }

            // Skip pure punctuation/symbols
            if !word.chars().any(|c| c.is_alphanumeric()) {
                continue;
            }

            tokens.push(self.normalize(word));
        }

        tokens
    }

    fn normalize(&self, word: &str) -> String {
        if self.lowercase {
            word.to_lowercase()
        } else {
            word.to_string()
        }
    }
}
