//! Read-only document view
//!
//! The extractor only talks to a document through the [`Document`] trait:
//! word ids by position, an inverted index, frequencies, stopword flags and
//! interned strings. [`TokenizedDocument`] is the in-crate implementation
//! built from text or pre-split words.

use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::types::{DocumentId, StringPool, WordId};
use std::sync::atomic::{AtomicU64, Ordering};

/// Read access to a tokenized document.
///
/// Word ids are dense in `0..vocab_size()`; positions are dense in
/// `0..size()`. `word_index(w)` must list, in ascending order, exactly the
/// positions `p` with `word(p) == w`. The document must not change while an
/// extraction over it is running.
pub trait Document {
    /// Total token count
    fn size(&self) -> usize;

    /// Word id at position `pos`
    fn word(&self, pos: usize) -> WordId;

    /// Ascending positions holding `word`
    fn word_index(&self, word: WordId) -> &[usize];

    /// Raw frequency of `word`
    fn tf(&self, word: WordId) -> usize {
        self.word_index(word).len()
    }

    fn is_stopword(&self, word: WordId) -> bool;

    /// Display string of `word`
    fn word_str(&self, word: WordId) -> &str;

    /// Number of distinct word ids
    fn vocab_size(&self) -> usize;

    /// Handle identifying this document instance
    fn id(&self) -> DocumentId;
}

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(0);

fn next_document_id() -> DocumentId {
    DocumentId(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
}

/// A document backed by an interned word sequence and an inverted index.
///
/// Every instance has its own [`DocumentId`]; a clone is a new document and
/// gets a fresh id.
#[derive(Debug)]
pub struct TokenizedDocument {
    id: DocumentId,
    words: Vec<WordId>,
    strings: StringPool,
    index: Vec<Vec<usize>>,
    stopword: Vec<bool>,
}

impl Clone for TokenizedDocument {
    fn clone(&self) -> Self {
        Self {
            id: next_document_id(),
            words: self.words.clone(),
            strings: self.strings.clone(),
            index: self.index.clone(),
            stopword: self.stopword.clone(),
        }
    }
}

impl TokenizedDocument {
    /// Tokenize `text` and build the document.
    pub fn from_text(text: &str, tokenizer: &Tokenizer, stopwords: &StopwordFilter) -> Self {
        Self::from_words(tokenizer.tokenize(text), stopwords)
    }

    /// Build from an already segmented word sequence.
    pub fn from_words<I, S>(words: I, stopwords: &StopwordFilter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut strings = StringPool::new();
        let mut sequence = Vec::new();
        let mut index: Vec<Vec<usize>> = Vec::new();
        let mut stopword = Vec::new();

        for (pos, word) in words.into_iter().enumerate() {
            let word = word.as_ref();
            let id = strings.intern(word);
            if id as usize == index.len() {
                index.push(Vec::new());
                stopword.push(stopwords.is_stopword(word));
            }
            index[id as usize].push(pos);
            sequence.push(id);
        }

        let document = Self {
            id: next_document_id(),
            words: sequence,
            strings,
            index,
            stopword,
        };
        debug_assert!(document.is_consistent());
        document
    }

    /// The word id sequence
    pub fn words(&self) -> &[WordId] {
        &self.words
    }

    /// Id of an interned word, if it occurs in the document
    pub fn lookup(&self, word: &str) -> Option<WordId> {
        self.strings.lookup(word)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check that the inverted index agrees with the word sequence.
    pub fn is_consistent(&self) -> bool {
        if self.index.len() != self.strings.len() || self.stopword.len() != self.strings.len() {
            return false;
        }
        let indexed: usize = self.index.iter().map(Vec::len).sum();
        indexed == self.words.len()
            && self.index.iter().enumerate().all(|(id, positions)| {
                positions.windows(2).all(|w| w[0] < w[1])
                    && positions
                        .iter()
                        .all(|&p| self.words.get(p) == Some(&(id as WordId)))
            })
    }
}

impl Document for TokenizedDocument {
    fn size(&self) -> usize {
        self.words.len()
    }

    fn word(&self, pos: usize) -> WordId {
        self.words[pos]
    }

    fn word_index(&self, word: WordId) -> &[usize] {
        self.index
            .get(word as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn is_stopword(&self, word: WordId) -> bool {
        self.stopword.get(word as usize).copied().unwrap_or(false)
    }

    fn word_str(&self, word: WordId) -> &str {
        self.strings.get(word).unwrap_or("")
    }

    fn vocab_size(&self) -> usize {
        self.strings.len()
    }

    fn id(&self) -> DocumentId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[&str]) -> TokenizedDocument {
        TokenizedDocument::from_words(words.iter().copied(), &StopwordFilter::from_list(&["the"]))
    }

    #[test]
    fn test_inverted_index() {
        let d = doc(&["a", "b", "a", "the", "a"]);
        let a = d.lookup("a").unwrap();
        let b = d.lookup("b").unwrap();

        assert_eq!(d.size(), 5);
        assert_eq!(d.vocab_size(), 3);
        assert_eq!(d.word_index(a), &[0, 2, 4]);
        assert_eq!(d.word_index(b), &[1]);
        assert_eq!(d.tf(a), 3);
        assert_eq!(d.word(3), d.lookup("the").unwrap());
        assert_eq!(d.word_str(b), "b");
        assert!(d.is_consistent());
    }

    #[test]
    fn test_stopword_flags() {
        let d = doc(&["the", "cat", "the"]);
        assert!(d.is_stopword(d.lookup("the").unwrap()));
        assert!(!d.is_stopword(d.lookup("cat").unwrap()));
    }

    #[test]
    fn test_word_ids_follow_first_occurrence() {
        let d = doc(&["z", "y", "z", "x"]);
        assert_eq!(d.words(), &[0, 1, 0, 2]);
    }

    #[test]
    fn test_unknown_word_id() {
        let d = doc(&["a"]);
        assert!(d.word_index(42).is_empty());
        assert_eq!(d.tf(42), 0);
        assert_eq!(d.word_str(42), "");
    }

    #[test]
    fn test_empty_document() {
        let d = doc(&[]);
        assert!(d.is_empty());
        assert_eq!(d.size(), 0);
        assert_eq!(d.vocab_size(), 0);
    }

    #[test]
    fn test_from_text() {
        let d = TokenizedDocument::from_text(
            "Data flow. DATA flow!",
            &Tokenizer::new(),
            &StopwordFilter::empty(),
        );
        assert_eq!(d.size(), 4);
        assert_eq!(d.tf(d.lookup("data").unwrap()), 2);
    }

    #[test]
    fn test_distinct_ids() {
        assert_ne!(doc(&["a"]).id(), doc(&["a"]).id());
    }

    #[test]
    fn test_clone_gets_fresh_id() {
        let original = doc(&["a", "b", "a"]);
        let copy = original.clone();

        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.words(), original.words());
        assert_eq!(copy.word_index(0), original.word_index(0));
        assert!(copy.is_consistent());
    }
}
