//! Pooled candidate and phrase records

use crate::document::Document;
use crate::pool::{Pool, Recycle};
use crate::types::{DocumentId, WordId};

/// A partially grown phrase and the exact places it still occurs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseCandidate {
    /// The words grown so far
    pub words: Vec<WordId>,
    /// Ascending positions of the LAST word of every occurrence
    pub index: Vec<usize>,
}

impl PhraseCandidate {
    /// Start positions of the occurrences
    pub fn starts(&self) -> impl Iterator<Item = usize> + '_ {
        let offset = self.words.len().saturating_sub(1);
        self.index.iter().map(move |&p| p - offset)
    }

    pub fn render<D: Document + ?Sized>(&self, document: &D, separator: &str) -> String {
        render_words(&self.words, document, separator)
    }
}

impl Recycle for PhraseCandidate {
    fn recycle(&mut self) {
        self.words.clear();
        self.index.clear();
    }
}

/// A finalized phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub words: Vec<WordId>,
    /// The document this phrase was found in (non-owning)
    pub document: DocumentId,
    /// Occurrence count normalized by document length
    pub tf: f64,
    /// Start positions of the occurrences, ascending
    pub occurrences: Vec<usize>,
}

impl Default for Phrase {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            document: DocumentId(0),
            tf: 0.0,
            occurrences: Vec::new(),
        }
    }
}

impl Recycle for Phrase {
    fn recycle(&mut self) {
        self.words.clear();
        self.occurrences.clear();
        self.document = DocumentId(0);
        self.tf = 0.0;
    }
}

impl Phrase {
    /// Raw occurrence count
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Join the word strings of this phrase.
    ///
    /// `document` must be the one the phrase was extracted from.
    pub fn text<D: Document + ?Sized>(&self, document: &D, separator: &str) -> String {
        debug_assert_eq!(self.document, document.id());
        render_words(&self.words, document, separator)
    }

    /// Token offsets `(start, end)` of each occurrence, end exclusive
    pub fn offsets(&self) -> Vec<(usize, usize)> {
        self.occurrences
            .iter()
            .map(|&start| (start, start + self.words.len()))
            .collect()
    }
}

/// Arena of finalized phrases handed to [`PhraseExtractor::extract`](super::extraction::PhraseExtractor::extract).
pub type PhrasePool = Pool<Phrase>;

/// Arena of candidates owned by the extractor.
pub type CandidatePool = Pool<PhraseCandidate>;

fn render_words<D: Document + ?Sized>(words: &[WordId], document: &D, separator: &str) -> String {
    words
        .iter()
        .map(|&w| document.word_str(w))
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TokenizedDocument;
    use crate::nlp::stopwords::StopwordFilter;

    #[test]
    fn test_candidate_starts() {
        let candidate = PhraseCandidate {
            words: vec![0, 1, 2],
            index: vec![4, 9],
        };
        assert_eq!(candidate.starts().collect::<Vec<_>>(), vec![2, 7]);
    }

    #[test]
    fn test_recycle_keeps_capacity() {
        let mut candidate = PhraseCandidate {
            words: vec![1, 2],
            index: vec![3, 4, 5],
        };
        candidate.recycle();
        assert_eq!(candidate, PhraseCandidate::default());
        assert!(candidate.index.capacity() >= 3);
    }

    #[test]
    fn test_phrase_text_and_offsets() {
        let d = TokenizedDocument::from_words(
            ["neural", "network", "x", "neural", "network"],
            &StopwordFilter::empty(),
        );
        let phrase = Phrase {
            words: vec![d.lookup("neural").unwrap(), d.lookup("network").unwrap()],
            document: d.id(),
            tf: 0.4,
            occurrences: vec![0, 3],
        };
        assert_eq!(phrase.text(&d, " "), "neural network");
        assert_eq!(phrase.text(&d, ""), "neuralnetwork");
        assert_eq!(phrase.offsets(), vec![(0, 2), (3, 5)]);
        assert_eq!(phrase.count(), 2);
        assert_eq!(phrase.len(), 2);
    }
}
