//! Neighbour statistics for candidate phrases
//!
//! For a set of occurrence positions, collect the words immediately to the
//! left or right, then summarize the distribution as its Shannon entropy and
//! its dominant ("major") word.

use crate::document::Document;
use crate::types::WordId;
use rustc_hash::FxHashMap;

/// Guards divisions against an empty total.
pub(crate) const EPSILON: f64 = 1e-38;

/// Entropy and dominant word of a neighbour distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacent {
    /// Shannon entropy (natural log), always finite and >= 0
    pub entropy: f64,
    /// Most frequent neighbour, lowest id on ties; `None` if there were no neighbours
    pub major_word: Option<WordId>,
    /// Count of `major_word`
    pub major_word_freq: usize,
    /// Total number of neighbour observations
    pub total: usize,
}

impl Adjacent {
    /// Statistics of an empty neighbour set
    pub fn empty() -> Self {
        Self {
            entropy: 0.0,
            major_word: None,
            major_word_freq: 0,
            total: 0,
        }
    }
}

/// Summarize a neighbour-frequency map.
///
/// Entries are visited in ascending word id so that both the floating-point
/// sum and the tie-break are independent of hash iteration order.
pub fn calc_adjacent(term_freq: &FxHashMap<WordId, usize>) -> Adjacent {
    if term_freq.is_empty() {
        return Adjacent::empty();
    }

    let mut entries: Vec<(WordId, usize)> = term_freq.iter().map(|(&w, &c)| (w, c)).collect();
    entries.sort_unstable_by_key(|&(word, _)| word);

    let mut sum = 0usize;
    let mut major_word = entries[0].0;
    let mut major_word_freq = 0usize;
    for &(word, count) in &entries {
        sum += count;
        if count > major_word_freq {
            major_word_freq = count;
            major_word = word;
        }
    }

    let mut entropy = 0.0;
    for &(_, count) in &entries {
        let p = count as f64 / (EPSILON + sum as f64);
        if p > 0.0 {
            entropy -= p * p.ln();
        }
    }

    Adjacent {
        entropy: entropy.max(0.0),
        major_word: Some(major_word),
        major_word_freq,
        total: sum,
    }
}

/// Words preceding each occurrence.
///
/// `positions` hold the position of the last word of each occurrence and
/// `index_offset` is the phrase length minus one, so the word examined is the
/// one before the phrase's first word. Occurrences at the document start are
/// skipped.
pub fn left_adjacent<D: Document + ?Sized>(
    document: &D,
    positions: &[usize],
    index_offset: usize,
) -> Adjacent {
    let mut term_freq: FxHashMap<WordId, usize> = FxHashMap::default();

    for &pos in positions {
        if let Some(left) = pos.checked_sub(index_offset + 1) {
            *term_freq.entry(document.word(left)).or_insert(0) += 1;
        }
    }

    calc_adjacent(&term_freq)
}

/// Words following each occurrence. Occurrences ending the document are skipped.
pub fn right_adjacent<D: Document + ?Sized>(document: &D, positions: &[usize]) -> Adjacent {
    let mut term_freq: FxHashMap<WordId, usize> = FxHashMap::default();
    let size = document.size();

    for &pos in positions {
        if pos + 1 < size {
            *term_freq.entry(document.word(pos + 1)).or_insert(0) += 1;
        }
    }

    calc_adjacent(&term_freq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TokenizedDocument;
    use crate::nlp::stopwords::StopwordFilter;

    fn freq(pairs: &[(WordId, usize)]) -> FxHashMap<WordId, usize> {
        pairs.iter().copied().collect()
    }

    fn doc(words: &[&str]) -> TokenizedDocument {
        TokenizedDocument::from_words(words.iter().copied(), &StopwordFilter::empty())
    }

    #[test]
    fn test_single_neighbour_has_zero_entropy() {
        let adj = calc_adjacent(&freq(&[(3, 5)]));
        assert!(adj.entropy.abs() < 1e-12);
        assert_eq!(adj.major_word, Some(3));
        assert_eq!(adj.major_word_freq, 5);
        assert_eq!(adj.total, 5);
    }

    #[test]
    fn test_uniform_entropy() {
        let adj = calc_adjacent(&freq(&[(0, 2), (1, 2), (2, 2), (3, 2)]));
        assert!((adj.entropy - 4f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_skewed_entropy() {
        let adj = calc_adjacent(&freq(&[(7, 3), (9, 1)]));
        let expected = -(0.75f64 * 0.75f64.ln() + 0.25f64 * 0.25f64.ln());
        assert!((adj.entropy - expected).abs() < 1e-9);
        assert_eq!(adj.major_word, Some(7));
    }

    #[test]
    fn test_tie_break_lowest_word_id() {
        let adj = calc_adjacent(&freq(&[(9, 2), (4, 2), (6, 1)]));
        assert_eq!(adj.major_word, Some(4));
        assert_eq!(adj.major_word_freq, 2);
    }

    #[test]
    fn test_empty_map() {
        let adj = calc_adjacent(&FxHashMap::default());
        assert_eq!(adj, Adjacent::empty());
        assert!(adj.entropy.is_finite());
    }

    #[test]
    fn test_left_adjacent_offsets() {
        // x a b | y a b | a b
        let d = doc(&["x", "a", "b", "y", "a", "b", "a", "b"]);
        let b = d.lookup("b").unwrap();
        let positions = d.word_index(b).to_vec();

        // predecessor of "b" alone is always "a"
        let adj = left_adjacent(&d, &positions, 0);
        assert_eq!(adj.major_word, d.lookup("a"));
        assert!(adj.entropy.abs() < 1e-12);

        // predecessor of "a b" is x, y, b
        let adj = left_adjacent(&d, &positions, 1);
        assert_eq!(adj.total, 3);
        assert!((adj.entropy - 3f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_left_adjacent_skips_document_start() {
        let d = doc(&["a", "b", "c", "a", "b"]);
        let adj = left_adjacent(&d, &[1, 4], 1);
        assert_eq!(adj.total, 1);
        assert_eq!(adj.major_word, d.lookup("c"));

        let adj = left_adjacent(&d, &[0], 0);
        assert_eq!(adj, Adjacent::empty());
    }

    #[test]
    fn test_right_adjacent_skips_document_end() {
        let d = doc(&["a", "b", "a", "c", "a"]);
        let a = d.lookup("a").unwrap();
        let adj = right_adjacent(&d, d.word_index(a));
        assert_eq!(adj.total, 2);
        assert!((adj.entropy - 2f64.ln()).abs() < 1e-9);
        // b and c tie; b was interned first
        assert_eq!(adj.major_word, d.lookup("b"));
    }
}
