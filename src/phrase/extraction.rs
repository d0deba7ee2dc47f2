//! Entropy-boundary phrase extraction
//!
//! Phrases are grown breadth-first by length. Every non-stopword that occurs
//! more than once and has a diverse left context seeds a one-word candidate.
//! Each round then looks at the words following every candidate: a
//! predictable, frequent follower extends the candidate by one word, and a
//! candidate whose left and right contexts are both diverse is emitted as a
//! phrase. Extension only keeps occurrences that continue with the appended
//! word, so occurrence lists never grow and the frontier eventually empties.

use super::adjacency::{left_adjacent, right_adjacent, Adjacent, EPSILON};
use super::boundary::Thresholds;
use super::candidate::{CandidatePool, PhraseCandidate, PhrasePool};
use crate::document::{Document, TokenizedDocument};
use crate::errors::Result;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::pool::PoolId;
use crate::types::{ExtractorConfig, KeyPhrase, WordId, MIN_OCCURRENCES};
use rayon::prelude::*;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span (when the `tracing` feature is enabled).
macro_rules! trace_span {
    ($name:expr, $($fields:tt)*) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!($name, $($fields)*).entered();
    };
}

/// Emit a debug event (when the `tracing` feature is enabled).
macro_rules! trace_debug {
    ($($args:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($args)*);
    };
}

/// Counters describing one extraction run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Candidates in the initial frontier
    pub seeds: usize,
    /// Growth rounds executed (one per phrase length)
    pub iterations: usize,
    /// Candidates allocated in total, seeds included
    pub candidates: usize,
    /// Phrases emitted
    pub phrases: usize,
}

/// Breadth-first phrase extractor.
///
/// Owns the candidate pool and both frontiers; they are reset at the start of
/// every [`extract`](Self::extract) call, so one extractor can be reused for
/// any number of documents.
#[derive(Debug)]
pub struct PhraseExtractor {
    config: ExtractorConfig,
    thresholds: Thresholds,
    candidate_pool: CandidatePool,
    from_set: Vec<PoolId>,
    to_set: Vec<PoolId>,
}

impl Default for PhraseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseExtractor {
    /// Create a new phrase extractor with default config
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    /// Create with custom config.
    ///
    /// The config is not validated; see [`try_with_config`](Self::try_with_config).
    /// Phrases occurring fewer than [`MIN_OCCURRENCES`] times are never emitted.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            thresholds: Thresholds::from_config(&config),
            config,
            candidate_pool: CandidatePool::new(),
            from_set: Vec::new(),
            to_set: Vec::new(),
        }
    }

    /// Create with custom config, rejecting invalid settings
    pub fn try_with_config(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Every candidate allocated by the last [`extract`](Self::extract) call,
    /// in allocation order.
    pub fn candidates(&self) -> impl Iterator<Item = &PhraseCandidate> {
        self.candidate_pool.iter()
    }

    /// Extract phrases from `document`.
    ///
    /// `phrase_pool` is reset first, which invalidates every handle from an
    /// earlier call; `phrases` is cleared and receives handles to the new
    /// phrases in discovery order.
    pub fn extract<D: Document + ?Sized>(
        &mut self,
        document: &D,
        phrase_pool: &mut PhrasePool,
        phrases: &mut Vec<PoolId>,
    ) -> ExtractionStats {
        trace_span!("extract", size = document.size());

        self.candidate_pool.release_all();
        phrase_pool.release_all();
        self.from_set.clear();
        self.to_set.clear();
        phrases.clear();

        let mut stats = ExtractionStats::default();

        self.phrase_begin_set(document);
        stats.seeds = self.from_set.len();
        trace_debug!(seeds = stats.seeds, "begin set built");

        while !self.from_set.is_empty() {
            self.do_iteration(document, phrase_pool, phrases);
            stats.iterations += 1;
            std::mem::swap(&mut self.from_set, &mut self.to_set);
            self.to_set.clear();
        }

        stats.candidates = self.candidate_pool.len();
        stats.phrases = phrases.len();
        debug_assert!(stats.iterations <= document.size());
        trace_debug!(
            iterations = stats.iterations,
            candidates = stats.candidates,
            phrases = stats.phrases,
            "extraction finished"
        );
        stats
    }

    /// Extract and render ranked keyphrases (tf descending, `top_n` applied).
    pub fn extract_ranked<D: Document + ?Sized>(&mut self, document: &D) -> ExtractionResult {
        let mut pool = PhrasePool::new();
        let mut ids = Vec::new();
        let stats = self.extract(document, &mut pool, &mut ids);

        let keyphrases = ids
            .iter()
            .filter_map(|&id| pool.get(id))
            .map(|phrase| KeyPhrase {
                text: phrase.text(document, &self.config.separator),
                words: phrase
                    .words
                    .iter()
                    .map(|&w| document.word_str(w).to_string())
                    .collect(),
                count: phrase.count(),
                tf: phrase.tf,
                offsets: phrase.offsets(),
                rank: 0,
            })
            .collect();

        ExtractionResult {
            phrases: rank_keyphrases(keyphrases, self.config.top_n),
            stats,
        }
    }

    /// Build the initial frontier: frequent non-stopwords with a diverse left context.
    fn phrase_begin_set<D: Document + ?Sized>(&mut self, document: &D) {
        for word in 0..document.vocab_size() {
            let word = word as WordId;
            if document.tf(word) < self.config.min_seed_freq || document.is_stopword(word) {
                continue;
            }

            let index = document.word_index(word);
            let adjacent = left_adjacent(document, index, 0);
            trace_debug!(
                word = document.word_str(word),
                major = ?adjacent.major_word.map(|w| document.word_str(w)),
                entropy = adjacent.entropy,
                "seed left adjacency"
            );

            if self.thresholds.is_boundary(&adjacent) {
                let (id, candidate) = self.candidate_pool.alloc();
                candidate.words.push(word);
                candidate.index.extend_from_slice(index);
                self.from_set.push(id);
            }
        }
    }

    /// Consume the current frontier, emitting phrases and filling the next one.
    fn do_iteration<D: Document + ?Sized>(
        &mut self,
        document: &D,
        phrase_pool: &mut PhrasePool,
        phrases: &mut Vec<PoolId>,
    ) {
        while let Some(from_id) = self.from_set.pop() {
            let Some(from) = self.candidate_pool.get(from_id) else {
                debug_assert!(false, "stale candidate in frontier");
                continue;
            };

            let right = right_adjacent(document, &from.index);
            trace_debug!(
                candidate = %from.render(document, " "),
                major = ?right.major_word.map(|w| document.word_str(w)),
                entropy = right.entropy,
                "right adjacency"
            );

            let extension = right
                .major_word
                .filter(|&word| self.should_extend(document, from, word, &right));

            if self.should_emit(document, from, &right) {
                let (phrase_id, phrase) = phrase_pool.alloc();
                phrase.document = document.id();
                phrase.words.extend_from_slice(&from.words);
                phrase.occurrences.extend(from.starts());
                phrase.tf = from.index.len() as f64 / (EPSILON + document.size() as f64);
                phrases.push(phrase_id);
                trace_debug!(phrase = %from.render(document, " "), tf = phrase.tf, "phrase added");
            }

            if let Some(word) = extension {
                if let Some(to_id) = self.extend(document, from_id, word) {
                    self.to_set.push(to_id);
                }
            }
        }
    }

    fn should_extend<D: Document + ?Sized>(
        &self,
        document: &D,
        from: &PhraseCandidate,
        word: WordId,
        right: &Adjacent,
    ) -> bool {
        let below_cap = self
            .config
            .max_phrase_length
            .map_or(true, |max| from.words.len() < max);

        below_cap
            && !document.is_stopword(word)
            && document.tf(word) >= self.config.min_extension_freq
            && self.thresholds.is_phrase(right)
    }

    /// Both edges of the candidate must be diverse and it must recur.
    fn should_emit<D: Document + ?Sized>(
        &self,
        document: &D,
        from: &PhraseCandidate,
        right: &Adjacent,
    ) -> bool {
        // unvalidated configs cannot lower the floor
        if from.index.len() < self.config.min_occurrences.max(MIN_OCCURRENCES) {
            return false;
        }
        if self.config.require_right_boundary && !self.thresholds.is_boundary(right) {
            return false;
        }

        let left = left_adjacent(document, &from.index, from.words.len() - 1);
        self.thresholds.is_boundary(&left)
    }

    /// Allocate `from + [word]`, keeping the occurrences that continue with `word`.
    fn extend<D: Document + ?Sized>(
        &mut self,
        document: &D,
        from_id: PoolId,
        word: WordId,
    ) -> Option<PoolId> {
        let size = document.size();
        let (from, to_id, to) = self.candidate_pool.alloc_derived(from_id)?;

        to.words.extend_from_slice(&from.words);
        to.words.push(word);
        to.index.extend(
            from.index
                .iter()
                .map(|&p| p + 1)
                .filter(|&next| next < size && document.word(next) == word),
        );

        debug_assert!(!to.index.is_empty());
        debug_assert!(to.index.len() <= from.index.len());
        Some(to_id)
    }
}

/// Ranked keyphrases together with run counters
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub phrases: Vec<KeyPhrase>,
    pub stats: ExtractionStats,
}

/// Sort by [`KeyPhrase::stable_cmp`], assign 1-based ranks, keep `top_n` (0 = all).
pub fn rank_keyphrases(mut phrases: Vec<KeyPhrase>, top_n: usize) -> Vec<KeyPhrase> {
    phrases.sort_by(|a, b| a.stable_cmp(b));

    for (i, phrase) in phrases.iter_mut().enumerate() {
        phrase.rank = i + 1;
    }

    if top_n > 0 && phrases.len() > top_n {
        phrases.truncate(top_n);
    }

    phrases
}

/// Tokenize `text` with the configured tokenizer and stopword list.
pub fn build_document(text: &str, config: &ExtractorConfig) -> TokenizedDocument {
    let tokenizer = Tokenizer::new().with_min_length(config.min_token_length);
    let mut stopwords = StopwordFilter::new(&config.language);
    stopwords.add_stopwords(config.stopwords.as_slice());
    TokenizedDocument::from_text(text, &tokenizer, &stopwords)
}

/// Extract ranked keyphrases from raw text
pub fn extract_keyphrases(text: &str, config: &ExtractorConfig) -> Result<Vec<KeyPhrase>> {
    Ok(extract_keyphrases_with_info(text, config)?.phrases)
}

/// Extract ranked keyphrases from raw text, with run counters
pub fn extract_keyphrases_with_info(
    text: &str,
    config: &ExtractorConfig,
) -> Result<ExtractionResult> {
    let mut extractor = PhraseExtractor::try_with_config(config.clone())?;
    let document = build_document(text, config);
    Ok(extractor.extract_ranked(&document))
}

/// Extract ranked keyphrases from an existing document view
pub fn extract_keyphrases_from_document<D: Document + ?Sized>(
    document: &D,
    config: &ExtractorConfig,
) -> Result<Vec<KeyPhrase>> {
    let mut extractor = PhraseExtractor::try_with_config(config.clone())?;
    Ok(extractor.extract_ranked(document).phrases)
}

/// Extract keyphrases from many texts in parallel.
///
/// Each text gets its own document, extractor and pools; results keep the
/// input order.
pub fn extract_batch<S: AsRef<str> + Sync>(
    texts: &[S],
    config: &ExtractorConfig,
) -> Result<Vec<Vec<KeyPhrase>>> {
    config.validate()?;

    Ok(texts
        .par_iter()
        .map_init(
            || PhraseExtractor::with_config(config.clone()),
            |extractor, text| {
                let document = build_document(text.as_ref(), config);
                extractor.extract_ranked(&document).phrases
            },
        )
        .collect())
}
