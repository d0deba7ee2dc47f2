//! Core types for entropy_keyphrase
//!
//! This module defines the fundamental data structures shared by the document
//! view and the extractor: word interning, identifiers, configuration and the
//! ranked output record.

use crate::errors::{KeyphraseError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Dense identifier of an interned word within one document.
pub type WordId = u32;

// ============================================================================
// String Interning
// ============================================================================

/// A pool for string interning.
///
/// Every distinct word of a document is stored once and addressed by a dense
/// `WordId` in insertion order, which is what the extractor iterates when it
/// builds its seed set.
#[derive(Debug, Default, Clone)]
pub struct StringPool {
    string_to_id: FxHashMap<Arc<str>, WordId>,
    id_to_string: Vec<Arc<str>>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a string pool with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            string_to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            id_to_string: Vec::with_capacity(capacity),
        }
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> WordId {
        if let Some(&id) = self.string_to_id.get(s) {
            return id;
        }

        let id = self.id_to_string.len() as WordId;
        let arc: Arc<str> = s.into();
        self.string_to_id.insert(arc.clone(), id);
        self.id_to_string.push(arc);
        id
    }

    /// Look up the ID of an already interned string
    pub fn lookup(&self, s: &str) -> Option<WordId> {
        self.string_to_id.get(s).copied()
    }

    /// Get a string by its ID
    pub fn get(&self, id: WordId) -> Option<&str> {
        self.id_to_string.get(id as usize).map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }
}

// ============================================================================
// Document handle
// ============================================================================

/// Opaque, non-owning handle to a document instance.
///
/// Phrases carry this instead of a reference so that pooled records stay
/// `'static`; the caller keeps the document alive while it reads phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

// ============================================================================
// Ranked output
// ============================================================================

/// A finalized keyphrase rendered to text, ready to hand to a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPhrase {
    /// Word strings joined with the configured separator
    pub text: String,
    /// The individual words of the phrase
    pub words: Vec<String>,
    /// Number of occurrences in the document
    pub count: usize,
    /// Occurrences normalized by document length
    pub tf: f64,
    /// Token offsets `(start, end)` of each occurrence, end exclusive
    pub offsets: Vec<(usize, usize)>,
    /// The rank (1-indexed, based on tf)
    pub rank: usize,
}

impl KeyPhrase {
    /// Stable tie-breaker comparator for deterministic ranking.
    ///
    /// 1. **tf** descending (primary)
    /// 2. **Earliest first occurrence** ascending
    /// 3. **Longer phrase** first (more specific)
    /// 4. **Text** lexicographic ascending
    pub fn stable_cmp(&self, other: &Self) -> std::cmp::Ordering {
        /// Two tf values within this epsilon are considered tied.
        const TF_EPSILON: f64 = 1e-12;

        let diff = self.tf - other.tf;
        if diff.abs() > TF_EPSILON {
            return if diff > 0.0 {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            };
        }

        let self_pos = self.offsets.first().map_or(usize::MAX, |o| o.0);
        let other_pos = other.offsets.first().map_or(usize::MAX, |o| o.0);
        self_pos
            .cmp(&other_pos)
            .then_with(|| other.words.len().cmp(&self.words.len()))
            .then_with(|| self.text.cmp(&other.text))
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Floor on the occurrence count of an emitted phrase
pub const MIN_OCCURRENCES: usize = 2;

/// Configuration for entropy-boundary phrase extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Neighbour entropy above which a side counts as a phrase boundary
    pub boundary_threshold: f64,
    /// Neighbour entropy below which a candidate is extended to the right
    pub shift_threshold: f64,
    /// Minimum document frequency of a seed word
    pub min_seed_freq: usize,
    /// Minimum document frequency of a word appended during growth
    pub min_extension_freq: usize,
    /// Minimum number of occurrences of an emitted phrase (at least 2)
    pub min_occurrences: usize,
    /// Optional cap on phrase length in words (bounds the number of iterations)
    #[serde(default)]
    pub max_phrase_length: Option<usize>,
    /// Emit a phrase only if its right side is a boundary too
    #[serde(default = "default_require_right_boundary")]
    pub require_right_boundary: bool,
    /// Language code for stopwords (e.g., "en", "de", "zh")
    pub language: String,
    /// Additional stopwords (extends the built-in list)
    #[serde(default)]
    pub stopwords: Vec<String>,
    /// Minimum token length in characters for the built-in tokenizer
    #[serde(default = "default_min_token_length")]
    pub min_token_length: usize,
    /// Separator used when rendering a phrase to text
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Number of top phrases to return (0 = all)
    #[serde(default)]
    pub top_n: usize,
}

fn default_require_right_boundary() -> bool {
    true
}

fn default_min_token_length() -> usize {
    1
}

fn default_separator() -> String {
    " ".to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            boundary_threshold: 0.5,
            shift_threshold: 2.0,
            min_seed_freq: 2,
            min_extension_freq: 3,
            min_occurrences: MIN_OCCURRENCES,
            max_phrase_length: None,
            require_right_boundary: default_require_right_boundary(),
            language: "en".to_string(),
            stopwords: Vec::new(),
            min_token_length: default_min_token_length(),
            separator: default_separator(),
            top_n: 0,
        }
    }
}

impl ExtractorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing optional fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("boundary_threshold", self.boundary_threshold),
            ("shift_threshold", self.shift_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(KeyphraseError::invalid_config(format!(
                    "{} must be finite and >= 0, got {}",
                    name, value
                )));
            }
        }

        if self.min_seed_freq == 0 {
            return Err(KeyphraseError::invalid_config("min_seed_freq must be > 0"));
        }

        if self.min_extension_freq == 0 {
            return Err(KeyphraseError::invalid_config(
                "min_extension_freq must be > 0",
            ));
        }

        if self.min_occurrences < MIN_OCCURRENCES {
            return Err(KeyphraseError::invalid_config(format!(
                "min_occurrences must be >= {}, got {}",
                MIN_OCCURRENCES, self.min_occurrences
            )));
        }

        if self.max_phrase_length == Some(0) {
            return Err(KeyphraseError::invalid_config(
                "max_phrase_length must be > 0 when set",
            ));
        }

        Ok(())
    }

    /// Builder method: set the boundary entropy threshold
    pub fn with_boundary_threshold(mut self, threshold: f64) -> Self {
        self.boundary_threshold = threshold;
        self
    }

    /// Builder method: set the extension entropy threshold
    pub fn with_shift_threshold(mut self, threshold: f64) -> Self {
        self.shift_threshold = threshold;
        self
    }

    pub fn with_min_seed_freq(mut self, freq: usize) -> Self {
        self.min_seed_freq = freq;
        self
    }

    pub fn with_min_extension_freq(mut self, freq: usize) -> Self {
        self.min_extension_freq = freq;
        self
    }

    pub fn with_min_occurrences(mut self, occurrences: usize) -> Self {
        self.min_occurrences = occurrences;
        self
    }

    /// Builder method: cap phrase length in words
    pub fn with_max_phrase_length(mut self, max: usize) -> Self {
        self.max_phrase_length = Some(max);
        self
    }

    /// Builder method: whether emission also requires a right boundary
    pub fn with_require_right_boundary(mut self, require: bool) -> Self {
        self.require_right_boundary = require;
        self
    }

    /// Builder method: set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder method: add extra stopwords
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_min_token_length(mut self, min_length: usize) -> Self {
        self.min_token_length = min_length;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Builder method: set top N phrases to return
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}
