//! Word lexicon used to score OCR output.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PipelineError, PipelineResult};

/// Maximal runs of letters, the token unit of the meaning score.
static LETTER_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}+").unwrap());

/// Immutable set of valid words for the OCR target language.
///
/// Loaded once per OCR invocation; used for membership tests only.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    /// Loads a newline-delimited word list. Words are lowercased and empty
    /// lines are ignored. A missing file is a fatal setup error.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::RecognitionSetup(format!(
                "lexicon file {} unreadable: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::from_words(raw.lines()))
    }

    /// Builds a lexicon from an iterator of words (test helper and loader core).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Meaning score of an OCR transcript: the number of letter-run tokens
    /// (repeats counted) present in the lexicon.
    pub fn score(&self, text: &str) -> usize {
        let lowered = text.to_lowercase();
        LETTER_RUNS
            .find_iter(&lowered)
            .filter(|m| self.words.contains(m.as_str()))
            .count()
    }
}
