use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which group of reference spellers a distribution describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Population {
    Phonetic,
    NonPhonetic,
}

impl Population {
    /// Adverb used in the report sentence.
    pub fn adverb(&self) -> &'static str {
        match self {
            Population::Phonetic => "phonetically",
            Population::NonPhonetic => "non-phonetically",
        }
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Population::Phonetic => write!(f, "phonetic"),
            Population::NonPhonetic => write!(f, "non-phonetic"),
        }
    }
}

/// Summary of one target word's similarity scores within a population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStats {
    pub word: String,
    pub mean: f64,
    /// Population variance (divides by n).
    pub variance: f64,
    pub samples: usize,
}

/// Per-word statistics of one population, in reference CSV header order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationDistribution {
    pub population: Population,
    pub words: Vec<WordStats>,
}

impl PopulationDistribution {
    pub fn stats(&self, word: &str) -> Option<&WordStats> {
        self.words.iter().find(|s| s.word == word)
    }
}

/// A spelling scored against its target word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub spelling: String,
    pub spelling_ipa: String,
    /// Reference transcription that gave the best match, empty if the word has none.
    pub matched_ipa: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordLikelihood {
    pub word: String,
    pub similarity: f64,
    pub log_density_phonetic: f64,
    pub log_density_non_phonetic: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub population: Population,
    /// Rounded "times more likely" factor; `f64::INFINITY` when the ratio overflows.
    pub times_more_likely: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub per_word: Vec<WordLikelihood>,
    pub log_likelihood_phonetic: f64,
    pub log_likelihood_non_phonetic: f64,
    /// ln(P(scores | phonetic) / P(scores | non-phonetic)).
    pub log_likelihood_ratio: f64,
    pub posterior_phonetic: f64,
    pub verdict: Verdict,
}

impl Classification {
    pub fn likelihood_phonetic(&self) -> f64 {
        self.log_likelihood_phonetic.exp()
    }

    pub fn likelihood_non_phonetic(&self) -> f64 {
        self.log_likelihood_non_phonetic.exp()
    }

    pub fn likelihood_ratio(&self) -> f64 {
        self.log_likelihood_ratio.exp()
    }
}

/// Everything produced by one run of the test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub generated_at: DateTime<Utc>,
    pub scores: Vec<WordScore>,
    pub classification: Classification,
}
