use crate::core::{
    Classification, Population, PopulationDistribution, Result, Verdict, WordLikelihood, WordScore,
    WordStats,
};
use crate::utils::error::SpellerError;
use std::f64::consts::PI;

pub const DEFAULT_MIN_VARIANCE: f64 = 1e-4;
pub const DEFAULT_PRIOR_PHONETIC: f64 = 0.5;

/// ln N(x; mean, variance)
pub fn normal_log_pdf(x: f64, mean: f64, variance: f64) -> f64 {
    -0.5 * (2.0 * PI * variance).ln() - (x - mean).powi(2) / (2.0 * variance)
}

/// Rounds a likelihood ratio to the reported factor, half-to-even.
pub fn round_factor(ratio: f64) -> f64 {
    ratio.round_ties_even()
}

/// Turns a log likelihood ratio into the reported verdict.
///
/// Ratios of at least 1 favour phonetic learning. The factor saturates to
/// infinity when it overflows.
pub fn verdict_from_log_ratio(log_ratio: f64) -> Verdict {
    if log_ratio >= 0.0 {
        Verdict {
            population: Population::Phonetic,
            times_more_likely: round_factor(log_ratio.exp()),
        }
    } else {
        Verdict {
            population: Population::NonPhonetic,
            times_more_likely: round_factor((-log_ratio).exp()),
        }
    }
}

/// P(phonetic | scores) given the prior, computed from log odds.
pub fn posterior_probability(log_ratio: f64, prior_phonetic: f64) -> f64 {
    let log_odds = log_ratio + (prior_phonetic / (1.0 - prior_phonetic)).ln();
    1.0 / (1.0 + (-log_odds).exp())
}

/// Naive-Bayes comparison of a session's similarity scores against the two
/// reference populations.
#[derive(Debug, Clone)]
pub struct Classifier {
    phonetic: PopulationDistribution,
    non_phonetic: PopulationDistribution,
    min_variance: f64,
    prior_phonetic: f64,
}

impl Classifier {
    pub fn new(phonetic: PopulationDistribution, non_phonetic: PopulationDistribution) -> Self {
        Self {
            phonetic,
            non_phonetic,
            min_variance: DEFAULT_MIN_VARIANCE,
            prior_phonetic: DEFAULT_PRIOR_PHONETIC,
        }
    }

    pub fn with_min_variance(mut self, min_variance: f64) -> Self {
        self.min_variance = min_variance;
        self
    }

    pub fn with_prior(mut self, prior_phonetic: f64) -> Self {
        self.prior_phonetic = prior_phonetic;
        self
    }

    pub fn distribution(&self, population: Population) -> &PopulationDistribution {
        match population {
            Population::Phonetic => &self.phonetic,
            Population::NonPhonetic => &self.non_phonetic,
        }
    }

    /// Fails with `MissingWord` if either population lacks statistics for `word`.
    pub fn ensure_word(&self, word: &str) -> Result<()> {
        self.lookup(Population::Phonetic, word)?;
        self.lookup(Population::NonPhonetic, word)?;
        Ok(())
    }

    fn lookup(&self, population: Population, word: &str) -> Result<&WordStats> {
        self.distribution(population)
            .stats(word)
            .ok_or_else(|| SpellerError::MissingWord {
                word: word.to_string(),
                population,
            })
    }

    fn log_density(&self, population: Population, word: &str, similarity: f64) -> Result<f64> {
        let stats = self.lookup(population, word)?;
        let variance = if stats.variance < self.min_variance {
            tracing::warn!(
                "⚠️ {} variance for '{}' is {:.2e}, using floor {:.2e}",
                population,
                word,
                stats.variance,
                self.min_variance
            );
            self.min_variance
        } else {
            stats.variance
        };
        Ok(normal_log_pdf(similarity, stats.mean, variance))
    }

    pub fn classify(&self, scores: &[WordScore]) -> Result<Classification> {
        let mut per_word = Vec::with_capacity(scores.len());
        let mut log_likelihood_phonetic = 0.0;
        let mut log_likelihood_non_phonetic = 0.0;

        for score in scores {
            let phonetic = self.log_density(Population::Phonetic, &score.word, score.similarity)?;
            let non_phonetic =
                self.log_density(Population::NonPhonetic, &score.word, score.similarity)?;
            log_likelihood_phonetic += phonetic;
            log_likelihood_non_phonetic += non_phonetic;
            per_word.push(WordLikelihood {
                word: score.word.clone(),
                similarity: score.similarity,
                log_density_phonetic: phonetic,
                log_density_non_phonetic: non_phonetic,
            });
        }

        let log_likelihood_ratio = log_likelihood_phonetic - log_likelihood_non_phonetic;
        let verdict = verdict_from_log_ratio(log_likelihood_ratio);
        tracing::debug!(
            "log L(phonetic)={:.4} log L(non-phonetic)={:.4} ratio=e^{:.4}",
            log_likelihood_phonetic,
            log_likelihood_non_phonetic,
            log_likelihood_ratio
        );

        Ok(Classification {
            per_word,
            log_likelihood_phonetic,
            log_likelihood_non_phonetic,
            log_likelihood_ratio,
            posterior_phonetic: posterior_probability(log_likelihood_ratio, self.prior_phonetic),
            verdict,
        })
    }
}
