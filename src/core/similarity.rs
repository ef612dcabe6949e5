use crate::core::{Transcriber, WordScore};

/// Jaro similarity of two transcriptions, in [0, 1].
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::jaro(a, b)
}

/// Scores spellings by comparing their IPA against every IPA form of the target word.
#[derive(Debug, Clone)]
pub struct SimilarityScorer<T: Transcriber> {
    transcriber: T,
}

impl<T: Transcriber> SimilarityScorer<T> {
    pub fn new(transcriber: T) -> Self {
        Self { transcriber }
    }

    pub fn transcriber(&self) -> &T {
        &self.transcriber
    }

    pub fn score(&self, spelling: &str, word: &str) -> f64 {
        self.score_detailed(spelling, word).similarity
    }

    /// The best match wins: the spelling gets the benefit of the doubt
    /// across all pronunciations of `word`.
    pub fn score_detailed(&self, spelling: &str, word: &str) -> WordScore {
        let spelling_ipa = self.transcriber.transcribe(spelling);
        let mut matched_ipa = String::new();
        let mut similarity = 0.0;

        for reference in self.transcriber.transcribe_all(word) {
            let candidate = jaro_similarity(&reference, &spelling_ipa);
            if candidate > similarity {
                similarity = candidate;
                matched_ipa = reference;
            }
        }

        tracing::trace!(
            "score '{}' ({}) vs '{}' ({}) = {:.4}",
            spelling,
            spelling_ipa,
            word,
            matched_ipa,
            similarity
        );

        WordScore {
            word: word.to_string(),
            spelling: spelling.to_string(),
            spelling_ipa,
            matched_ipa,
            similarity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed transcriptions so scores don't depend on the lexicon.
    struct TableTranscriber;

    impl Transcriber for TableTranscriber {
        fn transcribe(&self, text: &str) -> String {
            self.transcribe_all(text).into_iter().next().unwrap_or_default()
        }

        fn transcribe_all(&self, text: &str) -> Vec<String> {
            match text.to_lowercase().as_str() {
                "bund" => vec!["bənd".to_string(), "bʊnd".to_string()],
                "bood" => vec!["bʊd".to_string()],
                "bond" => vec!["bɑnd".to_string()],
                "xyz" => vec!["zzz".to_string()],
                "" => vec![],
                other => vec![other.to_string()],
            }
        }
    }

    #[test]
    fn test_identical_spelling_scores_one() {
        let scorer = SimilarityScorer::new(TableTranscriber);
        assert_eq!(scorer.score("Bund", "Bund"), 1.0);
    }

    #[test]
    fn test_best_alternative_wins() {
        let scorer = SimilarityScorer::new(TableTranscriber);
        let detail = scorer.score_detailed("bood", "Bund");
        assert_eq!(detail.matched_ipa, "bʊnd");
        assert!(detail.similarity > jaro_similarity("bənd", "bʊd"));
        assert_eq!(detail.similarity, jaro_similarity("bʊnd", "bʊd"));
    }

    #[test]
    fn test_more_alternatives_never_lower_the_score() {
        let scorer = SimilarityScorer::new(TableTranscriber);
        let single = jaro_similarity("bənd", "bɑnd");
        assert!(scorer.score("bond", "Bund") >= single);
    }

    #[test]
    fn test_empty_or_unrelated_spelling() {
        let scorer = SimilarityScorer::new(TableTranscriber);
        let detail = scorer.score_detailed("", "Bund");
        assert_eq!(detail.similarity, 0.0);
        assert!(detail.matched_ipa.is_empty());

        assert_eq!(scorer.score("xyz", "Bund"), 0.0);
    }

    #[test]
    fn test_jaro_range() {
        assert_eq!(jaro_similarity("", ""), 0.0);
        assert_eq!(jaro_similarity("dɔr", "dɔr"), 1.0);
        let s = jaro_similarity("blɑrb", "blɜrb");
        assert!(s > 0.0 && s < 1.0);
    }
}
