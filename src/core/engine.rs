use crate::config::toml_config::TomlConfig;
use crate::core::classifier::Classifier;
use crate::core::distribution::load_distribution;
use crate::core::session::{Clip, Session};
use crate::core::similarity::SimilarityScorer;
use crate::core::{AudioPlayer, Population, Result, SessionReport, Transcriber, WordScore};
use crate::phonetics::lexicon::Lexicon;
use crate::phonetics::PhoneticTranscriber;
use crate::utils::error::SpellerError;
use chrono::Utc;
use std::io::{BufRead, Write};

/// Builds the configured transcriber: built-in lexicon, plus the external one if set.
pub fn build_transcriber(config: &TomlConfig) -> Result<PhoneticTranscriber> {
    let mut lexicon = Lexicon::builtin()?;
    if let Some(path) = &config.phonetics.lexicon {
        lexicon.merge(Lexicon::from_path(path)?);
    }
    tracing::debug!("Lexicon holds {} words", lexicon.len());
    Ok(PhoneticTranscriber::new(
        lexicon,
        config.phonetics.unknown_words,
        config.phonetics.stress_marks,
    ))
}

/// One spelling test: target words, their clips, a scorer and the reference classifier.
pub struct SpellingTest<T: Transcriber> {
    clips: Vec<Clip>,
    scorer: SimilarityScorer<T>,
    classifier: Classifier,
}

impl<T: Transcriber> SpellingTest<T> {
    /// Fails with `MissingWord` unless both populations cover every clip's word.
    pub fn new(clips: Vec<Clip>, scorer: SimilarityScorer<T>, classifier: Classifier) -> Result<Self> {
        for clip in &clips {
            classifier.ensure_word(&clip.word)?;
        }
        Ok(Self {
            clips,
            scorer,
            classifier,
        })
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.clips.iter().map(|c| c.word.as_str())
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Introduction, readiness check, one spelling per clip, then classification.
    pub fn run_interactive<R, W, P>(&self, input: R, output: W, player: &P) -> Result<SessionReport>
    where
        R: BufRead,
        W: Write,
        P: AudioPlayer + ?Sized,
    {
        let mut session = Session::new(input, output, player);
        session.print_introduction()?;
        session.wait_until_ready()?;

        tracing::info!("🎧 Collecting spellings for {} words", self.clips.len());
        let spellings = session.collect_spellings(&self.clips)?;
        self.classify_spellings(&spellings)
    }

    /// Scores and classifies spellings given in clip order.
    pub fn classify_spellings<S: AsRef<str>>(&self, spellings: &[S]) -> Result<SessionReport> {
        if spellings.len() != self.clips.len() {
            return Err(SpellerError::ValidationError {
                message: format!(
                    "expected {} spellings (one per word), got {}",
                    self.clips.len(),
                    spellings.len()
                ),
            });
        }

        let scores: Vec<WordScore> = self
            .clips
            .iter()
            .zip(spellings)
            .map(|(clip, spelling)| self.scorer.score_detailed(spelling.as_ref(), &clip.word))
            .collect();

        let classification = self.classifier.classify(&scores)?;
        tracing::info!(
            "✅ Verdict: {} ({} times more likely)",
            classification.verdict.population,
            classification.verdict.times_more_likely
        );

        Ok(SessionReport {
            generated_at: Utc::now(),
            scores,
            classification,
        })
    }
}

impl SpellingTest<PhoneticTranscriber> {
    /// Loads the lexicon and both reference datasets named by `config`.
    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        let scorer = SimilarityScorer::new(build_transcriber(config)?);

        tracing::info!("📥 Loading phonetic reference data: {}", config.reference.phonetic);
        let phonetic = load_distribution(&config.reference.phonetic, Population::Phonetic, &scorer)?;
        tracing::info!(
            "📥 Loading non-phonetic reference data: {}",
            config.reference.non_phonetic
        );
        let non_phonetic = load_distribution(
            &config.reference.non_phonetic,
            Population::NonPhonetic,
            &scorer,
        )?;

        let classifier = Classifier::new(phonetic, non_phonetic)
            .with_min_variance(config.classifier.min_variance)
            .with_prior(config.classifier.prior_phonetic);

        Self::new(config.clips(), scorer, classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PopulationDistribution, WordStats};
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    struct Identity;

    impl Transcriber for Identity {
        fn transcribe(&self, text: &str) -> String {
            text.trim().to_lowercase()
        }

        fn transcribe_all(&self, text: &str) -> Vec<String> {
            vec![text.trim().to_lowercase()]
        }
    }

    struct NoAudio;

    impl AudioPlayer for NoAudio {
        fn play(&self, _clip: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn dist(population: Population, mean: f64) -> PopulationDistribution {
        PopulationDistribution {
            population,
            words: ["Door", "Torp"]
                .iter()
                .map(|w| WordStats {
                    word: w.to_string(),
                    mean,
                    variance: 0.01,
                    samples: 5,
                })
                .collect(),
        }
    }

    fn clips(words: &[&str]) -> Vec<Clip> {
        words
            .iter()
            .map(|w| Clip {
                word: w.to_string(),
                path: PathBuf::from(format!("{}.wav", w)),
            })
            .collect()
    }

    fn spelling_test() -> SpellingTest<Identity> {
        let classifier = Classifier::new(
            dist(Population::Phonetic, 0.95),
            dist(Population::NonPhonetic, 0.6),
        );
        SpellingTest::new(clips(&["Door", "Torp"]), SimilarityScorer::new(Identity), classifier)
            .unwrap()
    }

    #[test]
    fn test_exact_spellings_look_phonetic() {
        let report = spelling_test().classify_spellings(&["door", "torp"]).unwrap();
        assert_eq!(report.scores.len(), 2);
        assert_eq!(report.scores[0].similarity, 1.0);
        assert_eq!(report.classification.verdict.population, Population::Phonetic);
    }

    #[test]
    fn test_spelling_count_must_match() {
        let err = spelling_test().classify_spellings(&["door"]).unwrap_err();
        assert!(matches!(err, SpellerError::ValidationError { .. }));
    }

    #[test]
    fn test_unknown_word_rejected_at_construction() {
        let classifier = Classifier::new(
            dist(Population::Phonetic, 0.9),
            dist(Population::NonPhonetic, 0.6),
        );
        let result = SpellingTest::new(
            clips(&["Door", "Blarb"]),
            SimilarityScorer::new(Identity),
            classifier,
        );
        assert!(matches!(result, Err(SpellerError::MissingWord { .. })));
    }

    #[test]
    fn test_interactive_run() {
        let test = spelling_test();
        let mut out = Vec::new();
        let report = test
            .run_interactive(Cursor::new("y\ndoor\nrepeat\ntorp\n"), &mut out, &NoAudio)
            .unwrap();

        assert_eq!(report.scores[1].spelling, "torp");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Welcome!"));
        assert_eq!(text.matches("Enter your spelling").count(), 3);
    }
}
