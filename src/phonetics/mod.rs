pub mod arpabet;
pub mod lexicon;
pub mod rules;

use crate::domain::ports::Transcriber;
use lexicon::Lexicon;
use serde::{Deserialize, Serialize};

/// Upper bound on alternatives produced for multi-word input.
const MAX_COMBINATIONS: usize = 64;

/// What to do with words the lexicon doesn't know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownWordStrategy {
    /// Guess with letter-to-sound rules.
    #[default]
    Rules,
    /// Keep the word as typed, flagged with a trailing `*`.
    Mark,
}

/// English to IPA: lexicon lookup first, then the unknown-word strategy.
#[derive(Debug, Clone)]
pub struct PhoneticTranscriber {
    lexicon: Lexicon,
    unknown_words: UnknownWordStrategy,
    stress_marks: bool,
}

impl PhoneticTranscriber {
    pub fn new(lexicon: Lexicon, unknown_words: UnknownWordStrategy, stress_marks: bool) -> Self {
        Self {
            lexicon,
            unknown_words,
            stress_marks,
        }
    }

    fn word_alternatives(&self, word: &str) -> Vec<String> {
        let found = self
            .lexicon
            .lookup(word)
            .or_else(|| self.lexicon.lookup(&word.replace('\'', "")));

        if let Some(prons) = found {
            return prons
                .iter()
                .map(|phones| arpabet::to_ipa(phones, self.stress_marks))
                .collect();
        }

        match self.unknown_words {
            UnknownWordStrategy::Rules => {
                let guess = rules::transcribe_word(word);
                if guess.is_empty() {
                    vec![format!("{}*", word)]
                } else {
                    vec![guess]
                }
            }
            UnknownWordStrategy::Mark => vec![format!("{}*", word)],
        }
    }
}

/// Lowercases, splits on whitespace and hyphens, keeps letters and apostrophes.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphabetic() || *c == '\'')
                .collect::<String>()
        })
        .map(|w| w.trim_matches('\'').to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

impl Transcriber for PhoneticTranscriber {
    fn transcribe(&self, text: &str) -> String {
        normalize(text)
            .iter()
            .filter_map(|word| self.word_alternatives(word).into_iter().next())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn transcribe_all(&self, text: &str) -> Vec<String> {
        let words = normalize(text);
        if words.is_empty() {
            return Vec::new();
        }

        let mut combos: Vec<String> = vec![String::new()];
        for word in &words {
            let alternatives = self.word_alternatives(word);
            let mut next = Vec::new();
            'outer: for prefix in &combos {
                for alt in &alternatives {
                    if next.len() == MAX_COMBINATIONS {
                        break 'outer;
                    }
                    if prefix.is_empty() {
                        next.push(alt.clone());
                    } else {
                        next.push(format!("{} {}", prefix, alt));
                    }
                }
            }
            combos = next;
        }

        let mut unique = Vec::with_capacity(combos.len());
        for combo in combos {
            if !unique.contains(&combo) {
                unique.push(combo);
            }
        }
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcriber(strategy: UnknownWordStrategy) -> PhoneticTranscriber {
        PhoneticTranscriber::new(Lexicon::builtin().unwrap(), strategy, true)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Door "), vec!["door"]);
        assert_eq!(normalize("Torp, larp!"), vec!["torp", "larp"]);
        assert_eq!(normalize("fort-ry"), vec!["fort", "ry"]);
        assert_eq!(normalize("'quoted'"), vec!["quoted"]);
        assert!(normalize("  ").is_empty());
    }

    #[test]
    fn test_lexicon_words_use_dictionary() {
        let t = transcriber(UnknownWordStrategy::Rules);
        assert_eq!(t.transcribe("Door"), "dɔr");
        assert_eq!(t.transcribe("Fifer"), "ˈfaɪfər");
        assert_eq!(t.transcribe_all("Bund"), vec!["bənd", "bʊnd"]);
    }

    #[test]
    fn test_unknown_word_strategies() {
        let rules = transcriber(UnknownWordStrategy::Rules);
        assert_eq!(rules.transcribe("Blarb"), "blɑrb");

        let mark = transcriber(UnknownWordStrategy::Mark);
        assert_eq!(mark.transcribe("Blarb"), "blarb*");
        assert_eq!(mark.transcribe_all("Blarb"), vec!["blarb*"]);
    }

    #[test]
    fn test_multi_word_input() {
        let t = transcriber(UnknownWordStrategy::Rules);
        assert_eq!(t.transcribe("door torp"), "dɔr tɔrp");
        assert_eq!(t.transcribe_all("bund door"), vec!["bənd dɔr", "bʊnd dɔr"]);
        assert_eq!(t.transcribe_all("bund bund").len(), 4);
    }

    #[test]
    fn test_empty_input() {
        let t = transcriber(UnknownWordStrategy::Rules);
        assert_eq!(t.transcribe(""), "");
        assert!(t.transcribe_all("   ").is_empty());
    }
}
