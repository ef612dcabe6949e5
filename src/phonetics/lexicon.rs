use crate::phonetics::arpabet::{parse_phone, Phone};
use crate::utils::error::{Result, SpellerError};
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_LEXICON: &str = include_str!("../../data/lexicon.dict");

/// Pronouncing dictionary in CMU format.
///
/// ```text
/// ;;; comment
/// FIFER  F AY1 F ER0
/// BUND  B AH1 N D
/// BUND(1)  B UH1 N D
/// ```
///
/// Keys are stored lowercased; alternates keep file order.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<Vec<Phone>>>,
}

impl Lexicon {
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_LEXICON)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let lexicon = Self::parse(&content)?;
        tracing::debug!(
            "Loaded {} lexicon entries from {}",
            lexicon.len(),
            path.as_ref().display()
        );
        Ok(lexicon)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut entries: HashMap<String, Vec<Vec<Phone>>> = HashMap::new();

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            // cmudict.dict 的行尾註解以 " #" 開頭
            let line = raw.split(" #").next().unwrap_or("").trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let head = tokens.next().unwrap_or_default();
            let word = strip_variant(head).to_lowercase();
            if word.is_empty() {
                return Err(SpellerError::LexiconError {
                    line: line_no,
                    message: format!("missing headword in '{}'", raw),
                });
            }

            let mut phones = Vec::new();
            for token in tokens {
                let phone = parse_phone(token).ok_or_else(|| SpellerError::LexiconError {
                    line: line_no,
                    message: format!("unknown phone '{}' for '{}'", token, head),
                })?;
                phones.push(phone);
            }
            if phones.is_empty() {
                return Err(SpellerError::LexiconError {
                    line: line_no,
                    message: format!("no pronunciation given for '{}'", head),
                });
            }

            let alternatives = entries.entry(word).or_default();
            if !alternatives.contains(&phones) {
                alternatives.push(phones);
            }
        }

        Ok(Self { entries })
    }

    /// Entries of `other` replace entries for the same word.
    pub fn merge(&mut self, other: Lexicon) {
        self.entries.extend(other.entries);
    }

    pub fn lookup(&self, word: &str) -> Option<&[Vec<Phone>]> {
        self.entries.get(word).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `WORD(1)` -> `WORD`
fn strip_variant(head: &str) -> &str {
    match head.find('(') {
        Some(pos) if head.ends_with(')') && pos > 0 => &head[..pos],
        _ => head,
    }
}
