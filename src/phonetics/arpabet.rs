//! ARPAbet phones as used by the CMU pronouncing dictionary, and their IPA rendering.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stress {
    Unstressed,
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phone {
    pub ipa: &'static str,
    /// `Some` for vowels, `None` for consonants.
    pub stress: Option<Stress>,
}

impl Phone {
    pub fn is_vowel(&self) -> bool {
        self.stress.is_some()
    }
}

const VOWELS: &[(&str, &str)] = &[
    ("AA", "ɑ"),
    ("AE", "æ"),
    ("AH", "ə"),
    ("AO", "ɔ"),
    ("AW", "aʊ"),
    ("AY", "aɪ"),
    ("EH", "ɛ"),
    ("ER", "ər"),
    ("EY", "eɪ"),
    ("IH", "ɪ"),
    ("IY", "i"),
    ("OW", "oʊ"),
    ("OY", "ɔɪ"),
    ("UH", "ʊ"),
    ("UW", "u"),
];

const CONSONANTS: &[(&str, &str)] = &[
    ("B", "b"),
    ("CH", "ʧ"),
    ("D", "d"),
    ("DH", "ð"),
    ("F", "f"),
    ("G", "g"),
    ("HH", "h"),
    ("JH", "ʤ"),
    ("K", "k"),
    ("L", "l"),
    ("M", "m"),
    ("N", "n"),
    ("NG", "ŋ"),
    ("P", "p"),
    ("R", "r"),
    ("S", "s"),
    ("SH", "ʃ"),
    ("T", "t"),
    ("TH", "θ"),
    ("V", "v"),
    ("W", "w"),
    ("Y", "j"),
    ("Z", "z"),
    ("ZH", "ʒ"),
];

/// Parses one ARPAbet token such as `AY1` or `NG`. Case-insensitive.
pub fn parse_phone(token: &str) -> Option<Phone> {
    let upper = token.to_ascii_uppercase();
    let (base, digit) = match upper.char_indices().last() {
        Some((idx, c)) if c.is_ascii_digit() => (&upper[..idx], Some(c)),
        _ => (upper.as_str(), None),
    };

    if let Some((_, ipa)) = VOWELS.iter().find(|(arpa, _)| *arpa == base) {
        let stress = match digit {
            Some('1') => Stress::Primary,
            Some('2') => Stress::Secondary,
            Some('0') | None => Stress::Unstressed,
            Some(_) => return None,
        };
        return Some(Phone {
            ipa: *ipa,
            stress: Some(stress),
        });
    }

    if digit.is_some() {
        return None;
    }

    CONSONANTS
        .iter()
        .find(|(arpa, _)| *arpa == base)
        .map(|(_, ipa)| Phone {
            ipa: *ipa,
            stress: None,
        })
}

/// Renders a pronunciation as IPA.
///
/// With `stress_marks`, stressed syllables of polysyllabic words get `ˈ`/`ˌ`
/// in front of their onset consonant (or at the start of the word for the
/// first syllable). Monosyllables never carry a mark.
pub fn to_ipa(phones: &[Phone], stress_marks: bool) -> String {
    let vowel_count = phones.iter().filter(|p| p.is_vowel()).count();
    let mut marks: Vec<Option<&'static str>> = vec![None; phones.len()];

    if stress_marks && vowel_count > 1 {
        let mut seen_vowel = false;
        for (idx, phone) in phones.iter().enumerate() {
            let mark = match phone.stress {
                Some(Stress::Primary) => Some("ˈ"),
                Some(Stress::Secondary) => Some("ˌ"),
                _ => None,
            };
            if let Some(mark) = mark {
                let at = if !seen_vowel {
                    0
                } else if idx > 0 && !phones[idx - 1].is_vowel() {
                    idx - 1
                } else {
                    idx
                };
                marks[at] = Some(mark);
            }
            if phone.is_vowel() {
                seen_vowel = true;
            }
        }
    }

    let mut out = String::new();
    for (phone, mark) in phones.iter().zip(marks) {
        if let Some(mark) = mark {
            out.push_str(mark);
        }
        out.push_str(phone.ipa);
    }
    out
}
