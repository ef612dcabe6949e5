//! Letter-to-sound rules for words missing from the lexicon.
//!
//! Deliberately small: enough to give invented words such as `blarb` or
//! `fortry` a stable, plausible IPA form. Input is one lowercase word.

/// Letter sequences matched greedily, longest first, at each position.
const GRAPHEMES: &[(&str, &str)] = &[
    ("eigh", "eɪ"),
    ("augh", "ɔ"),
    ("ough", "ɔ"),
    ("tch", "ʧ"),
    ("dge", "ʤ"),
    ("sch", "sk"),
    ("igh", "aɪ"),
    ("air", "ɛr"),
    ("are", "ɛr"),
    ("ear", "ɪr"),
    ("eer", "ɪr"),
    ("eir", "ɪr"),
    ("ere", "ɪr"),
    ("ire", "aɪər"),
    ("oor", "ɔr"),
    ("ore", "ɔr"),
    ("our", "ɔr"),
    ("ch", "ʧ"),
    ("sh", "ʃ"),
    ("th", "θ"),
    ("ph", "f"),
    ("ng", "ŋ"),
    ("ck", "k"),
    ("qu", "kw"),
    ("wh", "w"),
    ("ar", "ɑr"),
    ("or", "ɔr"),
    ("er", "ər"),
    ("ir", "ər"),
    ("ur", "ər"),
    ("yr", "ər"),
    ("ee", "i"),
    ("ea", "i"),
    ("ei", "eɪ"),
    ("oo", "u"),
    ("ou", "aʊ"),
    ("oa", "oʊ"),
    ("oe", "oʊ"),
    ("ai", "eɪ"),
    ("ay", "eɪ"),
    ("oi", "ɔɪ"),
    ("oy", "ɔɪ"),
    ("au", "ɔ"),
    ("aw", "ɔ"),
    ("ew", "u"),
    ("ue", "u"),
    ("ui", "u"),
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_lowercase() && !is_vowel(c) && c != 'y'
}

fn short_vowel(c: char) -> &'static str {
    match c {
        'a' => "æ",
        'e' => "ɛ",
        'i' => "ɪ",
        'o' => "ɑ",
        _ => "ə",
    }
}

fn long_vowel(c: char) -> &'static str {
    match c {
        'a' => "eɪ",
        'e' => "i",
        'i' | 'y' => "aɪ",
        'o' => "oʊ",
        _ => "u",
    }
}

/// Position-dependent digraphs that the plain table can't express.
fn contextual(letters: &[char], i: usize) -> Option<(&'static str, usize)> {
    let n = letters.len();
    let pair = (letters[i], letters.get(i + 1).copied());
    match pair {
        ('k', Some('n')) if i == 0 => Some(("n", 2)),
        ('w', Some('r')) if i == 0 => Some(("r", 2)),
        ('g', Some('h')) if i == 0 => Some(("g", 2)),
        ('g', Some('h')) => Some(("", 2)),
        ('i', Some('e')) if i + 2 == n => Some(("aɪ", 2)),
        ('o', Some('w')) if i + 2 == n => Some(("oʊ", 2)),
        ('o', Some('w')) => Some(("aʊ", 2)),
        ('e', Some('y')) if i + 2 == n => Some(("i", 2)),
        _ => None,
    }
}

pub fn transcribe_word(word: &str) -> String {
    let letters: Vec<char> = word
        .chars()
        .flat_map(|c| c.to_lowercase())
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    let n = letters.len();
    let mut out = String::new();
    let mut i = 0;

    while i < n {
        let c = letters[i];

        // 字尾的 e
        if c == 'e' && i + 1 == n {
            if n <= 2 {
                out.push('i');
            } else if !is_consonant(letters[i - 1]) {
                out.push('ɛ');
            }
            i += 1;
            continue;
        }

        if let Some((ipa, len)) = contextual(&letters, i) {
            out.push_str(ipa);
            i += len;
            continue;
        }

        if let Some((grapheme, ipa)) = GRAPHEMES.iter().find(|(g, _)| {
            g.chars().count() <= n - i && g.chars().zip(&letters[i..]).all(|(a, b)| a == *b)
        }) {
            out.push_str(ipa);
            i += grapheme.chars().count();
            continue;
        }

        if is_vowel(c) || c == 'y' {
            out.push_str(vowel_sound(&letters, i));
            i += 1;
            continue;
        }

        // 重複子音只發一次
        if letters.get(i + 1) == Some(&c) {
            i += 1;
        }
        out.push_str(consonant_sound(&letters, i));
        i += 1;
    }

    out
}

fn vowel_sound(letters: &[char], i: usize) -> &'static str {
    let n = letters.len();
    let c = letters[i];
    let next = letters.get(i + 1).copied();

    if c == 'y' {
        return match next {
            Some(v) if i == 0 && is_vowel(v) => "j",
            None if n <= 2 => "aɪ",
            None => "i",
            _ => "ɪ",
        };
    }

    // magic e: vowel + single consonant + final e
    let magic_e = i + 3 == n
        && letters[i + 2] == 'e'
        && next.is_some_and(|m| is_consonant(m) && !matches!(m, 'w' | 'x'));
    if magic_e {
        return long_vowel(c);
    }

    if next.is_none() {
        return match c {
            'a' => "ə",
            _ => long_vowel(c),
        };
    }

    short_vowel(c)
}

fn consonant_sound(letters: &[char], i: usize) -> &'static str {
    let soft = matches!(letters.get(i + 1), Some('e' | 'i' | 'y'));
    match letters[i] {
        'c' if soft => "s",
        'c' => "k",
        'g' if soft => "ʤ",
        'g' => "g",
        'j' => "ʤ",
        'n' if matches!(letters.get(i + 1), Some('k')) => "ŋ",
        'q' => "k",
        'x' if i == 0 => "z",
        'x' => "ks",
        'b' => "b",
        'd' => "d",
        'f' => "f",
        'h' => "h",
        'k' => "k",
        'l' => "l",
        'm' => "m",
        'n' => "n",
        'p' => "p",
        'r' => "r",
        's' => "s",
        't' => "t",
        'v' => "v",
        'w' => "w",
        'z' => "z",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invented_words() {
        assert_eq!(transcribe_word("blarb"), "blɑrb");
        assert_eq!(transcribe_word("bund"), "bənd");
        assert_eq!(transcribe_word("lond"), "lɑnd");
        assert_eq!(transcribe_word("fint"), "fɪnt");
        assert_eq!(transcribe_word("fortry"), "fɔrtri");
        assert_eq!(transcribe_word("torp"), "tɔrp");
    }

    #[test]
    fn test_digraphs_and_doubled_consonants() {
        assert_eq!(transcribe_word("door"), "dɔr");
        assert_eq!(transcribe_word("laff"), "læf");
        assert_eq!(transcribe_word("shop"), "ʃɑp");
        assert_eq!(transcribe_word("knot"), "nɑt");
        assert_eq!(transcribe_word("bank"), "bæŋk");
    }

    #[test]
    fn test_magic_e_and_soft_consonants() {
        assert_eq!(transcribe_word("fine"), "faɪn");
        assert_eq!(transcribe_word("cake"), "keɪk");
        assert_eq!(transcribe_word("city"), "sɪti");
        assert_eq!(transcribe_word("gem"), "ʤɛm");
    }

    #[test]
    fn test_short_words_and_y() {
        assert_eq!(transcribe_word("be"), "bi");
        assert_eq!(transcribe_word("go"), "goʊ");
        assert_eq!(transcribe_word("my"), "maɪ");
        assert_eq!(transcribe_word("yes"), "jɛs");
    }

    #[test]
    fn test_ignores_non_letters() {
        assert_eq!(transcribe_word("Torp!"), "tɔrp");
        assert_eq!(transcribe_word(""), "");
        assert_eq!(transcribe_word("123"), "");
    }
}
