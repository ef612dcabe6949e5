use crate::utils::error::{Result, SpellerError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SpellerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SpellerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SpellerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Word lists must be non-empty, with no blank or repeated (case-insensitive) entries.
pub fn validate_word_list(field_name: &str, words: &[String]) -> Result<()> {
    if words.is_empty() {
        return Err(SpellerError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for word in words {
        validate_non_empty_string(field_name, word)?;
        if !seen.insert(word.trim().to_lowercase()) {
            return Err(SpellerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: word.clone(),
                reason: "Duplicate word".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(SpellerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}

/// Open interval check: `min < value < max`.
pub fn validate_open_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !(value > min && value < max) {
        return Err(SpellerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be strictly between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("reference.phonetic", "phonetic_spelling.csv").is_ok());
        assert!(validate_path("reference.phonetic", "").is_err());
        assert!(validate_path("reference.phonetic", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_word_list() {
        assert!(validate_word_list("test.words", &words(&["Blarb", "Door"])).is_ok());
        assert!(validate_word_list("test.words", &[]).is_err());
        assert!(validate_word_list("test.words", &words(&["Door", "door"])).is_err());
        assert!(validate_word_list("test.words", &words(&["Door", "  "])).is_err());
    }

    #[test]
    fn test_validate_numbers() {
        assert!(validate_positive("classifier.min_variance", 1e-4).is_ok());
        assert!(validate_positive("classifier.min_variance", 0.0).is_err());
        assert!(validate_positive("classifier.min_variance", f64::NAN).is_err());
        assert!(validate_open_range("classifier.prior_phonetic", 0.5, 0.0, 1.0).is_ok());
        assert!(validate_open_range("classifier.prior_phonetic", 1.0, 0.0, 1.0).is_err());
    }
}
