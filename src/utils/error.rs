use std::path::PathBuf;
use thiserror::Error;

use crate::domain::model::Population;

#[derive(Error, Debug)]
pub enum SpellerError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Reference data error in {}: {message}", .path.display())]
    ReferenceDataError { path: PathBuf, message: String },

    #[error("Lexicon error at line {line}: {message}")]
    LexiconError { line: usize, message: String },

    #[error("Word '{word}' has no {population} reference statistics")]
    MissingWord { word: String, population: Population },

    #[error("Word '{word}' has no scored samples in the {population} reference data")]
    InsufficientData { word: String, population: Population },

    #[error("Audio playback failed for {}: {message}", .clip.display())]
    AudioError { clip: PathBuf, message: String },

    #[error("Session aborted: input ended before the test was complete")]
    SessionAborted,

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    ReferenceData,
    Audio,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed run.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SpellerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpellerError::ConfigError { .. }
            | SpellerError::ConfigValidationError { .. }
            | SpellerError::InvalidConfigValueError { .. }
            | SpellerError::MissingConfigError { .. }
            | SpellerError::LexiconError { .. } => ErrorCategory::Configuration,
            SpellerError::CsvError(_)
            | SpellerError::ReferenceDataError { .. }
            | SpellerError::MissingWord { .. }
            | SpellerError::InsufficientData { .. } => ErrorCategory::ReferenceData,
            SpellerError::AudioError { .. } => ErrorCategory::Audio,
            SpellerError::SessionAborted | SpellerError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            SpellerError::IoError(_) | SpellerError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::ReferenceData | ErrorCategory::Audio => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 依錯誤類型提供修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            SpellerError::CsvError(_) => {
                "Check that every row of the reference CSV has one cell per header word".to_string()
            }
            SpellerError::IoError(_) => {
                "Check that the referenced files exist and are readable".to_string()
            }
            SpellerError::SerializationError(_) => {
                "Retry without --json, or report the issue".to_string()
            }
            SpellerError::ConfigError { .. } | SpellerError::ConfigValidationError { .. } => {
                "Fix the TOML configuration file and run again".to_string()
            }
            SpellerError::InvalidConfigValueError { field, .. } => {
                format!("Set a valid value for '{}' in the configuration", field)
            }
            SpellerError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            SpellerError::ReferenceDataError { path, .. } => {
                format!("Inspect the reference file {}", path.display())
            }
            SpellerError::LexiconError { .. } => {
                "Use a lexicon in CMU dictionary format (WORD  PH1 PH2 ...)".to_string()
            }
            SpellerError::MissingWord { word, .. } => format!(
                "Add a '{}' column to both reference CSV files or remove it from [test].words",
                word
            ),
            SpellerError::InsufficientData { word, .. } => {
                format!("Collect at least one spelling of '{}' in the reference data", word)
            }
            SpellerError::AudioError { .. } => {
                "Check [playback].command and the audio directory, or rerun with --no-audio"
                    .to_string()
            }
            SpellerError::SessionAborted => "Run the test again and answer every prompt".to_string(),
            SpellerError::ValidationError { .. } => {
                "Check the command line arguments and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::ReferenceData => format!("Reference data problem: {}", self),
            ErrorCategory::Audio => format!("Could not play audio: {}", self),
            ErrorCategory::Input => self.to_string(),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpellerError>;
