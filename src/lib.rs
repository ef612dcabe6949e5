pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod phonetics;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use core::{classifier::Classifier, engine::SpellingTest, similarity::SimilarityScorer};
pub use phonetics::{lexicon::Lexicon, PhoneticTranscriber, UnknownWordStrategy};
pub use utils::error::{Result, SpellerError};
