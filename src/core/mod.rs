pub mod classifier;
pub mod distribution;
pub mod engine;
pub mod report;
pub mod session;
pub mod similarity;

pub use crate::domain::model::{
    Classification, Population, PopulationDistribution, SessionReport, Verdict, WordLikelihood,
    WordScore, WordStats,
};
pub use crate::domain::ports::{AudioPlayer, Transcriber};
pub use crate::utils::error::Result;
