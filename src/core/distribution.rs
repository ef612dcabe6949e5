use crate::core::similarity::SimilarityScorer;
use crate::core::{Population, PopulationDistribution, Result, Transcriber, WordStats};
use crate::utils::error::SpellerError;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Mean and population variance, `None` for an empty slice.
pub fn summarize(word: &str, scores: &[f64]) -> Option<WordStats> {
    if scores.is_empty() {
        return None;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    Some(WordStats {
        word: word.to_string(),
        mean,
        variance,
        samples: scores.len(),
    })
}

/// Builds a population's per-word statistics from a reference CSV.
///
/// The header row names the target words; every later row holds one
/// participant's spellings, scored against the word heading its column.
/// Blank cells are scored like any other answer and count as 0.
pub fn build_distribution<R: Read, T: Transcriber>(
    reader: R,
    population: Population,
    scorer: &SimilarityScorer<T>,
) -> Result<PopulationDistribution> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    if header.iter().all(|w| w.is_empty()) {
        return Err(SpellerError::ValidationError {
            message: "reference data has no header row of target words".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for word in &header {
        if word.is_empty() {
            return Err(SpellerError::ValidationError {
                message: "reference header contains an empty column name".to_string(),
            });
        }
        if !seen.insert(word.as_str()) {
            return Err(SpellerError::ValidationError {
                message: format!("reference header repeats the word '{}'", word),
            });
        }
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); header.len()];
    let mut rows = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        rows += 1;
        for (column, (word, spelling)) in header.iter().zip(record.iter()).enumerate() {
            if spelling.is_empty() {
                tracing::debug!("Blank '{}' answer in row {} scores 0", word, rows);
            }
            columns[column].push(scorer.score(spelling, word));
        }
    }

    let mut words = Vec::with_capacity(header.len());
    for (word, scores) in header.iter().zip(&columns) {
        let stats = summarize(word, scores).ok_or_else(|| SpellerError::InsufficientData {
            word: word.clone(),
            population,
        })?;
        tracing::debug!(
            "{} '{}': mean={:.4} variance={:.6} n={}",
            population,
            word,
            stats.mean,
            stats.variance,
            stats.samples
        );
        words.push(stats);
    }

    tracing::info!(
        "📊 Built {} distribution from {} participants over {} words",
        population,
        rows,
        words.len()
    );

    Ok(PopulationDistribution { population, words })
}

/// Like [`build_distribution`], attaching the file path to read and format errors.
pub fn load_distribution<P: AsRef<Path>, T: Transcriber>(
    path: P,
    population: Population,
    scorer: &SimilarityScorer<T>,
) -> Result<PopulationDistribution> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SpellerError::ReferenceDataError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    build_distribution(file, population, scorer).map_err(|e| match e {
        SpellerError::CsvError(_) | SpellerError::IoError(_) | SpellerError::ValidationError { .. } => {
            SpellerError::ReferenceDataError {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        }
        other => other,
    })
}
