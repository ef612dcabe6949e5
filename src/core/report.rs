use crate::core::{PopulationDistribution, Result, SessionReport, Verdict};
use std::io::Write;

fn format_factor(factor: f64) -> String {
    if factor.is_finite() {
        format!("{:.0}", factor)
    } else {
        "∞".to_string()
    }
}

pub fn verdict_sentence(verdict: &Verdict) -> String {
    format!(
        "You are {} times more likely to have learned to read and write {}.",
        format_factor(verdict.times_more_likely),
        verdict.population.adverb()
    )
}

pub fn write_text_report<W: Write>(out: &mut W, report: &SessionReport, details: bool) -> Result<()> {
    if details {
        write_details(out, report)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", verdict_sentence(&report.classification.verdict))?;
    writeln!(out)?;
    Ok(())
}

/// Per-word breakdown followed by the aggregate numbers.
pub fn write_details<W: Write>(out: &mut W, report: &SessionReport) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{:<10} {:<14} {:<14} {:<14} {:>10} {:>12} {:>12}",
        "word", "spelling", "ipa", "reference", "similarity", "ln p(phon)", "ln p(non)"
    )?;
    for (score, likelihood) in report.scores.iter().zip(&report.classification.per_word) {
        writeln!(
            out,
            "{:<10} {:<14} {:<14} {:<14} {:>10.4} {:>12.4} {:>12.4}",
            score.word,
            score.spelling,
            score.spelling_ipa,
            score.matched_ipa,
            score.similarity,
            likelihood.log_density_phonetic,
            likelihood.log_density_non_phonetic
        )?;
    }

    let c = &report.classification;
    writeln!(out)?;
    writeln!(out, "ln L(phonetic)      = {:.4}", c.log_likelihood_phonetic)?;
    writeln!(out, "ln L(non-phonetic)  = {:.4}", c.log_likelihood_non_phonetic)?;
    writeln!(out, "ln likelihood ratio = {:.4}", c.log_likelihood_ratio)?;
    writeln!(
        out,
        "P(phonetic | answers) = {:.1}%",
        c.posterior_phonetic * 100.0
    )?;
    Ok(())
}

/// Pretty JSON. An infinite factor is written as `null`; the finite
/// `log_likelihood_ratio` next to it still carries the result.
pub fn write_json_report<W: Write>(out: &mut W, report: &SessionReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_distributions<W: Write>(
    out: &mut W,
    phonetic: &PopulationDistribution,
    non_phonetic: &PopulationDistribution,
) -> Result<()> {
    writeln!(
        out,
        "{:<10} {:>10} {:>10} {:>6}   {:>10} {:>10} {:>6}",
        "word", "phon mean", "phon var", "n", "non mean", "non var", "n"
    )?;
    for stats in &phonetic.words {
        match non_phonetic.stats(&stats.word) {
            Some(other) => writeln!(
                out,
                "{:<10} {:>10.4} {:>10.6} {:>6}   {:>10.4} {:>10.6} {:>6}",
                stats.word,
                stats.mean,
                stats.variance,
                stats.samples,
                other.mean,
                other.variance,
                other.samples
            )?,
            None => writeln!(
                out,
                "{:<10} {:>10.4} {:>10.6} {:>6}   {:>10} {:>10} {:>6}",
                stats.word, stats.mean, stats.variance, stats.samples, "-", "-", "-"
            )?,
        }
    }
    for stats in non_phonetic
        .words
        .iter()
        .filter(|s| phonetic.stats(&s.word).is_none())
    {
        writeln!(
            out,
            "{:<10} {:>10} {:>10} {:>6}   {:>10.4} {:>10.6} {:>6}",
            stats.word, "-", "-", "-", stats.mean, stats.variance, stats.samples
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Classification, Population, WordStats};
    use chrono::Utc;

    fn report(population: Population, factor: f64) -> SessionReport {
        SessionReport {
            generated_at: Utc::now(),
            scores: Vec::new(),
            classification: Classification {
                per_word: Vec::new(),
                log_likelihood_phonetic: 0.0,
                log_likelihood_non_phonetic: 0.0,
                log_likelihood_ratio: 0.0,
                posterior_phonetic: 0.5,
                verdict: Verdict {
                    population,
                    times_more_likely: factor,
                },
            },
        }
    }

    #[test]
    fn test_verdict_sentences() {
        let phonetic = Verdict {
            population: Population::Phonetic,
            times_more_likely: 12.0,
        };
        assert_eq!(
            verdict_sentence(&phonetic),
            "You are 12 times more likely to have learned to read and write phonetically."
        );

        let non = Verdict {
            population: Population::NonPhonetic,
            times_more_likely: f64::INFINITY,
        };
        assert_eq!(
            verdict_sentence(&non),
            "You are ∞ times more likely to have learned to read and write non-phonetically."
        );
    }

    #[test]
    fn test_text_report_is_padded_with_blank_lines() {
        let mut out = Vec::new();
        write_text_report(&mut out, &report(Population::Phonetic, 3.0), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nYou are 3 times more likely to have learned to read and write phonetically.\n\n"
        );
    }

    #[test]
    fn test_json_report() {
        let mut out = Vec::new();
        write_json_report(&mut out, &report(Population::NonPhonetic, 2.0)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["classification"]["verdict"]["population"], "non_phonetic");
        assert_eq!(value["classification"]["verdict"]["times_more_likely"], 2.0);
    }

    #[test]
    fn test_json_report_with_overflowing_factor() {
        let mut overflow = report(Population::Phonetic, f64::INFINITY);
        overflow.classification.log_likelihood_ratio = 812.5;

        let mut out = Vec::new();
        write_json_report(&mut out, &overflow).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let classification = &value["classification"];
        assert!(classification["verdict"]["times_more_likely"].is_null());
        assert_eq!(classification["log_likelihood_ratio"], 812.5);
        assert_eq!(classification["verdict"]["population"], "phonetic");
    }

    #[test]
    fn test_distribution_table_lists_every_word() {
        let stats = |word: &str| WordStats {
            word: word.to_string(),
            mean: 0.5,
            variance: 0.01,
            samples: 3,
        };
        let phonetic = PopulationDistribution {
            population: Population::Phonetic,
            words: vec![stats("Door"), stats("Torp")],
        };
        let non_phonetic = PopulationDistribution {
            population: Population::NonPhonetic,
            words: vec![stats("Door"), stats("Larp")],
        };

        let mut out = Vec::new();
        write_distributions(&mut out, &phonetic, &non_phonetic).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Larp"));
        assert!(text.contains("Torp"));
    }
}
