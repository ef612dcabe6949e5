use clap::Parser;
use phonetic_speller::adapters::audio::SilentPlayer;
use phonetic_speller::config::{Command, OutputArgs};
use phonetic_speller::core::engine::build_transcriber;
use phonetic_speller::core::report;
use phonetic_speller::core::{Population, SessionReport};
use phonetic_speller::domain::ports::{AudioPlayer, Transcriber};
use phonetic_speller::utils::{logger, validation::Validate};
use phonetic_speller::{CliConfig, Result, SimilarityScorer, SpellingTest, TomlConfig};
use std::io::Write;

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.wants_json() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting phonetic-speller");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        std::process::exit(e.severity().exit_code());
    }
}

fn run(cli: &CliConfig) -> Result<()> {
    let config = TomlConfig::load(cli.config.as_deref())?;

    // 驗證配置
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let stdout = std::io::stdout();
    let command = cli.command();
    match &command {
        Command::Run { no_audio, output } => {
            let test = SpellingTest::from_config(&config)?;
            let player: Box<dyn AudioPlayer> = if *no_audio {
                Box::new(SilentPlayer)
            } else {
                Box::new(config.player()?)
            };

            let stdin = std::io::stdin();
            let report = test.run_interactive(stdin.lock(), stdout.lock(), player.as_ref())?;
            emit_report(&mut stdout.lock(), &report, output)
        }
        Command::Classify { output, .. } => {
            let test = SpellingTest::from_config(&config)?;
            let report = test.classify_spellings(command.spellings().as_slice())?;
            emit_report(&mut stdout.lock(), &report, output)
        }
        Command::Score { spelling, word } => {
            let scorer = SimilarityScorer::new(build_transcriber(&config)?);
            let detail = scorer.score_detailed(spelling, word);
            let mut out = stdout.lock();
            writeln!(out, "{} -> {}", detail.spelling, detail.spelling_ipa)?;
            writeln!(
                out,
                "{} -> {}",
                detail.word,
                scorer.transcriber().transcribe_all(word).join(", ")
            )?;
            writeln!(out, "similarity = {:.4}", detail.similarity)?;
            Ok(())
        }
        Command::Distributions => {
            let test = SpellingTest::from_config(&config)?;
            let classifier = test.classifier();
            report::write_distributions(
                &mut stdout.lock(),
                classifier.distribution(Population::Phonetic),
                classifier.distribution(Population::NonPhonetic),
            )
        }
    }
}

fn emit_report<W: Write>(out: &mut W, report: &SessionReport, output: &OutputArgs) -> Result<()> {
    if output.json {
        report::write_json_report(out, report)
    } else {
        report::write_text_report(out, report, output.details)
    }
}
