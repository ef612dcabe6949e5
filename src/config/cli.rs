use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "phonetic-speller")]
#[command(about = "Estimate whether you learned to read phonetically or by memorization")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Take the listening and spelling test (default)
    Run {
        /// Don't play audio clips
        #[arg(long)]
        no_audio: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Classify spellings without prompting, one per target word in order
    Classify {
        #[arg(value_name = "SPELLING", conflicts_with = "spellings")]
        positional: Vec<String>,

        /// Comma separated spellings
        #[arg(long, value_delimiter = ',')]
        spellings: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the similarity of one spelling to a target word
    Score {
        spelling: String,
        word: String,
    },

    /// Print the per-word statistics of both reference populations
    Distributions,
}

#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Print the per-word breakdown and posterior probability
    #[arg(long)]
    pub details: bool,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "details")]
    pub json: bool,
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run {
            no_audio: false,
            output: OutputArgs::default(),
        })
    }

    pub fn wants_json(&self) -> bool {
        matches!(
            &self.command,
            Some(Command::Run { output, .. }) | Some(Command::Classify { output, .. }) if output.json
        )
    }
}

impl Command {
    /// Spellings given to `classify`, from positionals or `--spellings`.
    pub fn spellings(&self) -> Vec<String> {
        match self {
            Command::Classify {
                positional,
                spellings,
                ..
            } => {
                if positional.is_empty() {
                    spellings.iter().map(|s| s.trim().to_string()).collect()
                } else {
                    positional.clone()
                }
            }
            _ => Vec::new(),
        }
    }
}
