use crate::adapters::audio::CommandPlayer;
use crate::core::classifier::{DEFAULT_MIN_VARIANCE, DEFAULT_PRIOR_PHONETIC};
use crate::core::session::Clip;
use crate::phonetics::UnknownWordStrategy;
use crate::utils::error::{Result, SpellerError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "phonetic-speller.toml";

pub const DEFAULT_WORDS: [&str; 11] = [
    "Blarb", "Door", "Bund", "Lond", "Fifer", "Weird", "Larp", "Fint", "Fortry", "Torp", "Laugh",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub test: TestConfig,
    pub reference: ReferenceConfig,
    pub phonetics: PhoneticsConfig,
    pub playback: PlaybackConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    pub words: Vec<String>,
    pub audio_dir: String,
    pub audio_extension: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            audio_dir: ".".to_string(),
            audio_extension: "wav".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub phonetic: String,
    pub non_phonetic: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            phonetic: "phonetic_spelling.csv".to_string(),
            non_phonetic: "non_phonetic_spelling.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneticsConfig {
    /// Extra CMU-format dictionary merged over the built-in lexicon.
    pub lexicon: Option<String>,
    pub unknown_words: UnknownWordStrategy,
    pub stress_marks: bool,
}

impl Default for PhoneticsConfig {
    fn default() -> Self {
        Self {
            lexicon: None,
            unknown_words: UnknownWordStrategy::Rules,
            stress_marks: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub min_variance: f64,
    pub prior_phonetic: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_variance: DEFAULT_MIN_VARIANCE,
            prior_phonetic: DEFAULT_PRIOR_PHONETIC,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SpellerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SpellerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 指定路徑時必須存在；未指定時預設檔不存在就使用內建預設值
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                tracing::info!("📁 Loading configuration from: {}", DEFAULT_CONFIG_PATH);
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                tracing::info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
                Ok(Self::default())
            }
        }
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SpellerError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_word_list("test.words", &self.test.words)?;
        validation::validate_path("test.audio_dir", &self.test.audio_dir)?;
        validation::validate_non_empty_string("test.audio_extension", &self.test.audio_extension)?;

        validation::validate_path("reference.phonetic", &self.reference.phonetic)?;
        validation::validate_path("reference.non_phonetic", &self.reference.non_phonetic)?;

        if let Some(lexicon) = &self.phonetics.lexicon {
            validation::validate_path("phonetics.lexicon", lexicon)?;
        }
        if let Some(command) = &self.playback.command {
            validation::validate_non_empty_string("playback.command", command)?;
        }

        validation::validate_positive("classifier.min_variance", self.classifier.min_variance)?;
        validation::validate_open_range(
            "classifier.prior_phonetic",
            self.classifier.prior_phonetic,
            0.0,
            1.0,
        )?;

        Ok(())
    }

    pub fn words(&self) -> &[String] {
        &self.test.words
    }

    pub fn clip_path(&self, word: &str) -> PathBuf {
        let extension = self.test.audio_extension.trim_start_matches('.');
        Path::new(&self.test.audio_dir).join(format!("{}.{}", word, extension))
    }

    /// One clip per target word, in test order.
    pub fn clips(&self) -> Vec<Clip> {
        self.test
            .words
            .iter()
            .map(|word| Clip {
                word: word.clone(),
                path: self.clip_path(word),
            })
            .collect()
    }

    /// 取得播放器：設定檔優先，否則使用平台預設
    pub fn player(&self) -> Result<CommandPlayer> {
        match &self.playback.command {
            Some(command) => Ok(CommandPlayer::new(
                command.clone(),
                self.playback.args.clone().unwrap_or_default(),
            )),
            None => CommandPlayer::platform_default().ok_or_else(|| {
                SpellerError::MissingConfigError {
                    field: "playback.command".to_string(),
                }
            }),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_cover_the_eleven_word_test() {
        let config = TomlConfig::default();
        assert_eq!(config.words().len(), 11);
        assert_eq!(config.words()[0], "Blarb");
        assert_eq!(config.words()[10], "Laugh");
        assert_eq!(config.reference.phonetic, "phonetic_spelling.csv");
        assert_eq!(config.clip_path("Blarb"), Path::new("./Blarb.wav"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[test]
words = ["Door", "Torp"]
audio_dir = "audio"
audio_extension = ".mp3"

[phonetics]
unknown_words = "mark"

[classifier]
prior_phonetic = 0.3
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.words(), ["Door", "Torp"]);
        assert_eq!(config.phonetics.unknown_words, UnknownWordStrategy::Mark);
        assert!(config.phonetics.stress_marks);
        assert_eq!(config.classifier.prior_phonetic, 0.3);
        assert_eq!(config.classifier.min_variance, DEFAULT_MIN_VARIANCE);
        assert_eq!(config.reference.non_phonetic, "non_phonetic_spelling.csv");

        let clips = config.clips();
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[1].path, Path::new("audio").join("Torp.mp3"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PHONETIC_SPELLER_TEST_DATA", "/data/spelling");

        let toml_content = r#"
[reference]
phonetic = "${PHONETIC_SPELLER_TEST_DATA}/phonetic.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.reference.phonetic, "/data/spelling/phonetic.csv");

        std::env::remove_var("PHONETIC_SPELLER_TEST_DATA");
    }

    #[test]
    fn test_config_validation() {
        let invalid = [
            "[test]\nwords = []\n",
            "[test]\nwords = [\"Door\", \"door\"]\n",
            "[reference]\nphonetic = \"\"\n",
            "[classifier]\nmin_variance = 0.0\n",
            "[classifier]\nprior_phonetic = 1.0\n",
            "[playback]\ncommand = \" \"\n",
        ];
        for content in invalid {
            let config = TomlConfig::from_toml_str(content).unwrap();
            assert!(config.validate().is_err(), "expected invalid: {}", content);
        }
    }

    #[test]
    fn test_unknown_strategy_is_rejected_at_parse_time() {
        assert!(TomlConfig::from_toml_str("[phonetics]\nunknown_words = \"guess\"\n").is_err());
    }

    #[test]
    fn test_configured_player() {
        let config =
            TomlConfig::from_toml_str("[playback]\ncommand = \"mpv\"\nargs = [\"--no-video\"]\n")
                .unwrap();
        let player = config.player().unwrap();
        assert_eq!(player, CommandPlayer::new("mpv", vec!["--no-video".to_string()]));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[test]\nwords = [\"Larp\"]\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.words(), ["Larp"]);

        assert!(TomlConfig::load(Some("no/such/config.toml")).is_err());
    }
}
