use hearts_players::textgen::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_GAMES: usize = 20;
const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_RETRY_MS: u64 = 1_000;
const DEFAULT_NAMES: [&str; 4] = ["Rose", "Blanche", "Dorothy", "Sophia"];

/// Root table configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TableConfig {
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_games")]
    pub games: usize,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub text_gen: TextGenConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TableConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: TableConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Four cautious players, the table used when no file is given.
    pub fn default_table() -> Self {
        Self {
            players: DEFAULT_NAMES
                .iter()
                .map(|name| PlayerConfig {
                    name: name.to_string(),
                    kind: PlayerKind::Cautious,
                    params: serde_yaml::Value::Mapping(Default::default()),
                })
                .collect(),
            seed: None,
            games: DEFAULT_GAMES,
            delay_ms: 0,
            text_gen: TextGenConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.games == 0 {
            return Err(ValidationError::InvalidField {
                field: "games".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }
        self.text_gen.validate()?;
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: format!("unknown level '{}'", self.logging.level),
            });
        }
        validate_players(&mut self.players)?;
        Ok(())
    }

    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }
}

fn default_games() -> usize {
    DEFAULT_GAMES
}

/// One seat at the table; list order is seat order starting at North.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

impl PlayerConfig {
    pub fn text_gen_params(&self) -> Result<TextGenParams, ValidationError> {
        serde_yaml::from_value(self.params.clone()).map_err(|err| ValidationError::InvalidField {
            field: format!("players[{}].params", self.name),
            message: err.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Cautious,
    Console,
    TextGen,
}

/// Per-player knobs for `text_gen` seats.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TextGenParams {
    #[serde(default)]
    pub shoot_the_moon: bool,
    #[serde(default)]
    pub count_cards: bool,
}

/// Shared settings for every `text_gen` seat.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TextGenConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_retry_ms")]
    pub retry_ms: u64,
    /// Omitted or `0` keeps asking until a reply is valid.
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

impl Default for TextGenConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            retry_ms: default_retry_ms(),
            max_attempts: None,
        }
    }
}

impl TextGenConfig {
    /// Cap on attempts per decision; `None` means unbounded.
    pub fn attempt_limit(&self) -> Option<u32> {
        self.max_attempts.filter(|&limit| limit > 0)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (label, value) in [
            ("text_gen.endpoint", &self.endpoint),
            ("text_gen.model", &self.model),
            ("text_gen.api_key_env", &self.api_key_env),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_retry_ms() -> u64 {
    DEFAULT_RETRY_MS
}

/// Console logging level plus an optional JSON log file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub level: String,
    #[serde(default)]
    pub json_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_tracing_level(),
            json_file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.level.trim().is_empty() {
            self.level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn validate_players(players: &mut [PlayerConfig]) -> Result<(), ValidationError> {
    if players.len() != 4 {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: format!("exactly four players are required, found {}", players.len()),
        });
    }

    let mut seen = HashSet::new();
    let mut consoles = 0;
    for player in players.iter_mut() {
        if player.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "players.name".to_string(),
                message: "player name must not be empty".to_string(),
            });
        }

        if !seen.insert(player.name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player name '{}' defined more than once", player.name),
            });
        }

        if player.params.is_null() {
            player.params = serde_yaml::Value::Mapping(Default::default());
        }

        match player.kind {
            PlayerKind::Console => consoles += 1,
            PlayerKind::TextGen => {
                player.text_gen_params()?;
            }
            PlayerKind::Cautious => {}
        }
    }

    if consoles > 1 {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: "only one console player can share the terminal".to_string(),
        });
    }

    Ok(())
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
