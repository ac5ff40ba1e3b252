use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_ENV: &str = "DEEPGREEN_CONFIG";
pub const BIG_BLIND_ENV: &str = "DEEPGREEN_BIG_BLIND";
pub const RESET_PLAYERS_ENV: &str = "DEEPGREEN_RESET_PLAYERS";
pub const STRATEGY_ENV: &str = "DEEPGREEN_STRATEGY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BotConfig {
    /// Big blind assumed until `Match big_blind` is reported
    pub default_big_blind: u32,
    /// Clear per-player post/stack info at every `Match round`
    pub reset_players_on_round: bool,
    /// Strategy set name passed to `deepgreen_ai::create_strategy_set`
    pub strategy: String,
    /// Our own player identifier
    pub self_player: String,
    /// Leading tokens routed to the player-info handler
    pub players: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub default_big_blind: ValueSource,
    pub reset_players_on_round: ValueSource,
    pub strategy: ValueSource,
    pub self_player: ValueSource,
    pub players: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            default_big_blind: ValueSource::Default,
            reset_players_on_round: ValueSource::Default,
            strategy: ValueSource::Default,
            self_player: ValueSource::Default,
            players: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: BotConfig,
    pub sources: ConfigSources,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            default_big_blind: 20,
            reset_players_on_round: false,
            strategy: "baseline".into(),
            self_player: "player1".into(),
            players: vec!["player1".into(), "player2".into()],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Resolves the configuration: defaults, then the TOML file (`path`, or the
/// file named by `DEEPGREEN_CONFIG`), then environment overrides.
pub fn load_with_sources(path: Option<&Path>) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = BotConfig::default();
    let mut sources = ConfigSources::default();

    let file_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(Into::into),
    };
    if let Some(path) = file_path {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.default_big_blind {
            cfg.default_big_blind = v;
            sources.default_big_blind = ValueSource::File;
        }
        if let Some(v) = f.reset_players_on_round {
            cfg.reset_players_on_round = v;
            sources.reset_players_on_round = ValueSource::File;
        }
        if let Some(v) = f.strategy {
            cfg.strategy = v;
            sources.strategy = ValueSource::File;
        }
        if let Some(v) = f.self_player {
            cfg.self_player = v;
            sources.self_player = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
    }

    if let Ok(bb) = std::env::var(BIG_BLIND_ENV)
        && !bb.is_empty()
    {
        cfg.default_big_blind = bb
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", BIG_BLIND_ENV, bb)))?;
        sources.default_big_blind = ValueSource::Env;
    }
    if let Ok(reset) = std::env::var(RESET_PLAYERS_ENV)
        && !reset.is_empty()
    {
        cfg.reset_players_on_round = parse_bool(&reset).ok_or_else(|| {
            ConfigError::Invalid(format!("Invalid {}: {}", RESET_PLAYERS_ENV, reset))
        })?;
        sources.reset_players_on_round = ValueSource::Env;
    }
    if let Ok(strategy) = std::env::var(STRATEGY_ENV)
        && !strategy.is_empty()
    {
        cfg.strategy = strategy;
        sources.strategy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    default_big_blind: Option<u32>,
    #[serde(default)]
    reset_players_on_round: Option<bool>,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    self_player: Option<String>,
    #[serde(default)]
    players: Option<Vec<String>>,
}

fn validate(cfg: &BotConfig) -> Result<(), ConfigError> {
    if cfg.default_big_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: default_big_blind must be >0".into(),
        ));
    }
    if cfg.players.is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: players must not be empty".into(),
        ));
    }
    // these names are leading tokens; they must not shadow the fixed ones
    if let Some(reserved) = cfg
        .players
        .iter()
        .find(|p| matches!(p.as_str(), "Action" | "Settings" | "Match") || p.trim().is_empty())
    {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: {:?} cannot be a player name",
            reserved
        )));
    }
    if !cfg.players.contains(&cfg.self_player) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: self_player {} is not listed in players",
            cfg.self_player
        )));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
