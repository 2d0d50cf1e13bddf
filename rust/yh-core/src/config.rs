//! Session configuration.
//!
//! A YAML file with four optional sections (`players`, `pacing`, `session`, `strategies`).
//! Every section has defaults, so an empty document yields a one-player human game.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Most players a single session accepts.
pub const MAX_PLAYERS: usize = 8;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Seating order. Player 0 acts first.
    #[serde(default = "default_players")]
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub strategies: StrategyConfig,
}

fn default_players() -> Vec<PlayerConfig> {
    vec![PlayerConfig::human("Player 1")]
}

/// The four automated policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Random,
    Greedy,
    #[serde(rename = "ev")]
    ExpectedValue,
    Optimal,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Random,
        StrategyKind::Greedy,
        StrategyKind::ExpectedValue,
        StrategyKind::Optimal,
    ];

    /// Player token used on the wire and in config files.
    pub fn token(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Greedy => "greedy",
            StrategyKind::ExpectedValue => "ev",
            StrategyKind::Optimal => "optimal",
        }
    }
}

/// Who makes the decisions for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Controller {
    Human,
    Ai(StrategyKind),
}

impl Controller {
    pub fn is_human(self) -> bool {
        matches!(self, Controller::Human)
    }

    pub fn strategy(self) -> Option<StrategyKind> {
        match self {
            Controller::Human => None,
            Controller::Ai(kind) => Some(kind),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Controller::Human => "human",
            Controller::Ai(kind) => kind.token(),
        }
    }

    pub fn from_token(token: &str) -> Option<Controller> {
        match token {
            "human" => Some(Controller::Human),
            "random" => Some(Controller::Ai(StrategyKind::Random)),
            "greedy" => Some(Controller::Ai(StrategyKind::Greedy)),
            "ev" => Some(Controller::Ai(StrategyKind::ExpectedValue)),
            "optimal" => Some(Controller::Ai(StrategyKind::Optimal)),
            _ => None,
        }
    }
}

impl From<Controller> for String {
    fn from(c: Controller) -> String {
        c.token().to_string()
    }
}

impl TryFrom<String> for Controller {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Controller::from_token(&s).ok_or_else(|| format!("unknown controller {s:?}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerConfig {
    pub name: String,
    pub controller: Controller,
}

impl PlayerConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
        }
    }

    pub fn ai(name: impl Into<String>, kind: StrategyKind) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Ai(kind),
        }
    }

    pub fn is_human(&self) -> bool {
        self.controller.is_human()
    }
}

/// Speed preset for automated turns and the roll animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl PacingPreset {
    pub const ORDER: [PacingPreset; 3] =
        [PacingPreset::Slow, PacingPreset::Normal, PacingPreset::Fast];

    pub fn name(self) -> &'static str {
        match self {
            PacingPreset::Slow => "slow",
            PacingPreset::Normal => "normal",
            PacingPreset::Fast => "fast",
        }
    }

    /// Step one preset faster (`+1`) or slower (`-1`). `None` past either end.
    pub fn step(self, direction: i32) -> Option<PacingPreset> {
        let idx = Self::ORDER.iter().position(|&p| p == self)? as i32 + direction.signum();
        usize::try_from(idx)
            .ok()
            .and_then(|i| Self::ORDER.get(i).copied())
    }
}

/// Tick counts for one preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PacingTicks {
    /// Pause before each automated decision.
    pub ai_delay: u32,
    /// Length of the roll animation.
    pub roll_animation: u32,
    /// How long an automated hold or score choice stays visible before it is applied.
    pub hold_show: u32,
}

impl PacingTicks {
    pub const fn new(ai_delay: u32, roll_animation: u32, hold_show: u32) -> Self {
        Self {
            ai_delay,
            roll_animation,
            hold_show,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PacingConfig {
    #[serde(default)]
    pub preset: PacingPreset,
    #[serde(default = "default_slow")]
    pub slow: PacingTicks,
    #[serde(default = "default_normal")]
    pub normal: PacingTicks,
    #[serde(default = "default_fast")]
    pub fast: PacingTicks,
}

fn default_slow() -> PacingTicks {
    PacingTicks::new(60, 90, 30)
}

fn default_normal() -> PacingTicks {
    PacingTicks::new(30, 60, 20)
}

fn default_fast() -> PacingTicks {
    PacingTicks::new(10, 20, 8)
}

impl PacingConfig {
    pub fn ticks(&self, preset: PacingPreset) -> PacingTicks {
        match preset {
            PacingPreset::Slow => self.slow,
            PacingPreset::Normal => self.normal,
            PacingPreset::Fast => self.fast,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            preset: PacingPreset::default(),
            slow: default_slow(),
            normal: default_normal(),
            fast: default_fast(),
        }
    }
}

/// Dice source selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceConfig {
    /// Seeded ChaCha8 stream.
    #[default]
    Rng,
    /// Dice derived from (seed, player, round, roll).
    EventKeyed,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Maximum number of snapshots kept for undo.
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,
    /// Banner length between turns.
    #[serde(default = "default_turn_transition_ticks")]
    pub turn_transition_ticks: u32,
    /// Fixed seed for dice and strategy randomness. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub chance: ChanceConfig,
}

fn default_undo_depth() -> usize {
    64
}

fn default_turn_transition_ticks() -> u32 {
    45
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            undo_depth: default_undo_depth(),
            turn_transition_ticks: default_turn_transition_ticks(),
            seed: None,
            chance: ChanceConfig::default(),
        }
    }
}

/// Tunables for the automated policies.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Monte Carlo samples per hold mask.
    #[serde(default = "default_ev_simulations")]
    pub ev_simulations: u32,
    /// Chance that the random policy rerolls when it still may.
    #[serde(default = "default_random_roll_again_probability")]
    pub random_roll_again_probability: f64,
    /// Chance total at or above which Greedy takes Chance before its last roll. Other
    /// categories use fixed bars.
    #[serde(default = "default_greedy_stop_threshold")]
    pub greedy_stop_threshold: u16,
}

fn default_ev_simulations() -> u32 {
    200
}

fn default_random_roll_again_probability() -> f64 {
    0.5
}

fn default_greedy_stop_threshold() -> u16 {
    25
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            ev_simulations: default_ev_simulations(),
            random_roll_again_probability: default_random_roll_again_probability(),
            greedy_stop_threshold: default_greedy_stop_threshold(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: default_players(),
            pacing: PacingConfig::default(),
            session: SessionConfig::default(),
            strategies: StrategyConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Same defaults, custom seating.
    pub fn with_players(players: Vec<PlayerConfig>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() || self.players.len() > MAX_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "players: expected 1..={MAX_PLAYERS}, got {}",
                self.players.len()
            )));
        }
        if let Some(idx) = self.players.iter().position(|p| p.name.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("players[{idx}]: empty name")));
        }
        if self.strategies.ev_simulations == 0 {
            return Err(ConfigError::Invalid(
                "strategies.ev_simulations must be > 0".to_string(),
            ));
        }
        let p = self.strategies.random_roll_again_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid(format!(
                "strategies.random_roll_again_probability must be within [0, 1], got {p}"
            )));
        }
        if self.session.undo_depth == 0 {
            return Err(ConfigError::Invalid(
                "session.undo_depth must be > 0".to_string(),
            ));
        }
        for preset in PacingPreset::ORDER {
            if self.pacing.ticks(preset).roll_animation == 0 {
                return Err(ConfigError::Invalid(format!(
                    "pacing.{}.roll_animation must be > 0",
                    preset.name()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_yaml_is_single_human() {
        let config = Config::from_yaml_str("").unwrap();
        assert_eq!(config.players, vec![PlayerConfig::human("Player 1")]);
        assert_eq!(config.pacing.preset, PacingPreset::Normal);
        assert_eq!(config.session.undo_depth, 64);
        assert_eq!(config.session.turn_transition_ticks, 45);
        assert_eq!(config.strategies.ev_simulations, 200);
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_yaml_string() {
        let yaml = r#"
players:
  - name: "Ada"
    controller: human
  - name: "Bot"
    controller: optimal
  - name: "Monte"
    controller: ev

pacing:
  preset: fast

session:
  undo_depth: 8
  seed: 42
  chance: event_keyed

strategies:
  ev_simulations: 50
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.players.len(), 3);
        assert!(config.players[0].is_human());
        assert_eq!(
            config.players[1].controller,
            Controller::Ai(StrategyKind::Optimal)
        );
        assert_eq!(
            config.players[2].controller.strategy(),
            Some(StrategyKind::ExpectedValue)
        );
        assert_eq!(config.pacing.preset, PacingPreset::Fast);
        assert_eq!(config.pacing.ticks(PacingPreset::Fast), PacingTicks::new(10, 20, 8));
        assert_eq!(config.session.undo_depth, 8);
        assert_eq!(config.session.seed, Some(42));
        assert_eq!(config.session.chance, ChanceConfig::EventKeyed);
        assert_eq!(config.session.turn_transition_ticks, 45);
        assert_eq!(config.strategies.ev_simulations, 50);
        assert!((config.strategies.random_roll_again_probability - 0.5).abs() < 1e-12);
        assert_eq!(config.strategies.greedy_stop_threshold, 25);
        config.validate().unwrap();
    }

    #[test]
    fn unknown_controller_is_a_parse_error() {
        let yaml = "players:\n  - name: x\n    controller: alphazero\n";
        assert!(matches!(
            Config::from_yaml_str(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.players.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.players = (0..9).map(|i| PlayerConfig::human(format!("p{i}"))).collect();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.players[0].name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.strategies.random_roll_again_probability = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.undo_depth = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pacing.slow.roll_animation = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "players:\n  - name: Solo\n    controller: greedy").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.players, vec![PlayerConfig::ai("Solo", StrategyKind::Greedy)]);
        assert!(matches!(
            Config::load(file.path().with_extension("missing")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn pacing_steps_stop_at_the_ends() {
        assert_eq!(PacingPreset::Normal.step(1), Some(PacingPreset::Fast));
        assert_eq!(PacingPreset::Normal.step(-1), Some(PacingPreset::Slow));
        assert_eq!(PacingPreset::Fast.step(1), None);
        assert_eq!(PacingPreset::Slow.step(-1), None);
    }

    #[test]
    fn controller_tokens_round_trip() {
        for token in ["human", "random", "greedy", "ev", "optimal"] {
            let c = Controller::from_token(token).unwrap();
            assert_eq!(c.token(), token);
        }
        assert_eq!(Controller::from_token("alphazero"), None);
    }
}
