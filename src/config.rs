use crate::battle::ai::Difficulty;
use crate::errors::ConfigError;
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_TURNS: u32 = 500;

/// Settings for an automated battle. Every field has a default, so an empty
/// `()` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub difficulty: Difficulty,
    /// Fixed seed for a replayable battle; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Safety cap for battles that would otherwise run forever.
    pub max_turns: u32,
    pub weather: String,
    pub terrain: String,
    pub player_roster: Option<PathBuf>,
    pub opponent_roster: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: None,
            max_turns: DEFAULT_MAX_TURNS,
            weather: "none".to_string(),
            terrain: "none".to_string(),
            player_roster: None,
            opponent_roster: None,
        }
    }
}

impl SimConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        let config: SimConfig = options.from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns == 0 {
            return Err(ConfigError::ZeroTurnLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(SimConfig::parse("()").unwrap(), SimConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = SimConfig::parse(
            r#"(
                difficulty: hard,
                seed: 42,
                max_turns: 100,
                weather: "rain",
                player_roster: "data/rosters/red.ron",
            )"#,
        )
        .unwrap();

        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_turns, 100);
        assert_eq!(config.weather, "rain");
        assert_eq!(config.terrain, "none");
        assert_eq!(config.player_roster, Some(PathBuf::from("data/rosters/red.ron")));
        assert_eq!(config.opponent_roster, None);
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = SimConfig::parse(include_str!("../data/battle-sim.ron")).unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.max_turns, 200);
        assert_eq!(config.opponent_roster, Some(PathBuf::from("data/rosters/blue.ron")));
    }

    #[test]
    fn test_zero_turn_limit_is_rejected() {
        assert!(matches!(
            SimConfig::parse("(max_turns: 0)"),
            Err(ConfigError::ZeroTurnLimit)
        ));
    }

    #[test]
    fn test_unknown_difficulty_is_a_parse_error() {
        assert!(matches!(
            SimConfig::parse("(difficulty: nightmare)"),
            Err(ConfigError::Parse(_))
        ));
    }
}
