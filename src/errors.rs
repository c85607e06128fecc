use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the battle engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Error loading or validating a roster file
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
    /// Error loading the simulator configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error writing a battle summary as JSON
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// A side was given no team members
    #[error("{0} has no team members")]
    EmptyTeam(String),
    /// The battle already has a winner
    #[error("The battle is already over")]
    BattleOver,
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Move index is out of bounds or the slot is empty
    #[error("No move in slot {0}")]
    InvalidMoveIndex(usize),
    /// Pokemon index is out of bounds
    #[error("No team member in slot {0}")]
    InvalidPokemonIndex(usize),
    /// Switch target has no HP left
    #[error("{0} has fainted and cannot battle")]
    PokemonFainted(String),
    /// Switch target is the one already battling
    #[error("{0} is already in battle")]
    AlreadyActive(String),
    /// The active Pokemon fainted and has to be replaced before anything else
    #[error("The active Pokemon has fainted; choose a replacement")]
    ReplacementRequired,
    /// The battle already has a winner
    #[error("The battle is already over")]
    BattleOver,
    /// Action is not valid in the current battle state
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Errors related to roster files
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse roster: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("roster is empty")]
    Empty,
    #[error("roster has {0} members; a team holds at most 6")]
    TooManyMembers(usize),
    #[error("{name} knows {count} moves; at most 4 are allowed")]
    TooManyMoves { name: String, count: usize },
    #[error("{name}: level {level} is outside 1..=100")]
    InvalidLevel { name: String, level: u8 },
    #[error("{0}: a Pokemon needs one or two types")]
    InvalidTypes(String),
    #[error("{0}: base HP must be above zero")]
    ZeroHp(String),
    #[error("{name}: accuracy {accuracy} on {move_name} is above 100")]
    InvalidAccuracy {
        name: String,
        move_name: String,
        accuracy: u8,
    },
}

/// Errors related to the simulator configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("max_turns must be at least 1")]
    ZeroTurnLimit,
}

/// Result type alias for battle engine operations
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Result type alias for roster loading
pub type RosterResult<T> = Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let error = BattleEngineError::from(ActionError::InvalidMoveIndex(5));
        assert_eq!(error.to_string(), "Action error: No move in slot 5");

        let error = ActionError::PokemonFainted("Pikachu".to_string());
        assert_eq!(error.to_string(), "Pikachu has fainted and cannot battle");

        let error = RosterError::InvalidLevel {
            name: "Mew".to_string(),
            level: 0,
        };
        assert_eq!(error.to_string(), "Mew: level 0 is outside 1..=100");
    }

    #[test]
    fn test_loading_errors_convert_into_engine_errors() {
        fn load(content: &str) -> BattleResult<usize> {
            let config = crate::config::SimConfig::parse(content)?;
            let entries = crate::teams::parse_roster("[]")?;
            Ok(config.max_turns as usize + entries.len())
        }

        assert!(matches!(load("(max_turns: 0)"), Err(BattleEngineError::Config(ConfigError::ZeroTurnLimit))));

        let error = BattleEngineError::from(RosterError::Empty);
        assert_eq!(error.to_string(), "Roster error: roster is empty");

        let json = serde_json::from_str::<u32>("not json").unwrap_err();
        assert!(matches!(BattleEngineError::from(json), BattleEngineError::Output(_)));
    }
}
