//! Pokemon Battle Engine
//!
//! A turn-based, two-sided creature battle simulator: type effectiveness,
//! stat stages, status conditions, a pure turn resolver that returns a new
//! state plus a battle log, and a difficulty-tiered opponent.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod moves;
pub mod player;
pub mod pokemon;
pub mod session;
pub mod team;
pub mod teams;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{MoveCategory, Nature, PokemonType, StatType};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::ai::{Behavior, Difficulty, OpponentPolicy};
pub use battle::engine::{get_valid_actions, resolve_turn, validate_player_action, TurnResult};
pub use battle::state::{BattleEvent, BattleState, EventBus, TurnRng, Winner};

// Core runtime types for a battle.
pub use moves::{MoveData, MoveEffect, StatusType};
pub use player::{MoveRef, PlayerAction, Side};
pub use pokemon::{BaseStats, PokemonInst, StatusCondition};
pub use team::Team;

// Hosting a battle.
pub use config::SimConfig;
pub use errors::{BattleEngineError, BattleResult};
pub use session::{BattleSession, TurnReport};
pub use teams::{build_team, load_roster, parse_roster};
