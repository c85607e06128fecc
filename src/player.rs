use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides of a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn to_index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];
}

/// Which move an action uses. `Struggle` is never stored in a move slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRef {
    Slot(usize),
    Struggle,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    // Slot refers to the move's position (0-3) in the active Pokémon's move list.
    UseMove { move_ref: MoveRef },

    // The index refers to the Pokémon's position (0-5) in the side's team.
    SwitchPokemon { team_index: usize },
}

impl PlayerAction {
    pub fn use_move(slot: usize) -> Self {
        PlayerAction::UseMove {
            move_ref: MoveRef::Slot(slot),
        }
    }

    pub fn struggle() -> Self {
        PlayerAction::UseMove {
            move_ref: MoveRef::Struggle,
        }
    }

    pub fn switch_to(team_index: usize) -> Self {
        PlayerAction::SwitchPokemon { team_index }
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, PlayerAction::SwitchPokemon { .. })
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::UseMove {
                move_ref: MoveRef::Slot(slot),
            } => write!(f, "use move {}", slot),
            PlayerAction::UseMove {
                move_ref: MoveRef::Struggle,
            } => write!(f, "struggle"),
            PlayerAction::SwitchPokemon { team_index } => write!(f, "switch to {}", team_index),
        }
    }
}
