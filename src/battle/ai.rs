//! A module for defining AI behaviors for battle opponents.

use crate::battle::state::{BattleState, TurnRng};
use crate::player::{MoveRef, PlayerAction, Side};
use crate::pokemon::PokemonInst;
use ordered_float::OrderedFloat;
use schema::PokemonType;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use strum::{Display, EnumString};
use tracing::debug;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// A trait for any system that can decide on a battle action.
pub trait Behavior {
    /// Inspects the battle state and decides on the next action for the given side.
    fn decide_action(&self, side: Side, battle_state: &BattleState, rng: &mut TurnRng) -> PlayerAction;
}

/// Difficulty-tiered move selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentPolicy {
    pub difficulty: Difficulty,
}

impl OpponentPolicy {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }
}

impl Behavior for OpponentPolicy {
    fn decide_action(&self, side: Side, battle_state: &BattleState, rng: &mut TurnRng) -> PlayerAction {
        let team = battle_state.team(side);

        // A fainted active can only be replaced.
        if team.active_is_fainted() {
            return match team.first_available_replacement() {
                Some(index) => PlayerAction::switch_to(index),
                None => PlayerAction::struggle(),
            };
        }

        let Some(active) = team.active_pokemon() else {
            return PlayerAction::struggle();
        };
        let move_ref = match battle_state.team(side.opposite()).active_pokemon() {
            Some(target) => select_move(active, target, self.difficulty, rng),
            None => active
                .known_moves()
                .next()
                .map_or(MoveRef::Struggle, |(slot, _)| MoveRef::Slot(slot)),
        };
        PlayerAction::UseMove { move_ref }
    }
}

/// Pick a move for `attacker` against `target`. Falls back to Struggle when
/// the attacker has nothing usable.
pub fn select_move(
    attacker: &PokemonInst,
    target: &PokemonInst,
    difficulty: Difficulty,
    rng: &mut TurnRng,
) -> MoveRef {
    if attacker.is_fainted() {
        return MoveRef::Struggle;
    }
    let moves: Vec<(usize, f32, u16)> = attacker
        .known_moves()
        .map(|(slot, m)| {
            let effectiveness = PokemonType::type_effectiveness(m.move_type, &target.types);
            (slot, effectiveness, m.base_power())
        })
        .collect();
    if moves.is_empty() {
        return MoveRef::Struggle;
    }

    let slot = match difficulty {
        Difficulty::Easy => moves[rng.next_index("AI Easy Pick", moves.len())].0,
        Difficulty::Medium => {
            let super_effective: Vec<usize> = moves
                .iter()
                .filter(|(_, effectiveness, _)| *effectiveness > 1.0)
                .map(|(slot, _, _)| *slot)
                .collect();
            if super_effective.is_empty() {
                moves[rng.next_index("AI Medium Pick", moves.len())].0
            } else {
                super_effective[rng.next_index("AI Medium Pick", super_effective.len())]
            }
        }
        Difficulty::Hard => moves
            .iter()
            .max_by_key(|(slot, effectiveness, power)| {
                (OrderedFloat(effectiveness * *power as f32), Reverse(*slot))
            })
            .map(|(slot, _, _)| *slot)
            .unwrap_or(moves[0].0),
    };

    debug!(pokemon = %attacker.name, ?difficulty, slot, "ai selected move");
    MoveRef::Slot(slot)
}

/// The opponent's move for the current state.
pub fn select_opponent_move(
    battle_state: &BattleState,
    difficulty: Difficulty,
    rng: &mut TurnRng,
) -> MoveRef {
    let (Some(ai), Some(player)) = (
        battle_state.opponent.active_pokemon(),
        battle_state.player.active_pokemon(),
    ) else {
        return MoveRef::Struggle;
    };
    select_move(ai, player, difficulty, rng)
}
