use crate::battle::conditions::try_inflict_status;
use crate::battle::state::{BattleEvent, BattleState, EventBus};
use crate::moves::{MoveData, MoveEffect, Target};
use crate::player::Side;
use crate::pokemon::PokemonInst;
use tracing::debug;

/// Who is acting on whom for one move execution.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext {
    pub attacker_side: Side,
    pub attacker_index: usize,
    /// `None` when the opposing side has nobody standing.
    pub defender_index: Option<usize>,
}

impl EffectContext {
    fn pokemon_mut<'a>(&self, state: &'a mut BattleState, target: Target) -> Option<&'a mut PokemonInst> {
        match target {
            Target::User => state
                .team_mut(self.attacker_side)
                .members
                .get_mut(self.attacker_index),
            Target::Target => {
                let index = self.defender_index?;
                state
                    .team_mut(self.attacker_side.opposite())
                    .members
                    .get_mut(index)
            }
        }
    }
}

/// Run the named-move handler for a status-category move. Moves with no
/// modelled effect do nothing.
pub fn apply_status_move(
    state: &mut BattleState,
    context: &EffectContext,
    move_data: &MoveData,
    bus: &mut EventBus,
) {
    match move_data.effect {
        MoveEffect::StatChange { target, stat, stages } => {
            let Some(pokemon) = context.pokemon_mut(state, target) else {
                bus.push(BattleEvent::NothingHappened);
                return;
            };
            let old_stage = pokemon.get_stat_stage(stat);
            let applied = pokemon.boost_stat(stat, stages);
            if applied == 0 {
                bus.push(BattleEvent::StatChangeBlocked {
                    target: pokemon.name.clone(),
                    stat,
                    rising: stages > 0,
                });
            } else {
                bus.push(BattleEvent::StatStageChanged {
                    target: pokemon.name.clone(),
                    stat,
                    old_stage,
                    new_stage: old_stage + applied,
                });
            }
        }
        MoveEffect::InflictStatus(status) => {
            let Some(pokemon) = context.pokemon_mut(state, Target::Target) else {
                bus.push(BattleEvent::NothingHappened);
                return;
            };
            match try_inflict_status(pokemon, status) {
                Ok(_) => bus.push(BattleEvent::PokemonStatusApplied {
                    target: pokemon.name.clone(),
                    status,
                }),
                Err(block) => {
                    debug!(target = %pokemon.name, ?status, ?block, "status rejected");
                    bus.push(BattleEvent::StatusMoveFailed {
                        target: pokemon.name.clone(),
                    });
                }
            }
        }
        MoveEffect::None | MoveEffect::Recoil { .. } => {
            bus.push(BattleEvent::NothingHappened);
        }
    }
}

/// Self-damage after a recoil move, as a fraction of the HP the hit removed.
pub fn apply_recoil(
    state: &mut BattleState,
    context: &EffectContext,
    move_data: &MoveData,
    damage_dealt: u16,
    bus: &mut EventBus,
) {
    let MoveEffect::Recoil {
        numerator,
        denominator,
    } = move_data.effect
    else {
        return;
    };
    if damage_dealt == 0 || denominator == 0 {
        return;
    }
    let Some(attacker) = context.pokemon_mut(state, Target::User) else {
        return;
    };

    let recoil = (damage_dealt as u32 * numerator as u32 / denominator as u32) as u16;
    if recoil == 0 {
        return;
    }
    let removed = attacker.take_damage(recoil);
    bus.push(BattleEvent::RecoilDamage {
        pokemon: attacker.name.clone(),
        damage: removed,
        remaining_hp: attacker.current_hp(),
    });
}
