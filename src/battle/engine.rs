use crate::battle::calculators::calculate_damage;
use crate::battle::conditions::apply_status_damage;
use crate::battle::move_effects::{apply_recoil, apply_status_move, EffectContext};
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng, Winner};
use crate::battle::stats::{effective_speed, move_hits};
use crate::errors::ActionError;
use crate::moves::MoveData;
use crate::player::{MoveRef, PlayerAction, Side};
use crate::pokemon::PokemonInst;
use tracing::{debug, warn};

/// Switches outrank every move priority.
pub const SWITCH_PRIORITY: i8 = 7;
/// Effective speed given to switches, above any real speed.
pub const SWITCH_SPEED: u32 = u32::MAX;

/// A submitted action annotated for ordering. The actor is captured when the
/// turn starts.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedAction {
    pub side: Side,
    pub action: PlayerAction,
    pub actor_index: usize,
    pub priority: i8,
    pub speed: u32,
}

/// Per-side bookkeeping for the faint checks of one turn.
#[derive(Debug, Clone, Copy, Default)]
struct FaintTracker {
    /// The current active's faint has been announced.
    announced: [bool; 2],
    /// The side's active was brought in after a faint this turn.
    replaced: [bool; 2],
}

/// The new state produced by one turn and everything that happened in it.
#[derive(Debug, Clone)]
pub struct TurnResult {
    pub state: BattleState,
    pub events: EventBus,
}

impl TurnResult {
    pub fn log(&self) -> Vec<String> {
        self.events.log()
    }
}

/// Main entry point for turn resolution.
///
/// Works on a copy of `battle_state` and returns the next state; the input is
/// never modified. Invalid switches are rejected and logged, never raised.
pub fn resolve_turn(
    battle_state: &BattleState,
    player_action: &PlayerAction,
    opponent_action: &PlayerAction,
    rng: &mut TurnRng,
) -> TurnResult {
    let mut state = battle_state.clone();
    let mut bus = EventBus::new();

    if state.winner.is_some() {
        debug!(turn = state.turn, "turn submitted after the battle ended");
        bus.push(BattleEvent::BattleAlreadyOver);
        return TurnResult { state, events: bus };
    }

    debug!(turn = state.turn, %player_action, %opponent_action, "resolving turn");
    bus.push(BattleEvent::TurnStarted {
        turn_number: state.turn,
    });

    // Actives that were already down when the turn began have been announced.
    let mut faints = FaintTracker::default();
    for side in Side::BOTH {
        state.team_mut(side).recount_remaining();
        faints.announced[side.to_index()] = state.team(side).active_is_fainted();
    }

    let actions = [
        (Side::Player, player_action.clone()),
        (Side::Opponent, opponent_action.clone()),
    ];
    let order = determine_action_order(&state, &actions, rng);
    debug!(order = ?order.iter().map(|a| a.side).collect::<Vec<_>>(), "action order");

    for ordered in &order {
        execute_battle_action(ordered, &mut state, &mut bus, rng, &mut faints);
        check_faints(&mut state, &mut bus, &mut faints);
        if state.winner.is_some() {
            break;
        }
    }

    if state.winner.is_none() {
        execute_end_turn_phase(&mut state, &mut bus);
        check_faints(&mut state, &mut bus, &mut faints);
    }

    state.turn += 1;
    bus.push(BattleEvent::TurnEnded);

    TurnResult { state, events: bus }
}

/// Sort actions by priority, then effective speed. Exact ties between two
/// moves are settled by a coin flip.
pub fn determine_action_order(
    battle_state: &BattleState,
    actions: &[(Side, PlayerAction)],
    rng: &mut TurnRng,
) -> Vec<OrderedAction> {
    let mut ordered: Vec<OrderedAction> = actions
        .iter()
        .map(|(side, action)| annotate_action(battle_state, *side, action))
        .collect();

    // Stable: on a switch/switch tie the player goes first.
    ordered.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.speed.cmp(&a.speed))
    });

    let exact_move_tie = match ordered.as_slice() {
        [first, second] => {
            !first.action.is_switch()
                && !second.action.is_switch()
                && first.priority == second.priority
                && first.speed == second.speed
        }
        _ => false,
    };
    if exact_move_tie && rng.next_outcome("Speed Tie") > 50 {
        ordered.swap(0, 1);
    }

    ordered
}

fn annotate_action(battle_state: &BattleState, side: Side, action: &PlayerAction) -> OrderedAction {
    let team = battle_state.team(side);
    let actor_index = team.active_index;

    let (priority, speed) = match action {
        PlayerAction::SwitchPokemon { .. } => (SWITCH_PRIORITY, SWITCH_SPEED),
        PlayerAction::UseMove { move_ref } => match team.active_pokemon() {
            Some(pokemon) => (
                resolve_move_data(pokemon, *move_ref).priority,
                effective_speed(pokemon) as u32,
            ),
            None => (0, 0),
        },
    };

    OrderedAction {
        side,
        action: action.clone(),
        actor_index,
        priority,
        speed,
    }
}

/// The move an action refers to. Empty or missing slots and an explicit
/// Struggle all use Struggle.
pub fn resolve_move_data(pokemon: &PokemonInst, move_ref: MoveRef) -> MoveData {
    match move_ref {
        MoveRef::Slot(slot) => pokemon
            .move_at(slot)
            .cloned()
            .unwrap_or_else(MoveData::struggle),
        MoveRef::Struggle => MoveData::struggle(),
    }
}

fn execute_battle_action(
    ordered: &OrderedAction,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
    faints: &mut FaintTracker,
) {
    match &ordered.action {
        PlayerAction::SwitchPokemon { team_index } => {
            execute_switch(ordered.side, *team_index, battle_state, bus, faints)
        }
        PlayerAction::UseMove { move_ref } => {
            execute_move(ordered, *move_ref, battle_state, bus, rng, faints)
        }
    }
}

/// Execute switch action - change active Pokemon. The incoming Pokemon's
/// faint has not been announced yet, even if the outgoing one's was.
fn execute_switch(
    side: Side,
    team_index: usize,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
    faints: &mut FaintTracker,
) {
    let team = battle_state.team_mut(side);

    if let Err(reason) = team.check_switch_target(team_index) {
        warn!(?side, team_index, %reason, "switch rejected");
        bus.push(BattleEvent::SwitchRejected {
            side,
            team_index,
            reason: reason.to_string(),
        });
        return;
    }

    let old_pokemon = match team.active_pokemon_mut() {
        Some(pokemon) => {
            pokemon.clear_stat_stages();
            pokemon.name.clone()
        }
        None => String::new(),
    };
    team.active_index = team_index;
    faints.announced[side.to_index()] = false;
    let new_pokemon = team.members[team_index].name.clone();

    bus.push(BattleEvent::PokemonSwitched {
        side,
        old_pokemon,
        new_pokemon,
    });
}

fn execute_move(
    ordered: &OrderedAction,
    move_ref: MoveRef,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
    faints: &FaintTracker,
) {
    let side = ordered.side;
    let attacker_team = battle_state.team(side);
    let Some(attacker) = attacker_team.members.get(ordered.actor_index) else {
        return;
    };
    if attacker.is_fainted() || attacker_team.active_index != ordered.actor_index {
        debug!(pokemon = %attacker.name, "actor can no longer move");
        return;
    }

    let move_data = resolve_move_data(attacker, move_ref);
    let attacker_name = attacker.name.clone();
    bus.push(BattleEvent::MoveUsed {
        side,
        pokemon: attacker_name.clone(),
        move_used: move_data.name.clone(),
    });

    // The move lands on whoever is on the field now, unless the original
    // target fainted this turn and was replaced.
    let defender_team = battle_state.team(side.opposite());
    let target_standing = !faints.replaced[side.opposite().to_index()]
        && !defender_team.active_is_fainted();

    let context = EffectContext {
        attacker_side: side,
        attacker_index: ordered.actor_index,
        defender_index: target_standing.then_some(defender_team.active_index),
    };

    if context.defender_index.is_none() && move_data.needs_target() {
        bus.push(BattleEvent::NoTarget {
            attacker: attacker_name,
        });
        return;
    }

    if !move_hits(&move_data, rng) {
        bus.push(BattleEvent::MoveMissed {
            attacker: attacker_name,
            move_used: move_data.name.clone(),
        });
        return;
    }

    if move_data.is_damaging() {
        let damage_dealt = execute_damaging_move(battle_state, &context, &move_data, bus, rng);
        apply_recoil(battle_state, &context, &move_data, damage_dealt, bus);
    } else {
        apply_status_move(battle_state, &context, &move_data, bus);
    }
}

/// Returns the HP actually removed from the defender.
fn execute_damaging_move(
    battle_state: &mut BattleState,
    context: &EffectContext,
    move_data: &MoveData,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> u16 {
    let Some(defender_index) = context.defender_index else {
        return 0;
    };
    let defender_side = context.attacker_side.opposite();

    let outcome = {
        let attacker = battle_state
            .team(context.attacker_side)
            .members
            .get(context.attacker_index);
        let defender = battle_state.team(defender_side).members.get(defender_index);
        let (Some(attacker), Some(defender)) = (attacker, defender) else {
            return 0;
        };
        calculate_damage(attacker, defender, move_data, rng)
    };

    let Some(defender) = battle_state
        .team_mut(defender_side)
        .members
        .get_mut(defender_index)
    else {
        return 0;
    };

    if outcome.damage == 0 {
        bus.push(BattleEvent::NoEffect {
            target: defender.name.clone(),
            immune: outcome.effectiveness == 0.0,
        });
        return 0;
    }

    let removed = defender.take_damage(outcome.damage);
    bus.push(BattleEvent::DamageDealt {
        target: defender.name.clone(),
        damage: removed,
        remaining_hp: defender.current_hp(),
    });
    bus.push(BattleEvent::AttackTypeEffectiveness {
        multiplier: outcome.effectiveness,
    });
    if outcome.critical {
        bus.push(BattleEvent::CriticalHit);
    }
    removed
}

/// Announce new faints, bring in the opponent's replacement and settle the
/// winner.
fn check_faints(battle_state: &mut BattleState, bus: &mut EventBus, faints: &mut FaintTracker) {
    if battle_state.winner.is_some() {
        return;
    }

    for side in Side::BOTH {
        let team = battle_state.team_mut(side);
        team.recount_remaining();

        if !team.active_is_fainted() || faints.announced[side.to_index()] {
            continue;
        }
        faints.announced[side.to_index()] = true;

        let fainted = team
            .active_pokemon()
            .map(|p| p.name.clone())
            .unwrap_or_default();
        debug!(?side, pokemon = %fainted, remaining = team.remaining_count, "pokemon fainted");
        bus.push(BattleEvent::PokemonFainted {
            side,
            pokemon: fainted.clone(),
        });

        if team.remaining_count == 0 {
            continue;
        }
        match side {
            // The player picks a replacement with an explicit switch.
            Side::Player => bus.push(BattleEvent::ReplacementNeeded { side }),
            Side::Opponent => {
                if let Some(replacement) = team.first_available_replacement() {
                    team.active_index = replacement;
                    faints.announced[side.to_index()] = false;
                    faints.replaced[side.to_index()] = true;
                    bus.push(BattleEvent::PokemonSwitched {
                        side,
                        old_pokemon: fainted,
                        new_pokemon: team.members[replacement].name.clone(),
                    });
                }
            }
        }
    }

    check_win_conditions(battle_state, bus);
}

/// Check win conditions and update battle state accordingly
fn check_win_conditions(battle_state: &mut BattleState, bus: &mut EventBus) {
    let player_has_pokemon = battle_state.player.remaining_count > 0;
    let opponent_has_pokemon = battle_state.opponent.remaining_count > 0;

    let winner = match (player_has_pokemon, opponent_has_pokemon) {
        (false, false) => Winner::Draw,
        (false, true) => {
            bus.push(BattleEvent::SideDefeated { side: Side::Player });
            Winner::Opponent
        }
        (true, false) => {
            bus.push(BattleEvent::SideDefeated {
                side: Side::Opponent,
            });
            Winner::Player
        }
        (true, true) => return,
    };

    debug!(?winner, "battle ended");
    battle_state.winner = Some(winner);
    bus.push(BattleEvent::BattleEnded { winner });
}

/// Status damage for each side's active Pokemon, player first.
pub fn execute_end_turn_phase(battle_state: &mut BattleState, bus: &mut EventBus) {
    for side in Side::BOTH {
        let Some(pokemon) = battle_state.team_mut(side).active_pokemon_mut() else {
            continue;
        };
        if pokemon.is_fainted() {
            continue;
        }
        if let Some((status, damage)) = apply_status_damage(pokemon) {
            bus.push(BattleEvent::StatusDamage {
                target: pokemon.name.clone(),
                status,
                damage,
                remaining_hp: pokemon.current_hp(),
            });
        }
    }
}

/// Host-side check of an action before it is submitted. The resolver itself
/// tolerates anything; this is for callers that want to refuse bad input.
pub fn validate_player_action(
    battle_state: &BattleState,
    side: Side,
    action: &PlayerAction,
) -> Result<(), ActionError> {
    if battle_state.winner.is_some() {
        return Err(ActionError::BattleOver);
    }

    let team = battle_state.team(side);
    match action {
        PlayerAction::UseMove { move_ref } => {
            let pokemon = team
                .active_pokemon()
                .ok_or_else(|| ActionError::InvalidAction("No active Pokemon".to_string()))?;
            if pokemon.is_fainted() {
                return Err(ActionError::ReplacementRequired);
            }
            match move_ref {
                MoveRef::Slot(slot) if pokemon.move_at(*slot).is_none() => {
                    Err(ActionError::InvalidMoveIndex(*slot))
                }
                _ => Ok(()),
            }
        }
        PlayerAction::SwitchPokemon { team_index } => {
            team.check_switch_target(*team_index)?;
            if *team_index == team.active_index {
                return Err(ActionError::AlreadyActive(
                    team.members[*team_index].name.clone(),
                ));
            }
            Ok(())
        }
    }
}

/// Every action `validate_player_action` would accept. Switch-only while a
/// replacement is required.
pub fn get_valid_actions(battle_state: &BattleState, side: Side) -> Vec<PlayerAction> {
    if battle_state.winner.is_some() {
        return Vec::new();
    }

    let team = battle_state.team(side);
    let mut actions = Vec::new();

    if let Some(pokemon) = team.active_pokemon().filter(|p| !p.is_fainted()) {
        let moves: Vec<PlayerAction> = pokemon
            .known_moves()
            .map(|(slot, _)| PlayerAction::use_move(slot))
            .collect();
        if moves.is_empty() {
            actions.push(PlayerAction::struggle());
        } else {
            actions.extend(moves);
        }
    }

    actions.extend(
        team.valid_switch_targets()
            .into_iter()
            .map(PlayerAction::switch_to),
    );
    actions
}
