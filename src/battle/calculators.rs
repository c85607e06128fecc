use crate::battle::state::TurnRng;
use crate::battle::stats::{effective_attack, effective_defense};
use crate::moves::MoveData;
use crate::pokemon::PokemonInst;
use crate::team::Team;
use schema::PokemonType;
use strum::IntoEnumIterator;
use tracing::debug;

pub const STAB_MULTIPLIER: f64 = 1.5;
pub const CRITICAL_MULTIPLIER: f64 = 1.5;
/// Critical hits land with probability `crit_rate / CRITICAL_RATE_DENOMINATOR`.
pub const CRITICAL_RATE_DENOMINATOR: u32 = 24;
pub const MIN_DAMAGE_ROLL: u8 = 85;
pub const MAX_DAMAGE_ROLL: u8 = 100;

/// The random parts of a damage calculation, pinned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRolls {
    pub critical: bool,
    /// Damage variance as a percentage in `85..=100`.
    pub random_percent: u8,
}

impl DamageRolls {
    pub const MAX: DamageRolls = DamageRolls {
        critical: false,
        random_percent: MAX_DAMAGE_ROLL,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub effectiveness: f32,
    pub critical: bool,
}

impl DamageOutcome {
    fn none(effectiveness: f32) -> Self {
        Self {
            damage: 0,
            effectiveness,
            critical: false,
        }
    }
}

/// Roll crit and variance, then compute damage. Zero-power moves and immune
/// defenders short-circuit before any roll is drawn.
pub fn calculate_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    rng: &mut TurnRng,
) -> DamageOutcome {
    let effectiveness = PokemonType::type_effectiveness(move_data.move_type, &defender.types);
    if move_data.base_power() == 0 || effectiveness == 0.0 {
        return DamageOutcome::none(effectiveness);
    }

    let rolls = DamageRolls {
        critical: roll_critical_hit(move_data.crit_rate, rng),
        random_percent: rng.next_in_range("Damage Variance", MIN_DAMAGE_ROLL, MAX_DAMAGE_ROLL),
    };
    damage_with_rolls(attacker, defender, move_data, rolls)
}

/// Deterministic damage for fixed rolls.
pub fn damage_with_rolls(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    rolls: DamageRolls,
) -> DamageOutcome {
    let power = move_data.base_power();
    let effectiveness = PokemonType::type_effectiveness(move_data.move_type, &defender.types);
    if power == 0 || effectiveness == 0.0 {
        return DamageOutcome::none(effectiveness);
    }

    let attack = effective_attack(attacker, move_data.category) as f64;
    let defense = effective_defense(defender, move_data.category).max(1) as f64;
    let stab = if attacker.has_type(move_data.move_type) {
        STAB_MULTIPLIER
    } else {
        1.0
    };
    let critical = if rolls.critical { CRITICAL_MULTIPLIER } else { 1.0 };
    let random = rolls.random_percent.clamp(MIN_DAMAGE_ROLL, MAX_DAMAGE_ROLL) as f64 / 100.0;

    let level_factor = 2.0 * attacker.level as f64 / 5.0 + 2.0;
    let base = ((level_factor * power as f64 * attack / defense) / 50.0 + 2.0).floor();
    let damage = (base * stab * effectiveness as f64 * critical * random)
        .floor()
        .clamp(1.0, u16::MAX as f64) as u16;

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        move_name = %move_data.name,
        base,
        stab,
        effectiveness,
        critical = rolls.critical,
        random_percent = rolls.random_percent,
        damage,
        "damage calculated"
    );

    DamageOutcome {
        damage,
        effectiveness,
        critical: rolls.critical,
    }
}

/// A rate of zero never crits and draws nothing.
pub fn roll_critical_hit(crit_rate: u8, rng: &mut TurnRng) -> bool {
    if crit_rate == 0 {
        return false;
    }
    let roll = rng.next_index("Critical Hit Check", CRITICAL_RATE_DENOMINATOR as usize);
    roll < crit_rate as usize
}

/// Attacking types that hit at least one team member for 2x or more, with
/// the worst multiplier each reaches.
pub fn team_weaknesses(team: &Team) -> Vec<(PokemonType, f32)> {
    PokemonType::iter()
        .filter_map(|attacking| {
            let worst = team
                .members
                .iter()
                .map(|member| PokemonType::type_effectiveness(attacking, &member.types))
                .fold(0.0_f32, f32::max);
            (worst >= 2.0).then_some((attacking, worst))
        })
        .collect()
}
