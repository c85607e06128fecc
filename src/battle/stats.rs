use crate::battle::state::TurnRng;
use crate::moves::MoveData;
use crate::pokemon::{BaseStats, PokemonInst, StatusCondition, MAX_STAT_STAGE, MIN_STAT_STAGE};
use schema::{MoveCategory, Nature, StatType};

pub const DEFAULT_IV: u16 = 31;
pub const DEFAULT_EV: u16 = 0;

/// Calculate effective attack stat for the move's category, stages included
pub fn effective_attack(pokemon: &PokemonInst, category: MoveCategory) -> u16 {
    let stat = match category {
        MoveCategory::Physical => StatType::Atk,
        MoveCategory::Special => StatType::SpAtk,
        MoveCategory::Status => return 0,
    };
    effective_stat(pokemon, stat)
}

/// Calculate effective defense stat against the move's category, stages included
pub fn effective_defense(pokemon: &PokemonInst, category: MoveCategory) -> u16 {
    let stat = match category {
        MoveCategory::Physical => StatType::Def,
        MoveCategory::Special => StatType::SpDef,
        MoveCategory::Status => return 0,
    };
    effective_stat(pokemon, stat)
}

/// Calculate effective speed including stat stages and paralysis
pub fn effective_speed(pokemon: &PokemonInst) -> u16 {
    let speed = effective_stat(pokemon, StatType::Spe);

    // Paralysis halves speed after the stage multiplier
    if matches!(pokemon.status, Some(StatusCondition::Paralysis)) {
        speed / 2
    } else {
        speed
    }
}

pub fn effective_stat(pokemon: &PokemonInst, stat: StatType) -> u16 {
    apply_stat_stage_multiplier(pokemon.stats.get(stat), pokemon.get_stat_stage(stat))
}

/// Apply stat stage multipliers according to Pokemon formula
/// Stages range from -6 to +6
/// Negative stages: (2 / (2 + |stage|))
/// Positive stages: ((2 + stage) / 2)
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    let base = base_stat as u32;

    let stat = match stage.clamp(MIN_STAT_STAGE, MAX_STAT_STAGE) as i32 {
        0 => base,
        s if s > 0 => base * (2 + s as u32) / 2,
        s => base * 2 / (2 + s.unsigned_abs()),
    };
    stat.min(u16::MAX as u32) as u16
}

/// Adds `delta_stages` to a stat stage and clamps to [-6, 6]. Returns the
/// change that was applied.
pub fn boost_stat(pokemon: &mut PokemonInst, stat: StatType, delta_stages: i8) -> i8 {
    pokemon.boost_stat(stat, delta_stages)
}

/// Roll accuracy for a move. Moves without an accuracy never miss.
pub fn move_hits(move_data: &MoveData, rng: &mut TurnRng) -> bool {
    let Some(accuracy) = move_data.accuracy else {
        return true;
    };
    let roll = rng.next_outcome("Accuracy Check");
    roll <= accuracy
}

/// HP = floor((2·base + IV + floor(EV/4)) · level / 100) + level + 10
pub fn calculate_hp(base: u16, level: u8, iv: u16, ev: u16) -> u16 {
    let level = level as u32;
    let scaled = (2 * base as u32 + iv as u32 + ev as u32 / 4) * level / 100;
    (scaled + level + 10).min(u16::MAX as u32) as u16
}

/// Other stat = floor((floor((2·base + IV + floor(EV/4)) · level / 100) + 5) · nature)
pub fn calculate_stat(base: u16, level: u8, iv: u16, ev: u16, nature_multiplier: f64) -> u16 {
    let scaled = (2 * base as u32 + iv as u32 + ev as u32 / 4) * level as u32 / 100;
    (((scaled + 5) as f64) * nature_multiplier)
        .floor()
        .min(u16::MAX as f64) as u16
}

/// Turn species base stats into battle stats for a level and nature.
pub fn calculate_battle_stats(base: &BaseStats, level: u8, nature: Nature) -> BaseStats {
    let stat = |value: u16, stat_type: StatType| {
        calculate_stat(value, level, DEFAULT_IV, DEFAULT_EV, nature.multiplier(stat_type))
    };

    BaseStats {
        hp: calculate_hp(base.hp, level, DEFAULT_IV, DEFAULT_EV),
        attack: stat(base.attack, StatType::Atk),
        defense: stat(base.defense, StatType::Def),
        sp_attack: stat(base.sp_attack, StatType::SpAtk),
        sp_defense: stat(base.sp_defense, StatType::SpDef),
        speed: stat(base.speed, StatType::Spe),
    }
}
