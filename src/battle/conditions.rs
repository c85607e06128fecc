use crate::moves::StatusType;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::PokemonType;

/// Why a status could not be inflicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBlock {
    AlreadyAfflicted,
    TypeImmune(PokemonType),
}

/// Eligibility check: a combatant with any status can't get another, and
/// some types are immune to specific statuses.
pub fn check_status_eligibility(pokemon: &PokemonInst, status: StatusType) -> Result<(), StatusBlock> {
    if pokemon.status.is_some() {
        return Err(StatusBlock::AlreadyAfflicted);
    }

    let immune_types: &[PokemonType] = match status {
        StatusType::Paralysis => &[PokemonType::Electric],
        StatusType::Poison | StatusType::Toxic => &[PokemonType::Poison, PokemonType::Steel],
        StatusType::Burn => &[PokemonType::Fire],
    };

    match immune_types.iter().find(|t| pokemon.has_type(**t)) {
        Some(t) => Err(StatusBlock::TypeImmune(*t)),
        None => Ok(()),
    }
}

/// Apply a status if the target is eligible. Returns the condition set.
pub fn try_inflict_status(
    pokemon: &mut PokemonInst,
    status: StatusType,
) -> Result<StatusCondition, StatusBlock> {
    check_status_eligibility(pokemon, status)?;
    let condition = match status {
        StatusType::Paralysis => StatusCondition::Paralysis,
        StatusType::Poison => StatusCondition::Poison,
        StatusType::Toxic => StatusCondition::Toxic(1),
        StatusType::Burn => StatusCondition::Burn,
    };
    pokemon.status = Some(condition);
    Ok(condition)
}

/// End-of-turn damage the current status would deal, without applying it.
pub fn status_damage(pokemon: &PokemonInst) -> u16 {
    let max_hp = pokemon.max_hp() as u32;
    let damage = match pokemon.status {
        Some(StatusCondition::Burn) => max_hp / 16,
        Some(StatusCondition::Poison) => max_hp / 8,
        Some(StatusCondition::Toxic(counter)) => max_hp * counter as u32 / 16,
        Some(StatusCondition::Paralysis) | None => 0,
    };
    damage.min(u16::MAX as u32) as u16
}

/// Apply end-of-turn status damage, then advance the toxic counter.
/// Returns the status that ticked and the HP removed, or `None` if no
/// damaging status is present.
pub fn apply_status_damage(pokemon: &mut PokemonInst) -> Option<(StatusCondition, u16)> {
    let status = pokemon.status?;
    if matches!(status, StatusCondition::Paralysis) {
        return None;
    }

    let damage = pokemon.take_damage(status_damage(pokemon));
    if let StatusCondition::Toxic(counter) = status {
        pokemon.status = Some(StatusCondition::Toxic(counter.saturating_add(1)));
    }
    Some((status, damage))
}
