use crate::battle::stats::calculate_battle_stats;
use crate::moves::MoveData;
use schema::{Nature, PokemonType, StatType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const MAX_MOVES: usize = 4;
pub const MIN_STAT_STAGE: i8 = -6;
pub const MAX_STAT_STAGE: i8 = 6;

/// Persistent status. A combatant holds at most one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCondition {
    Paralysis,
    Poison,
    /// Badly poisoned. The counter starts at 1 and grows each end of turn.
    Toxic(u8),
    Burn,
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCondition::Paralysis => write!(f, "paralysis"),
            StatusCondition::Poison => write!(f, "poison"),
            StatusCondition::Toxic(_) => write!(f, "toxic"),
            StatusCondition::Burn => write!(f, "burn"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn new(hp: u16, attack: u16, defense: u16, sp_attack: u16, sp_defense: u16, speed: u16) -> Self {
        Self {
            hp,
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        }
    }

    pub fn get(&self, stat: StatType) -> u16 {
        match stat {
            StatType::Atk => self.attack,
            StatType::Def => self.defense,
            StatType::SpAtk => self.sp_attack,
            StatType::SpDef => self.sp_defense,
            StatType::Spe => self.speed,
        }
    }
}

/// A creature as it exists inside a battle.
///
/// `stats` holds the prepared battle values (HP included); stage modifiers are
/// applied on read and never written back into `stats`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PokemonInst {
    pub species_id: u16,
    pub name: String,
    pub level: u8,
    pub types: Vec<PokemonType>,
    pub stats: BaseStats,
    curr_hp: u16,
    max_hp: u16,
    stat_stages: HashMap<StatType, i8>,
    pub status: Option<StatusCondition>,
    pub nature: Nature,
    pub held_item: Option<String>,
    pub ability: Option<String>,
    pub moves: [Option<MoveData>; MAX_MOVES],
}

impl PokemonInst {
    /// Build a combatant from already-prepared stats. Starts at full HP with
    /// neutral stages; moves past the fourth are dropped.
    pub fn new(
        species_id: u16,
        name: &str,
        level: u8,
        types: Vec<PokemonType>,
        stats: BaseStats,
        moves: Vec<MoveData>,
    ) -> Self {
        let mut move_array = [const { None }; MAX_MOVES];
        for (slot, move_data) in moves.into_iter().take(MAX_MOVES).enumerate() {
            move_array[slot] = Some(move_data);
        }

        Self {
            species_id,
            name: name.to_string(),
            level,
            types,
            stats,
            curr_hp: stats.hp,
            max_hp: stats.hp,
            stat_stages: HashMap::new(),
            status: None,
            nature: Nature::default(),
            held_item: None,
            ability: None,
            moves: move_array,
        }
    }

    /// Build a combatant from species base stats, preparing battle stats for
    /// `level` and `nature` with default IVs and EVs.
    pub fn from_species(
        species_id: u16,
        name: &str,
        level: u8,
        types: Vec<PokemonType>,
        base_stats: &BaseStats,
        nature: Nature,
        moves: Vec<MoveData>,
    ) -> Self {
        let stats = calculate_battle_stats(base_stats, level, nature);
        let mut pokemon = Self::new(species_id, name, level, types, stats, moves);
        pokemon.nature = nature;
        pokemon
    }

    pub fn current_hp(&self) -> u16 {
        self.curr_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.curr_hp == 0
    }

    /// Clamps to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: u16) {
        self.curr_hp = hp.min(self.max_hp);
    }

    pub fn set_hp_to_max(&mut self) {
        self.curr_hp = self.max_hp;
    }

    /// Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let removed = amount.min(self.curr_hp);
        self.curr_hp -= removed;
        removed
    }

    /// Fainted combatants are not healed. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let restored = amount.min(self.max_hp - self.curr_hp);
        self.curr_hp += restored;
        restored
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    pub fn get_stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    pub fn set_stat_stage(&mut self, stat: StatType, stage: i8) {
        let clamped = stage.clamp(MIN_STAT_STAGE, MAX_STAT_STAGE);
        if clamped == 0 {
            self.stat_stages.remove(&stat);
        } else {
            self.stat_stages.insert(stat, clamped);
        }
    }

    /// Adds `delta` to the stage and returns the change that actually stuck.
    pub fn modify_stat_stage(&mut self, stat: StatType, delta: i8) -> i8 {
        let old_stage = self.get_stat_stage(stat);
        self.set_stat_stage(stat, old_stage.saturating_add(delta));
        self.get_stat_stage(stat) - old_stage
    }

    /// Shifts a stage by `delta_stages`, clamped to [-6, 6]. Never fails;
    /// returns the change that was applied.
    pub fn boost_stat(&mut self, stat: StatType, delta_stages: i8) -> i8 {
        self.modify_stat_stage(stat, delta_stages)
    }

    pub fn clear_stat_stages(&mut self) {
        self.stat_stages.clear();
    }

    pub fn move_at(&self, slot: usize) -> Option<&MoveData> {
        self.moves.get(slot).and_then(|m| m.as_ref())
    }

    /// Occupied move slots with their indices.
    pub fn known_moves(&self) -> impl Iterator<Item = (usize, &MoveData)> {
        self.moves
            .iter()
            .enumerate()
            .filter_map(|(slot, m)| m.as_ref().map(|m| (slot, m)))
    }

    pub fn has_moves(&self) -> bool {
        self.known_moves().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::MoveCategory;

    fn sample() -> PokemonInst {
        PokemonInst::new(
            25,
            "Pikachu",
            50,
            vec![PokemonType::Electric],
            BaseStats::new(95, 75, 50, 70, 60, 110),
            vec![
                MoveData::new("Thunderbolt", PokemonType::Electric, MoveCategory::Special, Some(90), Some(100)),
                MoveData::new("Quick Attack", PokemonType::Normal, MoveCategory::Physical, Some(40), Some(100))
                    .with_priority(1),
            ],
        )
    }

    #[test]
    fn test_new_starts_at_full_hp() {
        let pikachu = sample();
        assert_eq!(pikachu.current_hp(), 95);
        assert_eq!(pikachu.max_hp(), 95);
        assert_eq!(pikachu.status, None);
        assert_eq!(pikachu.known_moves().count(), 2);
        assert!(pikachu.move_at(2).is_none());
    }

    #[test]
    fn test_damage_and_hp_clamping() {
        let mut pikachu = sample();
        assert_eq!(pikachu.take_damage(40), 40);
        assert_eq!(pikachu.current_hp(), 55);
        assert_eq!(pikachu.take_damage(200), 55);
        assert!(pikachu.is_fainted());

        assert_eq!(pikachu.heal(30), 0);

        pikachu.set_hp(500);
        assert_eq!(pikachu.current_hp(), 95);

        pikachu.set_hp(90);
        assert_eq!(pikachu.heal(30), 5);
        assert_eq!(pikachu.current_hp(), 95);
    }

    #[test]
    fn test_from_species_prepares_stats() {
        let base = BaseStats::new(35, 55, 40, 50, 50, 90);
        let pikachu = PokemonInst::from_species(25, "Pikachu", 50, vec![PokemonType::Electric], &base, Nature::Timid, vec![]);
        // HP: (70 + 31) * 50 / 100 + 50 + 10 = 110
        assert_eq!(pikachu.max_hp(), 110);
        assert_eq!(pikachu.current_hp(), 110);
        // Speed: ((180 + 31) * 50 / 100 + 5) * 1.1 = 121
        assert_eq!(pikachu.stats.speed, 121);
        // Attack lowered by Timid: ((110 + 31) * 50 / 100 + 5) * 0.9 = 67
        assert_eq!(pikachu.stats.attack, 67);
        assert_eq!(pikachu.nature, Nature::Timid);
    }

    #[test]
    fn test_stat_stages_clamp() {
        let mut pikachu = sample();
        assert_eq!(pikachu.modify_stat_stage(StatType::Atk, 2), 2);
        assert_eq!(pikachu.modify_stat_stage(StatType::Atk, 6), 4);
        assert_eq!(pikachu.get_stat_stage(StatType::Atk), 6);
        assert_eq!(pikachu.modify_stat_stage(StatType::Atk, 1), 0);

        assert_eq!(pikachu.boost_stat(StatType::Def, -8), -6);
        assert_eq!(pikachu.get_stat_stage(StatType::Def), -6);

        pikachu.clear_stat_stages();
        assert_eq!(pikachu.get_stat_stage(StatType::Atk), 0);
    }
}
