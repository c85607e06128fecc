use schema::{MoveCategory, PokemonType, StatType};
use serde::{Deserialize, Serialize};

/// Default PP for moves whose data does not say. PP is carried for display only.
pub const DEFAULT_MAX_PP: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

/// Non-volatile statuses a move can try to inflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusType {
    Paralysis,
    Poison,
    Toxic,
    Burn,
}

/// The modelled effect of a move, resolved once from its name when the move
/// record is built. Anything not in the table is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    None,
    StatChange {
        target: Target,
        stat: StatType,
        stages: i8,
    },
    InflictStatus(StatusType),
    /// Fraction of the damage dealt that the user takes back.
    Recoil {
        numerator: u16,
        denominator: u16,
    },
}

impl MoveEffect {
    pub fn from_move_name(name: &str) -> Self {
        use StatType::*;

        let stat_change = |target, stat, stages| MoveEffect::StatChange {
            target,
            stat,
            stages,
        };

        match normalize_move_name(name).as_str() {
            // Self boosts
            "swords-dance" => stat_change(Target::User, Atk, 2),
            "nasty-plot" => stat_change(Target::User, SpAtk, 2),
            "iron-defense" => stat_change(Target::User, Def, 2),
            "amnesia" => stat_change(Target::User, SpDef, 2),
            "agility" => stat_change(Target::User, Spe, 2),
            "harden" => stat_change(Target::User, Def, 1),

            // Opponent drops
            "growl" => stat_change(Target::Target, Atk, -1),
            "tail-whip" | "leer" => stat_change(Target::Target, Def, -1),
            "screech" => stat_change(Target::Target, Def, -2),
            "string-shot" => stat_change(Target::Target, Spe, -1),

            // Status infliction
            "thunder-wave" | "stun-spore" | "glare" => {
                MoveEffect::InflictStatus(StatusType::Paralysis)
            }
            "poison-powder" | "poison-gas" => MoveEffect::InflictStatus(StatusType::Poison),
            "toxic" => MoveEffect::InflictStatus(StatusType::Toxic),
            "will-o-wisp" => MoveEffect::InflictStatus(StatusType::Burn),

            // Recoil
            "double-edge" | "take-down" => MoveEffect::Recoil {
                numerator: 1,
                denominator: 4,
            },
            "flare-blitz" => MoveEffect::Recoil {
                numerator: 1,
                denominator: 3,
            },

            _ => MoveEffect::None,
        }
    }
}

/// Canonical form used for effect lookup: "Swords Dance", "swords_dance" and
/// "SWORDS-DANCE" all become "swords-dance".
pub fn normalize_move_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// `None` or `Some(0)` means the move deals no damage.
    pub power: Option<u16>,
    /// `None` means the move never misses.
    pub accuracy: Option<u8>,
    pub max_pp: u8,
    pub priority: i8,
    /// Critical hits land with probability `crit_rate / 24`.
    pub crit_rate: u8,
    pub effect: MoveEffect,
}

impl MoveData {
    pub fn new(
        name: &str,
        move_type: PokemonType,
        category: MoveCategory,
        power: Option<u16>,
        accuracy: Option<u8>,
    ) -> Self {
        Self {
            name: name.to_string(),
            move_type,
            category,
            power,
            accuracy,
            max_pp: DEFAULT_MAX_PP,
            priority: 0,
            crit_rate: 0,
            effect: MoveEffect::from_move_name(name),
        }
    }

    pub fn with_priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_pp(mut self, max_pp: u8) -> Self {
        self.max_pp = max_pp;
        self
    }

    pub fn with_crit_rate(mut self, crit_rate: u8) -> Self {
        self.crit_rate = crit_rate;
        self
    }

    /// The fallback used when a combatant has nothing else to use.
    pub fn struggle() -> Self {
        Self::new(
            "Struggle",
            PokemonType::Normal,
            MoveCategory::Physical,
            Some(50),
            Some(100),
        )
        .with_pp(1)
    }

    pub fn base_power(&self) -> u16 {
        self.power.unwrap_or(0)
    }

    pub fn is_damaging(&self) -> bool {
        matches!(self.category, MoveCategory::Physical | MoveCategory::Special)
    }

    /// False only for moves that act on the user alone, which still work when
    /// the opposing side has nobody standing.
    pub fn needs_target(&self) -> bool {
        !matches!(
            self.effect,
            MoveEffect::StatChange {
                target: Target::User,
                ..
            }
        ) || self.is_damaging()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Swords Dance")]
    #[case("swords-dance")]
    #[case("SWORDS_DANCE")]
    #[case("  swords dance ")]
    fn test_effect_lookup_ignores_case_and_separators(#[case] name: &str) {
        assert_eq!(
            MoveEffect::from_move_name(name),
            MoveEffect::StatChange {
                target: Target::User,
                stat: StatType::Atk,
                stages: 2
            }
        );
    }

    #[test]
    fn test_unknown_moves_have_no_effect() {
        assert_eq!(MoveEffect::from_move_name("Splash"), MoveEffect::None);
        assert_eq!(MoveEffect::from_move_name("Tackle"), MoveEffect::None);
    }

    #[test]
    fn test_recoil_table() {
        assert_eq!(
            MoveEffect::from_move_name("Double-Edge"),
            MoveEffect::Recoil {
                numerator: 1,
                denominator: 4
            }
        );
        assert_eq!(
            MoveEffect::from_move_name("Flare Blitz"),
            MoveEffect::Recoil {
                numerator: 1,
                denominator: 3
            }
        );
    }

    #[test]
    fn test_struggle() {
        let struggle = MoveData::struggle();
        assert_eq!(struggle.base_power(), 50);
        assert_eq!(struggle.accuracy, Some(100));
        assert_eq!(struggle.category, MoveCategory::Physical);
        assert_eq!(struggle.effect, MoveEffect::None);
    }

    #[test]
    fn test_self_boosts_do_not_need_a_target() {
        let swords_dance = MoveData::new(
            "Swords Dance",
            PokemonType::Normal,
            MoveCategory::Status,
            None,
            None,
        );
        let growl = MoveData::new("Growl", PokemonType::Normal, MoveCategory::Status, None, Some(100));
        assert!(!swords_dance.needs_target());
        assert!(growl.needs_target());
        assert!(MoveData::struggle().needs_target());
    }
}
