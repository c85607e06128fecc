use crate::StatType;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    /// (raised stat, lowered stat). Neutral natures raise and lower nothing.
    pub fn modified_stats(self) -> Option<(StatType, StatType)> {
        use Nature::*;
        use StatType::*;

        match self {
            Hardy | Docile | Serious | Bashful | Quirky => None,
            Lonely => Some((Atk, Def)),
            Brave => Some((Atk, Spe)),
            Adamant => Some((Atk, SpAtk)),
            Naughty => Some((Atk, SpDef)),
            Bold => Some((Def, Atk)),
            Relaxed => Some((Def, Spe)),
            Impish => Some((Def, SpAtk)),
            Lax => Some((Def, SpDef)),
            Timid => Some((Spe, Atk)),
            Hasty => Some((Spe, Def)),
            Jolly => Some((Spe, SpAtk)),
            Naive => Some((Spe, SpDef)),
            Modest => Some((SpAtk, Atk)),
            Mild => Some((SpAtk, Def)),
            Quiet => Some((SpAtk, Spe)),
            Rash => Some((SpAtk, SpDef)),
            Calm => Some((SpDef, Atk)),
            Gentle => Some((SpDef, Def)),
            Sassy => Some((SpDef, Spe)),
            Careful => Some((SpDef, SpAtk)),
        }
    }

    /// Multiplier applied to `stat` during stat preparation: 1.1, 0.9 or 1.0.
    pub fn multiplier(self, stat: StatType) -> f64 {
        match self.modified_stats() {
            Some((raised, _)) if raised == stat => 1.1,
            Some((_, lowered)) if lowered == stat => 0.9,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_nature_multipliers() {
        assert_eq!(Nature::Adamant.multiplier(StatType::Atk), 1.1);
        assert_eq!(Nature::Adamant.multiplier(StatType::SpAtk), 0.9);
        assert_eq!(Nature::Adamant.multiplier(StatType::Spe), 1.0);
        assert_eq!(Nature::Hardy.multiplier(StatType::Atk), 1.0);
    }

    #[test]
    fn test_every_stat_is_raised_and_lowered_four_times() {
        for stat in StatType::iter() {
            let raised = Nature::iter()
                .filter(|n| matches!(n.modified_stats(), Some((r, _)) if r == stat))
                .count();
            let lowered = Nature::iter()
                .filter(|n| matches!(n.modified_stats(), Some((_, l)) if l == stat))
                .count();
            assert_eq!(raised, 4, "{stat} raised by {raised} natures");
            assert_eq!(lowered, 4, "{stat} lowered by {lowered} natures");
        }
    }
}
