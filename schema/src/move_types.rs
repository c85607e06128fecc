use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

/// The five battle stats that carry a stage modifier. HP never does.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum StatType {
    Atk,
    Def,
    SpAtk,
    SpDef,
    Spe,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Atk => write!(f, "Attack"),
            StatType::Def => write!(f, "Defense"),
            StatType::SpAtk => write!(f, "Special Attack"),
            StatType::SpDef => write!(f, "Special Defense"),
            StatType::Spe => write!(f, "Speed"),
        }
    }
}
