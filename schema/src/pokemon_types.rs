use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

/// Inbound damage relations of a single defending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRelations {
    pub double_damage_from: &'static [PokemonType],
    pub half_damage_from: &'static [PokemonType],
    pub no_damage_from: &'static [PokemonType],
}

impl PokemonType {
    /// The row of the type chart describing how this type takes damage.
    pub fn damage_relations(self) -> DamageRelations {
        use PokemonType::*;

        let (double_damage_from, half_damage_from, no_damage_from): (
            &'static [PokemonType],
            &'static [PokemonType],
            &'static [PokemonType],
        ) = match self {
            Normal => (&[Fighting], &[], &[Ghost]),
            Fighting => (&[Flying, Psychic, Fairy], &[Rock, Bug, Dark], &[]),
            Flying => (&[Rock, Electric, Ice], &[Fighting, Bug, Grass], &[Ground]),
            Poison => (&[Ground, Psychic], &[Fighting, Poison, Bug, Grass, Fairy], &[]),
            Ground => (&[Water, Grass, Ice], &[Poison, Rock], &[Electric]),
            Rock => (
                &[Fighting, Ground, Steel, Water, Grass],
                &[Normal, Flying, Poison, Fire],
                &[],
            ),
            Bug => (&[Flying, Rock, Fire], &[Fighting, Ground, Grass], &[]),
            Ghost => (&[Ghost, Dark], &[Poison, Bug], &[Normal, Fighting]),
            Steel => (
                &[Fighting, Ground, Fire],
                &[
                    Normal, Flying, Rock, Bug, Steel, Grass, Psychic, Ice, Dragon, Fairy,
                ],
                &[Poison],
            ),
            Fire => (
                &[Ground, Rock, Water],
                &[Bug, Steel, Fire, Grass, Ice, Fairy],
                &[],
            ),
            Water => (&[Grass, Electric], &[Steel, Fire, Water, Ice], &[]),
            Grass => (
                &[Flying, Poison, Bug, Fire, Ice],
                &[Ground, Water, Grass, Electric],
                &[],
            ),
            Electric => (&[Ground], &[Flying, Steel, Electric], &[]),
            Psychic => (&[Bug, Ghost, Dark], &[Fighting, Psychic], &[]),
            Ice => (&[Fighting, Rock, Steel, Fire], &[Ice], &[]),
            Dragon => (&[Ice, Dragon, Fairy], &[Fire, Water, Grass, Electric], &[]),
            Dark => (&[Fighting, Bug, Fairy], &[Ghost, Dark], &[Psychic]),
            Fairy => (&[Poison, Steel], &[Fighting, Bug, Dark], &[Dragon]),
        };

        DamageRelations {
            double_damage_from,
            half_damage_from,
            no_damage_from,
        }
    }

    /// Calculate type effectiveness multiplier for attacking type vs a single defending type
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn single_effectiveness(attacking: PokemonType, defending: PokemonType) -> f32 {
        let relations = defending.damage_relations();

        if relations.double_damage_from.contains(&attacking) {
            2.0
        } else if relations.half_damage_from.contains(&attacking) {
            0.5
        } else if relations.no_damage_from.contains(&attacking) {
            0.0
        } else {
            1.0
        }
    }

    /// Combined multiplier against every defending type. Dual types multiply, so an
    /// immunity on either side zeroes the whole result.
    pub fn type_effectiveness(attacking: PokemonType, defending: &[PokemonType]) -> f32 {
        defending
            .iter()
            .map(|&defending_type| Self::single_effectiveness(attacking, defending_type))
            .product()
    }

    pub fn is_immune(attacking: PokemonType, defending: &[PokemonType]) -> bool {
        Self::type_effectiveness(attacking, defending) == 0.0
    }
}
