use crate::errors::ActionError;
use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};

pub const MAX_TEAM_SIZE: usize = 6;

/// An ordered roster of up to six combatants, one of which is on the field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
    pub members: Vec<PokemonInst>,
    pub active_index: usize,
    /// Members with HP above zero. Recounted by the engine after every action.
    pub remaining_count: usize,
}

impl Team {
    /// Members past the sixth are dropped. The first member leads.
    pub fn new(name: &str, members: Vec<PokemonInst>) -> Self {
        let members: Vec<PokemonInst> = members.into_iter().take(MAX_TEAM_SIZE).collect();
        let mut team = Self {
            name: name.to_string(),
            members,
            active_index: 0,
            remaining_count: 0,
        };
        team.recount_remaining();
        team
    }

    pub fn active_pokemon(&self) -> Option<&PokemonInst> {
        self.members.get(self.active_index)
    }

    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonInst> {
        self.members.get_mut(self.active_index)
    }

    pub fn active_is_fainted(&self) -> bool {
        self.active_pokemon().map_or(true, |p| p.is_fainted())
    }

    pub fn recount_remaining(&mut self) -> usize {
        self.remaining_count = self.members.iter().filter(|p| !p.is_fainted()).count();
        self.remaining_count
    }

    /// First member, in roster order, that could come in for the active one.
    pub fn first_available_replacement(&self) -> Option<usize> {
        self.valid_switch_targets().into_iter().next()
    }

    pub fn valid_switch_targets(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != self.active_index && !p.is_fainted())
            .map(|(i, _)| i)
            .collect()
    }

    /// Range and HP check used by turn resolution.
    pub fn check_switch_target(&self, team_index: usize) -> Result<(), ActionError> {
        let pokemon = self
            .members
            .get(team_index)
            .ok_or(ActionError::InvalidPokemonIndex(team_index))?;
        if pokemon.is_fainted() {
            return Err(ActionError::PokemonFainted(pokemon.name.clone()));
        }
        Ok(())
    }
}
