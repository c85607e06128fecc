//! Roster files.
//!
//! A roster is a RON list of team members. Each entry carries species base
//! stats; battle stats are prepared from them for the entry's level and
//! nature when the team is built.
//!
//! ```ron
//! [
//!     (
//!         species_id: 25,
//!         name: "Pikachu",
//!         level: 50,
//!         types: [Electric],
//!         base_stats: (hp: 35, attack: 55, defense: 40, sp_attack: 50, sp_defense: 50, speed: 90),
//!         nature: Timid,
//!         moves: [
//!             (name: "Thunderbolt", type: Electric, category: Special, power: 90, accuracy: 100),
//!             (name: "Quick Attack", type: Normal, category: Physical, power: 40, accuracy: 100, priority: 1),
//!         ],
//!     ),
//! ]
//! ```

use crate::errors::{RosterError, RosterResult};
use crate::moves::{MoveData, DEFAULT_MAX_PP};
use crate::pokemon::{BaseStats, PokemonInst, MAX_MOVES};
use crate::team::{Team, MAX_TEAM_SIZE};
use ron::extensions::Extensions;
use schema::{MoveCategory, Nature, PokemonType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(default)]
    pub species_id: u16,
    pub name: String,
    pub level: u8,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub nature: Nature,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// Absent means the move deals no damage.
    #[serde(default)]
    pub power: Option<u16>,
    /// Absent means the move never misses.
    #[serde(default)]
    pub accuracy: Option<u8>,
    #[serde(default = "default_pp")]
    pub pp: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub crit_rate: u8,
}

fn default_pp() -> u8 {
    DEFAULT_MAX_PP
}

impl MoveEntry {
    /// The move record, with its effect resolved from the name.
    pub fn to_move_data(&self) -> MoveData {
        MoveData::new(&self.name, self.move_type, self.category, self.power, self.accuracy)
            .with_pp(self.pp)
            .with_priority(self.priority)
            .with_crit_rate(self.crit_rate)
    }
}

impl RosterEntry {
    fn validate(&self) -> RosterResult<()> {
        if !(1..=100).contains(&self.level) {
            return Err(RosterError::InvalidLevel {
                name: self.name.clone(),
                level: self.level,
            });
        }
        if self.types.is_empty() || self.types.len() > 2 {
            return Err(RosterError::InvalidTypes(self.name.clone()));
        }
        if self.base_stats.hp == 0 {
            return Err(RosterError::ZeroHp(self.name.clone()));
        }
        if self.moves.len() > MAX_MOVES {
            return Err(RosterError::TooManyMoves {
                name: self.name.clone(),
                count: self.moves.len(),
            });
        }
        if let Some(entry) = self.moves.iter().find(|m| m.accuracy.is_some_and(|a| a > 100)) {
            return Err(RosterError::InvalidAccuracy {
                name: self.name.clone(),
                move_name: entry.name.clone(),
                accuracy: entry.accuracy.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Build the combatant at full HP with battle stats prepared.
    pub fn to_pokemon(&self) -> RosterResult<PokemonInst> {
        self.validate()?;
        let moves = self.moves.iter().map(MoveEntry::to_move_data).collect();
        let mut pokemon = PokemonInst::from_species(
            self.species_id,
            &self.name,
            self.level,
            self.types.clone(),
            &self.base_stats,
            self.nature,
            moves,
        );
        pokemon.held_item = self.item.clone();
        pokemon.ability = self.ability.clone();
        Ok(pokemon)
    }
}

/// Parse roster text. Optional fields may be written bare (`power: 90`).
pub fn parse_roster(content: &str) -> RosterResult<Vec<RosterEntry>> {
    let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
    let entries: Vec<RosterEntry> = options.from_str(content)?;
    Ok(entries)
}

/// Validate every entry and build the team. The first entry leads.
pub fn build_team(name: &str, entries: &[RosterEntry]) -> RosterResult<Team> {
    if entries.is_empty() {
        return Err(RosterError::Empty);
    }
    if entries.len() > MAX_TEAM_SIZE {
        return Err(RosterError::TooManyMembers(entries.len()));
    }

    let members = entries
        .iter()
        .map(RosterEntry::to_pokemon)
        .collect::<RosterResult<Vec<_>>>()?;
    debug!(team = name, size = members.len(), "roster built");
    Ok(Team::new(name, members))
}

/// Load a roster file into a team named after the file.
pub fn load_roster(path: &Path) -> RosterResult<Team> {
    let content = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("roster");
    build_team(name, &parse_roster(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveEffect;
    use pretty_assertions::assert_eq;

    const PIKACHU: &str = r#"
        (
            species_id: 25,
            name: "Pikachu",
            level: 50,
            types: [Electric],
            base_stats: (hp: 35, attack: 55, defense: 40, sp_attack: 50, sp_defense: 50, speed: 90),
            nature: Timid,
            item: "Light Ball",
            moves: [
                (name: "Thunderbolt", type: Electric, category: Special, power: 90, accuracy: 100, pp: 15),
                (name: "Quick Attack", type: Normal, category: Physical, power: 40, accuracy: 100, priority: 1),
                (name: "Thunder Wave", type: Electric, category: Status, accuracy: 90),
                (name: "Agility", type: Psychic, category: Status),
            ],
        )
    "#;

    fn roster_of(entries: &[&str]) -> String {
        format!("[{}]", entries.join(","))
    }

    #[test]
    fn test_parse_roster_prepares_stats_and_moves() {
        let entries = parse_roster(&roster_of(&[PIKACHU])).unwrap();
        let team = build_team("Red", &entries).unwrap();

        let pikachu = &team.members[0];
        assert_eq!(team.name, "Red");
        assert_eq!(pikachu.name, "Pikachu");
        assert_eq!(pikachu.max_hp(), 110);
        assert_eq!(pikachu.stats.speed, 121);
        assert_eq!(pikachu.held_item.as_deref(), Some("Light Ball"));

        let moves: Vec<&MoveData> = pikachu.known_moves().map(|(_, m)| m).collect();
        assert_eq!(moves.len(), 4);
        assert_eq!(moves[0].max_pp, 15);
        assert_eq!(moves[1].priority, 1);
        assert_eq!(moves[2].power, None);
        assert_eq!(moves[3].accuracy, None);
        assert_eq!(
            moves[3].effect,
            MoveEffect::StatChange {
                target: crate::moves::Target::User,
                stat: schema::StatType::Spe,
                stages: 2
            }
        );
    }

    #[test]
    fn test_empty_roster_is_rejected() {
        let entries = parse_roster("[]").unwrap();
        assert!(matches!(build_team("Red", &entries), Err(RosterError::Empty)));
    }

    #[test]
    fn test_seven_members_are_rejected() {
        let entries = parse_roster(&roster_of(&[PIKACHU; 7])).unwrap();
        assert!(matches!(build_team("Red", &entries), Err(RosterError::TooManyMembers(7))));
    }

    #[test]
    fn test_entry_validation() {
        let mut entry = parse_roster(&roster_of(&[PIKACHU])).unwrap().remove(0);

        entry.level = 0;
        assert!(matches!(entry.to_pokemon(), Err(RosterError::InvalidLevel { level: 0, .. })));
        entry.level = 50;

        entry.types = vec![PokemonType::Electric, PokemonType::Steel, PokemonType::Flying];
        assert!(matches!(entry.to_pokemon(), Err(RosterError::InvalidTypes(_))));
        entry.types = vec![PokemonType::Electric];

        entry.moves.push(entry.moves[0].clone());
        assert!(matches!(entry.to_pokemon(), Err(RosterError::TooManyMoves { count: 5, .. })));
        entry.moves.pop();

        entry.moves[0].accuracy = Some(120);
        assert!(matches!(entry.to_pokemon(), Err(RosterError::InvalidAccuracy { accuracy: 120, .. })));
    }

    #[test]
    fn test_malformed_roster_is_a_parse_error() {
        assert!(matches!(parse_roster("[(name: \"Pikachu\""), Err(RosterError::Parse(_))));
    }

    #[test]
    fn test_bundled_rosters_build() {
        for (name, content) in [
            ("red", include_str!("../data/rosters/red.ron")),
            ("blue", include_str!("../data/rosters/blue.ron")),
        ] {
            let team = build_team(name, &parse_roster(content).unwrap()).unwrap();
            assert_eq!(team.members.len(), 3);
            assert_eq!(team.remaining_count, 3);
            assert!(team.members.iter().all(|p| p.has_moves()));
        }
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = load_roster(Path::new("definitely/not/here.ron"));
        assert!(matches!(result, Err(RosterError::Io { .. })));
    }
}
