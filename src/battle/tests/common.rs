use crate::battle::state::{BattleState, TurnRng};
use crate::errors::BattleResult;
use crate::moves::MoveData;
use crate::pokemon::{BaseStats, PokemonInst, StatusCondition};
use crate::team::Team;
use schema::{MoveCategory, PokemonType};

/// A builder for creating test Pokemon instances with common defaults.
///
/// Defaults to a Normal-type with 150 HP, 100 Attack, 50 Defense, 100 Sp. Atk,
/// 50 Sp. Def and 80 Speed.
///
/// # Example
/// ```
/// let pokemon = TestPokemonBuilder::new("Pikachu", 25)
///     .with_types(vec![PokemonType::Electric])
///     .with_moves(&["Thunderbolt"])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    level: u8,
    types: Vec<PokemonType>,
    stats: BaseStats,
    moves: Vec<MoveData>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given name and level.
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
            types: vec![PokemonType::Normal],
            stats: BaseStats::new(150, 100, 50, 100, 50, 80),
            moves: Vec::new(),
            status: None,
            current_hp: None,
        }
    }

    pub fn with_types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    /// Replaces every prepared stat, HP included.
    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.stats.speed = speed;
        self
    }

    /// Sets the moves for the test Pokemon by name. See [`test_move`].
    pub fn with_moves(mut self, names: &[&str]) -> Self {
        self.moves = names.iter().map(|name| test_move(name)).collect();
        self
    }

    /// Sets moves that are not in the test catalog.
    pub fn with_move_data(mut self, moves: Vec<MoveData>) -> Self {
        self.moves = moves;
        self
    }

    /// Sets the status condition for the test Pokemon.
    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        let mut pokemon = PokemonInst::new(
            1,
            &self.name,
            self.level,
            self.types,
            self.stats,
            self.moves,
        );

        pokemon.status = self.status;

        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        } else {
            pokemon.set_hp_to_max();
        }

        pokemon
    }
}

/// The small move catalog the battle tests draw from.
pub fn test_move(name: &str) -> MoveData {
    use MoveCategory::*;
    use PokemonType::*;

    match name {
        "Tackle" => MoveData::new(name, Normal, Physical, Some(40), Some(100)),
        "Quick Attack" => MoveData::new(name, Normal, Physical, Some(40), Some(100)).with_priority(1),
        "Double-Edge" => MoveData::new(name, Normal, Physical, Some(120), Some(100)),
        "Thunderbolt" => MoveData::new(name, Electric, Special, Some(90), Some(100)),
        "Earthquake" => MoveData::new(name, Ground, Physical, Some(100), Some(100)),
        "Slash" => MoveData::new(name, Normal, Physical, Some(40), Some(100)).with_crit_rate(24),
        "Mega Punch" => MoveData::new(name, Normal, Physical, Some(80), Some(70)),
        "Swords Dance" => MoveData::new(name, Normal, Status, None, None),
        "Growl" => MoveData::new(name, Normal, Status, None, Some(100)),
        "Thunder Wave" => MoveData::new(name, Electric, Status, None, Some(90)),
        "Toxic" => MoveData::new(name, Poison, Status, None, Some(90)),
        "Will-O-Wisp" => MoveData::new(name, Fire, Status, None, Some(85)),
        "Splash" => MoveData::new(name, Normal, Status, None, None),
        other => panic!("No test move named {}", other),
    }
}

/// Creates a team whose first member leads.
pub fn create_test_team(name: &str, members: Vec<PokemonInst>) -> Team {
    Team::new(name, members)
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(player_pokemon: PokemonInst, opponent_pokemon: PokemonInst) -> BattleState {
    create_team_battle(vec![player_pokemon], vec![opponent_pokemon])
}

/// Creates a battle between two full rosters.
pub fn create_team_battle(player: Vec<PokemonInst>, opponent: Vec<PokemonInst>) -> BattleState {
    BattleState::new(
        create_test_team("Player", player),
        create_test_team("Opponent", opponent),
    )
}

/// Creates a `TurnRng` instance with a long list of default values (50).
/// Useful for tests where the specific RNG outcome is not important, preventing panics from exhaustion.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
