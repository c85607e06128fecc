use crate::moves::StatusType;
use crate::player::Side;
use crate::pokemon::StatusCondition;
use crate::team::Team;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::StatType;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player,
    Opponent,
    Draw,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,
    BattleAlreadyOver,

    // Pokemon Actions
    PokemonSwitched {
        side: Side,
        old_pokemon: String,
        new_pokemon: String,
    },
    SwitchRejected {
        side: Side,
        team_index: usize,
        reason: String,
    },
    MoveUsed {
        side: Side,
        pokemon: String,
        move_used: String,
    },
    MoveMissed {
        attacker: String,
        move_used: String,
    },
    NoTarget {
        attacker: String,
    },
    CriticalHit,

    // Damage
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    AttackTypeEffectiveness {
        multiplier: f32,
    },
    /// A damaging move that did nothing: type immunity or zero power.
    NoEffect {
        target: String,
        immune: bool,
    },
    RecoilDamage {
        pokemon: String,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonFainted {
        side: Side,
        pokemon: String,
    },

    // Stat stages
    StatStageChanged {
        target: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: String,
        stat: StatType,
        rising: bool,
    },

    // Status
    PokemonStatusApplied {
        target: String,
        status: StatusType,
    },
    StatusMoveFailed {
        target: String,
    },
    NothingHappened,
    StatusDamage {
        target: String,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },

    // Outcome
    ReplacementNeeded {
        side: Side,
    },
    SideDefeated {
        side: Side,
    },
    BattleEnded {
        winner: Winner,
    },
}

impl BattleEvent {
    /// The line shown to a reader of the battle log, or `None` for silent
    /// bookkeeping events.
    pub fn format(&self) -> Option<String> {
        match self {
            // === Turn Management Events ===
            BattleEvent::TurnStarted { turn_number } => Some(format!("=== Turn {} ===", turn_number)),
            BattleEvent::TurnEnded => None,
            BattleEvent::BattleAlreadyOver => Some("The battle is already over.".to_string()),

            // === Switching Events ===
            BattleEvent::PokemonSwitched { side, new_pokemon, .. } => match side {
                Side::Player => Some(format!("You sent out {}!", new_pokemon)),
                Side::Opponent => Some(format!("The opponent sent out {}!", new_pokemon)),
            },
            BattleEvent::SwitchRejected { reason, .. } => Some(format!("The switch failed: {}.", reason)),

            // === Move Events ===
            BattleEvent::MoveUsed { pokemon, move_used, .. } => {
                Some(format!("{} used {}!", pokemon, move_used))
            }
            BattleEvent::MoveMissed { .. } => Some("But it missed!".to_string()),
            BattleEvent::NoTarget { .. } => Some("But there was no target...".to_string()),
            BattleEvent::CriticalHit => Some("A critical hit!".to_string()),

            // === Damage Events ===
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("It hit {} for {} damage!", target, damage))
            }
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::NoEffect { target, immune } => {
                if *immune {
                    Some(format!("It doesn't affect {}...", target))
                } else {
                    Some(format!("It had no effect on {}!", target))
                }
            }
            BattleEvent::RecoilDamage { pokemon, .. } => Some(format!("{} is hit with recoil!", pokemon)),
            BattleEvent::PokemonFainted { pokemon, .. } => Some(format!("{} fainted!", pokemon)),

            // === Stat Stage Events ===
            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let change = match new_stage - old_stage {
                    1 => "rose!",
                    2 => "sharply rose!",
                    d if d >= 3 => "rose drastically!",
                    -1 => "fell!",
                    -2 => "harshly fell!",
                    _ => "severely fell!",
                };
                Some(format!("{}'s {} {}", target, stat, change))
            }
            BattleEvent::StatChangeBlocked { target, stat, rising } => {
                let direction = if *rising { "higher" } else { "lower" };
                Some(format!("{}'s {} won't go any {}!", target, stat, direction))
            }

            // === Status Events ===
            BattleEvent::PokemonStatusApplied { target, status } => Some(match status {
                StatusType::Paralysis => format!("{} is paralyzed! It may be unable to move!", target),
                StatusType::Poison => format!("{} was poisoned!", target),
                StatusType::Toxic => format!("{} was badly poisoned!", target),
                StatusType::Burn => format!("{} was burned!", target),
            }),
            BattleEvent::StatusMoveFailed { .. } => Some("But it failed!".to_string()),
            BattleEvent::NothingHappened => Some("But nothing happened!".to_string()),
            BattleEvent::StatusDamage { target, status, .. } => match status {
                StatusCondition::Burn => Some(format!("{} is hurt by its burn!", target)),
                StatusCondition::Poison | StatusCondition::Toxic(_) => {
                    Some(format!("{} is hurt by poison!", target))
                }
                StatusCondition::Paralysis => None,
            },

            // === Outcome Events ===
            BattleEvent::ReplacementNeeded { side } => match side {
                Side::Player => Some("Please choose another Pokémon!".to_string()),
                Side::Opponent => None,
            },
            BattleEvent::SideDefeated { side } => match side {
                Side::Player => Some("You have no Pokémon left! You lost the battle!".to_string()),
                Side::Opponent => {
                    Some("The opponent has no Pokémon left! You won the battle!".to_string())
                }
            },
            BattleEvent::BattleEnded { winner } => match winner {
                Winner::Draw => {
                    Some("Both sides are out of Pokémon! The battle ends in a draw.".to_string())
                }
                Winner::Player | Winner::Opponent => None,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// The formatted log lines, silent events skipped.
    pub fn log(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Generator(StdRng),
    Scripted { outcomes: Vec<u8>, index: usize },
}

/// Source of every random draw the engine makes. Draws are labelled with a
/// reason so scripted runs can be traced.
///
/// Outcomes are percentiles in `1..=100`.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// Replays `outcomes` in order and panics once they run out.
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Generator(StdRng::from_rng(&mut rand::rng())),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Generator(StdRng::seed_from_u64(seed)),
        }
    }

    fn draw(&mut self, reason: &str, generate: impl FnOnce(&mut StdRng) -> u8) -> u8 {
        let outcome = match &mut self.source {
            RngSource::Generator(rng) => generate(rng),
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];
                *index += 1;
                outcome
            }
        };
        trace!(outcome, reason, "rng draw");
        outcome
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        self.draw(reason, |rng| rng.random_range(1..=100))
    }

    /// Uniform draw in `low..=high`. Scripted outcomes are clamped into range.
    pub fn next_in_range(&mut self, reason: &str, low: u8, high: u8) -> u8 {
        if matches!(self.source, RngSource::Scripted { .. }) {
            return self.draw(reason, |_| low).clamp(low, high);
        }
        self.draw(reason, |rng| rng.random_range(low..=high))
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    /// Scripted outcomes are spread over the range by percentile.
    pub fn next_index(&mut self, reason: &str, len: usize) -> usize {
        let len = len.max(1);
        if let RngSource::Generator(rng) = &mut self.source {
            let index = rng.random_range(0..len);
            trace!(index, len, reason, "rng index draw");
            return index;
        }
        let outcome = self.next_outcome(reason) as usize;
        (outcome.saturating_sub(1) * len) / 100
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleState {
    pub player: Team,
    pub opponent: Team,
    pub turn: u32,
    /// Free-form tags carried for display.
    pub weather: String,
    pub terrain: String,
    pub winner: Option<Winner>,
}

impl BattleState {
    pub fn new(player: Team, opponent: Team) -> Self {
        Self {
            player,
            opponent,
            turn: 1,
            weather: "none".to_string(),
            terrain: "none".to_string(),
            winner: None,
        }
    }

    pub fn with_field(mut self, weather: &str, terrain: &str) -> Self {
        self.weather = weather.to_string();
        self.terrain = terrain.to_string();
        self
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}
