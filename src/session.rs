use crate::battle::ai::{Behavior, Difficulty, OpponentPolicy};
use crate::battle::engine::{get_valid_actions, resolve_turn, validate_player_action};
use crate::battle::state::{BattleEvent, BattleState, TurnRng, Winner};
use crate::errors::{BattleResult, BattleStateError};
use crate::player::{PlayerAction, Side};
use crate::pokemon::StatusCondition;
use crate::team::Team;
use serde::Serialize;
use tracing::{debug, info};

/// One battle between a human-driven side and the opponent policy.
///
/// Owns its state, random source and undo history; sessions share nothing.
#[derive(Debug)]
pub struct BattleSession {
    state: BattleState,
    rng: TurnRng,
    policy: OpponentPolicy,
    history: Vec<BattleState>,
}

/// What one submitted turn produced.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub turn: u32,
    pub events: Vec<BattleEvent>,
    pub log: Vec<String>,
    pub winner: Option<Winner>,
}

/// Snapshot of a side for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideInfo {
    pub team_name: String,
    pub active: Option<CombatantInfo>,
    pub remaining: usize,
    pub team_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantInfo {
    pub name: String,
    pub level: u8,
    pub current_hp: u16,
    pub max_hp: u16,
    pub status: Option<StatusCondition>,
}

impl SideInfo {
    fn from_team(team: &Team) -> Self {
        Self {
            team_name: team.name.clone(),
            active: team.active_pokemon().map(|p| CombatantInfo {
                name: p.name.clone(),
                level: p.level,
                current_hp: p.current_hp(),
                max_hp: p.max_hp(),
                status: p.status,
            }),
            remaining: team.remaining_count,
            team_size: team.members.len(),
        }
    }
}

impl BattleSession {
    /// Start a battle. Both teams need at least one member.
    pub fn new(player: Team, opponent: Team, difficulty: Difficulty, rng: TurnRng) -> BattleResult<Self> {
        for team in [&player, &opponent] {
            if team.members.is_empty() {
                return Err(BattleStateError::EmptyTeam(team.name.clone()).into());
            }
        }
        Ok(Self::from_state(BattleState::new(player, opponent), difficulty, rng))
    }

    /// Resume from an existing state, for example one restored by a caller.
    pub fn from_state(state: BattleState, difficulty: Difficulty, rng: TurnRng) -> Self {
        info!(
            player = %state.player.name,
            opponent = %state.opponent.name,
            %difficulty,
            "battle session started"
        );
        Self {
            state,
            rng,
            policy: OpponentPolicy::new(difficulty),
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.policy.difficulty
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.state.winner
    }

    /// The opening line naming both leads.
    pub fn battle_start_log(&self) -> String {
        let lead = |team: &Team| {
            team.active_pokemon()
                .map(|p| p.name.clone())
                .unwrap_or_default()
        };
        format!(
            "Battle started! Your {} vs {}",
            lead(&self.state.player),
            lead(&self.state.opponent)
        )
    }

    pub fn side_info(&self, side: Side) -> SideInfo {
        SideInfo::from_team(self.state.team(side))
    }

    pub fn valid_actions(&self) -> Vec<PlayerAction> {
        get_valid_actions(&self.state, Side::Player)
    }

    /// Validate the player's action, let the opponent decide, resolve the turn
    /// and keep the previous state for [`BattleSession::undo`].
    pub fn submit(&mut self, action: PlayerAction) -> BattleResult<TurnReport> {
        if self.state.is_over() {
            return Err(BattleStateError::BattleOver.into());
        }
        validate_player_action(&self.state, Side::Player, &action)?;

        let opponent_action = self
            .policy
            .decide_action(Side::Opponent, &self.state, &mut self.rng);
        debug!(%action, %opponent_action, "submitting turn");

        let turn = self.state.turn;
        let result = resolve_turn(&self.state, &action, &opponent_action, &mut self.rng);
        let log = result.log();
        let previous = std::mem::replace(&mut self.state, result.state);
        self.history.push(previous);

        if let Some(winner) = self.state.winner {
            info!(?winner, turn, "battle finished");
        }

        Ok(TurnReport {
            turn,
            events: result.events.into_events(),
            log,
            winner: self.state.winner,
        })
    }

    /// Restore the state before the last submitted turn. Returns false when
    /// there is nothing to undo. The random source is not rewound.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                debug!(turn = previous.turn, "turn undone");
                self.state = previous;
                true
            }
            None => false,
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
