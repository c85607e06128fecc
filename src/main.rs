//! Automated battle between two roster files.
//!
//! The opponent plays at the configured difficulty; the player side is driven
//! by the same policy at `hard`.

use clap::Parser;
use pokemon_battle_engine::config::SimConfig;
use pokemon_battle_engine::session::{BattleSession, SideInfo, TurnReport};
use pokemon_battle_engine::teams::{build_team, load_roster, parse_roster};
use pokemon_battle_engine::{
    Behavior, BattleResult, BattleState, Difficulty, OpponentPolicy, Side, Team, TurnRng, Winner,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_PLAYER_ROSTER: &str = include_str!("../data/rosters/red.ron");
const DEFAULT_OPPONENT_ROSTER: &str = include_str!("../data/rosters/blue.ron");

#[derive(Parser, Debug)]
#[command(name = "battle-sim")]
#[command(about = "Run an automated creature battle between two rosters")]
struct Args {
    /// Simulator configuration (RON). Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player roster (RON). Defaults to the bundled red roster.
    #[arg(long)]
    player: Option<PathBuf>,

    /// Opponent roster (RON). Defaults to the bundled blue roster.
    #[arg(long)]
    opponent: Option<PathBuf>,

    /// Opponent difficulty: easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Random seed for a replayable battle
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns before the battle is abandoned
    #[arg(long)]
    max_turns: Option<u32>,

    /// Print the turn reports as JSON instead of the battle log
    #[arg(long)]
    json: bool,

    /// Log level for engine diagnostics (stderr). Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleSummary {
    seed: u64,
    difficulty: Difficulty,
    player: SideInfo,
    opponent: SideInfo,
    winner: Option<Winner>,
    turns: Vec<TurnReport>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "battle-sim failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(format!("pokemon_battle_engine={}", level)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pokemon_battle_engine=info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> BattleResult<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }
    config.seed = args.seed.or(config.seed);
    config.player_roster = args.player.or(config.player_roster);
    config.opponent_roster = args.opponent.or(config.opponent_roster);
    config.validate()?;

    let player = roster_or_default(config.player_roster.as_deref(), "red", DEFAULT_PLAYER_ROSTER)?;
    let opponent = roster_or_default(config.opponent_roster.as_deref(), "blue", DEFAULT_OPPONENT_ROSTER)?;

    // Always seeded, so any run can be replayed from its printed seed.
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, difficulty = %config.difficulty, max_turns = config.max_turns, "starting battle");

    let state = BattleState::new(player, opponent).with_field(&config.weather, &config.terrain);
    let mut session = BattleSession::from_state(state, config.difficulty, TurnRng::from_seed(seed));
    let player_policy = OpponentPolicy::new(Difficulty::Hard);
    let mut player_rng = TurnRng::from_seed(seed.wrapping_add(1));

    if !args.json {
        println!("{}", session.battle_start_log());
        println!();
    }

    let mut reports = Vec::new();
    while !session.is_over() && session.state().turn <= config.max_turns {
        if !args.json {
            print_status(&session);
        }

        let action = player_policy.decide_action(Side::Player, session.state(), &mut player_rng);
        let report = session.submit(action)?;

        if !args.json {
            for line in &report.log {
                println!("  {}", line);
            }
            println!();
        }
        reports.push(report);
    }

    if session.winner().is_none() {
        warn!(max_turns = config.max_turns, "battle abandoned at the turn limit");
    }

    if args.json {
        let summary = BattleSummary {
            seed,
            difficulty: session.difficulty(),
            player: session.side_info(Side::Player),
            opponent: session.side_info(Side::Opponent),
            winner: session.winner(),
            turns: reports,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_outcome(session.winner(), session.state().turn - 1, seed);
    }
    Ok(())
}

fn roster_or_default(path: Option<&Path>, name: &str, bundled: &str) -> BattleResult<Team> {
    let team = match path {
        Some(path) => load_roster(path)?,
        None => build_team(name, &parse_roster(bundled)?)?,
    };
    Ok(team)
}

fn print_status(session: &BattleSession) {
    for side in Side::BOTH {
        let info = session.side_info(side);
        if let Some(active) = &info.active {
            let status = active
                .status
                .map(|s| format!(" [{}]", s))
                .unwrap_or_default();
            println!(
                "  {}: {} Lv.{} (HP: {}/{}){} - {}/{} left",
                info.team_name,
                active.name,
                active.level,
                active.current_hp,
                active.max_hp,
                status,
                info.remaining,
                info.team_size
            );
        }
    }
}

fn print_outcome(winner: Option<Winner>, turns: u32, seed: u64) {
    match winner {
        Some(Winner::Player) => println!("The player wins!"),
        Some(Winner::Opponent) => println!("The opponent wins!"),
        Some(Winner::Draw) => println!("The battle ended in a draw!"),
        None => println!("Battle ended (turn limit reached)"),
    }
    println!("Battle completed after {} turn(s). Seed: {}", turns, seed);
}
