#[cfg(test)]
mod tests {
    use crate::battle::ai::{Behavior, Difficulty, OpponentPolicy};
    use crate::battle::engine::resolve_turn;
    use crate::battle::state::{BattleEvent, BattleState, TurnRng};
    use crate::battle::tests::common::{create_team_battle, TestPokemonBuilder};
    use crate::player::Side;
    use crate::pokemon::{BaseStats, PokemonInst, MAX_STAT_STAGE, MIN_STAT_STAGE};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{PokemonType, StatType};
    use strum::IntoEnumIterator;

    const TURN_CAP: u32 = 500;

    fn roster(prefix: &str) -> Vec<PokemonInst> {
        vec![
            TestPokemonBuilder::new(&format!("{} Pikachu", prefix), 50)
                .with_types(vec![PokemonType::Electric])
                .with_stats(BaseStats::new(110, 60, 45, 70, 55, 110))
                .with_moves(&["Thunderbolt", "Thunder Wave", "Quick Attack", "Growl"])
                .build(),
            TestPokemonBuilder::new(&format!("{} Sandslash", prefix), 50)
                .with_types(vec![PokemonType::Ground])
                .with_stats(BaseStats::new(135, 105, 115, 50, 60, 70))
                .with_moves(&["Earthquake", "Swords Dance", "Slash", "Toxic"])
                .build(),
            TestPokemonBuilder::new(&format!("{} Tauros", prefix), 50)
                .with_stats(BaseStats::new(135, 105, 100, 45, 75, 115))
                .with_moves(&["Double-Edge", "Will-O-Wisp", "Mega Punch", "Tackle"])
                .build(),
        ]
    }

    fn assert_state_is_consistent(state: &BattleState) {
        for side in Side::BOTH {
            let team = state.team(side);
            assert!(team.active_index < team.members.len());
            assert_eq!(
                team.remaining_count,
                team.members.iter().filter(|p| !p.is_fainted()).count()
            );
            for pokemon in &team.members {
                assert!(pokemon.current_hp() <= pokemon.max_hp());
                for stat in StatType::iter() {
                    let stage = pokemon.get_stat_stage(stat);
                    assert!((MIN_STAT_STAGE..=MAX_STAT_STAGE).contains(&stage));
                }
            }
        }
    }

    #[rstest]
    #[case(1, Difficulty::Easy)]
    #[case(7, Difficulty::Medium)]
    #[case(42, Difficulty::Hard)]
    #[case(2024, Difficulty::Medium)]
    fn test_seeded_battles_run_to_completion(#[case] seed: u64, #[case] difficulty: Difficulty) {
        // Arrange
        let mut state = create_team_battle(roster("Red"), roster("Blue"));
        let mut rng = TurnRng::from_seed(seed);
        let player_policy = OpponentPolicy::new(Difficulty::Hard);
        let opponent_policy = OpponentPolicy::new(difficulty);

        // Act
        while state.winner.is_none() && state.turn <= TURN_CAP {
            let player_action = player_policy.decide_action(Side::Player, &state, &mut rng);
            let opponent_action = opponent_policy.decide_action(Side::Opponent, &state, &mut rng);
            let previous_turn = state.turn;
            let result = resolve_turn(&state, &player_action, &opponent_action, &mut rng);

            // Assert: every turn
            assert_eq!(result.state.turn, previous_turn + 1);
            assert_eq!(
                result.events.events().first(),
                Some(&BattleEvent::TurnStarted { turn_number: previous_turn })
            );
            assert_state_is_consistent(&result.state);
            state = result.state;
        }

        // Assert
        assert!(state.winner.is_some(), "battle with seed {} did not finish", seed);
    }

    #[test]
    fn test_same_seed_replays_the_same_battle() {
        // Arrange
        let play = |seed: u64| {
            let mut state = create_team_battle(roster("Red"), roster("Blue"));
            let mut rng = TurnRng::from_seed(seed);
            let policy = OpponentPolicy::new(Difficulty::Easy);
            let mut log = Vec::new();
            while state.winner.is_none() && state.turn <= TURN_CAP {
                let player_action = policy.decide_action(Side::Player, &state, &mut rng);
                let opponent_action = policy.decide_action(Side::Opponent, &state, &mut rng);
                let result = resolve_turn(&state, &player_action, &opponent_action, &mut rng);
                log.extend(result.log());
                state = result.state;
            }
            (state, log)
        };

        // Act
        let first = play(99);
        let second = play(99);

        // Assert
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }
}
