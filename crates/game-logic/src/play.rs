//! Repeated play of a stage game
//!
//! Two modes share this module: i.i.d. random replay of any normal-form game,
//! and history-aware matches between two strategies on a two-player game.

use log::trace;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, GameError, InvalidMoveError};
use crate::game::{Game, Label, Profile};
use crate::random::Seed;
use crate::strategy::Strategy;

/// One round of random replay
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StochasticRound<S> {
    pub round: usize,
    pub profile: Profile<S>,
    pub payoffs: Vec<f64>,
}

/// Round-by-round log and per-player totals of a random replay
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StochasticRun<S> {
    pub rounds: Vec<StochasticRound<S>>,
    pub totals: Vec<f64>,
}

/// Play `rounds` rounds where every player picks uniformly at random from
/// its strategy set, independently of all earlier rounds.
pub fn run_stochastic_rounds<S: Label, R: Rng + ?Sized>(
    game: &Game<S>,
    rounds: usize,
    rng: &mut R,
) -> StochasticRun<S> {
    let players = game.player_count();
    let mut log = Vec::with_capacity(rounds);
    let mut totals = vec![0.0; players];

    for round in 0..rounds {
        let rank = (0..players).fold(0usize, |rank, player| {
            let choice = rng.random_range(0..game.strategies(player).len());
            rank + choice * game.stride(player)
        });
        let payoffs = game.payoff_at(rank).to_vec();
        for (total, payoff) in totals.iter_mut().zip(&payoffs) {
            *total += payoff;
        }
        log.push(StochasticRound {
            round,
            profile: game.profile_at(rank),
            payoffs,
        });
    }

    StochasticRun { rounds: log, totals }
}

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult<M> {
    pub round: usize,
    pub move_a: M,
    pub move_b: M,
    pub score_a: f64,
    pub score_b: f64,
    pub cumulative_a: f64,
    pub cumulative_b: f64,
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult<M> {
    pub rounds: Vec<RoundResult<M>>,
    pub total_score_a: f64,
    pub total_score_b: f64,
    pub round_count: usize,
}

impl<M> MatchResult<M> {
    pub fn scores(&self) -> (f64, f64) {
        (self.total_score_a, self.total_score_b)
    }
}

/// Configuration for round count distribution per match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub min_rounds: usize,
    pub max_rounds: usize,
    /// % chance to end each round after min
    pub end_probability: u8,
}

impl RoundConfig {
    /// Exactly `rounds` rounds per match
    pub fn fixed(rounds: usize) -> Self {
        Self { min_rounds: rounds, max_rounds: rounds, end_probability: 0 }
    }

    /// Unknown horizon: at least `min_rounds`, at most `max_rounds`, and each
    /// round past the minimum ends the match with `end_probability` percent.
    pub fn geometric(
        min_rounds: usize,
        max_rounds: usize,
        end_probability: u8,
    ) -> Result<Self, ConfigurationError> {
        let config = Self { min_rounds, max_rounds, end_probability };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.min_rounds > self.max_rounds {
            return Err(ConfigurationError::InvalidRoundConfig {
                reason: format!(
                    "min_rounds {} exceeds max_rounds {}",
                    self.min_rounds, self.max_rounds
                ),
            });
        }
        if self.end_probability > 100 {
            return Err(ConfigurationError::InvalidRoundConfig {
                reason: format!("end_probability {} exceeds 100", self.end_probability),
            });
        }
        Ok(())
    }

    pub fn is_fixed(&self) -> bool {
        self.min_rounds == self.max_rounds
    }

    /// Determine how many rounds a match will have
    pub fn round_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let mut rounds = self.min_rounds;
        while rounds < self.max_rounds {
            if rng.random_range(0..100u8) < self.end_probability {
                break;
            }
            rounds += 1;
        }
        rounds
    }

    /// Mean of the round count distribution
    pub fn expected_rounds(&self) -> f64 {
        let survive = 1.0 - f64::from(self.end_probability.min(100)) / 100.0;
        let mut expected = self.min_rounds as f64;
        let mut reach = 1.0;
        for _ in self.min_rounds..self.max_rounds {
            reach *= survive;
            expected += reach;
        }
        expected
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::fixed(10)
    }
}

/// Run a match of `rounds` rounds between two strategies.
///
/// Side A plays player 0 of `stage`, side B plays player 1. Each side draws
/// randomness from its own stream derived from `seed`.
///
/// # Errors
/// `NotTwoPlayer` if the stage game does not have exactly two players;
/// `IllegalMove` as soon as a strategy leaves its alphabet.
pub fn run_match<M, A, B>(
    strategy_a: &A,
    strategy_b: &B,
    stage: &Game<M>,
    rounds: usize,
    seed: Seed,
) -> Result<MatchResult<M>, GameError>
where
    M: Label,
    A: Strategy<M> + ?Sized,
    B: Strategy<M> + ?Sized,
{
    if stage.player_count() != 2 {
        return Err(ConfigurationError::NotTwoPlayer { players: stage.player_count() }.into());
    }

    let mut rng_a = seed.for_side(0).rng();
    let mut rng_b = seed.for_side(1).rng();

    let mut history_a: Vec<M> = Vec::with_capacity(rounds);
    let mut history_b: Vec<M> = Vec::with_capacity(rounds);
    let mut results: Vec<RoundResult<M>> = Vec::with_capacity(rounds);
    let mut total_a = 0.0;
    let mut total_b = 0.0;

    for round in 0..rounds {
        // Both sides decide before either move is revealed
        let move_a = strategy_a.next_move(&history_a, &history_b, &mut rng_a as &mut dyn RngCore);
        check_legal(stage, 0, &move_a, round)?;
        let move_b = strategy_b.next_move(&history_b, &history_a, &mut rng_b as &mut dyn RngCore);
        check_legal(stage, 1, &move_b, round)?;

        let payoff = stage.payoff(&[move_a.clone(), move_b.clone()])?;
        let (score_a, score_b) = (payoff[0], payoff[1]);
        total_a += score_a;
        total_b += score_b;
        trace!("round {}: {:?} vs {:?} -> ({}, {})", round, move_a, move_b, score_a, score_b);

        results.push(RoundResult {
            round,
            move_a: move_a.clone(),
            move_b: move_b.clone(),
            score_a,
            score_b,
            cumulative_a: total_a,
            cumulative_b: total_b,
        });

        history_a.push(move_a);
        history_b.push(move_b);
    }

    Ok(MatchResult {
        rounds: results,
        total_score_a: total_a,
        total_score_b: total_b,
        round_count: rounds,
    })
}

/// Run a match whose length is drawn from `config`.
pub fn play_match<M, A, B>(
    strategy_a: &A,
    strategy_b: &B,
    stage: &Game<M>,
    config: &RoundConfig,
    seed: Seed,
) -> Result<MatchResult<M>, GameError>
where
    M: Label,
    A: Strategy<M> + ?Sized,
    B: Strategy<M> + ?Sized,
{
    config.validate()?;
    let rounds = config.round_count(&mut seed.for_side(2).rng());
    run_match(strategy_a, strategy_b, stage, rounds, seed)
}

fn check_legal<M: Label>(
    stage: &Game<M>,
    player: usize,
    chosen: &M,
    round: usize,
) -> Result<(), InvalidMoveError> {
    if stage.is_legal(player, chosen) {
        Ok(())
    } else {
        Err(InvalidMoveError::IllegalMove {
            player: stage.players()[player].clone(),
            round,
            chosen: format!("{:?}", chosen),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{iterated_dilemma, matching_pennies};
    use crate::strategy::{Builtin, Move};

    const SEED: Seed = Seed::new(42);

    #[test]
    fn test_defect_vs_defect_scores_one_per_round() {
        let stage = iterated_dilemma().unwrap();
        for rounds in [0, 1, 2, 10, 57] {
            let result =
                run_match(&Builtin::AlwaysDefect, &Builtin::AlwaysDefect, &stage, rounds, SEED).unwrap();
            assert_eq!(result.scores(), (rounds as f64, rounds as f64));
            assert_eq!(result.round_count, rounds);
        }
    }

    #[test]
    fn test_cooperate_vs_cooperate() {
        let stage = iterated_dilemma().unwrap();
        let result =
            run_match(&Builtin::AlwaysCooperate, &Builtin::AlwaysCooperate, &stage, 20, SEED).unwrap();

        for round in &result.rounds {
            assert_eq!(round.move_a, Move::Cooperate);
            assert_eq!(round.move_b, Move::Cooperate);
            assert_eq!(round.score_a, 3.0);
            assert_eq!(round.score_b, 3.0);
        }
        assert_eq!(result.scores(), (60.0, 60.0));
    }

    #[test]
    fn test_defect_vs_cooperate() {
        let stage = iterated_dilemma().unwrap();
        let result =
            run_match(&Builtin::AlwaysDefect, &Builtin::AlwaysCooperate, &stage, 12, SEED).unwrap();
        assert_eq!(result.scores(), (60.0, 0.0));
    }

    #[test]
    fn test_tft_vs_always_defect() {
        let stage = iterated_dilemma().unwrap();
        for rounds in 1..20usize {
            let result =
                run_match(&Builtin::TitForTat, &Builtin::AlwaysDefect, &stage, rounds, SEED).unwrap();

            // Round 0: TFT cooperates, AD defects
            assert_eq!(result.rounds[0].move_a, Move::Cooperate);
            assert_eq!(result.rounds[0].move_b, Move::Defect);
            // Round 1+: TFT retaliates, both defect
            for round in result.rounds.iter().skip(1) {
                assert_eq!(round.move_a, Move::Defect);
                assert_eq!(round.move_b, Move::Defect);
            }
            let r = rounds as f64;
            assert_eq!(result.scores(), (r - 1.0, 5.0 + (r - 1.0)));
        }
    }

    #[test]
    fn test_histories_are_own_first() {
        // A copies its own previous move, B copies A's previous move
        let own_echo = |own: &[Move], _: &[Move], _: &mut dyn RngCore| {
            own.last().copied().unwrap_or(Move::Defect)
        };
        let opponent_echo = |_: &[Move], opp: &[Move], _: &mut dyn RngCore| {
            opp.last().copied().unwrap_or(Move::Cooperate)
        };
        let stage = iterated_dilemma().unwrap();
        let result = run_match(&own_echo, &opponent_echo, &stage, 3, SEED).unwrap();
        let moves: Vec<_> = result.rounds.iter().map(|r| (r.move_a, r.move_b)).collect();
        assert_eq!(
            moves,
            vec![
                (Move::Defect, Move::Cooperate),
                (Move::Defect, Move::Defect),
                (Move::Defect, Move::Defect),
            ]
        );
    }

    #[test]
    fn test_cumulative_scores() {
        let stage = iterated_dilemma().unwrap();
        let result = run_match(&Builtin::Random, &Builtin::TitForTat, &stage, 30, SEED).unwrap();

        let mut expected_a = 0.0;
        let mut expected_b = 0.0;
        for round in &result.rounds {
            expected_a += round.score_a;
            expected_b += round.score_b;
            assert_eq!(round.cumulative_a, expected_a);
            assert_eq!(round.cumulative_b, expected_b);
        }
        assert_eq!(result.scores(), (expected_a, expected_b));
    }

    #[test]
    fn test_match_determinism() {
        let stage = iterated_dilemma().unwrap();
        let r1 = run_match(&Builtin::Random, &Builtin::Random, &stage, 40, SEED).unwrap();
        let r2 = run_match(&Builtin::Random, &Builtin::Random, &stage, 40, SEED).unwrap();
        assert_eq!(r1, r2);

        let r3 = run_match(&Builtin::Random, &Builtin::Random, &stage, 40, SEED.for_match(1)).unwrap();
        assert_ne!(r1.rounds, r3.rounds);
    }

    #[test]
    fn test_illegal_move_aborts_match() {
        let stage = iterated_dilemma().unwrap();
        let restricted = Game::two_player(
            vec![Move::Cooperate],
            vec![Move::Cooperate, Move::Defect],
            [
                ((Move::Cooperate, Move::Cooperate), (3.0, 3.0)),
                ((Move::Cooperate, Move::Defect), (0.0, 5.0)),
            ],
        )
        .unwrap();

        assert!(run_match(&Builtin::AlwaysDefect, &Builtin::AlwaysDefect, &stage, 3, SEED).is_ok());
        let err = run_match(&Builtin::TitForTat, &Builtin::AlwaysDefect, &restricted, 3, SEED)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidMove(InvalidMoveError::IllegalMove {
                player: "Player 1".to_string(),
                round: 1,
                chosen: "Defect".to_string(),
            })
        );
    }

    #[test]
    fn test_match_requires_two_players() {
        let solo = Game::new(
            vec!["Solo".to_string()],
            vec![vec![Move::Cooperate]],
            [(vec![Move::Cooperate], vec![1.0])],
        )
        .unwrap();
        let err = run_match(&Builtin::AlwaysCooperate, &Builtin::AlwaysCooperate, &solo, 1, SEED)
            .unwrap_err();
        assert_eq!(err, GameError::Configuration(ConfigurationError::NotTwoPlayer { players: 1 }));
    }

    #[test]
    fn test_stochastic_rounds_log_and_totals() {
        let game = matching_pennies().unwrap();
        let mut rng = SEED.rng();
        let run = run_stochastic_rounds(&game, 50, &mut rng);

        assert_eq!(run.rounds.len(), 50);
        let mut totals = vec![0.0; 2];
        for (i, round) in run.rounds.iter().enumerate() {
            assert_eq!(round.round, i);
            assert_eq!(game.payoff(&round.profile).unwrap(), round.payoffs.as_slice());
            totals[0] += round.payoffs[0];
            totals[1] += round.payoffs[1];
        }
        assert_eq!(run.totals, totals);
        // zero-sum every round
        assert_eq!(run.totals[0] + run.totals[1], 0.0);
    }

    #[test]
    fn test_stochastic_rounds_are_seeded() {
        let game = matching_pennies().unwrap();
        let a = run_stochastic_rounds(&game, 25, &mut SEED.rng());
        let b = run_stochastic_rounds(&game, 25, &mut SEED.rng());
        assert_eq!(a, b);

        let empty = run_stochastic_rounds(&game, 0, &mut SEED.rng());
        assert!(empty.rounds.is_empty());
        assert_eq!(empty.totals, vec![0.0, 0.0]);
    }

    #[test]
    fn test_stochastic_rounds_visit_every_profile() {
        let game = matching_pennies().unwrap();
        let run = run_stochastic_rounds(&game, 200, &mut SEED.rng());
        for profile in game.profiles() {
            assert!(run.rounds.iter().any(|r| r.profile == profile), "{:?} never drawn", profile);
        }
    }

    #[test]
    fn test_round_config_fixed() {
        let config = RoundConfig::fixed(12);
        assert!(config.is_fixed());
        assert_eq!(config.round_count(&mut SEED.rng()), 12);
        assert_eq!(config.expected_rounds(), 12.0);
        assert_eq!(RoundConfig::default(), RoundConfig::fixed(10));
    }

    #[test]
    fn test_round_config_geometric_range() {
        let config = RoundConfig::geometric(20, 50, 5).unwrap();
        for i in 0..200 {
            let count = config.round_count(&mut SEED.for_match(i).rng());
            assert!((20..=50).contains(&count), "round count {} out of [20,50]", count);
        }
    }

    #[test]
    fn test_round_config_geometric_mean() {
        let config = RoundConfig::geometric(10, 30, 7).unwrap();
        let samples = 2000u64;
        let total: usize = (0..samples)
            .map(|i| config.round_count(&mut SEED.for_match(i).rng()))
            .sum();
        let average = total as f64 / samples as f64;
        let expected = config.expected_rounds();
        assert!((average - expected).abs() < 1.0, "average {} vs expected {}", average, expected);
    }

    #[test]
    fn test_round_config_validation() {
        assert!(matches!(
            RoundConfig::geometric(10, 5, 5),
            Err(ConfigurationError::InvalidRoundConfig { .. })
        ));
        assert!(RoundConfig::geometric(1, 5, 101).is_err());
        assert!(RoundConfig::geometric(5, 5, 100).is_ok());
    }

    #[test]
    fn test_play_match_uses_round_config() {
        let stage = iterated_dilemma().unwrap();
        let config = RoundConfig::geometric(3, 9, 30).unwrap();
        for i in 0..20 {
            let result = play_match(
                &Builtin::AlwaysCooperate,
                &Builtin::AlwaysCooperate,
                &stage,
                &config,
                SEED.for_match(i),
            )
            .unwrap();
            assert!((3..=9).contains(&result.round_count));
            assert_eq!(result.rounds.len(), result.round_count);
        }
    }
}
