//! Pure-strategy Nash equilibria by exhaustive enumeration
//!
//! A profile is an equilibrium when no single player can do strictly better
//! by switching its own strategy while everyone else stays put. Equal
//! payoffs never disqualify a profile.

use serde::{Deserialize, Serialize};

use crate::error::InvalidMoveError;
use crate::game::{Game, Label, Profile};

/// A pure Nash equilibrium and the payoffs it yields
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium<S> {
    pub profile: Profile<S>,
    pub payoffs: Vec<f64>,
}

/// Every pure Nash equilibrium of `game`, in profile enumeration order.
///
/// Cost is one payoff comparison per (profile, player, alternative), which
/// grows exponentially with the number of players.
pub fn find_pure_nash_equilibria<S: Label>(game: &Game<S>) -> Vec<Equilibrium<S>> {
    (0..game.profile_count())
        .filter(|&rank| is_stable(game, rank))
        .map(|rank| Equilibrium {
            profile: game.profile_at(rank),
            payoffs: game.payoff_at(rank).to_vec(),
        })
        .collect()
}

/// Whether `profile` survives every unilateral deviation.
pub fn is_pure_nash<S: Label>(game: &Game<S>, profile: &[S]) -> Result<bool, InvalidMoveError> {
    let rank = game.rank(profile).ok_or_else(|| InvalidMoveError::UnknownProfile {
        profile: format!("{:?}", profile),
    })?;
    Ok(is_stable(game, rank))
}

/// Strategies of `player` that maximize its payoff against the other
/// players' strategies in `profile`, in declaration order.
pub fn best_responses<S: Label>(
    game: &Game<S>,
    player: usize,
    profile: &[S],
) -> Result<Vec<S>, InvalidMoveError> {
    if player >= game.player_count() {
        return Err(InvalidMoveError::UnknownPlayer { player, players: game.player_count() });
    }
    let rank = game.rank(profile).ok_or_else(|| InvalidMoveError::UnknownProfile {
        profile: format!("{:?}", profile),
    })?;
    let payoffs = deviations(game, rank, player).collect::<Vec<_>>();
    let best = payoffs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(payoffs
        .iter()
        .enumerate()
        .filter(|(_, payoff)| **payoff == best)
        .map(|(i, _)| game.strategies(player)[i].clone())
        .collect())
}

/// Players are checked in declaration order and the first strictly better
/// alternative rejects the profile.
fn is_stable<S: Label>(game: &Game<S>, rank: usize) -> bool {
    let current = game.payoff_at(rank);
    (0..game.player_count()).all(|player| {
        let own = game.digit(rank, player);
        !deviations(game, rank, player)
            .enumerate()
            .any(|(alt, payoff)| alt != own && payoff > current[player])
    })
}

/// `player`'s payoff for each of its strategies, others held fixed.
fn deviations<'a, S: Label>(
    game: &'a Game<S>,
    rank: usize,
    player: usize,
) -> impl Iterator<Item = f64> + 'a {
    let stride = game.stride(player);
    let base = rank - game.digit(rank, player) * stride;
    (0..game.strategies(player).len()).map(move |alt| game.payoff_at(base + alt * stride)[player])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use proptest::prelude::*;

    fn profiles(eqs: &[Equilibrium<String>]) -> Vec<Vec<&str>> {
        eqs.iter()
            .map(|e| e.profile.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_prisoners_dilemma_unique_equilibrium() {
        let game = catalog::prisoners_dilemma().unwrap();
        let eqs = find_pure_nash_equilibria(&game);
        assert_eq!(profiles(&eqs), vec![vec!["D", "D"]]);
        assert_eq!(eqs[0].payoffs, vec![1.0, 1.0]);
    }

    #[test]
    fn test_matching_pennies_has_none() {
        let game = catalog::matching_pennies().unwrap();
        assert!(find_pure_nash_equilibria(&game).is_empty());
    }

    #[test]
    fn test_stag_hunt_two_equilibria() {
        let game = catalog::stag_hunt().unwrap();
        let eqs = find_pure_nash_equilibria(&game);
        assert_eq!(profiles(&eqs), vec![vec!["Stag", "Stag"], vec!["Hare", "Hare"]]);
        assert_eq!(eqs[0].payoffs, vec![4.0, 4.0]);
        assert_eq!(eqs[1].payoffs, vec![3.0, 3.0]);
    }

    #[test]
    fn test_battle_of_the_sexes_and_chicken() {
        let bos = catalog::battle_of_the_sexes().unwrap();
        assert_eq!(
            profiles(&find_pure_nash_equilibria(&bos)),
            vec![vec!["Opera", "Opera"], vec!["Football", "Football"]]
        );
        let chicken = catalog::chicken().unwrap();
        assert_eq!(
            profiles(&find_pure_nash_equilibria(&chicken)),
            vec![vec!["Swerve", "Straight"], vec!["Straight", "Swerve"]]
        );
    }

    #[test]
    fn test_ties_do_not_break_equilibrium() {
        let game = Game::two_player(
            vec!["A", "B"],
            vec!["A", "B"],
            [
                (("A", "A"), (1.0, 1.0)),
                (("A", "B"), (1.0, 1.0)),
                (("B", "A"), (1.0, 1.0)),
                (("B", "B"), (1.0, 1.0)),
            ],
        )
        .unwrap();
        assert_eq!(find_pure_nash_equilibria(&game).len(), 4);
    }

    #[test]
    fn test_three_player_majority_game() {
        // Each player earns 1 when it sides with the majority
        let players: Vec<String> = (1..=3).map(|i| format!("Player {}", i)).collect();
        let sets = vec![vec!['L', 'R']; 3];
        let mut table = Vec::new();
        for a in ['L', 'R'] {
            for b in ['L', 'R'] {
                for c in ['L', 'R'] {
                    let profile = vec![a, b, c];
                    let lefts = profile.iter().filter(|&&x| x == 'L').count();
                    let majority = if lefts >= 2 { 'L' } else { 'R' };
                    let payoffs: Vec<f64> = profile
                        .iter()
                        .map(|&x| if x == majority { 1.0 } else { 0.0 })
                        .collect();
                    table.push((profile, payoffs));
                }
            }
        }
        let game = Game::new(players, sets, table).unwrap();
        let eqs: Vec<_> = find_pure_nash_equilibria(&game).into_iter().map(|e| e.profile).collect();
        assert_eq!(eqs, vec![vec!['L', 'L', 'L'], vec!['R', 'R', 'R']]);
    }

    #[test]
    fn test_idempotent() {
        let game = catalog::stag_hunt().unwrap();
        assert_eq!(find_pure_nash_equilibria(&game), find_pure_nash_equilibria(&game));
    }

    #[test]
    fn test_is_pure_nash_and_best_responses() {
        let game = catalog::prisoners_dilemma().unwrap();
        let dd = vec!["D".to_string(), "D".to_string()];
        let cc = vec!["C".to_string(), "C".to_string()];
        assert!(is_pure_nash(&game, &dd).unwrap());
        assert!(!is_pure_nash(&game, &cc).unwrap());
        assert!(is_pure_nash(&game, &["X".to_string(), "D".to_string()]).is_err());

        assert_eq!(best_responses(&game, 0, &cc).unwrap(), vec!["D".to_string()]);
        assert_eq!(best_responses(&game, 1, &dd).unwrap(), vec!["D".to_string()]);

        let flat = Game::two_player(
            vec![0, 1],
            vec![0],
            [((0, 0), (2.0, 0.0)), ((1, 0), (2.0, 0.0))],
        )
        .unwrap();
        assert_eq!(best_responses(&flat, 0, &[1, 0]).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_best_responses_unknown_player() {
        let game = catalog::prisoners_dilemma().unwrap();
        let cc = vec!["C".to_string(), "C".to_string()];
        assert_eq!(
            best_responses(&game, 5, &cc),
            Err(InvalidMoveError::UnknownPlayer { player: 5, players: 2 })
        );
        assert!(best_responses(&game, 2, &cc).is_err());
    }

    /// Arbitrary game with 1-3 players, 1-3 strategies each and small
    /// integer payoffs, so ties are common.
    fn arb_game() -> impl Strategy<Value = Game<u8>> {
        prop::collection::vec(1usize..=3, 1..=3).prop_flat_map(|sizes| {
            let players = sizes.len();
            let profiles: usize = sizes.iter().product();
            prop::collection::vec(-3i8..=3, profiles * players).prop_map(move |values| {
                let sets: Vec<Vec<u8>> = sizes.iter().map(|&n| (0..n as u8).collect()).collect();
                let names = (0..players).map(|i| format!("P{}", i)).collect();
                let skeleton = Game::new(
                    names,
                    sets.clone(),
                    cartesian(&sets).into_iter().map(|p| (p, vec![0.0; players])),
                )
                .unwrap();
                let table: Vec<_> = skeleton
                    .profiles()
                    .enumerate()
                    .map(|(rank, p)| {
                        let row = values[rank * players..(rank + 1) * players]
                            .iter()
                            .map(|&v| f64::from(v))
                            .collect();
                        (p, row)
                    })
                    .collect();
                Game::new(skeleton.players().to_vec(), sets, table).unwrap()
            })
        })
    }

    fn cartesian(sets: &[Vec<u8>]) -> Vec<Vec<u8>> {
        sets.iter().fold(vec![vec![]], |acc, set| {
            acc.into_iter()
                .flat_map(|prefix| {
                    set.iter().map(move |&s| {
                        let mut p = prefix.clone();
                        p.push(s);
                        p
                    })
                })
                .collect()
        })
    }

    /// Definition check that goes through the public payoff lookup only.
    fn no_profitable_deviation(game: &Game<u8>, profile: &[u8]) -> bool {
        let current = game.payoff(profile).unwrap();
        (0..game.player_count()).all(|i| {
            game.strategies(i).iter().all(|alt| {
                let mut deviated = profile.to_vec();
                deviated[i] = *alt;
                game.payoff(&deviated).unwrap()[i] <= current[i]
            })
        })
    }

    proptest! {
        #[test]
        fn prop_equilibria_match_definition(game in arb_game()) {
            let eqs = find_pure_nash_equilibria(&game);
            let all: Vec<_> = game.profiles().collect();
            for eq in &eqs {
                prop_assert!(all.contains(&eq.profile));
                prop_assert!(no_profitable_deviation(&game, &eq.profile));
                prop_assert_eq!(game.payoff(&eq.profile).unwrap(), eq.payoffs.as_slice());
            }
            let expected: Vec<_> = all
                .into_iter()
                .filter(|p| no_profitable_deviation(&game, p))
                .collect();
            let found: Vec<_> = eqs.into_iter().map(|e| e.profile).collect();
            prop_assert_eq!(found, expected);
        }

        #[test]
        fn prop_is_pure_nash_agrees(game in arb_game()) {
            let eqs: Vec<_> = find_pure_nash_equilibria(&game).into_iter().map(|e| e.profile).collect();
            for profile in game.profiles() {
                prop_assert_eq!(is_pure_nash(&game, &profile).unwrap(), eqs.contains(&profile));
            }
        }
    }
}
