//! Finite normal-form game model
//!
//! A game is fixed at construction: players, one strategy set per player and
//! a payoff vector for every profile of the Cartesian product. The table is
//! checked eagerly so lookups never meet a hole mid-computation.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, InvalidMoveError};

/// Anything usable as a strategy label. Equality and hashing are by value.
pub trait Label: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Label for T {}

/// One strategy per player, in player-declaration order.
pub type Profile<S> = Vec<S>;

/// An immutable normal-form game.
///
/// Payoffs are stored densely by profile rank. Rank 0 is the first strategy
/// of every player and the last player varies fastest, which is the
/// lexicographic enumeration order used everywhere in this crate.
#[derive(Clone, Debug)]
pub struct Game<S: Label> {
    players: Vec<String>,
    strategies: Vec<Vec<S>>,
    lookup: Vec<HashMap<S, usize>>,
    strides: Vec<usize>,
    payoffs: Vec<Vec<f64>>,
}

impl<S: Label> Game<S> {
    /// Build a game, rejecting any table that is not total over the
    /// Cartesian product of the strategy sets.
    pub fn new<I>(
        players: Vec<String>,
        strategies: Vec<Vec<S>>,
        payoffs: I,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (Profile<S>, Vec<f64>)>,
    {
        if players.is_empty() {
            return Err(ConfigurationError::NoPlayers);
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].contains(player) {
                return Err(ConfigurationError::DuplicatePlayer { player: player.clone() });
            }
        }
        if strategies.len() != players.len() {
            return Err(ConfigurationError::StrategySetCount {
                players: players.len(),
                sets: strategies.len(),
            });
        }

        let mut lookup = Vec::with_capacity(players.len());
        for (player, set) in players.iter().zip(&strategies) {
            if set.is_empty() {
                return Err(ConfigurationError::EmptyStrategySet { player: player.clone() });
            }
            let mut index = HashMap::with_capacity(set.len());
            for (i, strategy) in set.iter().enumerate() {
                if index.insert(strategy.clone(), i).is_some() {
                    return Err(ConfigurationError::DuplicateStrategy {
                        player: player.clone(),
                        strategy: format!("{:?}", strategy),
                    });
                }
            }
            lookup.push(index);
        }

        let mut strides = vec![1usize; players.len()];
        for i in (0..players.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * strategies[i + 1].len();
        }
        let total = strides[0] * strategies[0].len();

        let mut game = Self {
            players,
            strategies,
            lookup,
            strides,
            payoffs: Vec::new(),
        };

        let mut slots: Vec<Option<Vec<f64>>> = vec![None; total];
        for (profile, payoff) in payoffs {
            let rank = game
                .rank(&profile)
                .ok_or_else(|| ConfigurationError::UnknownProfile {
                    profile: format!("{:?}", profile),
                })?;
            if payoff.len() != game.players.len() {
                return Err(ConfigurationError::PayoffArity {
                    profile: format!("{:?}", profile),
                    expected: game.players.len(),
                    actual: payoff.len(),
                });
            }
            if slots[rank].replace(payoff).is_some() {
                return Err(ConfigurationError::DuplicateProfile {
                    profile: format!("{:?}", profile),
                });
            }
        }

        let mut dense = Vec::with_capacity(total);
        for (rank, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(payoff) => dense.push(payoff),
                None => {
                    return Err(ConfigurationError::MissingProfile {
                        profile: format!("{:?}", game.profile_at(rank)),
                    })
                }
            }
        }
        game.payoffs = dense;

        Ok(game)
    }

    /// Two-player game with the default player names "Player 1" and "Player 2".
    pub fn two_player<I>(
        row_moves: Vec<S>,
        column_moves: Vec<S>,
        table: I,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = ((S, S), (f64, f64))>,
    {
        Self::new(
            vec!["Player 1".to_string(), "Player 2".to_string()],
            vec![row_moves, column_moves],
            table
                .into_iter()
                .map(|((a, b), (pa, pb))| (vec![a, b], vec![pa, pb])),
        )
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Strategy set of `player`, in declaration order.
    pub fn strategies(&self, player: usize) -> &[S] {
        &self.strategies[player]
    }

    pub fn strategy_sets(&self) -> &[Vec<S>] {
        &self.strategies
    }

    /// Whether `strategy` belongs to `player`'s strategy set.
    pub fn is_legal(&self, player: usize, strategy: &S) -> bool {
        self.lookup
            .get(player)
            .is_some_and(|index| index.contains_key(strategy))
    }

    /// Size of the Cartesian product of all strategy sets.
    pub fn profile_count(&self) -> usize {
        self.payoffs.len()
    }

    /// Payoff vector for `profile`, one entry per player.
    pub fn payoff(&self, profile: &[S]) -> Result<&[f64], InvalidMoveError> {
        self.rank(profile)
            .map(|rank| self.payoffs[rank].as_slice())
            .ok_or_else(|| InvalidMoveError::UnknownProfile {
                profile: format!("{:?}", profile),
            })
    }

    /// All profiles in lexicographic order.
    pub fn profiles(&self) -> Profiles<'_, S> {
        Profiles { game: self, next: 0 }
    }

    /// Position of `profile` in the enumeration order, if it is valid.
    pub fn rank(&self, profile: &[S]) -> Option<usize> {
        if profile.len() != self.players.len() {
            return None;
        }
        profile
            .iter()
            .zip(&self.lookup)
            .zip(&self.strides)
            .try_fold(0usize, |rank, ((strategy, index), stride)| {
                index.get(strategy).map(|i| rank + i * stride)
            })
    }

    pub(crate) fn payoff_at(&self, rank: usize) -> &[f64] {
        &self.payoffs[rank]
    }

    pub(crate) fn stride(&self, player: usize) -> usize {
        self.strides[player]
    }

    /// Index of `player`'s strategy inside the profile with this rank.
    pub(crate) fn digit(&self, rank: usize, player: usize) -> usize {
        (rank / self.strides[player]) % self.strategies[player].len()
    }

    pub(crate) fn profile_at(&self, rank: usize) -> Profile<S> {
        (0..self.players.len())
            .map(|player| self.strategies[player][self.digit(rank, player)].clone())
            .collect()
    }

    /// Serializable form of this game.
    pub fn to_spec(&self) -> GameSpec<S> {
        GameSpec {
            players: self.players.clone(),
            strategies: self.strategies.clone(),
            payoffs: (0..self.profile_count())
                .map(|rank| PayoffEntry {
                    profile: self.profile_at(rank),
                    payoffs: self.payoffs[rank].clone(),
                })
                .collect(),
        }
    }
}

/// Iterator over every profile of a game in lexicographic order.
pub struct Profiles<'a, S: Label> {
    game: &'a Game<S>,
    next: usize,
}

impl<S: Label> Iterator for Profiles<'_, S> {
    type Item = Profile<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.game.profile_count() {
            return None;
        }
        let profile = self.game.profile_at(self.next);
        self.next += 1;
        Some(profile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.game.profile_count() - self.next;
        (left, Some(left))
    }
}

impl<S: Label> ExactSizeIterator for Profiles<'_, S> {}

/// One row of a serialized payoff table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoffEntry<S> {
    pub profile: Vec<S>,
    pub payoffs: Vec<f64>,
}

/// Game description as read from or written to JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSpec<S> {
    pub players: Vec<String>,
    pub strategies: Vec<Vec<S>>,
    pub payoffs: Vec<PayoffEntry<S>>,
}

impl<S: Label> TryFrom<GameSpec<S>> for Game<S> {
    type Error = ConfigurationError;

    fn try_from(spec: GameSpec<S>) -> Result<Self, Self::Error> {
        Game::new(
            spec.players,
            spec.strategies,
            spec.payoffs.into_iter().map(|e| (e.profile, e.payoffs)),
        )
    }
}

/// Build a game from players, strategy sets and a payoff table.
pub fn build_game<S: Label>(
    players: Vec<String>,
    strategies: Vec<Vec<S>>,
    payoffs: HashMap<Profile<S>, Vec<f64>>,
) -> Result<Game<S>, ConfigurationError> {
    Game::new(players, strategies, payoffs)
}
