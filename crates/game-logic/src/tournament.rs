//! Round-robin tournament between registered strategies
//!
//! Every unordered pair of distinct strategies meets once, then every
//! strategy meets itself once. A pairing credits both sides; self-play
//! credits only side A, so a strategy never collects its own score twice.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, GameError};
use crate::game::{Game, Label};
use crate::pairing::{pair_count, pair_for_match};
use crate::play::{play_match, RoundConfig};
use crate::random::Seed;
use crate::strategy::{Builtin, Move, Strategy};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Strategies keyed by unique name, in registration order
pub struct Registry<M> {
    entries: Vec<(String, Box<dyn Strategy<M>>)>,
}

impl<M> Registry<M> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a strategy under `name`.
    ///
    /// # Errors
    /// `DuplicateStrategyName` if the name is already taken.
    pub fn register<S>(&mut self, name: impl Into<String>, strategy: S) -> Result<&mut Self, ConfigurationError>
    where
        S: Strategy<M> + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(ConfigurationError::DuplicateStrategyName { name });
        }
        self.entries.push((name, Box::new(strategy)));
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Strategy<M>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for Registry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry<Move> {
    /// The four strategies of the classic demonstration tournament.
    pub fn classic() -> Self {
        Self::from_distinct(&[
            Builtin::AlwaysCooperate,
            Builtin::AlwaysDefect,
            Builtin::TitForTat,
            Builtin::Random,
        ])
    }

    /// Every built-in strategy.
    pub fn builtins() -> Self {
        Self::from_distinct(&Builtin::ALL)
    }

    /// Registry of the given builtins under their display names.
    ///
    /// # Errors
    /// `DuplicateStrategyName` if a builtin is listed twice.
    pub fn with_builtins(builtins: &[Builtin]) -> Result<Self, ConfigurationError> {
        let mut registry = Self::new();
        for &builtin in builtins {
            registry.register(builtin.name(), builtin)?;
        }
        Ok(registry)
    }

    /// `builtins` must not repeat.
    fn from_distinct(builtins: &[Builtin]) -> Self {
        Self {
            entries: builtins
                .iter()
                .map(|&b| (b.name().to_string(), Box::new(b) as Box<dyn Strategy<Move>>))
                .collect(),
        }
    }
}

/// Tournament parameters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub rounds: RoundConfig,
    pub seed: Seed,
}

impl TournamentConfig {
    pub fn fixed(rounds_per_match: usize, seed: Seed) -> Self {
        Self { rounds: RoundConfig::fixed(rounds_per_match), seed }
    }
}

/// Outcome of one scheduled match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_index: u64,
    pub strategy_a: String,
    pub strategy_b: String,
    pub score_a: f64,
    pub score_b: f64,
    pub rounds: usize,
    pub self_play: bool,
}

impl MatchSummary {
    /// Points this match adds to the tournament totals.
    pub fn credited(&self) -> f64 {
        if self.self_play {
            self.score_a
        } else {
            self.score_a + self.score_b
        }
    }
}

/// Cumulative score per strategy, in registration order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    entries: Vec<(String, f64)>,
}

impl Standings {
    fn zeroed<'a>(names: impl Iterator<Item = &'a str>) -> Self {
        Self { entries: names.map(|n| (n.to_string(), 0.0)).collect() }
    }

    pub fn score(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all totals
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, s)| s).sum()
    }

    /// Highest score first; ties keep registration order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Standings plus the per-match log they were built from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    pub standings: Standings,
    pub matches: Vec<MatchSummary>,
}

/// Run the tournament with a fixed number of rounds per match.
pub fn run_tournament<M>(
    registry: &Registry<M>,
    stage: &Game<M>,
    rounds_per_match: usize,
    seed: Seed,
) -> Result<Standings, GameError>
where
    M: Label + Send + Sync,
{
    let config = TournamentConfig::fixed(rounds_per_match, seed);
    Ok(run_tournament_report(registry, stage, &config)?.standings)
}

/// Run the tournament and keep every match summary.
///
/// Pairings use match indices `0..C(k,2)`, self-play uses the following `k`
/// indices; each match is seeded from its index alone.
pub fn run_tournament_report<M>(
    registry: &Registry<M>,
    stage: &Game<M>,
    config: &TournamentConfig,
) -> Result<TournamentReport, GameError>
where
    M: Label + Send + Sync,
{
    config.rounds.validate()?;
    if stage.player_count() != 2 {
        return Err(ConfigurationError::NotTwoPlayer { players: stage.player_count() }.into());
    }

    let k = u32::try_from(registry.len())
        .map_err(|_| ConfigurationError::TooManyStrategies { count: registry.len() })?;
    let pairs = pair_count(k);
    let schedule: Vec<(u64, usize, usize)> = (0..pairs + u64::from(k))
        .map(|index| {
            let (a, b) = pair_for_match(k, index).unwrap_or_else(|| {
                let own = (index - pairs) as u32;
                (own, own)
            });
            (index, a as usize, b as usize)
        })
        .collect();

    let play = |&(index, a, b): &(u64, usize, usize)| -> Result<MatchSummary, GameError> {
        let (name_a, strategy_a) = &registry.entries[a];
        let (name_b, strategy_b) = &registry.entries[b];
        let result = play_match(
            strategy_a.as_ref(),
            strategy_b.as_ref(),
            stage,
            &config.rounds,
            config.seed.for_match(index),
        )?;
        debug!(
            "match {}: {} vs {} -> {} : {} over {} rounds",
            index, name_a, name_b, result.total_score_a, result.total_score_b, result.round_count
        );
        Ok(MatchSummary {
            match_index: index,
            strategy_a: name_a.clone(),
            strategy_b: name_b.clone(),
            score_a: result.total_score_a,
            score_b: result.total_score_b,
            rounds: result.round_count,
            self_play: a == b,
        })
    };

    #[cfg(feature = "parallel")]
    let matches = schedule.par_iter().map(play).collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let matches = schedule.iter().map(play).collect::<Result<Vec<_>, _>>()?;

    // Totals are merged only after every match is done
    let mut standings = Standings::zeroed(registry.names());
    for summary in &matches {
        let a = schedule[summary.match_index as usize].1;
        let b = schedule[summary.match_index as usize].2;
        standings.entries[a].1 += summary.score_a;
        if !summary.self_play {
            standings.entries[b].1 += summary.score_b;
        }
    }

    Ok(TournamentReport { standings, matches })
}
