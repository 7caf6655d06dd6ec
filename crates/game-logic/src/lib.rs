//! Game Logic for finite normal-form games
//!
//! Builds games from players, strategy sets and a total payoff table, finds
//! their pure Nash equilibria, and plays them repeatedly: either with every
//! player choosing at random each round, or as history-aware strategy
//! matches gathered into a round-robin tournament.
//! This crate is compiled to:
//! - Native (for the `game-sim` command line driver)
//! - WASM (for browser-side solving and match replay)

mod error;
mod game;
mod solver;
mod random;
mod strategy;
mod play;
mod pairing;
mod tournament;
pub mod catalog;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{ConfigurationError, GameError, InvalidMoveError};
pub use game::{build_game, Game, GameSpec, Label, PayoffEntry, Profile, Profiles};
pub use solver::{best_responses, find_pure_nash_equilibria, is_pure_nash, Equilibrium};
pub use random::{MatchRng, Seed};
pub use strategy::{Builtin, Move, RandomChoice, Strategy};
pub use play::{
    play_match, run_match, run_stochastic_rounds, MatchResult, RoundConfig, RoundResult,
    StochasticRound, StochasticRun,
};
pub use pairing::{pair_count, pair_for_match, round_robin_pairs};
pub use tournament::{
    run_tournament, run_tournament_report, MatchSummary, Registry, Standings, TournamentConfig,
    TournamentReport,
};
