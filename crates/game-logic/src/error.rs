//! Error kinds raised by game construction and play
//!
//! Two kinds only: configuration errors are found while building a game,
//! a round config or a strategy registry; invalid moves are found while a
//! match is being played. Both abort the current operation.

use core::fmt;

/// The game, round config or registry is malformed and must be rebuilt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A game needs at least one player.
    NoPlayers,
    /// Two players share a name.
    DuplicatePlayer { player: String },
    /// One strategy set is required per player.
    StrategySetCount { players: usize, sets: usize },
    /// A player has no strategies to choose from.
    EmptyStrategySet { player: String },
    /// A player's strategy set lists the same strategy twice.
    DuplicateStrategy { player: String, strategy: String },
    /// The payoff table has no entry for a profile of the Cartesian product.
    MissingProfile { profile: String },
    /// The payoff table has an entry outside the Cartesian product.
    UnknownProfile { profile: String },
    /// The payoff table lists the same profile twice.
    DuplicateProfile { profile: String },
    /// A payoff vector does not have one entry per player.
    PayoffArity { profile: String, expected: usize, actual: usize },
    /// Repeated matches are played on two-player stage games only.
    NotTwoPlayer { players: usize },
    /// Two registered strategies share a name.
    DuplicateStrategyName { name: String },
    /// The registry holds more strategies than match indices can address.
    TooManyStrategies { count: usize },
    /// Round bounds or end probability are out of range.
    InvalidRoundConfig { reason: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::NoPlayers => write!(f, "game has no players"),
            ConfigurationError::DuplicatePlayer { player } =>
                write!(f, "player {} is declared twice", player),
            ConfigurationError::StrategySetCount { players, sets } =>
                write!(f, "{} strategy sets given for {} players", sets, players),
            ConfigurationError::EmptyStrategySet { player } =>
                write!(f, "player {} has no strategies", player),
            ConfigurationError::DuplicateStrategy { player, strategy } =>
                write!(f, "player {} lists strategy {} twice", player, strategy),
            ConfigurationError::MissingProfile { profile } =>
                write!(f, "payoff table has no entry for profile {}", profile),
            ConfigurationError::UnknownProfile { profile } =>
                write!(f, "payoff table entry {} is not a valid profile", profile),
            ConfigurationError::DuplicateProfile { profile } =>
                write!(f, "payoff table lists profile {} twice", profile),
            ConfigurationError::PayoffArity { profile, expected, actual } =>
                write!(f, "profile {} has {} payoffs, expected {}", profile, actual, expected),
            ConfigurationError::NotTwoPlayer { players } =>
                write!(f, "stage game must have 2 players, found {}", players),
            ConfigurationError::DuplicateStrategyName { name } =>
                write!(f, "strategy name {:?} is registered twice", name),
            ConfigurationError::TooManyStrategies { count } =>
                write!(f, "{} strategies exceed the tournament limit of {}", count, u32::MAX),
            ConfigurationError::InvalidRoundConfig { reason } =>
                write!(f, "invalid round config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// A move or profile outside the stage game turned up during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidMoveError {
    /// A strategy returned a move that is not in its side's alphabet.
    IllegalMove { player: String, round: usize, chosen: String },
    /// A payoff lookup was attempted for a profile outside the table.
    UnknownProfile { profile: String },
    /// A player index past the end of the game's player list.
    UnknownPlayer { player: usize, players: usize },
}

impl fmt::Display for InvalidMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveError::IllegalMove { player, round, chosen } =>
                write!(f, "{} played illegal move {} in round {}", player, chosen, round),
            InvalidMoveError::UnknownProfile { profile } =>
                write!(f, "no payoff for profile {}", profile),
            InvalidMoveError::UnknownPlayer { player, players } =>
                write!(f, "player index {} out of range for {} players", player, players),
        }
    }
}

impl std::error::Error for InvalidMoveError {}

/// Any error surfaced by the public game API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    Configuration(ConfigurationError),
    InvalidMove(InvalidMoveError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Configuration(e) => write!(f, "configuration error: {}", e),
            GameError::InvalidMove(e) => write!(f, "invalid move: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Configuration(e) => Some(e),
            GameError::InvalidMove(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for GameError {
    fn from(e: ConfigurationError) -> Self {
        GameError::Configuration(e)
    }
}

impl From<InvalidMoveError> for GameError {
    fn from(e: InvalidMoveError) -> Self {
        GameError::InvalidMove(e)
    }
}
