//! Strategy definitions and execution

use core::fmt;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::game::{Game, Label};

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    pub const ALL: [Move; 2] = [Move::Cooperate, Move::Defect];

    /// Short label, as used in payoff tables.
    pub fn label(self) -> &'static str {
        match self {
            Move::Cooperate => "C",
            Move::Defect => "D",
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A history-aware strategy for repeated two-player play.
///
/// Called once per round with this side's own prior moves first and the
/// opponent's prior moves second; both exclude the current round and are
/// empty on the first round. The returned move must belong to the stage
/// game's alphabet for this side.
pub trait Strategy<M>: Send + Sync {
    fn next_move(&self, own_history: &[M], opponent_history: &[M], rng: &mut dyn RngCore) -> M;
}

impl<M, F> Strategy<M> for F
where
    F: Fn(&[M], &[M], &mut dyn RngCore) -> M + Send + Sync,
{
    fn next_move(&self, own_history: &[M], opponent_history: &[M], rng: &mut dyn RngCore) -> M {
        self(own_history, opponent_history, rng)
    }
}

/// Built-in strategies over the Cooperate/Defect alphabet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Builtin {
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Copy opponent's last move. Start with cooperate.
    TitForTat,
    /// Cooperate or defect with equal probability.
    Random,
    /// Cooperate until opponent defects once, then always defect.
    GrimTrigger,
    /// Tit-for-Tat but start with defect.
    SuspiciousTitForTat,
    /// Defect only if opponent defected twice in a row.
    TitForTwoTats,
    /// Win-stay, lose-switch.
    Pavlov,
    /// Retaliate with increasing defection streaks, then forgive.
    Gradual,
}

impl Builtin {
    pub const ALL: [Builtin; 9] = [
        Builtin::AlwaysCooperate,
        Builtin::AlwaysDefect,
        Builtin::TitForTat,
        Builtin::Random,
        Builtin::GrimTrigger,
        Builtin::SuspiciousTitForTat,
        Builtin::TitForTwoTats,
        Builtin::Pavlov,
        Builtin::Gradual,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::AlwaysCooperate => "Always Cooperate",
            Builtin::AlwaysDefect => "Always Defect",
            Builtin::TitForTat => "Tit for Tat",
            Builtin::Random => "Random",
            Builtin::GrimTrigger => "Grim Trigger",
            Builtin::SuspiciousTitForTat => "Suspicious Tit for Tat",
            Builtin::TitForTwoTats => "Tit for Two Tats",
            Builtin::Pavlov => "Pavlov",
            Builtin::Gradual => "Gradual",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Builtin::AlwaysCooperate => "Never defects. Always cooperates.",
            Builtin::AlwaysDefect => "Never cooperates. Always defects.",
            Builtin::TitForTat => "Copies opponent's last move. Starts by cooperating.",
            Builtin::Random => "Randomly cooperates or defects each round.",
            Builtin::GrimTrigger => "Cooperates until betrayed, then always defects.",
            Builtin::SuspiciousTitForTat => "Like Tit for Tat, but starts with defect.",
            Builtin::TitForTwoTats => "Only retaliates after two consecutive defections.",
            Builtin::Pavlov => "Repeats move if both players matched, switches otherwise.",
            Builtin::Gradual => "Retaliates with increasing severity, then forgives.",
        }
    }

    /// Look up a builtin by its display name or variant name, ignoring case
    /// and separators.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Self::ALL.into_iter().find(|b| {
            normalize(b.name()) == wanted || normalize(&format!("{:?}", b)) == wanted
        })
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl Strategy<Move> for Builtin {
    fn next_move(&self, own_history: &[Move], opponent_history: &[Move], rng: &mut dyn RngCore) -> Move {
        match self {
            Builtin::AlwaysCooperate => Move::Cooperate,
            Builtin::AlwaysDefect => Move::Defect,
            Builtin::TitForTat => opponent_history.last().copied().unwrap_or(Move::Cooperate),
            Builtin::Random => {
                if rng.random_bool(0.5) {
                    Move::Cooperate
                } else {
                    Move::Defect
                }
            }
            Builtin::GrimTrigger => {
                if opponent_history.contains(&Move::Defect) {
                    Move::Defect
                } else {
                    Move::Cooperate
                }
            }
            Builtin::SuspiciousTitForTat => opponent_history.last().copied().unwrap_or(Move::Defect),
            Builtin::TitForTwoTats => execute_tit_for_two_tats(opponent_history),
            Builtin::Pavlov => execute_pavlov(own_history, opponent_history),
            Builtin::Gradual => execute_gradual(own_history, opponent_history),
        }
    }
}

/// Tit-for-Two-Tats: Only defect if opponent defected twice in a row
fn execute_tit_for_two_tats(opponent_history: &[Move]) -> Move {
    match opponent_history {
        [.., Move::Defect, Move::Defect] => Move::Defect,
        _ => Move::Cooperate,
    }
}

/// Pavlov: Win-stay, lose-switch
///
/// Under the Prisoner's Dilemma payoffs a "win" (3 or 5 points) is exactly a
/// round where the opponent cooperated, so the rule reduces to: stay after
/// the opponent cooperated, switch after it defected.
fn execute_pavlov(own_history: &[Move], opponent_history: &[Move]) -> Move {
    match (own_history.last(), opponent_history.last()) {
        (Some(&mine), Some(Move::Cooperate)) => mine,
        (Some(&mine), Some(Move::Defect)) => mine.flip(),
        _ => Move::Cooperate,
    }
}

/// Gradual: Escalating retaliation
/// After N opponent defections, player should have made N(N+1)/2 total defections
fn execute_gradual(own_history: &[Move], opponent_history: &[Move]) -> Move {
    let their_defections = count_defects(opponent_history);
    let my_defections = count_defects(own_history);
    let expected = their_defections * (their_defections + 1) / 2;

    if my_defections < expected {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

fn count_defects(history: &[Move]) -> usize {
    history.iter().filter(|m| **m == Move::Defect).count()
}

/// Uniform random choice over an arbitrary alphabet, ignoring history.
#[derive(Clone, Debug)]
pub struct RandomChoice<M> {
    moves: Vec<M>,
}

impl<M: Label> RandomChoice<M> {
    /// `None` when the alphabet is empty.
    pub fn new(moves: Vec<M>) -> Option<Self> {
        if moves.is_empty() {
            None
        } else {
            Some(Self { moves })
        }
    }

    /// Uniform over one player's strategy set in `game`; `None` if `player`
    /// is not a player of `game`.
    pub fn for_player(game: &Game<M>, player: usize) -> Option<Self> {
        let moves = game.strategy_sets().get(player)?;
        Some(Self { moves: moves.clone() })
    }

    pub fn moves(&self) -> &[M] {
        &self.moves
    }
}

impl<M: Label + Send + Sync> Strategy<M> for RandomChoice<M> {
    fn next_move(&self, _own_history: &[M], _opponent_history: &[M], rng: &mut dyn RngCore) -> M {
        self.moves[rng.random_range(0..self.moves.len())].clone()
    }
}
