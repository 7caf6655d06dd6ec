//! Textbook two-player games

use crate::error::ConfigurationError;
use crate::game::Game;
use crate::strategy::Move;

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn dilemma_payoff(a: Move, b: Move) -> (f64, f64) {
    match (a, b) {
        (Move::Cooperate, Move::Cooperate) => (3.0, 3.0),
        (Move::Cooperate, Move::Defect) => (0.0, 5.0),
        (Move::Defect, Move::Cooperate) => (5.0, 0.0),
        (Move::Defect, Move::Defect) => (1.0, 1.0),
    }
}

/// The Prisoner's Dilemma over [`Move`], the stage game of the tournament.
pub fn iterated_dilemma() -> Result<Game<Move>, ConfigurationError> {
    let table = Move::ALL
        .into_iter()
        .flat_map(|a| Move::ALL.into_iter().map(move |b| ((a, b), dilemma_payoff(a, b))));
    Game::two_player(Move::ALL.to_vec(), Move::ALL.to_vec(), table)
}

pub fn prisoners_dilemma() -> Result<Game<String>, ConfigurationError> {
    symmetric(
        ["C", "D"],
        [
            (("C", "C"), (3.0, 3.0)),
            (("C", "D"), (0.0, 5.0)),
            (("D", "C"), (5.0, 0.0)),
            (("D", "D"), (1.0, 1.0)),
        ],
    )
}

pub fn matching_pennies() -> Result<Game<String>, ConfigurationError> {
    symmetric(
        ["H", "T"],
        [
            (("H", "H"), (1.0, -1.0)),
            (("H", "T"), (-1.0, 1.0)),
            (("T", "H"), (-1.0, 1.0)),
            (("T", "T"), (1.0, -1.0)),
        ],
    )
}

pub fn stag_hunt() -> Result<Game<String>, ConfigurationError> {
    symmetric(
        ["Stag", "Hare"],
        [
            (("Stag", "Stag"), (4.0, 4.0)),
            (("Stag", "Hare"), (0.0, 3.0)),
            (("Hare", "Stag"), (3.0, 0.0)),
            (("Hare", "Hare"), (3.0, 3.0)),
        ],
    )
}

pub fn battle_of_the_sexes() -> Result<Game<String>, ConfigurationError> {
    symmetric(
        ["Opera", "Football"],
        [
            (("Opera", "Opera"), (3.0, 2.0)),
            (("Opera", "Football"), (0.0, 0.0)),
            (("Football", "Opera"), (0.0, 0.0)),
            (("Football", "Football"), (2.0, 3.0)),
        ],
    )
}

pub fn chicken() -> Result<Game<String>, ConfigurationError> {
    symmetric(
        ["Swerve", "Straight"],
        [
            (("Swerve", "Swerve"), (0.0, 0.0)),
            (("Swerve", "Straight"), (-1.0, 1.0)),
            (("Straight", "Swerve"), (1.0, -1.0)),
            (("Straight", "Straight"), (-10.0, -10.0)),
        ],
    )
}

fn symmetric(
    moves: [&str; 2],
    table: [((&str, &str), (f64, f64)); 4],
) -> Result<Game<String>, ConfigurationError> {
    let labels: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
    Game::two_player(
        labels.clone(),
        labels,
        table
            .into_iter()
            .map(|((a, b), payoffs)| ((a.to_string(), b.to_string()), payoffs)),
    )
}

/// A named game in the catalog
#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn() -> Result<Game<String>, ConfigurationError>,
}

pub static CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        id: "prisoners-dilemma",
        name: "Prisoner's Dilemma",
        description: "Mutual defection is the only equilibrium although both prefer mutual cooperation.",
        build: prisoners_dilemma,
    },
    CatalogEntry {
        id: "matching-pennies",
        name: "Matching Pennies",
        description: "Zero-sum guessing game without a pure equilibrium.",
        build: matching_pennies,
    },
    CatalogEntry {
        id: "stag-hunt",
        name: "Stag Hunt",
        description: "Coordination between a safe and a rewarding equilibrium.",
        build: stag_hunt,
    },
    CatalogEntry {
        id: "battle-of-the-sexes",
        name: "Battle of the Sexes",
        description: "Two coordination equilibria, each favouring one player.",
        build: battle_of_the_sexes,
    },
    CatalogEntry {
        id: "chicken",
        name: "Chicken",
        description: "Anti-coordination: each equilibrium has one player yield.",
        build: chicken,
    },
];

/// Find a catalog entry by id or display name, ignoring case.
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG
        .iter()
        .find(|e| e.id.eq_ignore_ascii_case(name) || e.name.eq_ignore_ascii_case(name))
}

pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|e| e.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_matrix() {
        assert_eq!(dilemma_payoff(Move::Cooperate, Move::Cooperate), (3.0, 3.0));
        assert_eq!(dilemma_payoff(Move::Cooperate, Move::Defect), (0.0, 5.0));
        assert_eq!(dilemma_payoff(Move::Defect, Move::Cooperate), (5.0, 0.0));
        assert_eq!(dilemma_payoff(Move::Defect, Move::Defect), (1.0, 1.0));
    }

    #[test]
    fn test_iterated_dilemma_matches_labelled_table() {
        let moves = iterated_dilemma().unwrap();
        let labelled = prisoners_dilemma().unwrap();
        for a in Move::ALL {
            for b in Move::ALL {
                let by_move = moves.payoff(&[a, b]).unwrap();
                let by_label = labelled
                    .payoff(&[a.label().to_string(), b.label().to_string()])
                    .unwrap();
                assert_eq!(by_move, by_label);
            }
        }
    }

    #[test]
    fn test_every_entry_builds() {
        for entry in &CATALOG {
            let game = (entry.build)().unwrap();
            assert_eq!(game.player_count(), 2);
            assert_eq!(game.profile_count(), 4);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("stag-hunt").map(|e| e.name), Some("Stag Hunt"));
        assert_eq!(lookup("Matching Pennies").map(|e| e.id), Some("matching-pennies"));
        assert!(lookup("tic-tac-toe").is_none());
        assert_eq!(names().count(), CATALOG.len());
    }
}
