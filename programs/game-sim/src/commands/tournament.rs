use anyhow::Result;
use game_logic::{catalog, run_tournament_report, Registry, Seed, TournamentConfig};

use super::{parse_builtin, print_json, MatchLength};

pub fn run(
    strategies: &[String],
    all: bool,
    length: &MatchLength,
    seed: u64,
    show_matches: bool,
    json: bool,
) -> Result<()> {
    let registry = if all {
        Registry::builtins()
    } else if strategies.is_empty() {
        Registry::classic()
    } else {
        let builtins = strategies
            .iter()
            .map(|s| parse_builtin(s))
            .collect::<Result<Vec<_>>>()?;
        Registry::with_builtins(&builtins)?
    };
    let stage = catalog::iterated_dilemma()?;
    let config = TournamentConfig { rounds: length.config()?, seed: Seed::new(seed) };
    log::info!(
        "{} strategies, about {:.1} rounds per match",
        registry.len(),
        config.rounds.expected_rounds()
    );
    let report = run_tournament_report(&registry, &stage, &config)?;

    if json {
        return print_json(&report);
    }
    if show_matches {
        println!("=== Matches ===");
        for m in &report.matches {
            println!(
                "#{:<3} {} vs {}: {} - {} ({} rounds)",
                m.match_index, m.strategy_a, m.strategy_b, m.score_a, m.score_b, m.rounds
            );
        }
        println!();
    }
    println!("=== Tournament Results ===");
    for (place, (name, score)) in report.standings.ranked().into_iter().enumerate() {
        println!("{}. {}: {} points", place + 1, name, score);
    }
    Ok(())
}
