use anyhow::Result;
use game_logic::{catalog, play_match, Seed};

use super::{parse_builtin, print_json, MatchLength};

pub fn run(
    strategy_a: &str,
    strategy_b: &str,
    length: &MatchLength,
    seed: u64,
    json: bool,
) -> Result<()> {
    let a = parse_builtin(strategy_a)?;
    let b = parse_builtin(strategy_b)?;
    let stage = catalog::iterated_dilemma()?;
    let result = play_match(&a, &b, &stage, &length.config()?, Seed::new(seed))?;

    if json {
        return print_json(&result);
    }
    println!("=== {} vs {} ===", a.name(), b.name());
    for round in &result.rounds {
        println!(
            "Round {:>3}: {} {} -> ({}, {})  [{}, {}]",
            round.round,
            round.move_a,
            round.move_b,
            round.score_a,
            round.score_b,
            round.cumulative_a,
            round.cumulative_b
        );
    }
    println!();
    println!("Total scores after {} rounds:", result.round_count);
    println!("{}: {}", a.name(), result.total_score_a);
    println!("{}: {}", b.name(), result.total_score_b);
    Ok(())
}
