use anyhow::Result;
use game_logic::{run_stochastic_rounds, Seed};

use super::{print_json, profile_text, GameSource};

pub fn run(source: &GameSource, rounds: usize, seed: u64, json: bool) -> Result<()> {
    let game = source.load()?;
    let run = run_stochastic_rounds(&game, rounds, &mut Seed::new(seed).rng());

    if json {
        return print_json(&run);
    }
    println!("=== Simulation of repeated play ===");
    for round in &run.rounds {
        println!(
            "Round {}: {} -> {}",
            round.round,
            profile_text(&round.profile),
            profile_text(&round.payoffs)
        );
    }
    println!();
    println!("Total scores after {} rounds:", rounds);
    for (player, total) in game.players().iter().zip(&run.totals) {
        println!("{}: {}", player, total);
    }
    Ok(())
}
