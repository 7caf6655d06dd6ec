use anyhow::Result;
use game_logic::find_pure_nash_equilibria;

use super::{print_json, profile_text, GameSource};

pub fn run(source: &GameSource, json: bool) -> Result<()> {
    let game = source.load()?;
    let equilibria = find_pure_nash_equilibria(&game);
    log::debug!(
        "{} of {} profiles are pure Nash equilibria",
        equilibria.len(),
        game.profile_count()
    );

    if json {
        return print_json(&equilibria);
    }
    println!("=== Pure Nash Equilibria ===");
    if equilibria.is_empty() {
        println!("No pure strategy NE found.");
    }
    for eq in &equilibria {
        println!("NE: {} -> {}", profile_text(&eq.profile), profile_text(&eq.payoffs));
    }
    Ok(())
}
