pub mod catalog;
pub mod duel;
pub mod simulate;
pub mod solve;
pub mod tournament;

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use game_logic::{Builtin, Game, GameSpec, RoundConfig};
use serde::Serialize;

/// Where a game comes from: a catalog entry or a JSON file
#[derive(Args)]
pub struct GameSource {
    /// Catalog game id or name (see `game-sim catalog`)
    #[arg(long, conflicts_with = "file")]
    pub game: Option<String>,
    /// JSON game description: { players, strategies, payoffs: [{ profile, payoffs }] }
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl GameSource {
    pub fn load(&self) -> Result<Game<String>> {
        match (&self.game, &self.file) {
            (Some(name), None) => {
                let entry = game_logic::catalog::lookup(name)
                    .ok_or_else(|| anyhow!("unknown catalog game '{}'", name))?;
                log::debug!("loading catalog game {}", entry.id);
                Ok((entry.build)()?)
            }
            (None, Some(path)) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let spec: GameSpec<String> = serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?;
                Game::try_from(spec).with_context(|| format!("building {}", path.display()))
            }
            _ => bail!("pass either --game <name> or --file <path>"),
        }
    }
}

/// How long each Prisoner's Dilemma match lasts
#[derive(Args)]
pub struct MatchLength {
    /// Rounds per match (the minimum when --max-rounds is set)
    #[arg(long, default_value_t = 10)]
    pub rounds: usize,
    /// Upper bound for a match of unknown length
    #[arg(long)]
    pub max_rounds: Option<usize>,
    /// Percent chance to end the match after each round past --rounds
    #[arg(long, default_value_t = 0, requires = "max_rounds")]
    pub end_probability: u8,
}

impl MatchLength {
    pub fn config(&self) -> Result<RoundConfig> {
        match self.max_rounds {
            None => Ok(RoundConfig::fixed(self.rounds)),
            Some(max) => Ok(RoundConfig::geometric(self.rounds, max, self.end_probability)?),
        }
    }
}

pub fn parse_builtin(name: &str) -> Result<Builtin> {
    Builtin::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Builtin::ALL.iter().map(|b| b.name()).collect();
        anyhow!("unknown strategy '{}' (known: {})", name, known.join(", "))
    })
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn profile_text<S: std::fmt::Display>(profile: &[S]) -> String {
    let parts: Vec<String> = profile.iter().map(|s| s.to_string()).collect();
    format!("({})", parts.join(", "))
}
