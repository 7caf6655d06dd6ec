//! Game Sim
//!
//! Command line driver for the game logic library: solves textbook or
//! file-described games for their pure Nash equilibria, replays them at
//! random, and runs Prisoner's Dilemma matches and tournaments.

mod commands;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use commands::{GameSource, MatchLength};

#[derive(Parser)]
#[command(name = "game-sim", author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "List the textbook games", alias = "ls")]
    Catalog,
    #[command(about = "Find the pure Nash equilibria of a game", alias = "ne")]
    Solve {
        #[command(flatten)]
        source: GameSource,
    },
    #[command(about = "Replay a game with every player choosing at random", alias = "sim")]
    Simulate {
        #[command(flatten)]
        source: GameSource,
        /// Number of rounds to play
        #[arg(long, default_value_t = 10)]
        rounds: usize,
        /// Master seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    #[command(about = "Play two built-in strategies on the Prisoner's Dilemma")]
    Match {
        #[arg(required = true)]
        strategy_a: String,
        #[arg(required = true)]
        strategy_b: String,
        #[command(flatten)]
        length: MatchLength,
        /// Master seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    #[command(about = "Round-robin tournament of built-in strategies", alias = "rr")]
    Tournament {
        /// Strategies to enter, comma separated (default: the classic four)
        #[arg(long, value_delimiter = ',', conflicts_with = "all")]
        strategies: Vec<String>,
        /// Enter every built-in strategy
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        length: MatchLength,
        /// Master seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Also print every match
        #[arg(long)]
        matches: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Catalog => commands::catalog::run(cli.json),
        Command::Solve { source } => commands::solve::run(&source, cli.json),
        Command::Simulate { source, rounds, seed } => {
            commands::simulate::run(&source, rounds, seed, cli.json)
        }
        Command::Match { strategy_a, strategy_b, length, seed } => {
            commands::duel::run(&strategy_a, &strategy_b, &length, seed, cli.json)
        }
        Command::Tournament { strategies, all, length, seed, matches } => {
            commands::tournament::run(&strategies, all, &length, seed, matches, cli.json)
        }
    }
}
