//! WASM bindings for browser-side solving and match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::catalog::{self, CATALOG};
use crate::{
    find_pure_nash_equilibria, play_match, run_stochastic_rounds, run_tournament_report, Builtin,
    Game, GameSpec, Move, Registry, RoundConfig, Seed, TournamentConfig,
};

/// Parse a builtin strategy from its display name ("Tit for Tat") or its
/// JSON form (`"TitForTat"`).
fn parse_builtin(input: &str) -> Result<Builtin, String> {
    if let Some(builtin) = Builtin::from_name(input) {
        return Ok(builtin);
    }
    serde_json::from_str::<Builtin>(input).map_err(|e| format!("Invalid strategy: {}", e))
}

fn parse_game(game_json: &str) -> Result<Game<String>, JsError> {
    let spec: GameSpec<String> = serde_json::from_str(game_json)
        .map_err(|e| JsError::new(&format!("Invalid game: {}", e)))?;
    Game::try_from(spec).map_err(|e| JsError::new(&e.to_string()))
}

fn dilemma() -> Result<Game<Move>, JsError> {
    catalog::iterated_dilemma().map_err(|e| JsError::new(&e.to_string()))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Pure Nash equilibria of a JSON game description
#[wasm_bindgen]
pub fn solve_game(game_json: &str) -> Result<JsValue, JsError> {
    let game = parse_game(game_json)?;
    to_js(&find_pure_nash_equilibria(&game))
}

/// Random-strategy replay of a JSON game description
#[wasm_bindgen]
pub fn simulate_game(game_json: &str, rounds: u32, seed: u64) -> Result<JsValue, JsError> {
    let game = parse_game(game_json)?;
    let run = run_stochastic_rounds(&game, rounds as usize, &mut Seed::new(seed).rng());
    to_js(&run)
}

/// Replay a Prisoner's Dilemma match between two builtins with full
/// round-by-round details
#[wasm_bindgen]
pub fn replay_match(
    strategy_a: &str,
    strategy_b: &str,
    rounds: u32,
    seed: u64,
) -> Result<JsValue, JsError> {
    let a = parse_builtin(strategy_a)
        .map_err(|e| JsError::new(&format!("Invalid strategy A: {}", e)))?;
    let b = parse_builtin(strategy_b)
        .map_err(|e| JsError::new(&format!("Invalid strategy B: {}", e)))?;
    let stage = dilemma()?;

    let result = play_match(&a, &b, &stage, &RoundConfig::fixed(rounds as usize), Seed::new(seed))
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&result)
}

/// Run the classic four-strategy tournament
#[wasm_bindgen]
pub fn run_classic_tournament(rounds: u32, seed: u64) -> Result<JsValue, JsError> {
    let stage = dilemma()?;
    let config = TournamentConfig::fixed(rounds as usize, Seed::new(seed));
    let report = run_tournament_report(&Registry::classic(), &stage, &config)
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&report)
}

#[derive(serde::Serialize)]
struct InfoEntry {
    id: String,
    name: String,
    description: String,
}

/// Get all available builtin strategies
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<InfoEntry> = Builtin::ALL
        .iter()
        .map(|b| InfoEntry {
            id: format!("{:?}", b),
            name: b.name().to_string(),
            description: b.description().to_string(),
        })
        .collect();
    to_js(&types)
}

/// Get the textbook games of the catalog
#[wasm_bindgen]
pub fn get_catalog() -> Result<JsValue, JsError> {
    let entries: Vec<InfoEntry> = CATALOG
        .iter()
        .map(|e| InfoEntry {
            id: e.id.to_string(),
            name: e.name.to_string(),
            description: e.description.to_string(),
        })
        .collect();
    to_js(&entries)
}

/// JSON description of a catalog game, ready for `solve_game`
#[wasm_bindgen]
pub fn get_catalog_game(id: &str) -> Result<String, JsError> {
    let entry = catalog::lookup(id)
        .ok_or_else(|| JsError::new(&format!("Unknown game: {}", id)))?;
    let game = (entry.build)().map_err(|e| JsError::new(&e.to_string()))?;
    serde_json::to_string(&game.to_spec())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
