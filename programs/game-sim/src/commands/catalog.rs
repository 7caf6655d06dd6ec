use anyhow::Result;
use game_logic::catalog::CATALOG;
use serde::Serialize;

use super::print_json;

#[derive(Serialize)]
struct Listing {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

pub fn run(json: bool) -> Result<()> {
    if json {
        let listing: Vec<Listing> = CATALOG
            .iter()
            .map(|e| Listing { id: e.id, name: e.name, description: e.description })
            .collect();
        return print_json(&listing);
    }
    for entry in &CATALOG {
        println!("{:<22} {}", entry.id, entry.name);
        println!("{:<22} {}", "", entry.description);
    }
    Ok(())
}
