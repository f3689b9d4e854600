//! Survivor name generation.

use rand::Rng;
use rand::seq::IndexedRandom;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bram", "Cora", "Dmitri", "Elena", "Farid", "Greta", "Hiro", "Ines", "Jonas", "Kaya",
    "Luca", "Mara", "Nico", "Olga", "Pavel", "Quinn", "Rosa", "Sven", "Tala", "Ugo", "Vera",
    "Wren", "Yara", "Zane",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Brennan", "Castillo", "Dvorak", "Eriksen", "Fontaine", "Gallo", "Hale", "Ivanova",
    "Jensen", "Kowalski", "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov", "Quist", "Reyes",
    "Sato", "Tanaka", "Ueda", "Varga", "Walsh", "Young", "Zielinski",
];

/// Draw a "First Last" name from the built-in pools.
pub fn generate_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Unnamed");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Survivor");
    format!("{first} {last}")
}
