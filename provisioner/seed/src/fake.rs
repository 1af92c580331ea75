// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Random demo values. Not meant to look like real people.

use rand::seq::IndexedRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Edsger", "Frances", "Grace", "Hedy", "Ivan", "Joan",
    "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Sophie", "Tim", "Whitfield", "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Berners-Lee", "Cerf", "Dijkstra", "Engelbart", "Goldberg", "Hamilton", "Hopper", "Kay",
    "Knuth", "Lamarr", "Liskov", "Lovelace", "Perlman", "Ritchie", "Shannon", "Sutherland", "Thompson",
    "Torvalds", "Wirth",
];

const ADJECTIVES: &[&str] = &[
    "agile", "bold", "brave", "bright", "calm", "clever", "curious", "daring", "eager", "fearless",
    "gentle", "happy", "honest", "jolly", "keen", "lively", "loyal", "mighty", "nimble", "patient",
    "proud", "quick", "quiet", "rapid", "sharp", "steady", "swift", "vivid", "witty", "zesty",
];

const NOUNS: &[&str] = &[
    "anchor", "beacon", "canyon", "delta", "ember", "falcon", "glacier", "harbor", "island", "jungle",
    "lagoon", "meadow", "nebula", "orchard", "prairie", "quarry", "summit", "tundra", "valley", "willow",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const PASSWORD_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%&*?";

pub(crate) struct Person {
    pub first_name: String,
    pub last_name: String,
}

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &[&str]) -> String {
    words.choose(rng).copied().unwrap_or_default().to_string()
}

pub(crate) fn person<R: Rng + ?Sized>(rng: &mut R) -> Person {
    Person {
        first_name: pick(rng, FIRST_NAMES),
        last_name: pick(rng, LAST_NAMES),
    }
}

pub(crate) fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}{}@{}",
        pick(rng, FIRST_NAMES).to_lowercase(),
        pick(rng, NOUNS),
        rng.random_range(1..10_000),
        pick(rng, EMAIL_DOMAINS)
    )
}

pub(crate) fn password<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| PASSWORD_CHARS[rng.random_range(0..PASSWORD_CHARS.len())] as char)
        .collect()
}

pub(crate) fn adjective<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, ADJECTIVES)
}

pub(crate) fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", title_case(&pick(rng, ADJECTIVES)), title_case(&pick(rng, NOUNS)))
}

pub(crate) fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
