//! Partnership generation.
//!
//! Enumerates every unordered pair of players in roster order. For a
//! roster of `n` players this yields `n(n-1)/2` teams, and every player
//! belongs to exactly `n-1` of them.

mod generator;

pub use generator::{generate_partnerships, partnership_count};
