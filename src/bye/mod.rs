//! Bye rotation for odd rosters.
//!
//! When the player count is odd, some rounds leave a whole partnership
//! idle. Each round gets at most one *bye partnership*, chosen from the
//! partnerships with no player on court that round, rotating so that bye
//! counts stay within one of each other and no partnership sits out two
//! adjacent rounds.
//!
//! Rotation is a single greedy fold over the rounds carrying an explicit
//! [`ByeLedger`]. If the fold leaves the ledger unbalanced, a tabu search
//! over each round's eligible partnerships tries to repair it.
//!
//! # References
//!
//! Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.

mod config;
mod rebalance;
mod rotation;

pub use config::ByeConfig;
pub use rebalance::{rebalance_byes, ByeCost, RebalanceOutcome};
pub use rotation::{assign_byes, assign_byes_with_config, eligible_partnerships, ByeLedger};
