//! Round-robin scheduling.
//!
//! Builds every matchup between partnerships that share no player and
//! packs the matchups greedily into conflict-free rounds: within a round
//! no player appears twice. Byes and courts are left to later stages.
//!
//! # Strategies
//!
//! - [`ScheduleStrategy::Greedy`]: one pass over the candidates in
//!   partnership index order. Fully deterministic, no tuning.
//! - [`ScheduleStrategy::Compact`]: repeats the greedy packing over
//!   seeded shuffles of the candidate order and keeps the schedule with
//!   the fewest rounds.
//!
//! Every pass places at least the first remaining candidate into each
//! new round, so packing always terminates with every matchup scheduled
//! exactly once. It does not minimise the number of rounds.

mod config;
mod runner;
mod summary;

pub use config::{ScheduleConfig, ScheduleStrategy};
pub use runner::{candidate_matchups, schedule_rounds, schedule_rounds_with_config};
pub use summary::{round_lower_bound, ScheduleSummary};
