//! Doubles round-robin tournament scheduling.
//!
//! Turns a roster of 4 to 16 players and 1 to 4 courts into a complete
//! schedule:
//!
//! - **Partnerships**: every unordered pair of players forms a team.
//! - **Round-robin**: every two teams with no player in common meet
//!   exactly once, packed greedily into rounds where nobody plays twice.
//! - **Byes**: odd rosters rotate a bye partnership through the rounds,
//!   with a tabu-search repair pass when the greedy rotation is uneven.
//! - **Courts**: matches go on courts `1..=k` in each round, players who
//!   have waited longest first.
//! - **Validation**: an independent audit returning errors and fairness
//!   warnings as data.
//!
//! [`generate_tournament`] runs the whole pipeline; each stage is also
//! public on its own.
//!
//! # Features
//!
//! - `parallel`: evaluate [`ScheduleStrategy::Compact`](schedule::ScheduleStrategy::Compact)
//!   attempts with rayon.
//! - `serde`: `Serialize`/`Deserialize` for the model, reports and results.

pub mod bye;
pub mod court;
pub mod error;
pub mod model;
pub mod partnership;
pub mod schedule;
pub mod tournament;
pub mod validate;

pub use error::{ScheduleError, ScheduleResult};
pub use tournament::{
    can_generate_tournament, generate_tournament, generate_tournament_with_config, Tournament,
    TournamentConfig,
};
