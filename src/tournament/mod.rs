//! End-to-end tournament generation.
//!
//! Runs the stages in order: partnerships, round-robin schedule, byes
//! (odd rosters only), courts, validation. Precondition failures abort
//! the pipeline with a [`ScheduleError`](crate::error::ScheduleError);
//! everything the validator finds is returned in the [`Tournament`].

mod config;
mod pipeline;

pub use config::TournamentConfig;
pub use pipeline::{
    can_generate_tournament, generate_tournament, generate_tournament_with_config, Tournament,
};
