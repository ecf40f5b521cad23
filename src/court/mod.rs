//! Court assignment.
//!
//! Maps the matches of each round onto court numbers `1..=courts`. Courts
//! are filled in order, so the courts used in a round are always
//! `{1, ..., k}`. The match whose players have waited longest since
//! their last game goes on the first free court; when a round holds more
//! matches than courts, the rest are dealt round-robin across the courts
//! and played in turn.
//!
//! Matches are ranked by composable [`MatchRule`]s: a later rule is only
//! consulted when the earlier ones tie, and a final tie keeps the
//! round's own match order.
//!
//! # References
//!
//! Dispatching rule composition: Pinedo (2016), "Scheduling: Theory,
//! Algorithms, and Systems"

mod assigner;
mod rules;

pub use assigner::{assign_courts, WaitTracker, UNPLAYED_WAIT};
pub use rules::{CourtContext, FewestPlayed, LongestWait, MatchRanker, MatchRule};
