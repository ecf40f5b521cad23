//! Domain types shared by every scheduling stage.
//!
//! [`Player`] and [`Court`] records are supplied by the caller and never
//! modified. [`Partnership`], [`Match`] and [`Round`] are produced by one
//! scheduling run and hold copies of the player records they reference.

mod ids;
mod types;

pub use ids::{MatchId, PartnershipId, PlayerId};
pub use types::{Court, Match, Partnership, Player, Round};
