//! All-pairs enumeration.

use log::debug;

use crate::error::{check_roster_size, ScheduleResult};
use crate::model::{Partnership, Player};

/// Number of partnerships a roster of `players` produces.
pub fn partnership_count(players: usize) -> usize {
    players * players.saturating_sub(1) / 2
}

/// Returns all `C(n, 2)` partnerships of the roster.
///
/// Pairs are emitted for index pairs `(i, j)` with `i < j` in roster
/// order, so the output is deterministic for a given roster.
///
/// # Errors
///
/// [`ScheduleError::RosterTooSmall`](crate::error::ScheduleError::RosterTooSmall)
/// for fewer than 4 players and
/// [`ScheduleError::RosterTooLarge`](crate::error::ScheduleError::RosterTooLarge)
/// for more than 16.
///
/// # Examples
///
/// ```
/// use u_doubles::model::Player;
/// use u_doubles::partnership::generate_partnerships;
///
/// let players: Vec<Player> = (1..=4)
///     .map(|i| Player::new(format!("p{i}"), format!("Player {i}"), format!("p{i}@club.test")))
///     .collect();
/// let partnerships = generate_partnerships(&players).unwrap();
/// assert_eq!(partnerships.len(), 6);
/// ```
pub fn generate_partnerships(players: &[Player]) -> ScheduleResult<Vec<Partnership>> {
    check_roster_size(players.len())?;

    let mut partnerships = Vec::with_capacity(partnership_count(players.len()));
    for (i, first) in players.iter().enumerate() {
        for second in &players[i + 1..] {
            partnerships.push(Partnership::new(first.clone(), second.clone()));
        }
    }

    debug!(
        "generated {} partnerships for {} players",
        partnerships.len(),
        players.len()
    );
    Ok(partnerships)
}
