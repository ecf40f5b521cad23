//! Court assignment loop.

use std::collections::HashMap;

use log::debug;

use super::rules::{CourtContext, MatchRanker};
use crate::error::{check_court_count, ScheduleResult};
use crate::model::{PlayerId, Round};

/// Wait credited to a player who has not played yet.
///
/// Large enough to outrank any real gap between rounds.
pub const UNPLAYED_WAIT: f64 = 1.0e6;

/// Rounds each player has played, threaded through court assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitTracker {
    history: HashMap<PlayerId, Vec<usize>>,
}

impl WaitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `players` played in round `round_index`.
    pub fn record(&mut self, players: &[&str], round_index: usize) {
        for &id in players {
            self.history
                .entry(id.to_string())
                .or_default()
                .push(round_index);
        }
    }

    /// Round indices `player_id` has played in, in order.
    pub fn rounds_played(&self, player_id: &str) -> &[usize] {
        self.history.get(player_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of matches `player_id` has played.
    pub fn matches_played(&self, player_id: &str) -> usize {
        self.rounds_played(player_id).len()
    }

    /// Most recent round `player_id` played in.
    pub fn last_played(&self, player_id: &str) -> Option<usize> {
        self.rounds_played(player_id).last().copied()
    }

    /// Rounds since `player_id` last played, as seen from `round_index`.
    pub fn wait(&self, player_id: &str, round_index: usize) -> f64 {
        match self.last_played(player_id) {
            Some(last) => round_index.saturating_sub(last) as f64,
            None => UNPLAYED_WAIT,
        }
    }
}

/// Assigns a court number to every match of every round.
///
/// Returns the wait tracker after the last round.
///
/// # Errors
///
/// [`ScheduleError::NoCourts`](crate::error::ScheduleError::NoCourts) for
/// zero courts and
/// [`ScheduleError::TooManyCourts`](crate::error::ScheduleError::TooManyCourts)
/// for more than four.
///
/// # Examples
///
/// ```
/// use u_doubles::court::assign_courts;
/// use u_doubles::model::Player;
/// use u_doubles::partnership::generate_partnerships;
/// use u_doubles::schedule::schedule_rounds;
///
/// let players: Vec<Player> = (1..=8)
///     .map(|i| Player::new(format!("p{i}"), format!("Player {i}"), format!("p{i}@club.test")))
///     .collect();
/// let partnerships = generate_partnerships(&players).unwrap();
/// let mut rounds = schedule_rounds(&partnerships);
/// assign_courts(&mut rounds, 2).unwrap();
/// assert!(rounds.iter().flat_map(|r| &r.matches).all(|m| m.court.is_some()));
/// ```
pub fn assign_courts(rounds: &mut [Round], court_count: usize) -> ScheduleResult<WaitTracker> {
    check_court_count(court_count)?;

    let ranker = MatchRanker::default();
    let tracker = rounds
        .iter_mut()
        .enumerate()
        .fold(WaitTracker::new(), |tracker, (index, round)| {
            assign_round(round, index, court_count, &ranker, tracker)
        });

    debug!(
        "assigned courts for {} rounds on {} courts",
        rounds.len(),
        court_count
    );
    Ok(tracker)
}

fn assign_round(
    round: &mut Round,
    round_index: usize,
    court_count: usize,
    ranker: &MatchRanker,
    mut tracker: WaitTracker,
) -> WaitTracker {
    let mut unassigned: Vec<usize> = (0..round.matches.len()).collect();
    let mut next_court = 1;

    while !unassigned.is_empty() && next_court <= court_count {
        let context = CourtContext {
            tracker: &tracker,
            round_index,
        };
        let candidates: Vec<_> = unassigned.iter().map(|&i| &round.matches[i]).collect();
        let Some(pick) = ranker.select_best(&candidates, &context) else {
            break;
        };

        let chosen = unassigned.remove(pick);
        round.matches[chosen].court = Some(next_court);
        tracker.record(&round.matches[chosen].player_ids(), round_index);
        next_court += 1;
    }

    // More matches than courts: deal the rest across the courts in order.
    for (k, idx) in unassigned.into_iter().enumerate() {
        round.matches[idx].court = Some(k % court_count + 1);
        tracker.record(&round.matches[idx].player_ids(), round_index);
    }

    for m in &mut round.matches {
        m.round_number = round.number;
    }
    tracker
}
