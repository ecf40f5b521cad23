//! Greedy bye rotation.

use std::collections::HashSet;

use log::{debug, warn};

use super::config::ByeConfig;
use super::rebalance::rebalance_byes;
use crate::error::ScheduleResult;
use crate::model::{Partnership, Round};

/// Running bye state, threaded through the round fold.
///
/// Indexed by partnership position in the partnership slice; one
/// assignment slot per processed round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByeLedger {
    counts: Vec<usize>,
    assignments: Vec<Option<usize>>,
}

impl ByeLedger {
    /// Creates an empty ledger for `partnerships` partnerships.
    pub fn new(partnerships: usize) -> Self {
        Self {
            counts: vec![0; partnerships],
            assignments: Vec::new(),
        }
    }

    /// Rebuilds a ledger from a per-round assignment.
    pub fn from_assignments(partnerships: usize, assignments: Vec<Option<usize>>) -> Self {
        let mut counts = vec![0; partnerships];
        for &choice in assignments.iter().flatten() {
            counts[choice] += 1;
        }
        Self {
            counts,
            assignments,
        }
    }

    /// Byes received by each partnership.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Bye partnership index chosen for each round, in round order.
    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignments
    }

    /// `max(count) - min(count)` over all partnerships.
    pub fn spread(&self) -> usize {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        let min = self.counts.iter().copied().min().unwrap_or(0);
        max - min
    }

    /// Number of adjacent round pairs that gave the bye to the same
    /// partnership.
    pub fn consecutive_repeats(&self) -> usize {
        self.assignments
            .windows(2)
            .filter(|w| w[0].is_some() && w[0] == w[1])
            .count()
    }

    /// Spread at most one and no back-to-back byes.
    pub fn is_balanced(&self) -> bool {
        self.spread() <= 1 && self.consecutive_repeats() == 0
    }

    /// Picks the bye for the next round among `eligible`.
    ///
    /// Lowest bye count wins. On a tie, a partnership that did not take
    /// the previous round's bye is preferred, then the lowest index.
    pub fn select(&self, eligible: &[usize]) -> Option<usize> {
        let previous = self.assignments.last().copied().flatten();
        eligible
            .iter()
            .copied()
            .min_by_key(|&p| (self.counts[p], previous == Some(p), p))
    }

    fn record(&mut self, choice: Option<usize>) {
        if let Some(p) = choice {
            self.counts[p] += 1;
        }
        self.assignments.push(choice);
    }
}

/// Indices of partnerships with neither player on court in `round`.
pub fn eligible_partnerships(round: &Round, partnerships: &[Partnership]) -> Vec<usize> {
    let playing: HashSet<&str> = round.playing_player_ids().collect();
    partnerships
        .iter()
        .enumerate()
        .filter(|(_, p)| p.player_ids().iter().all(|id| !playing.contains(id)))
        .map(|(i, _)| i)
        .collect()
}

/// Assigns byes with the greedy rotation only and writes them into
/// `rounds`.
///
/// Rounds with no eligible partnership get no bye. Intended for odd
/// rosters; on even rosters it simply finds whatever idle partnerships
/// exist.
pub fn assign_byes(rounds: &mut [Round], partnerships: &[Partnership]) -> ByeLedger {
    let eligible = eligible_sets(rounds, partnerships);
    let ledger = rotate(&eligible, partnerships.len());
    apply(rounds, partnerships, &ledger);
    ledger
}

/// Assigns byes, then rebalances them if configured and needed.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidConfig`](crate::error::ScheduleError::InvalidConfig)
/// if the configuration does not validate.
pub fn assign_byes_with_config(
    rounds: &mut [Round],
    partnerships: &[Partnership],
    config: &ByeConfig,
) -> ScheduleResult<ByeLedger> {
    config.validate()?;

    let eligible = eligible_sets(rounds, partnerships);
    let mut ledger = rotate(&eligible, partnerships.len());

    if config.rebalance && !ledger.is_balanced() {
        let outcome = rebalance_byes(&eligible, ledger.assignments(), partnerships.len(), config);
        debug!(
            "bye rebalance: {} iterations, improved: {}",
            outcome.iterations, outcome.improved
        );
        if outcome.improved {
            ledger = ByeLedger::from_assignments(partnerships.len(), outcome.assignments);
        }
    }

    if !ledger.is_balanced() {
        warn!(
            "bye rotation unbalanced: spread {}, {} back-to-back byes",
            ledger.spread(),
            ledger.consecutive_repeats()
        );
    }

    apply(rounds, partnerships, &ledger);
    Ok(ledger)
}

fn eligible_sets(rounds: &[Round], partnerships: &[Partnership]) -> Vec<Vec<usize>> {
    rounds
        .iter()
        .map(|round| eligible_partnerships(round, partnerships))
        .collect()
}

fn rotate(eligible: &[Vec<usize>], partnerships: usize) -> ByeLedger {
    let ledger = eligible.iter().fold(ByeLedger::new(partnerships), |mut ledger, candidates| {
        let choice = ledger.select(candidates);
        ledger.record(choice);
        ledger
    });
    debug!(
        "bye rotation: {} byes over {} rounds",
        ledger.assignments.iter().flatten().count(),
        eligible.len()
    );
    ledger
}

fn apply(rounds: &mut [Round], partnerships: &[Partnership], ledger: &ByeLedger) {
    for (round, choice) in rounds.iter_mut().zip(ledger.assignments()) {
        round.bye_partnership = choice.map(|p| partnerships[p].clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Player;
    use crate::partnership::generate_partnerships;
    use crate::schedule::schedule_rounds;

    fn roster(n: usize) -> Vec<Player> {
        (1..=n)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}"), format!("p{i}@club.test")))
            .collect()
    }

    #[test]
    fn test_select_prefers_lowest_count() {
        let ledger = ByeLedger::from_assignments(3, vec![Some(0), Some(1)]);
        assert_eq!(ledger.select(&[0, 1, 2]), Some(2));
        assert_eq!(ledger.select(&[]), None);
    }

    #[test]
    fn test_select_avoids_previous_on_tie() {
        let ledger = ByeLedger::from_assignments(2, vec![Some(1), Some(0)]);
        // Both have one bye; 0 took the last one.
        assert_eq!(ledger.select(&[0, 1]), Some(1));
    }

    #[test]
    fn test_rotate_alternates() {
        let ledger = rotate(&[vec![0, 1], vec![0, 1], vec![0, 1]], 2);
        assert_eq!(ledger.assignments(), &[Some(0), Some(1), Some(0)]);
        assert_eq!(ledger.counts(), &[2, 1]);
        assert_eq!(ledger.spread(), 1);
        assert_eq!(ledger.consecutive_repeats(), 0);
        assert!(ledger.is_balanced());
    }

    #[test]
    fn test_rotate_skips_rounds_without_candidates() {
        let ledger = rotate(&[vec![], vec![1], vec![]], 2);
        assert_eq!(ledger.assignments(), &[None, Some(1), None]);
        assert_eq!(ledger.consecutive_repeats(), 0);
    }

    #[test]
    fn test_even_roster_has_no_byes() {
        let partnerships = generate_partnerships(&roster(4)).unwrap();
        let mut rounds = schedule_rounds(&partnerships);
        let ledger = assign_byes(&mut rounds, &partnerships);

        assert!(rounds.iter().all(|r| r.bye_partnership.is_none()));
        assert_eq!(ledger.spread(), 0);
    }

    #[test]
    fn test_five_players_no_idle_partnership() {
        // Four players are on court each round, leaving a single idle player.
        let partnerships = generate_partnerships(&roster(5)).unwrap();
        let mut rounds = schedule_rounds(&partnerships);
        let ledger = assign_byes(&mut rounds, &partnerships);

        assert!(rounds.iter().all(|r| r.bye_partnership.is_none()));
        assert!(ledger.is_balanced());
    }

    #[test]
    fn test_seven_players_bye_every_round() {
        let partnerships = generate_partnerships(&roster(7)).unwrap();
        let mut rounds = schedule_rounds(&partnerships);
        let ledger = assign_byes(&mut rounds, &partnerships);

        assert_eq!(ledger.assignments().len(), rounds.len());
        for round in &rounds {
            let bye = round
                .bye_partnership
                .as_ref()
                .expect("three idle players always leave an idle partnership");
            for id in bye.player_ids() {
                assert!(
                    !round.is_playing(id),
                    "bye player {id} is on court in round {}",
                    round.number
                );
            }
        }
        assert_eq!(ledger.counts().iter().sum::<usize>(), rounds.len());
    }

    #[test]
    fn test_rebalance_never_worsens() {
        let partnerships = generate_partnerships(&roster(11)).unwrap();
        let rounds = schedule_rounds(&partnerships);

        let mut plain_rounds = rounds.clone();
        let plain = assign_byes(&mut plain_rounds, &partnerships);

        let mut tuned_rounds = rounds;
        let tuned =
            assign_byes_with_config(&mut tuned_rounds, &partnerships, &ByeConfig::default()).unwrap();

        assert!(tuned.spread().saturating_sub(1) <= plain.spread().saturating_sub(1));
        for round in &tuned_rounds {
            if let Some(bye) = &round.bye_partnership {
                assert!(bye.player_ids().iter().all(|id| !round.is_playing(id)));
            }
        }
    }

    #[test]
    fn test_config_disables_rebalance() {
        let partnerships = generate_partnerships(&roster(7)).unwrap();
        let rounds = schedule_rounds(&partnerships);

        let mut a = rounds.clone();
        let plain = assign_byes(&mut a, &partnerships);

        let mut b = rounds;
        let config = ByeConfig::default().with_rebalance(false);
        let unchanged = assign_byes_with_config(&mut b, &partnerships, &config).unwrap();

        assert_eq!(plain, unchanged);
        assert_eq!(a, b);
    }
}
