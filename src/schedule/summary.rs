//! Descriptive statistics of a schedule.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{PartnershipId, PlayerId, Round};

/// Fewest rounds that could hold `total_matches` when every round seats
/// at most `player_count / 4` matches.
pub fn round_lower_bound(total_matches: usize, player_count: usize) -> usize {
    let per_round = player_count / 4;
    if per_round == 0 {
        return 0;
    }
    total_matches.div_ceil(per_round)
}

/// Summary of a schedule, for reporting and comparing strategies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleSummary {
    /// Number of rounds.
    pub rounds: usize,
    /// Number of matches across all rounds.
    pub total_matches: usize,
    /// Largest number of matches in a single round.
    pub max_matches_per_round: usize,
    /// Fewest rounds the same matches could theoretically fit in.
    pub round_lower_bound: usize,
    /// Matches played by each player.
    pub matches_per_player: BTreeMap<PlayerId, usize>,
    /// Byes received by each partnership that received one.
    pub byes_per_partnership: BTreeMap<PartnershipId, usize>,
    /// Longest run of consecutive rounds any player sits out.
    pub longest_idle_streak: usize,
}

impl ScheduleSummary {
    /// Computes the summary of `rounds`.
    pub fn from_rounds(rounds: &[Round]) -> Self {
        let mut players: BTreeSet<&str> = BTreeSet::new();
        for round in rounds {
            players.extend(round.playing_player_ids());
            if let Some(bye) = &round.bye_partnership {
                players.extend(bye.player_ids());
            }
        }

        let mut matches_per_player: BTreeMap<PlayerId, usize> =
            players.iter().map(|&id| (id.to_string(), 0)).collect();
        let mut byes_per_partnership: BTreeMap<PartnershipId, usize> = BTreeMap::new();
        let mut idle_run: BTreeMap<&str, usize> = players.iter().map(|&id| (id, 0)).collect();
        let mut longest_idle_streak = 0;

        for round in rounds {
            let playing: BTreeSet<&str> = round.playing_player_ids().collect();
            for id in &playing {
                if let Some(count) = matches_per_player.get_mut(*id) {
                    *count += 1;
                }
            }
            for (id, run) in idle_run.iter_mut() {
                if playing.contains(id) {
                    *run = 0;
                } else {
                    *run += 1;
                    longest_idle_streak = longest_idle_streak.max(*run);
                }
            }
            if let Some(bye) = &round.bye_partnership {
                *byes_per_partnership.entry(bye.id.clone()).or_insert(0) += 1;
            }
        }

        let total_matches = rounds.iter().map(|r| r.matches.len()).sum();

        Self {
            rounds: rounds.len(),
            total_matches,
            max_matches_per_round: rounds.iter().map(|r| r.matches.len()).max().unwrap_or(0),
            round_lower_bound: round_lower_bound(total_matches, players.len()),
            matches_per_player,
            byes_per_partnership,
            longest_idle_streak,
        }
    }
}
