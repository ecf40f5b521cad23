//! Greedy round packing.
//!
//! # Algorithm
//!
//! 1. Build the candidate set: every pair of partnerships `(i, j)`,
//!    `i < j`, that share no player, in partnership index order
//! 2. Until no candidate remains:
//!    a. Open an empty round and clear the committed-player set
//!    b. Scan the remaining candidates in order; take every one whose
//!       four players are all uncommitted and commit them
//!    c. Stop if the round is empty, otherwise close it and continue
//!
//! The first remaining candidate always fits an empty round, so step 2c
//! only triggers when nothing is left.

use std::collections::HashMap;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::{ScheduleConfig, ScheduleStrategy};
use crate::error::ScheduleResult;
use crate::model::{Match, Partnership, Round};

/// Indices of the two sides of a matchup in the partnership slice.
type Matchup = (usize, usize);

/// Rounds as lists of matchups, before materialisation.
type Packing = Vec<Vec<Matchup>>;

/// Returns every pair of partnership indices `(i, j)`, `i < j`, whose
/// partnerships share no player, in index order.
pub fn candidate_matchups(partnerships: &[Partnership]) -> Vec<(usize, usize)> {
    let mut candidates = Vec::new();
    for (i, first) in partnerships.iter().enumerate() {
        for (j, second) in partnerships.iter().enumerate().skip(i + 1) {
            if !first.shares_player(second) {
                candidates.push((i, j));
            }
        }
    }
    candidates
}

/// Schedules all matchups with the default greedy strategy.
///
/// # Examples
///
/// ```
/// use u_doubles::model::Player;
/// use u_doubles::partnership::generate_partnerships;
/// use u_doubles::schedule::schedule_rounds;
///
/// let players: Vec<Player> = (1..=4)
///     .map(|i| Player::new(format!("p{i}"), format!("Player {i}"), format!("p{i}@club.test")))
///     .collect();
/// let partnerships = generate_partnerships(&players).unwrap();
/// let rounds = schedule_rounds(&partnerships);
/// assert_eq!(rounds.len(), 3);
/// ```
pub fn schedule_rounds(partnerships: &[Partnership]) -> Vec<Round> {
    let members = PlayerIndex::build(partnerships);
    let candidates = candidate_matchups(partnerships);
    let packing = pack(&members, &candidates);
    debug!(
        "greedy packing: {} matchups into {} rounds",
        candidates.len(),
        packing.len()
    );
    materialize(partnerships, packing)
}

/// Schedules all matchups using the configured strategy.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidConfig`](crate::error::ScheduleError::InvalidConfig)
/// if the configuration does not validate.
pub fn schedule_rounds_with_config(
    partnerships: &[Partnership],
    config: &ScheduleConfig,
) -> ScheduleResult<Vec<Round>> {
    config.validate()?;

    match config.strategy {
        ScheduleStrategy::Greedy => Ok(schedule_rounds(partnerships)),
        ScheduleStrategy::Compact { attempts, seed } => {
            let members = PlayerIndex::build(partnerships);
            let candidates = candidate_matchups(partnerships);
            let packing = compact(&members, &candidates, attempts, seed, config.parallel);
            debug!(
                "compact packing ({} attempts, seed {}): {} matchups into {} rounds",
                attempts,
                seed,
                candidates.len(),
                packing.len()
            );
            Ok(materialize(partnerships, packing))
        }
    }
}

/// Dense player indices for each partnership.
struct PlayerIndex {
    members: Vec<[usize; 2]>,
    player_count: usize,
}

impl PlayerIndex {
    fn build(partnerships: &[Partnership]) -> Self {
        let mut ids: HashMap<&str, usize> = HashMap::new();
        let members = partnerships
            .iter()
            .map(|p| {
                p.player_ids().map(|id| {
                    let next = ids.len();
                    *ids.entry(id).or_insert(next)
                })
            })
            .collect();
        Self {
            members,
            player_count: ids.len(),
        }
    }

    fn players(&self, (a, b): Matchup) -> [usize; 4] {
        let [p, q] = self.members[a];
        let [r, s] = self.members[b];
        [p, q, r, s]
    }
}

/// Packs matchups into conflict-free rounds, scanning in `order`.
fn pack(index: &PlayerIndex, order: &[Matchup]) -> Packing {
    let mut remaining = order.to_vec();
    let mut committed = vec![false; index.player_count];
    let mut rounds = Vec::new();

    while !remaining.is_empty() {
        committed.fill(false);
        let mut round = Vec::new();
        let mut deferred = Vec::with_capacity(remaining.len());

        for matchup in remaining {
            let players = index.players(matchup);
            if players.iter().any(|&p| committed[p]) {
                deferred.push(matchup);
                continue;
            }
            for p in players {
                committed[p] = true;
            }
            round.push(matchup);
        }

        if round.is_empty() {
            break;
        }
        rounds.push(round);
        remaining = deferred;
    }

    rounds
}

/// Best of the canonical order and `attempts` seeded shuffles.
fn compact(
    index: &PlayerIndex,
    candidates: &[Matchup],
    attempts: usize,
    seed: u64,
    parallel: bool,
) -> Packing {
    let attempt = |k: usize| -> Packing {
        if k == 0 {
            return pack(index, candidates);
        }
        let mut order = candidates.to_vec();
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(k as u64));
        order.shuffle(&mut rng);
        pack(index, &order)
    };

    run_attempts(attempts + 1, parallel, attempt)
        .into_iter()
        .enumerate()
        .min_by_key(|(k, packing)| (packing.len(), *k))
        .map(|(_, packing)| packing)
        .unwrap_or_default()
}

fn run_attempts<F>(count: usize, parallel: bool, attempt: F) -> Vec<Packing>
where
    F: Fn(usize) -> Packing + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return (0..count).into_par_iter().map(attempt).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..count).map(attempt).collect()
}

fn materialize(partnerships: &[Partnership], packing: Packing) -> Vec<Round> {
    packing
        .into_iter()
        .enumerate()
        .map(|(i, matchups)| {
            let number = i + 1;
            let mut round = Round::new(number);
            round.matches = matchups
                .into_iter()
                .map(|(a, b)| Match::new(partnerships[a].clone(), partnerships[b].clone(), number))
                .collect();
            round
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PartnershipId, Player};
    use crate::partnership::generate_partnerships;
    use std::collections::HashSet;

    fn roster(n: usize) -> Vec<Player> {
        (1..=n)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}"), format!("p{i}@club.test")))
            .collect()
    }

    fn binomial2(k: usize) -> usize {
        k * k.saturating_sub(1) / 2
    }

    fn assert_well_formed(partnerships: &[Partnership], rounds: &[Round]) {
        let expected = candidate_matchups(partnerships).len();
        let mut seen: HashSet<(PartnershipId, PartnershipId)> = HashSet::new();

        for (i, round) in rounds.iter().enumerate() {
            assert_eq!(round.number, i + 1, "rounds must be numbered sequentially");
            assert!(!round.matches.is_empty(), "round {} is empty", round.number);

            let mut players = HashSet::new();
            for m in &round.matches {
                assert_eq!(m.round_number, round.number);
                assert!(
                    !m.partnership1.shares_player(&m.partnership2),
                    "match {} pits a player against themselves",
                    m.id
                );
                for id in m.player_ids() {
                    assert!(players.insert(id), "player {id} twice in round {}", round.number);
                }
                assert!(seen.insert(m.matchup()), "matchup {} repeated", m.id);
            }
        }

        assert_eq!(seen.len(), expected, "every matchup scheduled exactly once");
    }

    #[test]
    fn test_candidate_count() {
        for n in 4..=16 {
            let partnerships = generate_partnerships(&roster(n)).unwrap();
            let expected = partnerships.len() * binomial2(n - 2) / 2;
            assert_eq!(candidate_matchups(&partnerships).len(), expected, "n = {n}");
        }
    }

    #[test]
    fn test_four_players() {
        let partnerships = generate_partnerships(&roster(4)).unwrap();
        assert_eq!(candidate_matchups(&partnerships), vec![(0, 5), (1, 4), (2, 3)]);

        let rounds = schedule_rounds(&partnerships);
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[0].matches[0].id.to_string(), "p1+p2-vs-p3+p4");
        assert_well_formed(&partnerships, &rounds);
    }

    #[test]
    fn test_greedy_complete_for_all_rosters() {
        for n in 4..=16 {
            let partnerships = generate_partnerships(&roster(n)).unwrap();
            let rounds = schedule_rounds(&partnerships);
            assert_well_formed(&partnerships, &rounds);

            let per_round = n / 4;
            assert!(rounds.iter().all(|r| r.matches.len() <= per_round));
        }
    }

    #[test]
    fn test_greedy_deterministic() {
        let partnerships = generate_partnerships(&roster(9)).unwrap();
        assert_eq!(schedule_rounds(&partnerships), schedule_rounds(&partnerships));
    }

    #[test]
    fn test_no_candidates_no_rounds() {
        let players = roster(4);
        let star: Vec<Partnership> = players[1..]
            .iter()
            .map(|p| Partnership::new(players[0].clone(), p.clone()))
            .collect();
        assert!(candidate_matchups(&star).is_empty());
        assert!(schedule_rounds(&star).is_empty());
        assert!(schedule_rounds(&[]).is_empty());
    }

    #[test]
    fn test_compact_never_worse_than_greedy() {
        let partnerships = generate_partnerships(&roster(10)).unwrap();
        let greedy = schedule_rounds(&partnerships);

        let config = ScheduleConfig::default()
            .with_strategy(ScheduleStrategy::Compact { attempts: 8, seed: 42 });
        let compact = schedule_rounds_with_config(&partnerships, &config).unwrap();

        assert!(compact.len() <= greedy.len());
        assert_well_formed(&partnerships, &compact);
    }

    #[test]
    fn test_compact_deterministic_for_seed() {
        let partnerships = generate_partnerships(&roster(8)).unwrap();
        let config = ScheduleConfig::default()
            .with_strategy(ScheduleStrategy::Compact { attempts: 4, seed: 3 })
            .with_parallel(true);

        let a = schedule_rounds_with_config(&partnerships, &config).unwrap();
        let b = schedule_rounds_with_config(&partnerships, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let partnerships = generate_partnerships(&roster(4)).unwrap();
        let config = ScheduleConfig::default()
            .with_strategy(ScheduleStrategy::Compact { attempts: 0, seed: 0 });
        assert!(schedule_rounds_with_config(&partnerships, &config).is_err());
    }
}
