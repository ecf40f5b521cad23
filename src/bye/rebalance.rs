//! Tabu search over bye assignments.
//!
//! # Algorithm
//!
//! 1. Start from the greedy rotation
//! 2. At each iteration:
//!    a. Enumerate every move "give round `r`'s bye to another eligible
//!       partnership `q`"
//!    b. Select the best non-tabu move (or a tabu move that beats the
//!       best cost so far)
//!    c. Apply it and make the reverse move tabu
//!    d. Update the best assignment if improved
//! 3. Terminate when balanced, after max iterations or on stagnation
//!
//! Moves never take a bye away from a round that has one, so every
//! round with an idle partnership keeps exactly one bye.

use std::collections::{HashSet, VecDeque};

use super::config::ByeConfig;

/// Quality of a bye assignment, compared lexicographically.
///
/// Lower is better in every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByeCost {
    /// How far `max(count) - min(count)` exceeds one.
    pub spread_excess: usize,
    /// Adjacent rounds giving the bye to the same partnership.
    pub consecutive: usize,
    /// Sum of squared bye counts; smaller means more even.
    pub square_sum: usize,
}

impl ByeCost {
    /// Whether the assignment meets both fairness targets.
    pub fn is_balanced(&self) -> bool {
        self.spread_excess == 0 && self.consecutive == 0
    }
}

/// Result of a rebalancing run.
#[derive(Debug, Clone)]
pub struct RebalanceOutcome {
    /// Best assignment found, one slot per round.
    pub assignments: Vec<Option<usize>>,
    /// Cost of the best assignment.
    pub cost: ByeCost,
    /// Cost of the starting assignment.
    pub initial_cost: ByeCost,
    /// Total iterations executed.
    pub iterations: usize,
    /// Whether the best assignment is strictly better than the start.
    pub improved: bool,
}

/// Searches for a fairer bye assignment.
///
/// `eligible[r]` lists the partnerships that may take round `r`'s bye
/// and `initial[r]` is the starting choice, which must be one of them
/// (or `None` when the list is empty).
pub fn rebalance_byes(
    eligible: &[Vec<usize>],
    initial: &[Option<usize>],
    partnerships: usize,
    config: &ByeConfig,
) -> RebalanceOutcome {
    let mut current = Assignment::new(initial.to_vec(), partnerships);
    let initial_cost = current.cost();
    let mut best = current.slots.clone();
    let mut best_cost = initial_cost;

    let mut tabu_queue: VecDeque<(usize, usize)> = VecDeque::new();
    let mut tabu_set: HashSet<(usize, usize)> = HashSet::new();

    let mut iterations = 0;
    let mut no_improve_count = 0;

    while iterations < config.max_iterations && !best_cost.is_balanced() {
        iterations += 1;

        let mut best_move: Option<(usize, usize, ByeCost)> = None;
        let mut fallback: Option<(usize, usize, ByeCost)> = None;

        for (round, candidates) in eligible.iter().enumerate() {
            let Some(held) = current.slots[round] else {
                continue;
            };
            for &target in candidates {
                if target == held {
                    continue;
                }
                let cost = current.cost_after(round, target);

                if fallback.is_none_or(|(_, _, c)| cost < c) {
                    fallback = Some((round, target, cost));
                }

                // Aspiration: a tabu move may still be taken if it beats the best.
                if tabu_set.contains(&(round, target)) && cost >= best_cost {
                    continue;
                }
                if best_move.is_none_or(|(_, _, c)| cost < c) {
                    best_move = Some((round, target, cost));
                }
            }
        }

        // All moves tabu and none meets aspiration: take the least bad.
        let Some((round, target, cost)) = best_move.or(fallback) else {
            break;
        };

        let released = current.reassign(round, target);

        if tabu_queue.len() >= config.tabu_tenure {
            if let Some(old) = tabu_queue.pop_front() {
                tabu_set.remove(&old);
            }
        }
        tabu_queue.push_back((round, released));
        tabu_set.insert((round, released));

        if cost < best_cost {
            best = current.slots.clone();
            best_cost = cost;
            no_improve_count = 0;
        } else {
            no_improve_count += 1;
        }

        if no_improve_count >= config.max_no_improve {
            break;
        }
    }

    RebalanceOutcome {
        assignments: best,
        cost: best_cost,
        initial_cost,
        iterations,
        improved: best_cost < initial_cost,
    }
}

/// Working copy of an assignment with cached counts.
struct Assignment {
    slots: Vec<Option<usize>>,
    counts: Vec<usize>,
    // tally[k]: partnerships holding exactly k byes.
    tally: Vec<usize>,
    square_sum: usize,
    consecutive: usize,
}

impl Assignment {
    fn new(slots: Vec<Option<usize>>, partnerships: usize) -> Self {
        let mut counts = vec![0; partnerships];
        for &p in slots.iter().flatten() {
            counts[p] += 1;
        }
        let mut tally = vec![0; slots.len() + 2];
        for &c in &counts {
            tally[c] += 1;
        }
        let consecutive = slots
            .windows(2)
            .filter(|w| w[0].is_some() && w[0] == w[1])
            .count();
        Self {
            square_sum: counts.iter().map(|c| c * c).sum(),
            slots,
            counts,
            tally,
            consecutive,
        }
    }

    fn cost(&self) -> ByeCost {
        let min = self.tally.iter().position(|&t| t > 0).unwrap_or(0);
        let max = self.tally.iter().rposition(|&t| t > 0).unwrap_or(0);
        ByeCost {
            spread_excess: (max - min).saturating_sub(1),
            consecutive: self.consecutive,
            square_sum: self.square_sum,
        }
    }

    fn repeats_around(&self, round: usize) -> usize {
        let same = |a: usize, b: usize| {
            matches!((self.slots[a], self.slots[b]), (Some(x), Some(y)) if x == y)
        };
        let mut repeats = 0;
        if round > 0 && same(round - 1, round) {
            repeats += 1;
        }
        if round + 1 < self.slots.len() && same(round, round + 1) {
            repeats += 1;
        }
        repeats
    }

    fn adjust(&mut self, partnership: usize, up: bool) {
        let old = self.counts[partnership];
        let new = if up { old + 1 } else { old - 1 };
        self.tally[old] -= 1;
        self.tally[new] += 1;
        self.square_sum = self.square_sum + new * new - old * old;
        self.counts[partnership] = new;
    }

    /// Gives round `round`'s bye to `target`; returns the previous holder.
    fn reassign(&mut self, round: usize, target: usize) -> usize {
        let before = self.repeats_around(round);
        let previous = self.slots[round];
        if let Some(p) = previous {
            self.adjust(p, false);
        }
        self.adjust(target, true);
        self.slots[round] = Some(target);
        self.consecutive = self.consecutive - before + self.repeats_around(round);
        previous.unwrap_or(target)
    }

    fn cost_after(&mut self, round: usize, target: usize) -> ByeCost {
        let released = self.reassign(round, target);
        let cost = self.cost();
        self.reassign(round, released);
        cost
    }
}
