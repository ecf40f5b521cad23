//! Priority rules for picking the next match to put on court.

use super::assigner::WaitTracker;
use crate::model::Match;

/// State a rule may consult while scoring.
pub struct CourtContext<'a> {
    /// Rounds each player has played so far.
    pub tracker: &'a WaitTracker,
    /// 0-based position of the round being assigned.
    pub round_index: usize,
}

/// A scoring rule for matches awaiting a court.
///
/// Rules return `f64` scores where **lower is higher priority**.
pub trait MatchRule: Send + Sync {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Computes a priority score for the given match.
    fn score(&self, m: &Match, context: &CourtContext<'_>) -> f64;
}

/// Players who have rested longest go first.
///
/// Scores the negated average wait of the four players; a player who
/// has not played yet counts as [`UNPLAYED_WAIT`](super::UNPLAYED_WAIT).
pub struct LongestWait;

impl MatchRule for LongestWait {
    fn name(&self) -> &str {
        "LongestWait"
    }

    fn score(&self, m: &Match, context: &CourtContext<'_>) -> f64 {
        let total: f64 = m
            .player_ids()
            .iter()
            .map(|id| context.tracker.wait(id, context.round_index))
            .sum();
        -(total / 4.0)
    }
}

/// Players with fewer games so far go first.
pub struct FewestPlayed;

impl MatchRule for FewestPlayed {
    fn name(&self) -> &str {
        "FewestPlayed"
    }

    fn score(&self, m: &Match, context: &CourtContext<'_>) -> f64 {
        m.player_ids()
            .iter()
            .map(|id| context.tracker.matches_played(id) as f64)
            .sum()
    }
}

/// Sequential composition of match rules.
///
/// # Examples
///
/// ```
/// use u_doubles::court::{FewestPlayed, LongestWait, MatchRanker};
///
/// let ranker = MatchRanker::new().with_rule(LongestWait).with_rule(FewestPlayed);
/// assert_eq!(ranker.rule_names(), vec!["LongestWait", "FewestPlayed"]);
/// ```
pub struct MatchRanker {
    rules: Vec<Box<dyn MatchRule>>,
    epsilon: f64,
}

impl MatchRanker {
    /// Creates a ranker with no rules; it keeps the input order.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Appends a rule; earlier rules take precedence.
    pub fn with_rule<R: MatchRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Sets the epsilon for floating-point comparison.
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    /// Returns the names of all rules in order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns the index of the highest-priority match.
    ///
    /// Ties under every rule go to the lowest index. Returns `None` for
    /// an empty slice.
    pub fn select_best(&self, matches: &[&Match], context: &CourtContext<'_>) -> Option<usize> {
        let scores: Vec<Vec<f64>> = matches
            .iter()
            .map(|m| self.rules.iter().map(|r| r.score(m, context)).collect())
            .collect();

        let mut best: Option<usize> = None;
        for (i, candidate) in scores.iter().enumerate() {
            let better = match best {
                None => true,
                Some(b) => self.precedes(candidate, &scores[b]),
            };
            if better {
                best = Some(i);
            }
        }
        best
    }

    /// Strictly better under the first rule that tells them apart.
    fn precedes(&self, a: &[f64], b: &[f64]) -> bool {
        for (va, vb) in a.iter().zip(b) {
            if (va - vb).abs() > self.epsilon {
                return va < vb;
            }
        }
        false
    }
}

impl Default for MatchRanker {
    /// [`LongestWait`], then [`FewestPlayed`].
    fn default() -> Self {
        Self::new().with_rule(LongestWait).with_rule(FewestPlayed)
    }
}
