//! Scheduler configuration.

use crate::error::{ScheduleError, ScheduleResult};

/// How candidate matchups are packed into rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleStrategy {
    /// Single greedy pass in partnership index order.
    #[default]
    Greedy,

    /// Greedy passes over the canonical order plus `attempts` seeded
    /// shuffles of it. The schedule with the fewest rounds wins; ties go
    /// to the earliest attempt, so the result depends only on `seed`.
    Compact {
        /// Number of shuffled orders tried in addition to the canonical one.
        attempts: usize,
        /// Base seed. Attempt `k` uses `seed + k`.
        seed: u64,
    },
}

/// Configuration for the round-robin scheduler.
///
/// # Examples
///
/// ```
/// use u_doubles::schedule::{ScheduleConfig, ScheduleStrategy};
///
/// let config = ScheduleConfig::default()
///     .with_strategy(ScheduleStrategy::Compact { attempts: 16, seed: 7 })
///     .with_parallel(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleConfig {
    /// Packing strategy.
    pub strategy: ScheduleStrategy,

    /// Whether to evaluate `Compact` attempts in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,
}

impl ScheduleConfig {
    pub fn with_strategy(mut self, strategy: ScheduleStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ScheduleResult<()> {
        if let ScheduleStrategy::Compact { attempts, .. } = self.strategy {
            if attempts == 0 {
                return Err(ScheduleError::InvalidConfig(
                    "compact strategy needs at least 1 attempt".into(),
                ));
            }
        }
        Ok(())
    }
}
