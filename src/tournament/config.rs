//! Pipeline configuration.

use crate::bye::ByeConfig;
use crate::error::ScheduleResult;
use crate::schedule::ScheduleConfig;

/// Configuration for [`generate_tournament_with_config`](super::generate_tournament_with_config).
///
/// # Examples
///
/// ```
/// use u_doubles::bye::ByeConfig;
/// use u_doubles::schedule::{ScheduleConfig, ScheduleStrategy};
/// use u_doubles::tournament::TournamentConfig;
///
/// let config = TournamentConfig::default()
///     .with_schedule(ScheduleConfig::default().with_strategy(ScheduleStrategy::Compact {
///         attempts: 32,
///         seed: 1,
///     }))
///     .with_byes(ByeConfig::default().with_rebalance(false));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TournamentConfig {
    /// Round packing.
    pub schedule: ScheduleConfig,
    /// Bye rotation and rebalancing.
    pub byes: ByeConfig,
}

impl TournamentConfig {
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_byes(mut self, byes: ByeConfig) -> Self {
        self.byes = byes;
        self
    }

    /// Validates every stage's configuration.
    pub fn validate(&self) -> ScheduleResult<()> {
        self.schedule.validate()?;
        self.byes.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleStrategy;

    #[test]
    fn test_default_validates() {
        assert!(TournamentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_stage_errors_surface() {
        let bad_schedule = TournamentConfig::default().with_schedule(
            ScheduleConfig::default().with_strategy(ScheduleStrategy::Compact { attempts: 0, seed: 0 }),
        );
        assert!(bad_schedule.validate().is_err());

        let bad_byes =
            TournamentConfig::default().with_byes(ByeConfig::default().with_tabu_tenure(0));
        assert!(bad_byes.validate().is_err());
    }
}
