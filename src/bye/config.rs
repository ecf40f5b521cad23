//! Bye rotation configuration.

use crate::error::{ScheduleError, ScheduleResult};

/// Configuration for bye rotation and rebalancing.
///
/// # Examples
///
/// ```
/// use u_doubles::bye::ByeConfig;
///
/// let config = ByeConfig::default()
///     .with_max_iterations(1000)
///     .with_tabu_tenure(5);
/// assert_eq!(config.max_iterations, 1000);
/// assert!(config.rebalance);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByeConfig {
    /// Whether to run the rebalancing search when rotation leaves the
    /// byes uneven or back-to-back.
    pub rebalance: bool,
    /// Maximum number of search iterations.
    pub max_iterations: usize,
    /// How many iterations a reverted move stays tabu.
    pub tabu_tenure: usize,
    /// Maximum iterations without improvement before stopping.
    pub max_no_improve: usize,
}

impl Default for ByeConfig {
    fn default() -> Self {
        Self {
            rebalance: true,
            max_iterations: 200,
            tabu_tenure: 7,
            max_no_improve: 50,
        }
    }
}

impl ByeConfig {
    pub fn with_rebalance(mut self, rebalance: bool) -> Self {
        self.rebalance = rebalance;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.max_iterations == 0 {
            return Err(ScheduleError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        if self.tabu_tenure == 0 {
            return Err(ScheduleError::InvalidConfig(
                "tabu_tenure must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ByeConfig::default();
        assert!(config.rebalance);
        assert_eq!(config.max_iterations, 200);
        assert_eq!(config.tabu_tenure, 7);
        assert_eq!(config.max_no_improve, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_tenure() {
        assert!(ByeConfig::default().with_tabu_tenure(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        assert!(ByeConfig::default().with_max_iterations(0).validate().is_err());
    }
}
