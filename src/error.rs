//! Precondition errors raised by the scheduling stages.
//!
//! Only hard failures live here. Structural anomalies and fairness
//! shortfalls found by the validator are returned as data in a
//! [`ValidationReport`](crate::validate::ValidationReport).

use thiserror::Error;

/// Smallest roster the doubles round-robin accepts.
pub const MIN_PLAYERS: usize = 4;

/// Largest roster the doubles round-robin accepts.
pub const MAX_PLAYERS: usize = 16;

/// Smallest number of courts.
pub const MIN_COURTS: usize = 1;

/// Largest number of courts.
pub const MAX_COURTS: usize = 4;

/// Errors that abort the scheduling pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Fewer players than a doubles round-robin needs.
    #[error("roster too small: minimum {min} players required, got {actual}")]
    RosterTooSmall { min: usize, actual: usize },

    /// More players than keeps round counts practical.
    #[error("roster too large: maximum {max} players allowed, got {actual}")]
    RosterTooLarge { max: usize, actual: usize },

    /// No court supplied.
    #[error("at least one court required")]
    NoCourts,

    /// More courts than supported.
    #[error("maximum {max} courts allowed, got {actual}")]
    TooManyCourts { max: usize, actual: usize },

    /// A configuration value was rejected by `validate()`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Checks that `count` players can form a tournament.
pub fn check_roster_size(count: usize) -> ScheduleResult<()> {
    if count < MIN_PLAYERS {
        return Err(ScheduleError::RosterTooSmall {
            min: MIN_PLAYERS,
            actual: count,
        });
    }
    if count > MAX_PLAYERS {
        return Err(ScheduleError::RosterTooLarge {
            max: MAX_PLAYERS,
            actual: count,
        });
    }
    Ok(())
}

/// Checks that `count` courts can be assigned.
pub fn check_court_count(count: usize) -> ScheduleResult<()> {
    if count < MIN_COURTS {
        return Err(ScheduleError::NoCourts);
    }
    if count > MAX_COURTS {
        return Err(ScheduleError::TooManyCourts {
            max: MAX_COURTS,
            actual: count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_bounds() {
        assert!(check_roster_size(4).is_ok());
        assert!(check_roster_size(16).is_ok());
        assert_eq!(
            check_roster_size(3),
            Err(ScheduleError::RosterTooSmall { min: 4, actual: 3 })
        );
        assert_eq!(
            check_roster_size(17),
            Err(ScheduleError::RosterTooLarge { max: 16, actual: 17 })
        );
    }

    #[test]
    fn test_court_bounds() {
        assert!(check_court_count(1).is_ok());
        assert!(check_court_count(4).is_ok());
        assert_eq!(check_court_count(0), Err(ScheduleError::NoCourts));
        assert_eq!(
            check_court_count(5),
            Err(ScheduleError::TooManyCourts { max: 4, actual: 5 })
        );
    }

    #[test]
    fn test_messages_are_descriptive() {
        let small = check_roster_size(3).unwrap_err().to_string();
        assert!(small.contains("minimum 4 players"), "got: {small}");

        let large = check_roster_size(17).unwrap_err().to_string();
        assert!(large.contains("maximum 16 players"), "got: {large}");

        let courts = check_court_count(5).unwrap_err().to_string();
        assert!(courts.contains("maximum 4 courts"), "got: {courts}");

        let none = check_court_count(0).unwrap_err().to_string();
        assert_eq!(none, "at least one court required");
    }
}
