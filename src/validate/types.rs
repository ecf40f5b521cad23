//! Validation findings.

use thiserror::Error;

use crate::model::{MatchId, PartnershipId, PlayerId};

/// A structural violation. Any one of these makes the schedule unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("roster too small: minimum {min} players required, got {actual}")]
    RosterTooSmall { min: usize, actual: usize },

    #[error("roster too large: maximum {max} players allowed, got {actual}")]
    RosterTooLarge { max: usize, actual: usize },

    #[error("duplicate player id: {0}")]
    DuplicatePlayerId(PlayerId),

    #[error("duplicate player name: {0}")]
    DuplicatePlayerName(String),

    #[error("duplicate player email: {0}")]
    DuplicatePlayerEmail(String),

    #[error("expected {expected} partnerships, found {actual}")]
    PartnershipCount { expected: usize, actual: usize },

    #[error("player {player} is in {actual} partnerships, expected {expected}")]
    PlayerPartnershipCount {
        player: PlayerId,
        expected: usize,
        actual: usize,
    },

    #[error("partnership {0} pairs a player with themselves")]
    SelfPartnership(PartnershipId),

    #[error("partnership {0} appears more than once")]
    DuplicatePartnership(PartnershipId),

    #[error("partnership {partnership} includes unknown player {player}")]
    UnknownPlayer {
        partnership: PartnershipId,
        player: PlayerId,
    },

    #[error("match {0} pits partnerships with a shared player against each other")]
    InvalidMatchup(MatchId),

    #[error("partnership {partnership} never meets {} opponents", .missing.len())]
    MissingOpponents {
        partnership: PartnershipId,
        missing: Vec<PartnershipId>,
    },

    #[error("partnership {partnership} meets {} partnerships it should not", .unexpected.len())]
    UnexpectedOpponents {
        partnership: PartnershipId,
        unexpected: Vec<PartnershipId>,
    },

    #[error("matchup {first} vs {second} is scheduled {} times", .rounds.len())]
    DuplicateMatchup {
        first: PartnershipId,
        second: PartnershipId,
        rounds: Vec<usize>,
    },

    #[error("round at position {position} is numbered {actual}, expected {expected}")]
    RoundNumbering {
        position: usize,
        expected: usize,
        actual: usize,
    },

    #[error("match {match_id} in round {round} is labelled round {labelled}")]
    MatchRoundMismatch {
        round: usize,
        match_id: MatchId,
        labelled: usize,
    },

    #[error("player {player} is scheduled more than once in round {round}")]
    PlayerDoubleBooked { round: usize, player: PlayerId },

    #[error("bye partnership {partnership} is also playing in round {round}")]
    ByePartnershipPlaying {
        round: usize,
        partnership: PartnershipId,
    },

    #[error("court count must be between 1 and 4, got {0}")]
    InvalidCourtCount(usize),

    #[error("match {match_id} in round {round} has no court")]
    MissingCourt { round: usize, match_id: MatchId },

    #[error("match {match_id} in round {round} is on court {court}, outside 1..={court_count}")]
    CourtOutOfRange {
        round: usize,
        match_id: MatchId,
        court: usize,
        court_count: usize,
    },

    #[error("round {round} uses courts {courts:?}, which do not run contiguously from 1")]
    CourtGap { round: usize, courts: Vec<usize> },
}

/// A fairness shortfall. The schedule is usable but suboptimal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationWarning {
    #[error("uneven byes: partnerships have between {min} and {max} byes")]
    UnevenByes { min: usize, max: usize },

    #[error("partnership {partnership} has byes in consecutive rounds {first} and {second}")]
    ConsecutiveByes {
        partnership: PartnershipId,
        first: usize,
        second: usize,
    },

    #[error("uneven match counts: partnerships play between {min} and {max} matches")]
    UnevenMatchCounts { min: usize, max: usize },
}

/// Outcome of [`validate_tournament`](super::validate_tournament).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    /// `true` when `errors` is empty.
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Builds a report from collected findings.
    pub fn new(errors: Vec<ValidationError>, warnings: Vec<ValidationWarning>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Whether the report carries warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
