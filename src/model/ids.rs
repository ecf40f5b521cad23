//! Deterministic identifiers.

use std::fmt;

/// Player identifier, supplied by the caller.
pub type PlayerId = String;

/// Identifier of a two-player team.
///
/// Holds the two player ids in sorted order, so the same pair of players
/// always yields the same id regardless of argument order. Displays as
/// `"a+b"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartnershipId(PlayerId, PlayerId);

impl PartnershipId {
    /// Creates the id for the pair `(a, b)`.
    pub fn new(a: &str, b: &str) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self(lo.to_string(), hi.to_string())
    }

    /// The two player ids, smaller first.
    pub fn players(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }
}

impl fmt::Display for PartnershipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.0, self.1)
    }
}

/// Identifier of a match between two partnerships.
///
/// Order-independent in the two partnership ids, and therefore unique
/// across a schedule in which no matchup repeats. Displays as
/// `"a+b-vs-c+d"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchId(PartnershipId, PartnershipId);

impl MatchId {
    /// Creates the id for a match between partnerships `a` and `b`.
    pub fn new(a: &PartnershipId, b: &PartnershipId) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self(lo.clone(), hi.clone())
    }

    /// The two partnership ids, smaller first.
    pub fn partnerships(&self) -> (&PartnershipId, &PartnershipId) {
        (&self.0, &self.1)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-vs-{}", self.0, self.1)
    }
}
