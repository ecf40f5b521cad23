//! Player, court, partnership, match and round records.

use super::ids::{MatchId, PartnershipId, PlayerId};

/// A registered player. `id` is the equality key.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: String,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

/// A physical play surface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Court {
    pub id: String,
    pub name: String,
    pub number: usize,
}

impl Court {
    pub fn new(id: impl Into<String>, name: impl Into<String>, number: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number,
        }
    }
}

/// A two-player team, fixed for the whole tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partnership {
    pub id: PartnershipId,
    pub player1: Player,
    pub player2: Player,
}

impl Partnership {
    /// Pairs two players. The id does not depend on argument order.
    pub fn new(player1: Player, player2: Player) -> Self {
        Self {
            id: PartnershipId::new(&player1.id, &player2.id),
            player1,
            player2,
        }
    }

    /// Ids of both members.
    pub fn player_ids(&self) -> [&str; 2] {
        [&self.player1.id, &self.player2.id]
    }

    /// Whether `player_id` is a member of this team.
    pub fn contains(&self, player_id: &str) -> bool {
        self.player1.id == player_id || self.player2.id == player_id
    }

    /// Whether the two teams have a member in common and so cannot
    /// play each other.
    pub fn shares_player(&self, other: &Partnership) -> bool {
        other.contains(&self.player1.id) || other.contains(&self.player2.id)
    }
}

/// A game between two partnerships that share no player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    pub id: MatchId,
    pub partnership1: Partnership,
    pub partnership2: Partnership,
    /// 1-based number of the round the match is played in.
    pub round_number: usize,
    /// 1-based court number, set by court assignment.
    pub court: Option<usize>,
}

impl Match {
    pub fn new(partnership1: Partnership, partnership2: Partnership, round_number: usize) -> Self {
        Self {
            id: MatchId::new(&partnership1.id, &partnership2.id),
            partnership1,
            partnership2,
            round_number,
            court: None,
        }
    }

    /// Ids of the four players on court.
    pub fn player_ids(&self) -> [&str; 4] {
        let [a, b] = self.partnership1.player_ids();
        let [c, d] = self.partnership2.player_ids();
        [a, b, c, d]
    }

    /// Whether `partnership` is one of the two sides.
    pub fn involves(&self, partnership: &PartnershipId) -> bool {
        self.partnership1.id == *partnership || self.partnership2.id == *partnership
    }

    /// The unordered matchup as a sorted pair of partnership ids.
    pub fn matchup(&self) -> (PartnershipId, PartnershipId) {
        let (a, b) = (&self.partnership1.id, &self.partnership2.id);
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }
}

/// Matches played simultaneously, plus the optional bye partnership.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    /// 1-based, sequential without gaps.
    pub number: usize,
    pub matches: Vec<Match>,
    pub bye_partnership: Option<Partnership>,
}

impl Round {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            matches: Vec::new(),
            bye_partnership: None,
        }
    }

    /// Ids of every player with a match in this round.
    pub fn playing_player_ids(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().flat_map(|m| m.player_ids())
    }

    /// Whether `player_id` has a match in this round.
    pub fn is_playing(&self, player_id: &str) -> bool {
        self.playing_player_ids().any(|id| id == player_id)
    }
}
