//! Pipeline runner.

use log::{info, warn};

use super::config::TournamentConfig;
use crate::bye::{assign_byes_with_config, ByeLedger};
use crate::court::assign_courts;
use crate::error::{check_court_count, check_roster_size, ScheduleResult};
use crate::model::{Court, Match, Partnership, Player, Round};
use crate::partnership::generate_partnerships;
use crate::schedule::{schedule_rounds_with_config, ScheduleSummary};
use crate::validate::{validate_tournament, ValidationReport};

/// A generated tournament.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tournament {
    /// Every partnership, in roster order.
    pub partnerships: Vec<Partnership>,
    /// Rounds numbered from 1, with courts and byes filled in.
    pub rounds: Vec<Round>,
    /// The supplied courts, ordered by [`Court::number`].
    pub courts: Vec<Court>,
    /// Bye rotation state; `None` for even rosters.
    pub byes: Option<ByeLedger>,
    /// Validator findings for the finished schedule.
    pub validation: ValidationReport,
}

impl Tournament {
    /// `true` when validation found no errors.
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }

    /// Per-player and per-partnership statistics.
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_rounds(&self.rounds)
    }

    /// The court record a match was assigned to.
    ///
    /// Court `k` is the `k`-th court by number.
    pub fn court_for(&self, m: &Match) -> Option<&Court> {
        let number = m.court?;
        self.courts.get(number.checked_sub(1)?)
    }
}

/// Generates a complete tournament with the default configuration.
///
/// # Errors
///
/// Fails before any scheduling if the roster has fewer than 4 or more
/// than 16 players, or if `courts` holds zero or more than 4 entries.
/// Roster errors are reported ahead of court errors.
///
/// # Examples
///
/// ```
/// use u_doubles::model::{Court, Player};
/// use u_doubles::tournament::generate_tournament;
///
/// let players: Vec<Player> = (1..=4)
///     .map(|i| Player::new(format!("p{i}"), format!("Player {i}"), format!("p{i}@club.test")))
///     .collect();
/// let courts = vec![Court::new("c1", "Centre", 1)];
///
/// let tournament = generate_tournament(&players, &courts).unwrap();
/// assert_eq!(tournament.partnerships.len(), 6);
/// assert_eq!(tournament.rounds.len(), 3);
/// assert!(tournament.is_valid());
/// ```
pub fn generate_tournament(players: &[Player], courts: &[Court]) -> ScheduleResult<Tournament> {
    generate_tournament_with_config(players, courts, &TournamentConfig::default())
}

/// Generates a complete tournament.
///
/// # Errors
///
/// As [`generate_tournament`], plus
/// [`ScheduleError::InvalidConfig`](crate::error::ScheduleError::InvalidConfig)
/// when `config` does not validate.
pub fn generate_tournament_with_config(
    players: &[Player],
    courts: &[Court],
    config: &TournamentConfig,
) -> ScheduleResult<Tournament> {
    config.validate()?;

    let partnerships = generate_partnerships(players)?;
    check_court_count(courts.len())?;

    let mut rounds = schedule_rounds_with_config(&partnerships, &config.schedule)?;

    let byes = if players.len() % 2 == 1 {
        Some(assign_byes_with_config(&mut rounds, &partnerships, &config.byes)?)
    } else {
        None
    };

    assign_courts(&mut rounds, courts.len())?;

    let validation = validate_tournament(players, &partnerships, &rounds, courts.len());
    if !validation.is_valid {
        warn!(
            "generated schedule failed validation: {} errors",
            validation.errors.len()
        );
    }
    for warning in &validation.warnings {
        warn!("schedule warning: {warning}");
    }

    let match_count: usize = rounds.iter().map(|r| r.matches.len()).sum();
    info!(
        "tournament: {} players, {} partnerships, {} matches in {} rounds on {} courts",
        players.len(),
        partnerships.len(),
        match_count,
        rounds.len(),
        courts.len()
    );

    let mut courts = courts.to_vec();
    courts.sort_by_key(|c| c.number);

    Ok(Tournament {
        partnerships,
        rounds,
        courts,
        byes,
        validation,
    })
}

/// Whether [`generate_tournament`] accepts these counts.
///
/// ```
/// use u_doubles::tournament::can_generate_tournament;
///
/// assert!(can_generate_tournament(8, 2));
/// assert!(!can_generate_tournament(3, 1));
/// assert!(!can_generate_tournament(8, 5));
/// ```
pub fn can_generate_tournament(player_count: usize, court_count: usize) -> bool {
    check_roster_size(player_count).is_ok() && check_court_count(court_count).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bye::ByeConfig;
    use crate::error::ScheduleError;
    use crate::schedule::{ScheduleConfig, ScheduleStrategy};

    fn roster(n: usize) -> Vec<Player> {
        (1..=n)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}"), format!("p{i}@club.test")))
            .collect()
    }

    fn courts(n: usize) -> Vec<Court> {
        (1..=n)
            .map(|i| Court::new(format!("c{i}"), format!("Court {i}"), i))
            .collect()
    }

    #[test]
    fn test_four_players_one_court() {
        let t = generate_tournament(&roster(4), &courts(1)).unwrap();

        assert_eq!(t.partnerships.len(), 6);
        assert_eq!(t.rounds.len(), 3);
        for (i, round) in t.rounds.iter().enumerate() {
            assert_eq!(round.number, i + 1);
            assert_eq!(round.matches.len(), 1);
            assert_eq!(round.matches[0].court, Some(1));
            assert!(round.bye_partnership.is_none());
        }
        assert!(t.is_valid(), "errors: {:?}", t.validation.errors);
        assert!(t.byes.is_none());
    }

    #[test]
    fn test_five_players_two_courts() {
        let t = generate_tournament(&roster(5), &courts(2)).unwrap();

        assert_eq!(t.partnerships.len(), 10);
        assert!(t.validation.errors.is_empty(), "errors: {:?}", t.validation.errors);
        assert!(t.byes.is_some());
        assert_eq!(t.summary().total_matches, 15);
    }

    #[test]
    fn test_precondition_errors() {
        assert_eq!(
            generate_tournament(&roster(3), &courts(1)),
            Err(ScheduleError::RosterTooSmall { min: 4, actual: 3 })
        );
        assert_eq!(
            generate_tournament(&roster(17), &courts(1)),
            Err(ScheduleError::RosterTooLarge { max: 16, actual: 17 })
        );
        assert_eq!(
            generate_tournament(&roster(8), &courts(5)),
            Err(ScheduleError::TooManyCourts { max: 4, actual: 5 })
        );
        assert_eq!(
            generate_tournament(&roster(8), &[]),
            Err(ScheduleError::NoCourts)
        );
        // Roster problems win over court problems.
        assert_eq!(
            generate_tournament(&roster(2), &courts(6)),
            Err(ScheduleError::RosterTooSmall { min: 4, actual: 2 })
        );
    }

    #[test]
    fn test_can_generate_tournament() {
        for players in 0..=20 {
            for court_count in 0..=6 {
                let expected = (4..=16).contains(&players) && (1..=4).contains(&court_count);
                assert_eq!(
                    can_generate_tournament(players, court_count),
                    expected,
                    "players = {players}, courts = {court_count}"
                );
            }
        }
    }

    #[test]
    fn test_repeat_runs_identical() {
        let players = roster(9);
        let a = generate_tournament(&players, &courts(3)).unwrap();
        let b = generate_tournament(&players, &courts(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_court_for_uses_court_order() {
        let supplied = vec![
            Court::new("east", "East", 2),
            Court::new("west", "West", 1),
        ];
        let t = generate_tournament(&roster(8), &supplied).unwrap();

        assert_eq!(t.courts[0].id, "west");
        for m in t.rounds.iter().flat_map(|r| &r.matches) {
            let court = t.court_for(m).unwrap();
            match m.court {
                Some(1) => assert_eq!(court.id, "west"),
                Some(2) => assert_eq!(court.id, "east"),
                other => panic!("unexpected court {other:?}"),
            }
        }
    }

    #[test]
    fn test_with_config() {
        let config = TournamentConfig::default()
            .with_schedule(
                ScheduleConfig::default()
                    .with_strategy(ScheduleStrategy::Compact { attempts: 8, seed: 3 }),
            )
            .with_byes(ByeConfig::default().with_max_iterations(50));

        let greedy = generate_tournament(&roster(8), &courts(2)).unwrap();
        let compact = generate_tournament_with_config(&roster(8), &courts(2), &config).unwrap();

        assert!(compact.is_valid(), "errors: {:?}", compact.validation.errors);
        assert!(compact.rounds.len() <= greedy.rounds.len());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TournamentConfig::default()
            .with_byes(ByeConfig::default().with_max_iterations(0));
        assert!(matches!(
            generate_tournament_with_config(&roster(6), &courts(1), &config),
            Err(ScheduleError::InvalidConfig(_))
        ));
    }
}
