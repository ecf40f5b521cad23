//! Invariant checks.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use log::debug;

use super::types::{ValidationError, ValidationReport, ValidationWarning};
use crate::error::{MAX_COURTS, MAX_PLAYERS, MIN_COURTS, MIN_PLAYERS};
use crate::model::{Partnership, PartnershipId, Player, Round};

/// Largest tolerated gap between the most and least active partnership
/// before a warning is raised.
const MATCH_COUNT_TOLERANCE: usize = 2;

/// Audits a tournament schedule.
///
/// Checks the roster, partnership completeness, schedule completeness,
/// duplicate matchups, double booking, round numbering, byes and court
/// usage. Bye fairness is only checked for odd rosters.
///
/// # Examples
///
/// ```
/// use u_doubles::court::assign_courts;
/// use u_doubles::model::Player;
/// use u_doubles::partnership::generate_partnerships;
/// use u_doubles::schedule::schedule_rounds;
/// use u_doubles::validate::validate_tournament;
///
/// let players: Vec<Player> = (1..=4)
///     .map(|i| Player::new(format!("p{i}"), format!("Player {i}"), format!("p{i}@club.test")))
///     .collect();
/// let partnerships = generate_partnerships(&players).unwrap();
/// let mut rounds = schedule_rounds(&partnerships);
/// assign_courts(&mut rounds, 1).unwrap();
///
/// let report = validate_tournament(&players, &partnerships, &rounds, 1);
/// assert!(report.is_valid);
/// ```
pub fn validate_tournament(
    players: &[Player],
    partnerships: &[Partnership],
    rounds: &[Round],
    court_count: usize,
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_roster(players, &mut errors);
    check_partnerships(players, partnerships, &mut errors);
    check_matchups(partnerships, rounds, &mut errors);
    check_rounds(rounds, &mut errors);
    check_courts(rounds, court_count, &mut errors);

    if players.len() % 2 == 1 {
        check_byes(partnerships, rounds, &mut warnings);
    }
    check_match_balance(partnerships, rounds, &mut warnings);

    debug!(
        "validation: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );
    ValidationReport::new(errors, warnings)
}

fn check_roster(players: &[Player], errors: &mut Vec<ValidationError>) {
    if players.len() < MIN_PLAYERS {
        errors.push(ValidationError::RosterTooSmall {
            min: MIN_PLAYERS,
            actual: players.len(),
        });
    }
    if players.len() > MAX_PLAYERS {
        errors.push(ValidationError::RosterTooLarge {
            max: MAX_PLAYERS,
            actual: players.len(),
        });
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    let mut emails = HashSet::new();
    for p in players {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::DuplicatePlayerId(p.id.clone()));
        }
        if !names.insert(normalize(&p.name)) {
            errors.push(ValidationError::DuplicatePlayerName(p.name.clone()));
        }
        if !emails.insert(normalize(&p.email)) {
            errors.push(ValidationError::DuplicatePlayerEmail(p.email.clone()));
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn check_partnerships(
    players: &[Player],
    partnerships: &[Partnership],
    errors: &mut Vec<ValidationError>,
) {
    let n = players.len();
    let expected = n * n.saturating_sub(1) / 2;
    if partnerships.len() != expected {
        errors.push(ValidationError::PartnershipCount {
            expected,
            actual: partnerships.len(),
        });
    }

    let roster: HashSet<&str> = players.iter().map(|p| p.id.as_str()).collect();
    let mut seen = HashSet::new();
    for p in partnerships {
        if p.player1.id == p.player2.id {
            errors.push(ValidationError::SelfPartnership(p.id.clone()));
        }
        // Re-derive the key from the members rather than trusting `id`.
        if !seen.insert(PartnershipId::new(&p.player1.id, &p.player2.id)) {
            errors.push(ValidationError::DuplicatePartnership(p.id.clone()));
        }
        for id in p.player_ids() {
            if !roster.contains(id) {
                errors.push(ValidationError::UnknownPlayer {
                    partnership: p.id.clone(),
                    player: id.to_string(),
                });
            }
        }
    }

    let mut seen_players = HashSet::new();
    for player in players {
        if !seen_players.insert(player.id.as_str()) {
            continue;
        }
        let actual = partnerships.iter().filter(|t| t.contains(&player.id)).count();
        if actual != n.saturating_sub(1) {
            errors.push(ValidationError::PlayerPartnershipCount {
                player: player.id.clone(),
                expected: n.saturating_sub(1),
                actual,
            });
        }
    }
}

/// Completeness and uniqueness of matchups.
fn check_matchups(partnerships: &[Partnership], rounds: &[Round], errors: &mut Vec<ValidationError>) {
    let mut opponents: HashMap<&PartnershipId, BTreeSet<&PartnershipId>> = HashMap::new();
    let mut occurrences: BTreeMap<(PartnershipId, PartnershipId), Vec<usize>> = BTreeMap::new();

    for round in rounds {
        for m in &round.matches {
            if m.partnership1.shares_player(&m.partnership2) {
                errors.push(ValidationError::InvalidMatchup(m.id.clone()));
            }
            opponents
                .entry(&m.partnership1.id)
                .or_default()
                .insert(&m.partnership2.id);
            opponents
                .entry(&m.partnership2.id)
                .or_default()
                .insert(&m.partnership1.id);
            occurrences.entry(m.matchup()).or_default().push(round.number);
        }
    }

    for ((first, second), seen_in) in occurrences {
        if seen_in.len() > 1 {
            errors.push(ValidationError::DuplicateMatchup {
                first,
                second,
                rounds: seen_in,
            });
        }
    }

    let empty = BTreeSet::new();
    for p in partnerships {
        let expected: BTreeSet<&PartnershipId> = partnerships
            .iter()
            .filter(|q| q.id != p.id && !p.shares_player(q))
            .map(|q| &q.id)
            .collect();
        let actual = opponents.get(&p.id).unwrap_or(&empty);

        let missing: Vec<PartnershipId> = expected.difference(actual).map(|&id| id.clone()).collect();
        if !missing.is_empty() {
            errors.push(ValidationError::MissingOpponents {
                partnership: p.id.clone(),
                missing,
            });
        }
        let unexpected: Vec<PartnershipId> =
            actual.difference(&expected).map(|&id| id.clone()).collect();
        if !unexpected.is_empty() {
            errors.push(ValidationError::UnexpectedOpponents {
                partnership: p.id.clone(),
                unexpected,
            });
        }
    }
}

/// Numbering, double booking and bye placement within each round.
fn check_rounds(rounds: &[Round], errors: &mut Vec<ValidationError>) {
    for (position, round) in rounds.iter().enumerate() {
        if round.number != position + 1 {
            errors.push(ValidationError::RoundNumbering {
                position,
                expected: position + 1,
                actual: round.number,
            });
        }

        let mut booked: BTreeMap<&str, usize> = BTreeMap::new();
        for m in &round.matches {
            if m.round_number != round.number {
                errors.push(ValidationError::MatchRoundMismatch {
                    round: round.number,
                    match_id: m.id.clone(),
                    labelled: m.round_number,
                });
            }
            for id in m.player_ids() {
                *booked.entry(id).or_insert(0) += 1;
            }
        }
        for (player, count) in &booked {
            if *count > 1 {
                errors.push(ValidationError::PlayerDoubleBooked {
                    round: round.number,
                    player: player.to_string(),
                });
            }
        }

        if let Some(bye) = &round.bye_partnership {
            if bye.player_ids().iter().any(|id| booked.contains_key(id)) {
                errors.push(ValidationError::ByePartnershipPlaying {
                    round: round.number,
                    partnership: bye.id.clone(),
                });
            }
        }
    }
}

fn check_courts(rounds: &[Round], court_count: usize, errors: &mut Vec<ValidationError>) {
    if !(MIN_COURTS..=MAX_COURTS).contains(&court_count) {
        errors.push(ValidationError::InvalidCourtCount(court_count));
    }

    for round in rounds {
        let mut used = BTreeSet::new();
        for m in &round.matches {
            match m.court {
                None => errors.push(ValidationError::MissingCourt {
                    round: round.number,
                    match_id: m.id.clone(),
                }),
                Some(court) => {
                    if court == 0 || court > court_count {
                        errors.push(ValidationError::CourtOutOfRange {
                            round: round.number,
                            match_id: m.id.clone(),
                            court,
                            court_count,
                        });
                    }
                    used.insert(court);
                }
            }
        }

        // Contiguous from 1 means the largest court equals the number used.
        if let Some(&highest) = used.last() {
            if highest != used.len() || used.first() != Some(&1) {
                errors.push(ValidationError::CourtGap {
                    round: round.number,
                    courts: used.into_iter().collect(),
                });
            }
        }
    }
}

fn check_byes(partnerships: &[Partnership], rounds: &[Round], warnings: &mut Vec<ValidationWarning>) {
    let mut counts: HashMap<&PartnershipId, usize> =
        partnerships.iter().map(|p| (&p.id, 0)).collect();
    for bye in rounds.iter().filter_map(|r| r.bye_partnership.as_ref()) {
        *counts.entry(&bye.id).or_insert(0) += 1;
    }

    let min = counts.values().copied().min().unwrap_or(0);
    let max = counts.values().copied().max().unwrap_or(0);
    if max - min > 1 {
        warnings.push(ValidationWarning::UnevenByes { min, max });
    }

    for pair in rounds.windows(2) {
        if let (Some(a), Some(b)) = (&pair[0].bye_partnership, &pair[1].bye_partnership) {
            if a.id == b.id {
                warnings.push(ValidationWarning::ConsecutiveByes {
                    partnership: a.id.clone(),
                    first: pair[0].number,
                    second: pair[1].number,
                });
            }
        }
    }
}

fn check_match_balance(
    partnerships: &[Partnership],
    rounds: &[Round],
    warnings: &mut Vec<ValidationWarning>,
) {
    let mut counts: HashMap<&PartnershipId, usize> =
        partnerships.iter().map(|p| (&p.id, 0)).collect();
    for m in rounds.iter().flat_map(|r| &r.matches) {
        for id in [&m.partnership1.id, &m.partnership2.id] {
            if let Some(count) = counts.get_mut(id) {
                *count += 1;
            }
        }
    }

    let min = counts.values().copied().min().unwrap_or(0);
    let max = counts.values().copied().max().unwrap_or(0);
    if max - min > MATCH_COUNT_TOLERANCE {
        warnings.push(ValidationWarning::UnevenMatchCounts { min, max });
    }
}
