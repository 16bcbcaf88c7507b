//! Team gender balancing
//!
//! Every 4v4 team must field exactly two `M` and two `F` players. Blank
//! genders are first seeded from first names, then each team is balanced in
//! two steps:
//!
//! 1. Unresolved players (blank or unrecognized gender) are assigned in roster
//!    order: `M` while the team is short of two men, then `F` while short of
//!    two women, then whichever gender the team currently has fewer of (ties
//!    go to `F`).
//! 2. If the team is still not 2/2, one correction pass relabels the players
//!    after the first two of the over- or under-represented gender.
//!
//! The correction pass runs once. Teams that cannot reach 2/2 (wrong size, or
//! too skewed for one pass) are left as they are and reported as failing.

use crate::gender::guess_gender;
use crate::record::{Gender, PlayerRecord};
use std::collections::HashMap;
use std::fmt;

/// Players of each gender a team must have.
pub const PER_GENDER: usize = 2;

/// Verification result for one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCheck {
    pub team: String,
    pub players: usize,
    pub males: usize,
    pub females: usize,
}

impl TeamCheck {
    pub fn passed(&self) -> bool {
        self.males == PER_GENDER && self.females == PER_GENDER
    }
}

/// Outcome of a resolver run.
#[derive(Debug, Clone)]
pub struct BalanceReport {
    /// Total players processed
    pub players: usize,
    /// Blank genders filled from the first-name guess
    pub guessed: usize,
    /// Per-team results, sorted by team name
    pub teams: Vec<TeamCheck>,
}

impl BalanceReport {
    pub fn failed_teams(&self) -> impl Iterator<Item = &TeamCheck> {
        self.teams.iter().filter(|t| !t.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.failed_teams().next().is_none()
    }
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} players in {} teams ({} genders guessed from names)",
            self.players,
            self.teams.len(),
            self.guessed
        )?;
        writeln!(f)?;
        writeln!(f, "Team verification:")?;
        for team in &self.teams {
            let status = if team.passed() { "PASS" } else { "FAIL" };
            writeln!(f, "  {} {}: {}M, {}F", status, team.team, team.males, team.females)?;
        }
        Ok(())
    }
}

/// Fill blank genders from first names. Returns how many were filled.
///
/// Unrecognized (non-blank) values are left for balancing.
pub fn fill_from_names(records: &mut [PlayerRecord]) -> usize {
    let mut filled = 0;
    for record in records.iter_mut() {
        if record.gender != Gender::Unset {
            continue;
        }
        if let Some(gender) = guess_gender(&record.first_name) {
            log::debug!("Guessed {} for {} {}", gender, record.first_name, record.last_name);
            record.gender = gender;
            filled += 1;
        }
    }
    filled
}

/// Indices of each team's players, teams in first-seen order.
pub fn group_by_team(records: &[PlayerRecord]) -> Vec<(String, Vec<usize>)> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (idx, record) in records.iter().enumerate() {
        let pos = *positions.entry(record.team.as_str()).or_insert_with(|| {
            groups.push((record.team.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[pos].1.push(idx);
    }
    groups
}

fn members_with(records: &[PlayerRecord], members: &[usize], gender: &Gender) -> Vec<usize> {
    members
        .iter()
        .copied()
        .filter(|&i| records[i].gender == *gender)
        .collect()
}

/// Balance one team in place. `members` are indices into `records`.
pub fn balance_team(records: &mut [PlayerRecord], members: &[usize]) {
    let mut males = members_with(records, members, &Gender::Male).len();
    let mut females = members_with(records, members, &Gender::Female).len();
    let mut needed_males = PER_GENDER.saturating_sub(males);
    let mut needed_females = PER_GENDER.saturating_sub(females);

    for &idx in members {
        if records[idx].gender.is_resolved() {
            continue;
        }
        let gender = if needed_males > 0 {
            needed_males -= 1;
            Gender::Male
        } else if needed_females > 0 {
            needed_females -= 1;
            Gender::Female
        } else if males < females {
            Gender::Male
        } else {
            Gender::Female
        };

        // Quota fills count toward the tie-break too, not only tie-break picks.
        match gender {
            Gender::Male => males += 1,
            _ => females += 1,
        }
        records[idx].gender = gender;
    }

    let male_idx = members_with(records, members, &Gender::Male);
    let female_idx = members_with(records, members, &Gender::Female);
    if male_idx.len() == PER_GENDER && female_idx.len() == PER_GENDER {
        return;
    }

    // Single correction pass; players past the first two are relabeled.
    let relabel: Vec<(usize, Gender)> = if male_idx.len() > PER_GENDER {
        male_idx[PER_GENDER..].iter().map(|&i| (i, Gender::Female)).collect()
    } else if female_idx.len() > PER_GENDER {
        female_idx[PER_GENDER..].iter().map(|&i| (i, Gender::Male)).collect()
    } else if male_idx.len() < PER_GENDER {
        female_idx
            .iter()
            .skip(PER_GENDER)
            .take(PER_GENDER - male_idx.len())
            .map(|&i| (i, Gender::Male))
            .collect()
    } else {
        male_idx
            .iter()
            .skip(PER_GENDER)
            .take(PER_GENDER - female_idx.len())
            .map(|&i| (i, Gender::Female))
            .collect()
    };

    for (idx, gender) in relabel {
        records[idx].gender = gender;
    }
}

/// Count genders for every team, sorted by team name.
pub fn verify_teams(records: &[PlayerRecord]) -> Vec<TeamCheck> {
    let mut checks: Vec<TeamCheck> = group_by_team(records)
        .into_iter()
        .map(|(team, members)| TeamCheck {
            team,
            players: members.len(),
            males: members_with(records, &members, &Gender::Male).len(),
            females: members_with(records, &members, &Gender::Female).len(),
        })
        .collect();
    checks.sort_by(|a, b| a.team.cmp(&b.team));
    checks
}

/// Seed blank genders from names, balance every team, and verify the result.
pub fn resolve_genders(records: &mut [PlayerRecord]) -> BalanceReport {
    let guessed = fill_from_names(records);

    for (team, members) in group_by_team(records) {
        log::debug!("Balancing team {} ({} players)", team, members.len());
        balance_team(records, &members);
    }

    let teams = verify_teams(records);
    for check in teams.iter().filter(|t| !t.passed()) {
        log::warn!(
            "Team {} is unbalanced: {} players, {}M, {}F",
            check.team,
            check.players,
            check.males,
            check.females
        );
    }

    BalanceReport {
        players: records.len(),
        guessed,
        teams,
    }
}
