//! First-international matches: date parsing, debut records, consistency checks.

use crate::domain::aliases::{self, RESTORED_DEBUTS};
use crate::domain::{DebutRecord, DomainError, MatchOutcome, ScrapedMatch};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use tracing::warn;

/// Kick-off year from "25 November 1872", "November 1872" or "1872".
pub fn parse_kickoff_year(text: &str) -> Result<i32, DomainError> {
    let text = text.trim();
    if let Ok(d) = NaiveDate::parse_from_str(text, "%d %B %Y") {
        return Ok(d.year());
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("1 {}", text), "%d %B %Y") {
        return Ok(d.year());
    }
    if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(y) = text.parse::<i32>() {
            return Ok(y);
        }
    }
    Err(DomainError::Parse(format!(
        "no valid date format found for {}",
        text
    )))
}

/// Parse "2–1" (en dash) into both scores.
pub fn parse_score(text: &str) -> Result<[u32; 2], DomainError> {
    let parts: Vec<&str> = text.split('–').map(str::trim).collect();
    match parts.as_slice() {
        [a, b] => {
            let a = a
                .parse()
                .map_err(|_| DomainError::Parse(format!("bad score: {}", text)))?;
            let b = b
                .parse()
                .map_err(|_| DomainError::Parse(format!("bad score: {}", text)))?;
            Ok([a, b])
        }
        _ => Err(DomainError::Parse(format!("bad score: {}", text))),
    }
}

/// Debuting associations named in a section heading ("Scotland and England").
pub fn debuts_from_heading(heading: &str) -> Vec<Option<String>> {
    heading
        .split(" and ")
        .map(aliases::rename_association)
        .collect()
}

/// One record per debuting association, from its own side of the match.
///
/// Associations without a successor are skipped; an association that is not
/// one of the two teams is skipped with a warning.
pub fn debut_records(matches: &[ScrapedMatch]) -> Vec<DebutRecord> {
    let mut records = Vec::new();
    for m in matches {
        for debut in &m.debuts {
            let Some(association) = debut else {
                continue;
            };
            let mut teams = m.teams.clone();
            let lookup = RESTORED_DEBUTS
                .iter()
                .find(|(restored, _)| *restored == association.as_str())
                .map(|(_, listed_as)| *listed_as)
                .unwrap_or(association.as_str());
            let Some(idx) = teams.iter().position(|t| t == lookup) else {
                warn!(association = %association, teams = ?m.teams, "association not among match teams");
                continue;
            };
            teams[idx] = association.clone();
            let opp = 1 - idx;
            let (own, other) = (m.scores[idx], m.scores[opp]);
            records.push(DebutRecord {
                team_name: teams[idx].clone(),
                oppname: teams[opp].clone(),
                outcome: MatchOutcome::from_scores(own, other),
                score: format!("{} - {}", own, other),
                venue: m.venue.clone(),
                ko_year: m.ko_year,
                ko_date: m.date_text.clone(),
                match_type: m.match_type.clone(),
            });
        }
    }
    records
}

/// Findings of the post-scrape consistency pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    /// (match index, association) where the association is not one of the teams.
    pub not_in_match: Vec<(usize, String)>,
    pub not_members: Vec<String>,
    /// Current members with no debut found.
    pub missing_members: Vec<String>,
}

pub fn check_matches(matches: &[ScrapedMatch]) -> ScrapeReport {
    let mut report = ScrapeReport::default();
    let mut debuted: HashSet<&str> = HashSet::new();

    for (i, m) in matches.iter().enumerate() {
        for association in m.debuts.iter().flatten() {
            debuted.insert(association.as_str());
            if !m.teams.contains(association) {
                report.not_in_match.push((i, association.clone()));
            }
            if !aliases::is_current_member(association) {
                report.not_members.push(association.clone());
            }
        }
    }
    report.missing_members = aliases::ASSOCIATIONS
        .iter()
        .filter(|(name, _)| !debuted.contains(name))
        .map(|(name, _)| name.to_string())
        .collect();
    report
}
