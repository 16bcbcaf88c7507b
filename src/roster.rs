//! Roster export extraction
//!
//! The tournament spreadsheet is exported as `;`-delimited text. Division
//! headers ("Division : DUPR 4000") are interleaved with team rows, and each
//! team row carries up to four partners at fixed columns:
//!
//! ```text
//! ;Team;Here?;Scan?;Partner1;;Here?;Scan?;Partner2;;...;Partner4;;
//!     Email1;DUPR_ID1;Rating1;Email2;DUPR_ID2;Rating2;...
//! ```
//!
//! Partner names sit at columns 4, 8, 12 and 16. The contact block for slot
//! `i` starts at column `18 + 3 * i` (email, DUPR ID, rating).

use crate::record::{Gender, PlayerRecord, DEFAULT_ROSTER_TYPE};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use regex::Regex;
use std::collections::VecDeque;
use std::io::Read;

/// Columns holding partner names, one per team slot.
pub const PARTNER_COLUMNS: [usize; 4] = [4, 8, 12, 16];

/// First column of the contact block (email, DUPR ID, rating) for slot 0.
pub const CONTACT_BLOCK_START: usize = 18;

/// Division used for players seen before any division header.
pub const UNKNOWN_DIVISION: &str = "Unknown";

/// Second-column prefixes of metadata rows that are not teams.
const METADATA_PREFIXES: [&str; 4] = ["Division", "Date", "Time", "Court"];

lazy_static::lazy_static! {
    static ref DIVISION_HEADER: Regex =
        Regex::new(r"(?i)Division\s*:\s*(DUPR\s*\d+)").unwrap();
}

/// Read every row of a `;`-delimited roster export.
///
/// Rows may have any number of fields; quoting follows the usual spreadsheet
/// export rules.
pub fn read_export_rows<R: Read>(reader: R) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result.context("Failed to read roster row")?);
    }
    Ok(rows)
}

/// Lazily turns export rows into player records, one per occupied partner slot.
///
/// Division headers update the division carried by subsequent records; every
/// other row that is not a team row is skipped silently.
pub struct RosterExtractor<I> {
    rows: I,
    roster_type: String,
    current_division: Option<String>,
    pending: VecDeque<PlayerRecord>,
    divisions: Vec<String>,
}

impl<I: Iterator<Item = StringRecord>> RosterExtractor<I> {
    pub fn new(rows: I) -> Self {
        Self::with_roster_type(rows, DEFAULT_ROSTER_TYPE)
    }

    pub fn with_roster_type(rows: I, roster_type: &str) -> Self {
        Self {
            rows,
            roster_type: roster_type.to_string(),
            current_division: None,
            pending: VecDeque::new(),
            divisions: Vec::new(),
        }
    }

    /// Division headers encountered so far, in source order.
    pub fn divisions(&self) -> &[String] {
        &self.divisions
    }

    fn process_row(&mut self, row: &StringRecord) {
        let line = row.iter().collect::<Vec<_>>().join(";");
        if let Some(caps) = DIVISION_HEADER.captures(&line) {
            let division = caps[1].trim().to_string();
            log::info!("Found division: {}", division);
            self.divisions.push(division.clone());
            self.current_division = Some(division);
            return;
        }

        let Some(team) = team_name(row) else {
            log::debug!("Skipping non-team row: {}", line);
            return;
        };

        let division = self
            .current_division
            .clone()
            .unwrap_or_else(|| UNKNOWN_DIVISION.to_string());

        for (slot, &col) in PARTNER_COLUMNS.iter().enumerate() {
            let name = field(row, col);
            if name.is_empty() {
                continue;
            }
            let (first_name, last_name) = split_name(name);
            if first_name.is_empty() {
                continue;
            }

            let base = CONTACT_BLOCK_START + slot * 3;
            // Email (base) is not part of the import format.
            let dupr_id = field(row, base + 1);
            let rating = field(row, base + 2);

            self.pending.push_back(PlayerRecord {
                first_name,
                last_name,
                gender: Gender::Unset,
                age: String::new(),
                dupr_id: dupr_id.to_string(),
                dupr_rating: normalize_rating(rating),
                division: division.clone(),
                roster_type: self.roster_type.clone(),
                age_constraint: String::new(),
                dupr_constraint: String::new(),
                pool: String::new(),
                team: team.to_string(),
            });
        }
    }
}

impl<I: Iterator<Item = StringRecord>> Iterator for RosterExtractor<I> {
    type Item = PlayerRecord;

    fn next(&mut self) -> Option<PlayerRecord> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(record);
            }
            let row = self.rows.next()?;
            self.process_row(&row);
        }
    }
}

/// Trimmed field at `idx`, or "" past the end of the row.
fn field(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).map(str::trim).unwrap_or("")
}

/// Team name of a roster row, or `None` for column headers, separators and
/// metadata rows.
fn team_name(row: &StringRecord) -> Option<&str> {
    if row.len() <= 1 {
        return None;
    }
    if row.get(1) == Some("Team") {
        return None;
    }
    let team = field(row, 1);
    if team.is_empty() {
        return None;
    }
    if METADATA_PREFIXES.iter().any(|p| team.starts_with(p)) {
        return None;
    }
    Some(team)
}

/// Split a full name into (first, last). The last name keeps every token
/// after the first, joined by single spaces.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    match parts.next() {
        Some(first) => (first.to_string(), parts.collect::<Vec<_>>().join(" ")),
        None => (String::new(), String::new()),
    }
}

/// Normalize a DUPR rating cell.
///
/// Blank, "NR" and non-numeric values become ""; otherwise trailing dots are
/// removed and the number is kept exactly as written.
pub fn normalize_rating(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NR") {
        return String::new();
    }
    let rating = trimmed.trim_end_matches('.');
    if rating.parse::<f64>().is_ok() {
        rating.to_string()
    } else {
        log::warn!("Ignoring unparseable DUPR rating '{}'", raw);
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<PlayerRecord> {
        let rows = read_export_rows(text.as_bytes()).unwrap();
        RosterExtractor::new(rows.into_iter()).collect()
    }

    /// Team row with the given partner names and (id, rating) per slot.
    fn team_row(team: &str, partners: &[(&str, &str, &str)]) -> String {
        let mut fields = vec![String::new(); CONTACT_BLOCK_START + 12];
        fields[1] = team.to_string();
        for (slot, (name, id, rating)) in partners.iter().enumerate() {
            fields[PARTNER_COLUMNS[slot]] = name.to_string();
            let base = CONTACT_BLOCK_START + slot * 3;
            fields[base] = format!("p{}@example.com", slot);
            fields[base + 1] = id.to_string();
            fields[base + 2] = rating.to_string();
        }
        fields.join(";")
    }

    #[test]
    fn test_two_partners_under_division() {
        let text = "Division: DUPR 4000\n\
                    ;TeamAlpha;;;John Smith;;;;Jane Doe;;;;;;;;;;j@x.com;D1;4.0;jd@x.com;D2;3.5\n";
        let records = extract(text);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].first_name, "John");
        assert_eq!(records[0].last_name, "Smith");
        assert_eq!(records[0].division, "DUPR 4000");
        assert_eq!(records[0].dupr_id, "D1");
        assert_eq!(records[0].dupr_rating, "4.0");
        assert_eq!(records[0].team, "TeamAlpha");
        assert_eq!(records[0].roster_type, "4v4");
        assert_eq!(records[0].gender, Gender::Unset);
        assert!(records[0].age.is_empty());

        assert_eq!(records[1].first_name, "Jane");
        assert_eq!(records[1].last_name, "Doe");
        assert_eq!(records[1].dupr_id, "D2");
        assert_eq!(records[1].dupr_rating, "3.5");
    }

    #[test]
    fn test_normalize_rating() {
        assert_eq!(normalize_rating("NR"), "");
        assert_eq!(normalize_rating(" nr "), "");
        assert_eq!(normalize_rating(""), "");
        assert_eq!(normalize_rating("3.50."), "3.50");
        assert_eq!(normalize_rating("4.125"), "4.125");
        assert_eq!(normalize_rating("4"), "4");
        assert_eq!(normalize_rating("pending"), "");
        assert_eq!(normalize_rating("..."), "");
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("John Smith"), ("John".to_string(), "Smith".to_string()));
        assert_eq!(
            split_name("  Mary  Ann   Lee "),
            ("Mary".to_string(), "Ann Lee".to_string())
        );
        assert_eq!(split_name("Cher"), ("Cher".to_string(), String::new()));
        assert_eq!(split_name("   "), (String::new(), String::new()));
    }

    #[test]
    fn test_unknown_division_before_header() {
        let text = format!(
            "{}\ndivision : dupr 3500\n{}\nDivision:DUPR5000\n{}\n",
            team_row("Early", &[("Ann Bell", "A1", "3.1")]),
            team_row("Mid", &[("Bo Chan", "B1", "3.4")]),
            team_row("Late", &[("Cy Dunn", "C1", "5.0")]),
        );
        let rows = read_export_rows(text.as_bytes()).unwrap();
        let mut extractor = RosterExtractor::new(rows.into_iter());
        let records: Vec<PlayerRecord> = extractor.by_ref().collect();

        let divisions: Vec<&str> = records.iter().map(|r| r.division.as_str()).collect();
        assert_eq!(divisions, vec!["Unknown", "dupr 3500", "DUPR5000"]);
        assert_eq!(extractor.divisions(), ["dupr 3500", "DUPR5000"]);
    }

    #[test]
    fn test_skips_headers_separators_and_metadata() {
        let text = format!(
            "Division: DUPR 4000\n\
             ;Team;Here?;Scan?;Partner 1\n\
             ;;;;\n\
             ;\n\
             ;Date;Saturday\n\
             ;Time 9am;;;Not A Player\n\
             ;Court 3;;;Not A Player\n\
             ;Division 2;;;Not A Player\n\
             ;   ;;;Not A Player\n\
             {}\n",
            team_row("Bravo", &[("Ann Bell", "A1", "3.1")])
        );
        let records = extract(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].team, "Bravo");
    }

    #[test]
    fn test_short_row_reads_missing_contacts_as_blank() {
        let records = extract(";Charlie;;;Ann Bell;;;;Bo Chan\n");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.dupr_id.is_empty() && r.dupr_rating.is_empty()));
        assert_eq!(records[0].division, UNKNOWN_DIVISION);
    }

    #[test]
    fn test_slot_order_and_gaps() {
        let text = team_row(
            "Delta",
            &[
                ("Ann Bell", "A1", "NR"),
                ("", "", ""),
                ("  ", "X", "1.0"),
                ("Dee Dove", "D4", "4.5."),
            ],
        );
        let records = extract(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_name, "Ann");
        assert_eq!(records[0].dupr_rating, "");
        assert_eq!(records[1].first_name, "Dee");
        assert_eq!(records[1].dupr_id, "D4");
        assert_eq!(records[1].dupr_rating, "4.5");
    }

    #[test]
    fn test_custom_roster_type() {
        let text = team_row("Echo", &[("Ann Bell", "A1", "3.0")]);
        let rows = read_export_rows(text.as_bytes()).unwrap();
        let records: Vec<_> = RosterExtractor::with_roster_type(rows.into_iter(), "2v2").collect();
        assert_eq!(records[0].roster_type, "2v2");
    }
}
