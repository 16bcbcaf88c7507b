//! Pipeline functions for programmatic use by the CLI.
//!
//! Each stage reads its input fully before writing anything, and returns a
//! structured summary instead of printing.

use crate::balance::{resolve_genders, BalanceReport};
use crate::record::{PlayerRecord, DEFAULT_ROSTER_TYPE, IMPORT_HEADERS};
use crate::roster::{read_export_rows, RosterExtractor};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Roster export the tournament spreadsheet is saved as.
pub const DEFAULT_EXPORT_FILE: &str = "player list_csv.csv";

/// Import CSV produced by conversion and rewritten by gender assignment.
pub const DEFAULT_IMPORT_FILE: &str = "player_list_import_ready.csv";

// ============================================================================
// Convert
// ============================================================================

/// Configuration for the convert operation.
pub struct ConvertConfig {
    /// `;`-delimited roster export
    pub input: PathBuf,
    /// Import CSV to create (overwritten if present)
    pub output: PathBuf,
    /// Value written to the Type column
    pub roster_type: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_EXPORT_FILE),
            output: PathBuf::from(DEFAULT_IMPORT_FILE),
            roster_type: DEFAULT_ROSTER_TYPE.to_string(),
        }
    }
}

/// Result of the convert operation.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub players: usize,
    pub teams: usize,
    /// Distinct divisions assigned to players, in first-seen order
    pub divisions: Vec<String>,
    pub output: PathBuf,
}

impl fmt::Display for ConvertSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Converted {} players from {} teams", self.players, self.teams)?;
        writeln!(f, "Output saved to: {}", self.output.display())?;
        writeln!(f)?;
        writeln!(f, "Note: Gender and Age fields are empty; run assign-gender to fill Gender")?;
        if !self.divisions.is_empty() {
            writeln!(f)?;
            writeln!(f, "Divisions found: {}", self.divisions.join(", "))?;
        }
        Ok(())
    }
}

/// Convert a roster export into the import CSV.
pub fn convert_roster(config: &ConvertConfig) -> Result<ConvertSummary> {
    let file = File::open(&config.input)
        .with_context(|| format!("Failed to open roster export: {}", config.input.display()))?;
    let rows = read_export_rows(file)?;
    log::info!("Read {} rows from {}", rows.len(), config.input.display());

    let records: Vec<PlayerRecord> =
        RosterExtractor::with_roster_type(rows.into_iter(), &config.roster_type).collect();

    write_import_csv(&config.output, &records)?;

    let mut seen_teams = HashSet::new();
    let mut seen_divisions = HashSet::new();
    let mut divisions = Vec::new();
    for record in &records {
        seen_teams.insert(record.team.as_str());
        if seen_divisions.insert(record.division.as_str()) {
            divisions.push(record.division.clone());
        }
    }

    Ok(ConvertSummary {
        players: records.len(),
        teams: seen_teams.len(),
        divisions,
        output: config.output.clone(),
    })
}

// ============================================================================
// Import CSV I/O
// ============================================================================

/// Read every player from an import CSV.
///
/// Short rows are accepted; their missing trailing columns are empty.
pub fn read_import_csv(path: &Path) -> Result<Vec<PlayerRecord>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open import CSV: {}", path.display()))?;

    let mut records = Vec::new();
    for (row_num, result) in reader.deserialize().enumerate() {
        let record: PlayerRecord =
            result.with_context(|| format!("Failed to read player row {}", row_num + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Write players to an import CSV. The header row is always written.
pub fn write_import_csv(path: &Path, records: &[PlayerRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create import CSV: {}", path.display()))?;

    writer.write_record(IMPORT_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

// ============================================================================
// Assign Gender
// ============================================================================

/// Fill and balance genders in an import CSV, rewriting it in place.
pub fn assign_genders(path: &Path) -> Result<BalanceReport> {
    let mut records = read_import_csv(path)?;
    let report = resolve_genders(&mut records);
    write_import_csv(path, &records)?;
    Ok(report)
}
