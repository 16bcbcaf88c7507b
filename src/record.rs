//! Player records in the platform's import format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Header row of the import CSV, in column order.
pub const IMPORT_HEADERS: [&str; 12] = [
    "First Name",
    "Last Name",
    "Gender",
    "Age",
    "DUPR ID",
    "DUPR rating",
    "Division",
    "Type",
    "Age Constraint",
    "DUPR Constraint",
    "Pool",
    "Team",
];

/// Roster type label written for every extracted player.
pub const DEFAULT_ROSTER_TYPE: &str = "4v4";

/// Gender column value.
///
/// Anything other than a (trimmed) `M`, `F` or blank is kept verbatim so it
/// survives a read/write cycle until balancing overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unset,
    Unrecognized(String),
}

impl Gender {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "M" => Gender::Male,
            "F" => Gender::Female,
            "" => Gender::Unset,
            _ => Gender::Unrecognized(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Unset => "",
            Gender::Unrecognized(s) => s,
        }
    }

    /// True for `M` or `F`.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Gender::Male | Gender::Female)
    }
}

impl From<String> for Gender {
    fn from(s: String) -> Self {
        Gender::parse(&s)
    }
}

impl From<Gender> for String {
    fn from(g: Gender) -> Self {
        g.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player row of the import CSV.
///
/// Columns missing from a short row read back as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "DUPR ID")]
    pub dupr_id: String,
    /// Normalized rating; empty when not rated
    #[serde(rename = "DUPR rating")]
    pub dupr_rating: String,
    #[serde(rename = "Division")]
    pub division: String,
    #[serde(rename = "Type")]
    pub roster_type: String,
    #[serde(rename = "Age Constraint")]
    pub age_constraint: String,
    #[serde(rename = "DUPR Constraint")]
    pub dupr_constraint: String,
    #[serde(rename = "Pool")]
    pub pool: String,
    #[serde(rename = "Team")]
    pub team: String,
}
