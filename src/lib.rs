//! Roster Import Tools
//!
//! Tools for turning a tournament roster spreadsheet export into a player CSV
//! that a tournament-management platform can import.
//!
//! This library provides:
//! - `roster`: Extracts one player record per partner slot from the `;`-delimited export
//! - `gender`: First-name gender classifier used to seed blank genders
//! - `balance`: Per-team gender balancing (2 M + 2 F) and verification report
//! - `pipeline`: File-level operations shared by the CLI
//!
//! Binaries:
//! - `roster-import`: Convert an export and/or assign genders in place

pub mod balance;
pub mod gender;
pub mod pipeline;
pub mod record;
pub mod roster;

pub use record::{Gender, PlayerRecord, IMPORT_HEADERS};
