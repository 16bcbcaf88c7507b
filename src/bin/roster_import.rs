//! Roster Import Tool - Prepare a tournament roster for platform import
//!
//! Converts the `;`-delimited roster export into the import CSV, then fills
//! and balances player genders so every team has two men and two women.

use anyhow::Result;
use clap::{Parser, Subcommand};
use roster_import_tools::pipeline::{
    assign_genders, convert_roster, ConvertConfig, DEFAULT_EXPORT_FILE, DEFAULT_IMPORT_FILE,
};
use roster_import_tools::record::DEFAULT_ROSTER_TYPE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster-import")]
#[command(about = "Convert tournament roster exports into an importable player CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a `;`-delimited roster export into the import CSV
    Convert {
        /// Roster export file
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        input: PathBuf,

        /// Import CSV to create
        #[arg(short, long, default_value = DEFAULT_IMPORT_FILE)]
        output: PathBuf,

        /// Value for the Type column
        #[arg(long, env = "ROSTER_TYPE", default_value = DEFAULT_ROSTER_TYPE)]
        roster_type: String,
    },

    /// Fill blank genders and balance teams to 2M/2F, rewriting the file in place
    AssignGender {
        /// Import CSV to update
        #[arg(short, long, default_value = DEFAULT_IMPORT_FILE)]
        file: PathBuf,
    },

    /// Convert, then assign genders on the converted file
    Run {
        /// Roster export file
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        input: PathBuf,

        /// Import CSV to create and update
        #[arg(short, long, default_value = DEFAULT_IMPORT_FILE)]
        output: PathBuf,

        /// Value for the Type column
        #[arg(long, env = "ROSTER_TYPE", default_value = DEFAULT_ROSTER_TYPE)]
        roster_type: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            roster_type,
        } => {
            let summary = convert_roster(&ConvertConfig {
                input,
                output,
                roster_type,
            })?;
            print!("{}", summary);
        }
        Commands::AssignGender { file } => {
            let report = assign_genders(&file)?;
            print!("{}", report);
            println!("\nOutput saved to: {}", file.display());
        }
        Commands::Run {
            input,
            output,
            roster_type,
        } => {
            let summary = convert_roster(&ConvertConfig {
                input,
                output: output.clone(),
                roster_type,
            })?;
            print!("{}", summary);
            println!();
            let report = assign_genders(&output)?;
            print!("{}", report);
            println!("\nOutput saved to: {}", output.display());
        }
    }

    Ok(())
}
