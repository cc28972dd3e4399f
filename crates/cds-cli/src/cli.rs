//! CLI argument definitions for cds.

use std::path::PathBuf;

use cds_core::{AppearYear, HireStatus};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cds")]
#[command(
    about = "Save file and executable editor for the Korean release of Daikoukai Jidai",
    version
)]
pub struct Args {
    /// Configuration file (default: <config dir>/cds/cds.toml)
    #[arg(long, global = true, value_name = "FILE", env = "CDS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Do not create a .bak copy before the first write
    #[arg(long, global = true)]
    pub no_backup: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect or edit a save file (SAVEDATA.CDS)
    Save {
        /// Save file path (overrides config)
        #[arg(long, short, global = true, value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(subcommand)]
        command: SaveCommand,
    },
    /// Inspect or patch the game executable (cds_95.exe)
    Exe {
        /// Executable path (overrides config)
        #[arg(long, short, global = true, value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(subcommand)]
        command: ExeCommand,
    },
}

#[derive(Subcommand)]
pub enum SaveCommand {
    /// Show the save date and a summary
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List named characters
    Characters {
        /// City name table (TSV, overrides config)
        #[arg(long, value_name = "FILE")]
        cities: Option<PathBuf>,
        /// Only characters that can be hired right now
        #[arg(long)]
        hirable: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the player character and crew
    Player {
        /// City name table (TSV, overrides config)
        #[arg(long, value_name = "FILE")]
        cities: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List discovery hints
    Hints {
        /// Only discovered entries
        #[arg(long)]
        discovered: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a character's hire status
    SetHireStatus {
        /// Character index (0-460)
        #[arg(long)]
        index: usize,
        #[arg(long, value_enum)]
        status: HireStatusArg,
    },
    /// Change a character's fame
    SetFame {
        /// Character index (0-460)
        #[arg(long)]
        index: usize,
        #[arg(long)]
        fame: u16,
    },
    /// Change a character's age
    SetAge {
        /// Character index (0-460)
        #[arg(long)]
        index: usize,
        /// New age (-100 to 100, negative = not yet born)
        #[arg(long, allow_negative_numbers = true)]
        age: i8,
    },
}

#[derive(Subcommand)]
pub enum ExeCommand {
    /// Show the state of every patch site
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply every patch that is not applied yet
    Apply,
    /// Revert every applied patch
    Restore,
    /// Replace the executable with its .bak copy
    RestoreBackup,
    /// List the character roster compiled into the executable
    Roster {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a roster character's hire status
    SetHireStatus {
        /// Roster index (0-79)
        #[arg(long)]
        record: usize,
        #[arg(long, value_enum)]
        status: HireStatusArg,
    },
    /// Change the year a roster character appears
    SetAppearYear {
        /// Roster index (0-79)
        #[arg(long)]
        record: usize,
        /// Year (1480-1680) or "event"
        #[arg(long)]
        year: AppearYear,
    },
    /// Change a roster character's appear condition
    SetAppearCondition {
        /// Roster index (0-79)
        #[arg(long)]
        record: usize,
        /// Condition value (0-255)
        #[arg(long)]
        value: u32,
    },
    /// Change a roster character's birth year
    SetBirthYear {
        /// Roster index (0-79)
        #[arg(long)]
        record: usize,
        /// Year (1380-1680)
        #[arg(long)]
        year: i32,
    },
    /// Show or change the long-rest limit
    LongRest {
        /// New limit in months (1-127)
        #[arg(long, conflicts_with = "restore")]
        set: Option<u8>,
        /// Write the stock limit (12 months) back
        #[arg(long)]
        restore: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HireStatusArg {
    TalkOnly,
    Hirable,
    Hired,
}

impl From<HireStatusArg> for HireStatus {
    fn from(arg: HireStatusArg) -> Self {
        match arg {
            HireStatusArg::TalkOnly => HireStatus::TalkOnly,
            HireStatusArg::Hirable => HireStatus::Hirable,
            HireStatusArg::Hired => HireStatus::Hired,
        }
    }
}
