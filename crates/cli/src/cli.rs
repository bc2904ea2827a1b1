use std::path::PathBuf;

use bill_ledger_core::models::query::DateRange;
use clap::{Parser, Subcommand};

use crate::item_spec::ItemSpec;

#[derive(Debug, Parser)]
#[command(name = "bill-ledger", version, about = "Enter bills and track expenses")]
pub struct Cli {
    /// Directory holding the ledger's data files
    #[arg(long, env = "BILL_LEDGER_DATA_DIR", default_value = ".bill-ledger", global = true)]
    pub data_dir: PathBuf,

    /// PIN to unlock the ledger, when a PIN lock is enabled
    #[arg(long, global = true)]
    pub pin: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add items and generate a bill in one step
    Bill {
        /// NAME:PRICE:QTY[:CATEGORY[:PAYMENT]], repeatable
        #[arg(long = "item", short = 'i', required = true)]
        items: Vec<ItemSpec>,
    },
    /// List bills, newest first
    List {
        /// Match item names or categories (case-insensitive)
        #[arg(long, short = 's')]
        search: Option<String>,
        /// today, week, or month
        #[arg(long, short = 'r')]
        range: Option<DateRange>,
    },
    /// Print a bill's receipt
    Show {
        /// Bill id or unique id prefix
        id: String,
    },
    /// Delete a bill
    Delete {
        /// Bill id or unique id prefix
        id: String,
    },
    /// Dashboard totals
    Stats,
    /// Spending per category
    Categories {
        /// Show the average item amount instead of the sum
        #[arg(long)]
        average: bool,
    },
    /// Spending per month
    Monthly,
    /// Running total of spending per day
    Cumulative,
    /// Export bills as JSON (default) or CSV
    Export {
        #[arg(long)]
        csv: bool,
        /// Write to this file instead of stdout. Pass `-` for
        /// `bills_export_<date>.json` in the current directory.
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// Import bills from a JSON export
    Import { file: PathBuf },
    /// Show, set, or clear the monthly budget
    Budget {
        amount: Option<f64>,
        #[arg(long, conflicts_with = "amount")]
        clear: bool,
    },
    /// Toggle between light and dark theme
    Theme,
    /// Show or change the accent palette and font
    Appearance {
        /// Accent palette name
        #[arg(long)]
        color: Option<String>,
        /// Font family name
        #[arg(long)]
        font: Option<String>,
    },
    /// Manage the PIN lock
    Pin {
        #[command(subcommand)]
        action: PinAction,
    },
    /// Interactive session with a persistent draft
    Shell,
}

#[derive(Debug, Subcommand)]
pub enum PinAction {
    /// Set a 4-digit PIN and enable the lock
    Set {
        #[arg(value_name = "PIN")]
        code: String,
    },
    /// Remove the PIN lock
    Disable,
    /// Check a PIN
    Verify {
        #[arg(value_name = "PIN")]
        code: String,
    },
}

impl Command {
    /// Commands that may run while the ledger is locked.
    pub fn allowed_when_locked(&self) -> bool {
        matches!(
            self,
            Command::Pin {
                action: PinAction::Verify { .. }
            } | Command::Shell
        )
    }
}
