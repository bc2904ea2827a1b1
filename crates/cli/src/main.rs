use std::io::{self, Write};
use std::process::ExitCode;

use bill_ledger_cli::cli::{Cli, Command};
use bill_ledger_cli::commands;
use bill_ledger_cli::error::CliError;
use bill_ledger_cli::shell::Shell;
use bill_ledger_core::storage::file::FileStore;
use bill_ledger_core::BillLedger;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let store = FileStore::open(&cli.data_dir)?;
    let mut ledger = BillLedger::open(Box::new(store))?;

    if let Some(pin) = &cli.pin {
        if ledger.is_locked() && !ledger.verify_pin(pin) {
            return Err(CliError::WrongPin);
        }
    }

    let stdout = io::stdout();
    match cli.command {
        Command::Shell => {
            let stdin = io::stdin();
            Shell::new(&mut ledger, stdin.lock(), stdout.lock()).run()
        }
        command => {
            let mut out = stdout.lock();
            commands::run(&mut ledger, command, &mut out)?;
            out.flush()?;
            Ok(())
        }
    }
}
