use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bill_ledger_core::models::query::BillQuery;
use bill_ledger_core::BillLedger;
use uuid::Uuid;

use crate::cli::{Command, PinAction};
use crate::error::CliError;
use crate::item_spec::ItemSpec;
use crate::output;

/// Run one non-interactive command against the ledger.
///
/// `Command::Shell` is handled by the caller, which owns stdin.
pub fn run(ledger: &mut BillLedger, command: Command, out: &mut dyn Write) -> Result<(), CliError> {
    if ledger.is_locked() && !command.allowed_when_locked() {
        return Err(CliError::Locked);
    }

    match command {
        Command::Bill { items } => {
            add_items(ledger, &items)?;
            commit(ledger, out)?;
        }
        Command::List { search, range } => {
            let query = BillQuery::from_parts(search.as_deref(), range);
            output::bills(out, ledger.query_bills(&query))?;
        }
        Command::Show { id } => {
            let id = resolve_bill_id(ledger, &id)?;
            write!(out, "{}", ledger.render_receipt(id)?)?;
        }
        Command::Delete { id } => {
            let id = resolve_bill_id(ledger, &id)?;
            if ledger.delete_bill(id)? {
                writeln!(out, "Deleted bill {}.", output::short_id(&id))?;
            } else {
                writeln!(out, "No bill with id {id}.")?;
            }
        }
        Command::Stats => {
            output::stats(out, &ledger.aggregate(), ledger.budget_status().as_ref())?;
        }
        Command::Categories { average } => {
            let totals = if average {
                ledger.average_by_category()
            } else {
                ledger.aggregate_by_category()
            };
            output::category_totals(out, &totals)?;
        }
        Command::Monthly => output::series(out, &ledger.aggregate_by_month())?,
        Command::Cumulative => output::series(out, &ledger.aggregate_cumulative_by_day())?,
        Command::Export { csv, out: path } => {
            let body = if csv {
                ledger.export_bills_to_csv()
            } else {
                ledger.export_bills_to_json()?
            };
            match path {
                None => writeln!(out, "{body}")?,
                Some(path) => {
                    let path = if path.as_path() == Path::new("-") {
                        PathBuf::from(ledger.export_file_name())
                    } else {
                        path
                    };
                    fs::write(&path, body)?;
                    writeln!(out, "Exported {} bill(s) to {}.", ledger.bill_count(), path.display())?;
                }
            }
        }
        Command::Import { file } => {
            let json = fs::read_to_string(&file)?;
            let count = ledger.import_bills_from_json(&json)?;
            writeln!(out, "Imported {count} bill(s).")?;
        }
        Command::Budget { amount, clear } => {
            if clear {
                ledger.set_monthly_budget(None)?;
                writeln!(out, "Monthly budget cleared.")?;
            } else if let Some(amount) = amount {
                ledger.set_monthly_budget(Some(amount))?;
                writeln!(out, "Monthly budget set to {amount:.2}.")?;
            } else {
                match ledger.budget_status() {
                    Some(status) => writeln!(
                        out,
                        "Spent {:.2} of {:.2} this month ({:.1}%).",
                        status.spent, status.budget, status.percent_used
                    )?,
                    None => writeln!(out, "No monthly budget set.")?,
                }
            }
        }
        Command::Theme => {
            let theme = ledger.toggle_theme()?;
            writeln!(out, "Theme: {theme}")?;
        }
        Command::Appearance { color, font } => {
            if color.is_some() || font.is_some() {
                ledger.set_appearance(color.as_deref(), font.as_deref())?;
            }
            let settings = ledger.settings();
            writeln!(
                out,
                "Color theme: {}, font: {}",
                settings.color_theme, settings.font_family
            )?;
        }
        Command::Pin { action } => match action {
            PinAction::Set { code } => {
                ledger.set_pin(&code)?;
                writeln!(out, "PIN lock enabled.")?;
            }
            PinAction::Disable => {
                ledger.disable_pin()?;
                writeln!(out, "PIN lock disabled.")?;
            }
            PinAction::Verify { code } => {
                if !ledger.verify_pin(&code) {
                    return Err(CliError::WrongPin);
                }
                writeln!(out, "PIN accepted.")?;
            }
        },
        Command::Shell => {
            return Err(CliError::Usage("the shell must be started from main".into()));
        }
    }
    Ok(())
}

/// Add every item to the draft; on the first invalid item the draft is
/// cleared so nothing half-entered is committed.
pub fn add_items(ledger: &mut BillLedger, items: &[ItemSpec]) -> Result<(), CliError> {
    for item in items {
        if let Err(e) = ledger.add_item(
            &item.name,
            item.unit_price,
            item.quantity,
            item.category,
            item.payment_method,
        ) {
            ledger.clear_draft();
            return Err(e.into());
        }
    }
    Ok(())
}

pub fn commit(ledger: &mut BillLedger, out: &mut dyn Write) -> Result<(), CliError> {
    let bill = ledger.commit_bill()?;
    writeln!(
        out,
        "Generated bill {} with {} item(s), total {:.2}.",
        output::short_id(&bill.id),
        bill.items.len(),
        bill.total
    )?;
    Ok(())
}

/// Accept a full UUID or a prefix that matches exactly one bill.
pub fn resolve_bill_id(ledger: &BillLedger, input: &str) -> Result<Uuid, CliError> {
    let input = input.trim().to_lowercase();
    if let Ok(id) = Uuid::parse_str(&input) {
        return Ok(id);
    }
    if input.is_empty() {
        return Err(CliError::Usage("Bill id must not be empty".into()));
    }
    let mut matches = ledger
        .bills()
        .iter()
        .filter(|b| b.id.to_string().starts_with(&input));
    match (matches.next(), matches.next()) {
        (Some(bill), None) => Ok(bill.id),
        (None, _) => Err(CliError::Usage(format!("No bill matches '{input}'"))),
        (Some(_), Some(_)) => Err(CliError::Usage(format!(
            "'{input}' matches more than one bill; use a longer prefix"
        ))),
    }
}
