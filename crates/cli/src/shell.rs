use std::io::{BufRead, Write};

use bill_ledger_core::models::query::{BillQuery, DateRange};
use bill_ledger_core::BillLedger;
use tracing::debug;

use crate::commands;
use crate::error::CliError;
use crate::item_spec::ItemSpec;
use crate::output;

const PROMPT: &str = "bill> ";

const HELP: &str = "\
Commands:
  add NAME PRICE QTY [CATEGORY [PAYMENT]]   add an item to the draft
  remove N                                  remove draft item N
  draft                                     show the draft
  clear                                     empty the draft
  commit                                    generate a bill from the draft
  list [TEXT] [--today|--week|--month]      search bills
  show ID                                   print a receipt
  delete ID                                 delete a bill
  stats                                     dashboard totals
  lock / unlock PIN                         PIN gate
  help                                      this text
  quit                                      leave (the draft is discarded)
Quote names with spaces: add \"Basmati Rice\" 120 1 groceries";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Line-oriented interactive session. The draft lives in the ledger for as
/// long as the session runs.
pub struct Shell<'a, R, W> {
    ledger: &'a mut BillLedger,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(ledger: &'a mut BillLedger, input: R, out: W) -> Self {
        Self { ledger, input, out }
    }

    /// Read and execute lines until `quit` or end of input. Command errors
    /// are printed and the loop continues.
    pub fn run(&mut self) -> Result<(), CliError> {
        if self.ledger.is_locked() {
            writeln!(self.out, "Ledger is locked. Enter `unlock PIN`.")?;
        }
        let mut line = String::new();
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            match self.execute(&line) {
                Ok(LoopControl::Exit) => break,
                Ok(LoopControl::Continue) => {}
                Err(CliError::Io(e)) => return Err(CliError::Io(e)),
                Err(e) => writeln!(self.out, "Error: {e}")?,
            }
        }
        if !self.ledger.draft_items().is_empty() {
            writeln!(
                self.out,
                "Discarded draft with {} item(s).",
                self.ledger.draft_items().len()
            )?;
        }
        Ok(())
    }

    /// Execute one input line.
    pub fn execute(&mut self, line: &str) -> Result<LoopControl, CliError> {
        let tokens = tokenize(line)?;
        let Some((cmd, args)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let cmd = cmd.to_lowercase();
        debug!(command = %cmd, args = args.len(), "shell command");

        if self.ledger.is_locked() && !matches!(cmd.as_str(), "unlock" | "help" | "quit" | "exit") {
            return Err(CliError::Locked);
        }

        let out: &mut dyn Write = &mut self.out;
        match cmd.as_str() {
            "help" | "?" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(LoopControl::Exit),
            "add" => {
                let fields: Vec<&str> = args.iter().map(String::as_str).collect();
                let spec = ItemSpec::from_fields(&fields)?;
                let item = self.ledger.add_item(
                    &spec.name,
                    spec.unit_price,
                    spec.quantity,
                    spec.category,
                    spec.payment_method,
                )?;
                writeln!(
                    out,
                    "Added {} ({:.2}). Draft total: {:.2}",
                    item.name,
                    item.line_total,
                    self.ledger.draft_total()
                )?;
            }
            "remove" | "rm" => {
                let n = single_arg(args, "remove N")?
                    .parse::<usize>()
                    .map_err(|_| CliError::Usage("N must be a draft line number".into()))?;
                let id = n
                    .checked_sub(1)
                    .and_then(|idx| self.ledger.draft_items().get(idx))
                    .map(|item| item.id)
                    .ok_or_else(|| CliError::Usage(format!("No draft item {n}")))?;
                self.ledger.remove_item(id);
                writeln!(out, "Removed item {n}. Draft total: {:.2}", self.ledger.draft_total())?;
            }
            "draft" => output::draft(out, self.ledger.draft_items(), self.ledger.draft_total())?,
            "clear" => {
                self.ledger.clear_draft();
                writeln!(out, "Draft cleared.")?;
            }
            "commit" | "generate" => commands::commit(self.ledger, out)?,
            "list" | "ls" => {
                let query = parse_list_args(args)?;
                output::bills(out, self.ledger.query_bills(&query))?;
            }
            "show" => {
                let id = commands::resolve_bill_id(self.ledger, single_arg(args, "show ID")?)?;
                write!(out, "{}", self.ledger.render_receipt(id)?)?;
            }
            "delete" | "del" => {
                let id = commands::resolve_bill_id(self.ledger, single_arg(args, "delete ID")?)?;
                if self.ledger.delete_bill(id)? {
                    writeln!(out, "Deleted bill {}.", output::short_id(&id))?;
                } else {
                    writeln!(out, "No bill with id {id}.")?;
                }
            }
            "stats" => {
                output::stats(out, &self.ledger.aggregate(), self.ledger.budget_status().as_ref())?;
            }
            "lock" => {
                self.ledger.lock();
                if self.ledger.is_locked() {
                    writeln!(out, "Locked.")?;
                } else {
                    writeln!(out, "No PIN is set.")?;
                }
            }
            "unlock" => {
                if !self.ledger.verify_pin(single_arg(args, "unlock PIN")?) {
                    return Err(CliError::WrongPin);
                }
                writeln!(out, "Unlocked.")?;
            }
            other => {
                return Err(CliError::Usage(format!(
                    "Unknown command '{other}'. Type `help`."
                )));
            }
        }
        Ok(LoopControl::Continue)
    }
}

fn single_arg<'s>(args: &'s [String], usage: &str) -> Result<&'s str, CliError> {
    match args {
        [one] => Ok(one.as_str()),
        _ => Err(CliError::Usage(format!("Usage: {usage}"))),
    }
}

fn parse_list_args(args: &[String]) -> Result<BillQuery, CliError> {
    let mut range = None;
    let mut words = Vec::new();
    for arg in args {
        match arg.strip_prefix("--") {
            Some(flag) => range = Some(flag.parse::<DateRange>()?),
            None => words.push(arg.as_str()),
        }
    }
    let text = words.join(" ");
    Ok(BillQuery::from_parts(Some(&text), range))
}

/// Split a line on whitespace, keeping double-quoted runs together.
pub fn tokenize(line: &str) -> Result<Vec<String>, CliError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if in_quotes {
        return Err(CliError::Usage("Unterminated quote".into()));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}
