use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::filter::{Filter, Selection};
use crate::import::parse_date_text;
use crate::models::Ledger;
use crate::report::{Report, MISSING_LABEL};
use crate::ui::util::format_amount;

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Invocation {
    Tui(Options),
    Summary(Options),
    Export { out: PathBuf, options: Options },
    Help,
    Version,
}

/// Workbook argument plus the filter flags shared by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Options {
    pub(crate) workbook: Option<String>,
    pub(crate) properties: Vec<String>,
    pub(crate) categories: Vec<String>,
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) no_income: bool,
    pub(crate) no_expense: bool,
}

impl Invocation {
    /// Options of the commands that read a workbook.
    pub(crate) fn options(&self) -> Option<&Options> {
        match self {
            Self::Tui(options) | Self::Summary(options) | Self::Export { options, .. } => {
                Some(options)
            }
            Self::Help | Self::Version => None,
        }
    }

    /// Parse `std::env::args()` minus the program name.
    pub(crate) fn parse(args: &[String]) -> Result<Self> {
        let Some(first) = args.first() else {
            return Ok(Self::Tui(Options::default()));
        };
        match first.as_str() {
            "--help" | "-h" | "help" => Ok(Self::Help),
            "--version" | "-V" | "version" => Ok(Self::Version),
            "summary" | "s" => {
                let (positional, options) = parse_options(&args[1..])?;
                Ok(Self::Summary(with_workbook(options, &positional, 0, "summary")?))
            }
            "export" => {
                let (positional, options) = parse_options(&args[1..])?;
                let out = positional
                    .first()
                    .map(|p| PathBuf::from(super::shellexpand(p)))
                    .context("Usage: rentdash export <out.csv> [workbook] [filters]")?;
                let options = with_workbook(options, &positional, 1, "export")?;
                Ok(Self::Export { out, options })
            }
            _ => {
                let (positional, options) = parse_options(args)?;
                Ok(Self::Tui(with_workbook(options, &positional, 0, "rentdash")?))
            }
        }
    }
}

fn with_workbook(
    mut options: Options,
    positional: &[String],
    at: usize,
    command: &str,
) -> Result<Options> {
    if positional.len() > at + 1 {
        anyhow::bail!(
            "Unexpected argument for {command}: {}",
            positional[at + 1]
        );
    }
    options.workbook = positional.get(at).cloned();
    Ok(options)
}

fn parse_options(args: &[String]) -> Result<(Vec<String>, Options)> {
    let mut positional = Vec::new();
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{flag} needs a value"))
        };
        match arg.as_str() {
            "--property" => options.properties.push(value("--property")?),
            "--category" => options.categories.push(value("--category")?),
            "--from" => options.from = Some(parse_flag_date("--from", &value("--from")?)?),
            "--to" => options.to = Some(parse_flag_date("--to", &value("--to")?)?),
            "--no-income" => options.no_income = true,
            "--no-expense" => options.no_expense = true,
            flag if flag.starts_with("--") => anyhow::bail!("Unknown option: {flag}"),
            _ => positional.push(arg.clone()),
        }
    }
    Ok((positional, options))
}

fn parse_flag_date(flag: &str, value: &str) -> Result<NaiveDate> {
    parse_date_text(value).with_context(|| format!("{flag}: invalid date '{value}'"))
}

impl Options {
    /// The default filter for `ledger`, narrowed by any flags given.
    pub(crate) fn filter(&self, ledger: &Ledger) -> Result<Filter> {
        let mut filter = Filter::for_ledger(ledger);
        if !self.properties.is_empty() {
            filter.properties = pick(&self.properties, &ledger.properties(), "property")?;
        }
        if !self.categories.is_empty() {
            filter.categories = pick(&self.categories, &ledger.categories(), "category")?;
        }
        if let Some(from) = self.from {
            filter.date_from = from;
        }
        if let Some(to) = self.to {
            filter.date_to = to;
        }
        filter.show_income = !self.no_income;
        filter.show_expense = !self.no_expense;
        Ok(filter)
    }
}

/// Selection holding exactly the requested names. `(none)` selects rows
/// where the value is missing.
fn pick(requested: &[String], observed: &[String], noun: &str) -> Result<Selection> {
    let mut names = Vec::new();
    let mut include_missing = false;
    for name in requested {
        if name == MISSING_LABEL {
            include_missing = true;
            continue;
        }
        let value = observed
            .iter()
            .find(|v| v.eq_ignore_ascii_case(name))
            .with_context(|| {
                format!("No {noun} named '{name}' (have: {})", observed.join(", "))
            })?;
        names.push(value.clone());
    }
    let selection = Selection::of(names);
    Ok(if include_missing {
        selection.with_missing()
    } else {
        selection
    })
}

// ── Commands ─────────────────────────────────────────────────

pub(crate) fn as_cli(invocation: &Invocation, ledger: &Ledger, source: &str) -> Result<()> {
    match invocation {
        Invocation::Summary(options) => {
            let filter = options.filter(ledger)?;
            let mut stdout = io::stdout().lock();
            write_summary(&mut stdout, ledger, source, &filter)
                .context("Failed to write summary")
        }
        Invocation::Export { out, options } => {
            let filter = options.filter(ledger)?;
            let rows = filter.apply(ledger.transactions());
            let report = Report::build(&rows);
            let count = crate::export::write_csv(out, &report.table)?;
            println!("Exported {count} rows to {}", out.display());
            Ok(())
        }
        Invocation::Tui(_) | Invocation::Help | Invocation::Version => {
            anyhow::bail!("Not a workbook command: {invocation:?}")
        }
    }
}

pub(crate) fn print_version() {
    println!("rentdash {}", env!("CARGO_PKG_VERSION"));
}

pub(crate) fn print_usage() {
    println!("RentDash: terminal dashboard for a rental-property ledger");
    println!();
    println!("Usage: rentdash [command] [workbook] [filters]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [workbook]            Print metrics and aggregates");
    println!("  export <out.csv> [workbook]   Write the filtered rows to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Filters:");
    println!("  --property <name>             Only this property (repeatable, '(none)' for blank)");
    println!("  --category <name>             Only this category (repeatable, '(none)' for blank)");
    println!("  --from <YYYY-MM-DD>           Start date, inclusive");
    println!("  --to <YYYY-MM-DD>             End date, inclusive");
    println!("  --no-income                   Hide income rows");
    println!("  --no-expense                  Hide expense rows");
    println!();
    println!(
        "Without a workbook argument, '{}' is read from the current directory",
        super::DEFAULT_WORKBOOK
    );
    println!("or from the per-user data directory.");
}

pub(crate) fn write_summary(
    out: &mut impl Write,
    ledger: &Ledger,
    source: &str,
    filter: &Filter,
) -> io::Result<()> {
    let rows = filter.apply(ledger.transactions());
    let report = Report::build(&rows);
    let totals = report.totals;

    writeln!(out, "RentDash: {source}")?;
    writeln!(out, "{}", filter.describe(ledger))?;
    writeln!(out, "{}", "─".repeat(48))?;
    writeln!(out, "  Total Income:    {}", format_amount(totals.income))?;
    writeln!(out, "  Total Expenses:  {}", format_amount(totals.expense))?;
    writeln!(out, "  Net Profit:      {}", format_amount(totals.net))?;
    writeln!(out, "  Transactions:    {} of {}", rows.len(), ledger.len())?;
    if ledger.rows_dropped > 0 {
        writeln!(
            out,
            "  Skipped:         {} unparseable row(s)",
            ledger.rows_dropped
        )?;
    }

    if !report.monthly.is_empty() {
        writeln!(out)?;
        writeln!(out, "Monthly:")?;
        for point in &report.monthly {
            writeln!(
                out,
                "  {}  {:<8} {:>14}",
                point.month,
                point.category_type.as_str(),
                format_amount(point.total)
            )?;
        }
    }

    for (title, groups) in [
        ("Net Profit by Property:", &report.by_property),
        ("Expenses by Category:", &report.by_category),
    ] {
        if groups.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{title}")?;
        for g in groups {
            writeln!(
                out,
                "  {:<24} {:>14}",
                g.display_label(),
                format_amount(g.total)
            )?;
        }
    }

    if !report.vendors.is_empty() {
        writeln!(out)?;
        writeln!(out, "Top Vendors:")?;
        for v in &report.vendors {
            writeln!(out, "  {:<24} {:>5}", v.vendor, v.count)?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
