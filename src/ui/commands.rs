use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::NaiveDate;

use super::app::{App, Screen};
use crate::filter::Selection;
use crate::import::parse_date_text;
use crate::report::{SortColumn, SortKey, MISSING_LABEL};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App<'_>) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit RentDash", cmd_quit, r);
    register_command!("quit", "Quit RentDash", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("f", "Go to Filters", cmd_filters, r);
    register_command!("filters", "Go to Filters", cmd_filters, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "from",
        "Set start date (e.g. :from 2024-01-01, :from start)",
        cmd_from,
        r
    );
    register_command!(
        "to",
        "Set end date (e.g. :to 2024-06-30, :to end)",
        cmd_to,
        r
    );
    register_command!(
        "property",
        "Toggle a property, or all/none (e.g. :property Unit A)",
        cmd_property,
        r
    );
    register_command!("p", "Toggle a property, or all/none", cmd_property, r);
    register_command!(
        "category",
        "Toggle a category, or all/none (e.g. :category Repairs)",
        cmd_category,
        r
    );
    register_command!("c", "Toggle a category, or all/none", cmd_category, r);
    register_command!("income", "Show/hide income rows", cmd_income, r);
    register_command!("expense", "Show/hide expense rows", cmd_expense, r);
    register_command!("reset", "Restore default filters", cmd_reset, r);
    register_command!(
        "sort",
        "Sort transactions (e.g. :sort amount desc, :sort to reset)",
        cmd_sort,
        r
    );
    register_command!(
        "export",
        "Export filtered rows to CSV (e.g. :export ~/rentals.csv)",
        cmd_export,
        r
    );

    r
});

/// Run one `:` command line. Failures are reported on the status bar.
pub(crate) fn handle_command(input: &str, app: &mut App<'_>) {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app) {
            log::warn!(":{trimmed} failed: {e:#}");
            app.set_status(format!("Error: {e:#}"));
        }
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_filters(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Filters;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_from(args: &str, app: &mut App) -> anyhow::Result<()> {
    let date = match args {
        "start" | "" => app.ledger.date_span().map_or(NaiveDate::MIN, |(min, _)| min),
        _ => parse_bound(args)?,
    };
    app.filter.date_from = date;
    app.refresh();
    app.set_status(format!("From {date}"));
    Ok(())
}

fn cmd_to(args: &str, app: &mut App) -> anyhow::Result<()> {
    let date = match args {
        "end" | "" => app.ledger.date_span().map_or(NaiveDate::MAX, |(_, max)| max),
        _ => parse_bound(args)?,
    };
    app.filter.date_to = date;
    app.refresh();
    app.set_status(format!("To {date}"));
    Ok(())
}

fn parse_bound(args: &str) -> anyhow::Result<NaiveDate> {
    parse_date_text(args).with_context(|| format!("Invalid date '{args}' (expected YYYY-MM-DD)"))
}

fn cmd_property(args: &str, app: &mut App) -> anyhow::Result<()> {
    let observed = app.ledger.properties();
    let has_missing = app.ledger.has_missing_property();
    let msg = update_selection(&mut app.filter.properties, args, &observed, has_missing, "property")?;
    app.refresh();
    app.set_status(msg);
    Ok(())
}

fn cmd_category(args: &str, app: &mut App) -> anyhow::Result<()> {
    let observed = app.ledger.categories();
    let has_missing = app.ledger.has_missing_category();
    let msg = update_selection(&mut app.filter.categories, args, &observed, has_missing, "category")?;
    app.refresh();
    app.set_status(msg);
    Ok(())
}

/// Apply `all`, `none` or a single-value toggle to a selection. Values are
/// matched case-insensitively against the ones present in the ledger.
fn update_selection(
    selection: &mut Selection,
    args: &str,
    observed: &[String],
    has_missing: bool,
    noun: &str,
) -> anyhow::Result<String> {
    match args {
        "" => anyhow::bail!("Usage: :{noun} <name|all|none>"),
        "all" => {
            let mut all = Selection::of(observed);
            all.include_missing = has_missing;
            *selection = all;
            Ok(format!("Every {noun} selected"))
        }
        "none" => {
            selection.clear();
            Ok(format!("No {noun} selected"))
        }
        MISSING_LABEL if has_missing => {
            selection.toggle(None);
            Ok(toggled(noun, MISSING_LABEL, selection.allows(None)))
        }
        name => {
            let value = observed
                .iter()
                .find(|v| v.eq_ignore_ascii_case(name))
                .with_context(|| format!("No {noun} named '{name}'"))?;
            selection.toggle(Some(value.as_str()));
            Ok(toggled(noun, value, selection.allows(Some(value.as_str()))))
        }
    }
}

fn toggled(noun: &str, value: &str, on: bool) -> String {
    let state = if on { "shown" } else { "hidden" };
    format!("{noun} {value}: {state}")
}

fn cmd_income(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.filter.show_income = !app.filter.show_income;
    app.refresh();
    let state = if app.filter.show_income { "shown" } else { "hidden" };
    app.set_status(format!("Income {state}"));
    Ok(())
}

fn cmd_expense(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.filter.show_expense = !app.filter.show_expense;
    app.refresh();
    let state = if app.filter.show_expense { "shown" } else { "hidden" };
    app.set_status(format!("Expenses {state}"));
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.reset_filter();
    app.set_status("Default filters restored");
    Ok(())
}

fn cmd_sort(args: &str, app: &mut App) -> anyhow::Result<()> {
    let mut words = args.split_whitespace();
    let key = match words.next() {
        None => SortKey::default(),
        Some(column) => {
            let column = SortColumn::parse(column).with_context(|| {
                let names: Vec<&str> = SortColumn::all().iter().map(|c| c.as_str()).collect();
                format!("Unknown sort column '{column}' (have: {})", names.join(", "))
            })?;
            let key = column.natural_key();
            match words.next() {
                None => key,
                Some("asc") => SortKey {
                    descending: false,
                    ..key
                },
                Some("desc") => SortKey {
                    descending: true,
                    ..key
                },
                Some(other) => anyhow::bail!("Sort direction must be asc or desc, not '{other}'"),
            }
        }
    };
    app.set_sort(key);
    app.screen = Screen::Transactions;
    app.set_status(format!("Sorted by {key}"));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        default_export_path()
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };

    let count = crate::export::write_csv(&path, app.table())?;
    if count == 0 {
        app.set_status(format!("No rows match; wrote header only to {}", path.display()));
    } else {
        app.set_status(format!("Exported {count} rows to {}", path.display()));
    }
    Ok(())
}

pub(crate) fn default_export_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join("rentdash-export.csv")
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
