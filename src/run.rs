mod cli;
mod tui;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) use cli::{as_cli, print_usage, print_version, Invocation};
pub(crate) use tui::as_tui;

use crate::import::{LoadError, COLUMNS};
use crate::models::Ledger;

/// Workbook looked up when none is given on the command line.
pub(crate) const DEFAULT_WORKBOOK: &str = "Arcos Rentals 2024.xlsx";

/// Places searched for [`DEFAULT_WORKBOOK`]: the current directory, then
/// the per-user data directory.
pub(crate) fn workbook_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(DEFAULT_WORKBOOK)];
    if let Some(dirs) = directories::ProjectDirs::from("com", "rentdash", "RentDash") {
        candidates.push(dirs.data_dir().join(DEFAULT_WORKBOOK));
    }
    candidates
}

/// An explicit path wins; otherwise the first existing candidate.
pub(crate) fn resolve_workbook(explicit: Option<&str>, candidates: &[PathBuf]) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(PathBuf::from(shellexpand(path)));
    }
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    let searched: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
    anyhow::bail!(
        "No workbook given and none found (looked for {})",
        searched.join(", ")
    )
}

/// Resolve and load the workbook once. Returns the ledger and a short
/// source label for headers and the status bar.
pub(crate) fn open_ledger(explicit: Option<&str>) -> Result<(Ledger, String)> {
    let path = resolve_workbook(explicit, &workbook_candidates())?;
    let ledger = match crate::import::load(&path) {
        Ok(ledger) => ledger,
        Err(e @ LoadError::MissingColumn(_)) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to load workbook: {} (expected columns: {})",
                    path.display(),
                    COLUMNS.join(", ")
                )
            });
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to load workbook: {}", path.display()));
        }
    };
    log::info!(
        "Loaded {} of {} row(s) across {} sheet(s) from {}",
        ledger.len(),
        ledger.rows_read,
        ledger.sheets,
        path.display()
    );
    Ok((ledger, source_label(&path)))
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
