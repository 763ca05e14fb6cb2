use anyhow::{Context, Result};
use std::path::Path;

use crate::import::COLUMNS;
use crate::models::Transaction;

/// Write rows to a CSV file with the workbook columns plus the derived
/// `Month` and `Category Type`. Returns the number of rows written.
pub(crate) fn write_csv(path: &Path, rows: &[&Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;

    let mut header: Vec<&str> = COLUMNS.to_vec();
    header.extend(["Month", "Category Type"]);
    wtr.write_record(&header)
        .context("Failed to write CSV header")?;

    for t in rows {
        let date = t.date.format("%Y-%m-%d").to_string();
        let amount = t.amount.to_string();
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        wtr.write_record([
            date,
            text(&t.bank),
            text(&t.account),
            text(&t.description),
            amount,
            text(&t.kind),
            text(&t.category),
            text(&t.entity),
            text(&t.notes),
            t.month.clone(),
            t.category_type.to_string(),
        ])
        .context("Failed to write CSV record")?;
    }

    wtr.flush().context("Failed to flush export file")?;
    log::info!("Exported {} row(s) to {}", rows.len(), path.display());
    Ok(rows.len())
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
