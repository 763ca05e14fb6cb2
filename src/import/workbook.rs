use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::models::Ledger;

use super::normalize;

#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadError {
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("workbook {0} has no rows")]
    Empty(PathBuf),

    #[error("header row is missing the '{0}' column")]
    MissingColumn(&'static str),
}

/// A spreadsheet cell reduced to the shapes the normalizer cares about.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl Cell {
    pub(crate) fn text(s: &str) -> Self {
        if s.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::String(v) => Cell::text(v),
            Data::Float(v) => Cell::Number(*v),
            Data::Int(v) => Cell::Number(*v as f64),
            Data::Bool(v) => Cell::Text(v.to_string()),
            Data::DateTime(v) => excel_serial_to_datetime(v.as_f64())
                .map(Cell::Date)
                .unwrap_or(Cell::Empty),
            Data::DateTimeIso(v) | Data::DurationIso(v) => Cell::text(v),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Sheet {
    pub(crate) name: String,
    pub(crate) rows: Vec<Vec<Cell>>,
}

/// Load every sheet of the workbook at `path` into a [`Ledger`].
pub(crate) fn load(path: &Path) -> Result<Ledger, LoadError> {
    let sheets = read_sheets(path)?;
    if sheets.iter().all(|s| s.rows.is_empty()) {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    log::info!("Read {} sheet(s) from {}", sheets.len(), path.display());
    normalize::normalize(&sheets)
}

pub(crate) fn read_sheets(path: &Path) -> Result<Vec<Sheet>, LoadError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_csv(path).map(|sheet| vec![sheet])
    } else {
        read_workbook(path)
    }
}

fn read_workbook(path: &Path) -> Result<Vec<Sheet>, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|source| LoadError::Sheet {
                sheet: name.clone(),
                source,
            })?;
        let rows: Vec<Vec<Cell>> = range
            .rows()
            .map(|r| r.iter().map(Cell::from).collect())
            .collect();
        log::debug!("Sheet '{name}': {} row(s)", rows.len());
        sheets.push(Sheet { name, rows });
    }
    Ok(sheets)
}

fn read_csv(path: &Path) -> Result<Sheet, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        rows.push(record.iter().map(Cell::text).collect());
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Sheet { name, rows })
}

/// Convert an Excel serial date (days since 1899-12-30) to a datetime.
pub(crate) fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

#[cfg(test)]
#[path = "workbook_tests.rs"]
mod tests;
