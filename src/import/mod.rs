mod normalize;
mod workbook;

pub(crate) use normalize::{parse_date_text, COLUMNS};
pub(crate) use workbook::{load, LoadError};
