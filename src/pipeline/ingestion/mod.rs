// Pipeline ingestion: opening spreadsheets and reading their sheets

pub mod workbook;

pub use workbook::{load_workbook, open_workbook, require_sheets, CalamineSource, SheetSource};
