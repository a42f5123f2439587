use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::config::SheetNames;
use crate::error::{CatalogError, Result};
use crate::metrics::WorkbookMetrics;
use crate::types::{CellValue, Sheet, Workbook};

/// Anything that can list and read sheets
pub trait SheetSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    fn read_sheet(&mut self, name: &str) -> Result<Sheet>;
}

/// Spreadsheet file opened through calamine (xlsx, xlsm, xlsb, xls, ods)
pub struct CalamineSource {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl CalamineSource {
    pub fn open(path: &Path) -> Result<Self> {
        let sheets = open_workbook_auto(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    range
        .rows()
        .map(|row| row.iter().map(CellValue::from).collect())
        .collect()
}

impl SheetSource for CalamineSource {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet> {
        let range = self.sheets.worksheet_range(name)?;
        Ok(Sheet::new(name, range_to_rows(&range)))
    }
}

/// An already-loaded workbook is its own source
impl SheetSource for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        Workbook::sheet_names(self)
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet> {
        self.sheet(name)
            .cloned()
            .ok_or_else(|| CatalogError::malformed(name, "sheet not found in workbook"))
    }
}

/// Fail with `MissingRequiredSheet` unless both the PN and GENERAL sheets exist
pub fn require_sheets(available: &[String], required: &SheetNames, path: &str) -> Result<()> {
    for name in [&required.pn, &required.general] {
        if !available.iter().any(|s| s == name) {
            WorkbookMetrics::record_missing_sheet();
            return Err(CatalogError::MissingRequiredSheet {
                sheet: name.clone(),
                path: path.to_string(),
            });
        }
    }
    Ok(())
}

/// Check the required sheets, then read every sheet of the source.
#[instrument(skip(source, required))]
pub fn load_workbook<S: SheetSource>(
    source: &mut S,
    required: &SheetNames,
    path: &str,
) -> Result<Workbook> {
    let started = Instant::now();
    let names = source.sheet_names();
    require_sheets(&names, required, path)?;

    let mut sheets = Vec::with_capacity(names.len());
    let mut rows = 0;
    for name in &names {
        let sheet = source.read_sheet(name)?;
        if sheet.rows.is_empty() {
            warn!("Sheet '{}' is empty", name);
        }
        debug!("Read sheet '{}' with {} rows", name, sheet.rows.len());
        rows += sheet.rows.len();
        sheets.push(sheet);
    }

    WorkbookMetrics::record_loaded(sheets.len(), rows, started.elapsed().as_secs_f64());
    info!("Loaded {} sheets ({} rows) from {}", sheets.len(), rows, path);
    Ok(Workbook::new(sheets))
}

/// Open a spreadsheet file and load it
pub fn open_workbook(path: &Path, required: &SheetNames) -> Result<Workbook> {
    let mut source = CalamineSource::open(path)?;
    let label = source.path().display().to_string();
    load_workbook(&mut source, required, &label)
}
