#![allow(dead_code)]

use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;

/// A fixture cell
#[derive(Debug, Clone, Copy)]
pub enum Cell {
    S(&'static str),
    N(f64),
    Blank,
}

pub use Cell::{Blank, N, S};

pub type SheetSpec = (&'static str, Vec<Vec<Cell>>);

/// Write the given sheets, in order, to an xlsx file
pub fn write_workbook(path: &Path, sheets: &[SheetSpec]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Cell::S(text) => {
                        worksheet.write_string(r as u32, c as u16, *text)?;
                    }
                    Cell::N(number) => {
                        worksheet.write_number(r as u32, c as u16, *number)?;
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save(path)
}

/// PN [Family, Size] with Family = A and Size = S, M
pub fn pn_sheet() -> SheetSpec {
    ("PN", vec![vec![S("Family"), S("Size")], vec![S("A"), S("S")], vec![Blank, S("M")]])
}

pub fn general_sheet() -> SheetSpec {
    ("GENERAL", vec![vec![S("Vendor")], vec![S("X")]])
}

pub fn size_sheet() -> SheetSpec {
    (
        "Size",
        vec![vec![S("Size"), S("Weight")], vec![S("S"), N(1.0)], vec![S("M"), N(2.0)]],
    )
}
