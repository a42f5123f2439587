use std::iter::FusedIterator;
use tracing::{debug, instrument, warn};

use crate::error::{CatalogError, Result};
use crate::pipeline::processing::normalize::normalize_plain;
use crate::types::{CellValue, Sheet};

/// One PN column and the values listed beneath it
#[derive(Debug, Clone, PartialEq)]
pub struct PnField {
    pub name: String,
    pub values: Vec<CellValue>,
}

/// The ordered PN columns; column order fixes the order of values in every
/// combination and therefore the composition of the PN string.
#[derive(Debug, Clone, PartialEq)]
pub struct PnFieldSet {
    fields: Vec<PnField>,
}

impl PnFieldSet {
    pub fn new(fields: Vec<PnField>) -> Self {
        Self { fields }
    }

    /// Read the PN sheet: the header gives the column names, every later row
    /// contributes its non-blank cells to the matching column.
    #[instrument(skip(sheet), fields(sheet_name = %sheet.name))]
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let header = sheet
            .header()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| CatalogError::malformed(&sheet.name, "missing header row"))?;

        let mut fields: Vec<PnField> = header
            .iter()
            .map(|cell| PnField {
                name: cell.to_key(),
                values: Vec::new(),
            })
            .collect();

        for (row_idx, row) in sheet.data_rows().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                if cell.is_blank() {
                    continue;
                }
                match fields.get_mut(col) {
                    Some(field) => field.values.push(normalize_plain(cell.clone())),
                    None => warn!(
                        "Ignoring value in row {} column {} beyond the PN header",
                        row_idx + 1,
                        col
                    ),
                }
            }
        }

        for field in &fields {
            debug!("PN field '{}' has {} values", field.name, field.values.len());
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[PnField] {
        &self.fields
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Product of the value counts, `None` when it overflows `usize`
    pub fn combination_count(&self) -> Option<usize> {
        self.fields
            .iter()
            .try_fold(1usize, |acc, f| acc.checked_mul(f.values.len()))
    }

    /// A fresh iterator over every combination, last column varying fastest
    pub fn combinations(&self) -> Combinations<'_> {
        Combinations::new(&self.fields)
    }
}

/// One element of the product, aligned positionally with the PN columns
#[derive(Debug, Clone, PartialEq)]
pub struct PnCombination<'a> {
    values: Vec<&'a CellValue>,
}

impl<'a> PnCombination<'a> {
    pub fn values(&self) -> &[&'a CellValue] {
        &self.values
    }

    /// Concatenation of every value, no separator
    pub fn pn(&self) -> String {
        self.values.iter().map(|v| v.to_key()).collect()
    }
}

/// Odometer over the PN value lists
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    fields: &'a [PnField],
    indices: Vec<usize>,
    remaining: Option<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    fn new(fields: &'a [PnField]) -> Self {
        let remaining = fields
            .iter()
            .try_fold(1usize, |acc, f| acc.checked_mul(f.values.len()));
        Self {
            fields,
            indices: vec![0; fields.len()],
            remaining,
            done: fields.iter().any(|f| f.values.is_empty()),
        }
    }

    fn advance(&mut self) {
        for pos in (0..self.fields.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.fields[pos].values.len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.done = true;
    }
}

impl<'a> Iterator for Combinations<'a> {
    type Item = PnCombination<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let values = self
            .indices
            .iter()
            .zip(self.fields)
            .map(|(&i, field)| &field.values[i])
            .collect();
        self.advance();
        self.remaining = self.remaining.map(|r| r.saturating_sub(1));
        Some(PnCombination { values })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        match self.remaining {
            Some(r) => (r, Some(r)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Combinations<'_> {}
