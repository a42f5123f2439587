use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{CatalogError, Result};
use crate::pipeline::processing::normalize::normalize_plain;
use crate::types::{CellValue, Sheet};

/// Constants from the GENERAL sheet, applied to every catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeneralAttributes(IndexMap<String, CellValue>);

impl GeneralAttributes {
    /// Pair the header names with the single data row
    #[instrument(skip(sheet), fields(sheet_name = %sheet.name))]
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let header = sheet
            .header()
            .ok_or_else(|| CatalogError::malformed(&sheet.name, "missing header row"))?;
        let values = sheet
            .data_rows()
            .next()
            .ok_or_else(|| CatalogError::malformed(&sheet.name, "missing data row"))?;

        let attributes: IndexMap<String, CellValue> = header
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_key(), normalize_plain(value.clone())))
            .collect();

        debug!("Read {} general attributes", attributes.len());
        Ok(Self(attributes))
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for GeneralAttributes {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
