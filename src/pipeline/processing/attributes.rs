use indexmap::IndexMap;
use tracing::{debug, instrument, warn};

use crate::error::{CatalogError, Result};
use crate::pipeline::processing::normalize::{normalize_attribute, normalize_plain};
use crate::types::{CellValue, Sheet};

/// Attribute name -> normalized value for one lookup key
pub type AttributeRecord = IndexMap<String, CellValue>;

/// Typed lookup key. Text `"10"` and the number `10` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    Empty,
    Integer(i64),
    /// Bit pattern of a non-whole real
    Real(u64),
    Text(String),
    Boolean(bool),
}

impl From<&CellValue> for LookupKey {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Empty => LookupKey::Empty,
            CellValue::Integer(i) => LookupKey::Integer(*i),
            CellValue::Real(r) => LookupKey::Real(r.to_bits()),
            CellValue::Text(s) => LookupKey::Text(s.clone()),
            CellValue::Boolean(b) => LookupKey::Boolean(*b),
        }
    }
}

/// Lookup table of one attribute sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSheet {
    /// Header row first cell; matches the PN column this sheet serves
    pub identity: String,
    pub records: IndexMap<LookupKey, AttributeRecord>,
}

impl AttributeSheet {
    #[instrument(skip(sheet), fields(sheet_name = %sheet.name))]
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let header = sheet
            .header()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| CatalogError::malformed(&sheet.name, "missing header row"))?;
        let identity = header[0].to_key();
        let names: Vec<String> = header[1..].iter().map(CellValue::to_key).collect();

        let mut records = IndexMap::new();
        for (row_idx, row) in sheet.data_rows().enumerate() {
            let Some(key_cell) = row.first().filter(|c| !c.is_blank()) else {
                debug!("Skipping row {} without a lookup key", row_idx + 1);
                continue;
            };
            // Keys go through the same rule as PN values so that a numeric
            // key written as 10.0 matches the PN value 10.
            let key_value = normalize_plain(key_cell.clone());

            let record: AttributeRecord = names
                .iter()
                .cloned()
                .zip(row[1..].iter().cloned().map(normalize_attribute))
                .collect();

            if records.insert(LookupKey::from(&key_value), record).is_some() {
                warn!(
                    "Duplicate key '{}' in sheet '{}'; later row wins",
                    key_value, sheet.name
                );
            }
        }

        debug!("Indexed {} records under '{}'", records.len(), identity);
        Ok(Self { identity, records })
    }

    pub fn get(&self, key: &CellValue) -> Option<&AttributeRecord> {
        self.records.get(&LookupKey::from(key))
    }
}

/// Every attribute sheet, keyed by sheet identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeIndex {
    sheets: IndexMap<String, AttributeSheet>,
}

impl AttributeIndex {
    /// Index the given sheets. Callers pass every sheet except PN and GENERAL.
    pub fn build<'a, I>(sheets: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Sheet>,
    {
        let mut index = IndexMap::new();
        for sheet in sheets {
            let attribute_sheet = AttributeSheet::from_sheet(sheet)?;
            let identity = attribute_sheet.identity.clone();
            if index.insert(identity.clone(), attribute_sheet).is_some() {
                warn!(
                    "Sheet '{}' reuses identity '{}'; it replaces the earlier sheet",
                    sheet.name, identity
                );
            }
        }
        Ok(Self { sheets: index })
    }

    pub fn sheet(&self, identity: &str) -> Option<&AttributeSheet> {
        self.sheets.get(identity)
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Record for `value` in the sheet serving PN column `field`
    pub fn lookup(&self, field: &str, value: &CellValue) -> Result<&AttributeRecord> {
        let sheet = self
            .sheet(field)
            .ok_or_else(|| CatalogError::MissingAttributeSheet {
                field: field.to_string(),
            })?;
        sheet.get(value).ok_or_else(|| CatalogError::LookupMiss {
            field: field.to_string(),
            value: value.to_key(),
        })
    }
}
