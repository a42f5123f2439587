use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, instrument};

use crate::constants::{PN_KEY, PREALLOC_LIMIT};
use crate::error::{CatalogError, Result};
use crate::pipeline::processing::attributes::AttributeIndex;
use crate::pipeline::processing::expand::{PnCombination, PnFieldSet};
use crate::pipeline::processing::general::GeneralAttributes;
use crate::types::CellValue;

/// One flattened output record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CatalogEntry(IndexMap<String, CellValue>);

impl CatalogEntry {
    fn with_pn(pn: String) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(PN_KEY.to_string(), CellValue::Text(pn));
        Self(fields)
    }

    /// Insert every pair, overriding existing keys in place
    fn merge<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a String, &'a CellValue)>,
    {
        for (key, value) in pairs {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn pn(&self) -> Option<&str> {
        match self.0.get(PN_KEY) {
            Some(CellValue::Text(pn)) => Some(pn),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the catalog entry of a single combination.
///
/// The first PN column is the family selector and has no attribute sheet;
/// every later column pulls the record of its chosen value.
pub fn assemble_entry(
    columns: &[&str],
    combination: &PnCombination<'_>,
    general: &GeneralAttributes,
    index: &AttributeIndex,
) -> Result<CatalogEntry> {
    let mut entry = CatalogEntry::with_pn(combination.pn());
    entry.merge(general.iter());

    for (column, value) in columns.iter().zip(combination.values()).skip(1) {
        let record = index.lookup(column, value)?;
        entry.merge(record.iter());
    }

    Ok(entry)
}

/// Expand every combination into its catalog entry, in product order.
/// The first failed lookup aborts the whole assembly.
#[instrument(skip_all, fields(fields = fields.len()))]
pub fn assemble(
    fields: &PnFieldSet,
    general: &GeneralAttributes,
    index: &AttributeIndex,
) -> Result<Vec<CatalogEntry>> {
    let total = fields
        .combination_count()
        .ok_or(CatalogError::CombinationOverflow {
            fields: fields.len(),
        })?;
    info!("Assembling {} catalog entries", total);

    let columns: Vec<&str> = fields.columns().collect();
    let mut entries = Vec::with_capacity(total.min(PREALLOC_LIMIT));
    for combination in fields.combinations() {
        entries.push(assemble_entry(&columns, &combination, general, index)?);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sheet;

    fn t(s: &str) -> CellValue {
        CellValue::from(s)
    }

    fn pn_sheet() -> Sheet {
        Sheet::new(
            "PN",
            vec![
                vec![t("Family"), t("Size")],
                vec![t("A"), t("S")],
                vec![CellValue::Empty, t("M")],
            ],
        )
    }

    fn size_sheet() -> Sheet {
        Sheet::new(
            "Size",
            vec![
                vec![t("Size"), t("Weight")],
                vec![t("S"), CellValue::Real(1.0)],
                vec![t("M"), CellValue::Real(2.0)],
            ],
        )
    }

    fn general() -> GeneralAttributes {
        [("Vendor".to_string(), t("X"))].into_iter().collect()
    }

    #[test]
    fn test_two_entry_scenario() {
        let fields = PnFieldSet::from_sheet(&pn_sheet()).unwrap();
        let index = AttributeIndex::build([&size_sheet()]).unwrap();
        let entries = assemble(&fields, &general(), &index).unwrap();

        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(
            json,
            r#"[{"PN":"AS","Vendor":"X","Weight":1},{"PN":"AM","Vendor":"X","Weight":2}]"#
        );
    }

    #[test]
    fn test_attribute_sheet_shadows_general() {
        let fields = PnFieldSet::from_sheet(&pn_sheet()).unwrap();
        let index = AttributeIndex::build([&size_sheet()]).unwrap();
        let general: GeneralAttributes = [
            ("Weight".to_string(), CellValue::Integer(99)),
            ("Vendor".to_string(), t("X")),
        ]
        .into_iter()
        .collect();

        let entries = assemble(&fields, &general, &index).unwrap();
        assert_eq!(entries[0].get("Weight"), Some(&CellValue::Integer(1)));
        assert_eq!(entries[1].get("Weight"), Some(&CellValue::Integer(2)));
        // Shadowed keys keep the position GENERAL gave them
        assert_eq!(entries[0].keys().collect::<Vec<_>>(), vec!["PN", "Weight", "Vendor"]);
    }

    #[test]
    fn test_family_column_has_no_lookup() {
        // No sheet serves "Family"; assembly still succeeds
        let fields = PnFieldSet::from_sheet(&pn_sheet()).unwrap();
        let index = AttributeIndex::build([&size_sheet()]).unwrap();
        assert!(index.sheet("Family").is_none());
        assert_eq!(assemble(&fields, &general(), &index).unwrap().len(), 2);
    }

    #[test]
    fn test_lookup_miss_aborts() {
        let pn = Sheet::new(
            "PN",
            vec![vec![t("Family"), t("Size")], vec![t("A"), t("S")], vec![CellValue::Empty, t("XL")]],
        );
        let fields = PnFieldSet::from_sheet(&pn).unwrap();
        let index = AttributeIndex::build([&size_sheet()]).unwrap();
        let err = assemble(&fields, &general(), &index).unwrap_err();
        assert!(matches!(err, CatalogError::LookupMiss { ref value, .. } if value == "XL"));
    }

    #[test]
    fn test_empty_field_gives_empty_catalog() {
        let pn = Sheet::new("PN", vec![vec![t("Family"), t("Size")], vec![t("A"), CellValue::Empty]]);
        let fields = PnFieldSet::from_sheet(&pn).unwrap();
        let entries = assemble(&fields, &general(), &AttributeIndex::default()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_pn_splits_back_into_combination() {
        let pn = Sheet::new(
            "PN",
            vec![
                vec![t("Family"), t("Size"), t("Length")],
                vec![t("AB"), t("S"), CellValue::Real(10.0)],
                vec![t("CD"), t("M"), CellValue::Real(25.0)],
            ],
        );
        let length = Sheet::new(
            "Length",
            vec![
                vec![t("Length"), t("Unit")],
                vec![CellValue::Real(10.0), t("mm")],
                vec![CellValue::Real(25.0), t("mm")],
            ],
        );
        let fields = PnFieldSet::from_sheet(&pn).unwrap();
        let index = AttributeIndex::build([&size_sheet(), &length]).unwrap();
        let entries = assemble(&fields, &general(), &index).unwrap();
        assert_eq!(entries.len(), 8);

        let widths = [2, 1, 2];
        for (entry, combination) in entries.iter().zip(fields.combinations()) {
            let pn = entry.pn().unwrap();
            let mut offset = 0;
            for (width, value) in widths.iter().zip(combination.values()) {
                assert_eq!(&pn[offset..offset + width], value.to_key());
                offset += width;
            }
            assert_eq!(offset, pn.len());
        }
    }

    #[test]
    fn test_duplicate_pns_are_not_deduplicated() {
        let pn = Sheet::new(
            "PN",
            vec![vec![t("Family"), t("Size")], vec![t("A"), t("S")], vec![t("A"), CellValue::Empty]],
        );
        let fields = PnFieldSet::from_sheet(&pn).unwrap();
        let index = AttributeIndex::build([&size_sheet()]).unwrap();
        let entries = assemble(&fields, &general(), &index).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], entries[1]);
    }
}
