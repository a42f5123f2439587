use chrono::NaiveTime;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single spreadsheet cell after it has been read from the workbook
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    /// Empty cells and empty strings never contribute a value
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render the value as a map key or PN fragment
    pub fn to_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the trailing ".0" on whole reals, matching how the
            // value reads in the sheet.
            CellValue::Real(r) => write!(f, "{r:?}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Real(r) => serializer.serialize_f64(*r),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Real(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&calamine::Data> for CellValue {
    fn from(data: &calamine::Data) -> Self {
        use calamine::Data;
        match data {
            Data::Empty => CellValue::Empty,
            Data::Int(i) => CellValue::Integer(*i),
            Data::Float(f) => CellValue::Real(*f),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::DateTime(dt) => from_excel_datetime(dt),
            Data::DateTimeIso(dt) => CellValue::Text(dt.clone()),
            Data::DurationIso(d) => CellValue::Text(d.clone()),
            Data::Error(e) => CellValue::Text(format!("{e:?}")),
        }
    }
}

/// ISO-8601 text for a serial date cell: `2024-03-15` at midnight,
/// `2024-03-15T12:30:00` otherwise, `PT5400S` for durations. Serials that
/// chrono cannot represent stay numeric.
fn from_excel_datetime(dt: &calamine::ExcelDateTime) -> CellValue {
    if dt.is_duration() {
        return match dt.as_duration() {
            Some(d) => CellValue::Text(d.to_string()),
            None => CellValue::Real(dt.as_f64()),
        };
    }
    match dt.as_datetime() {
        Some(ts) if ts.time() == NaiveTime::MIN => {
            CellValue::Text(ts.format("%Y-%m-%d").to_string())
        }
        Some(ts) => CellValue::Text(ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => CellValue::Real(dt.as_f64()),
    }
}

/// One worksheet as an ordered grid of rows; row 0 is the header
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header
    pub fn data_rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }
}

/// All sheets of a workbook, in workbook order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_keys() {
        assert_eq!(CellValue::Integer(12).to_key(), "12");
        assert_eq!(CellValue::Real(1.5).to_key(), "1.5");
        assert_eq!(CellValue::Real(3.0).to_key(), "3.0");
        assert_eq!(CellValue::from("S").to_key(), "S");
        assert_eq!(CellValue::Empty.to_key(), "");
    }

    #[test]
    fn test_blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(!CellValue::Integer(0).is_blank());
        assert!(!CellValue::from(" ").is_blank());
    }

    #[test]
    fn test_serialize_cells() {
        let cells = vec![
            CellValue::Empty,
            CellValue::Integer(5),
            CellValue::Real(2.5),
            CellValue::from("x"),
            CellValue::Boolean(true),
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"["",5,2.5,"x",true]"#);
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(CellValue::from(&calamine::Data::Float(5.0)), CellValue::Real(5.0));
        assert_eq!(CellValue::from(&calamine::Data::Int(7)), CellValue::Integer(7));
        assert_eq!(CellValue::from(&calamine::Data::Empty), CellValue::Empty);
        assert_eq!(
            CellValue::from(&calamine::Data::String("M".to_string())),
            CellValue::from("M")
        );
    }

    #[test]
    fn test_date_cells_render_as_iso_8601() {
        use calamine::{Data, ExcelDateTime, ExcelDateTimeType};

        let date = Data::DateTime(ExcelDateTime::new(45366.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(CellValue::from(&date), CellValue::from("2024-03-15"));

        let noon = Data::DateTime(ExcelDateTime::new(45366.5, ExcelDateTimeType::DateTime, false));
        assert_eq!(CellValue::from(&noon), CellValue::from("2024-03-15T12:00:00"));

        let duration = Data::DateTime(ExcelDateTime::new(0.0625, ExcelDateTimeType::TimeDelta, false));
        assert_eq!(CellValue::from(&duration), CellValue::from("PT5400S"));

        let json = serde_json::to_string(&CellValue::from(&date)).unwrap();
        assert_eq!(json, r#""2024-03-15""#);
    }

    #[test]
    fn test_unrepresentable_date_stays_numeric() {
        use calamine::{Data, ExcelDateTime, ExcelDateTimeType};

        let far = Data::DateTime(ExcelDateTime::new(1e9, ExcelDateTimeType::DateTime, false));
        assert_eq!(CellValue::from(&far), CellValue::Real(1e9));
    }

    #[test]
    fn test_workbook_lookup_is_case_sensitive() {
        let workbook = Workbook::new(vec![Sheet::new("PN", vec![])]);
        assert!(workbook.sheet("PN").is_some());
        assert!(workbook.sheet("pn").is_none());
        assert_eq!(workbook.sheet_names(), vec!["PN".to_string()]);
    }
}
