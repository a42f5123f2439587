//! Cell normalization rules
//!
//! Spreadsheets store every number as a float. Two rules turn those floats
//! back into what the author meant:
//!
//! - [`normalize_plain`] for PN values and GENERAL constants: whole-number
//!   reals become integers.
//! - [`normalize_attribute`] for attribute-sheet values: whole-number reals
//!   `>= 1` become integers, reals `< 1` become percentage strings.

use crate::types::CellValue;

/// Integer value of a whole-number float that fits in `i64`
pub fn whole_number(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
    {
        Some(value as i64)
    } else {
        None
    }
}

pub fn normalize_plain(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Real(r) => match whole_number(r) {
            Some(i) => CellValue::Integer(i),
            None => CellValue::Real(r),
        },
        other => other,
    }
}

pub fn normalize_attribute(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Real(r) if r < 1.0 => CellValue::Text(format_percentage(r)),
        other => normalize_plain(other),
    }
}

/// Render a fraction as a percentage string: `0.15` -> `"15.0%"`.
///
/// The scaled value is rounded to ten decimal places so that binary noise
/// from the multiplication (`0.15 * 100 = 15.000000000000002`) does not
/// leak into the output.
pub fn format_percentage(value: f64) -> String {
    let scaled = value * 100.0;
    let rounded = (scaled * 1e10).round() / 1e10;
    let pct = if rounded.is_finite() { rounded } else { scaled };
    // -0.0 would render as "-0.0%"
    let pct = if pct == 0.0 { 0.0 } else { pct };
    format!("{pct:?}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_number() {
        assert_eq!(whole_number(5.0), Some(5));
        assert_eq!(whole_number(-3.0), Some(-3));
        assert_eq!(whole_number(2.5), None);
        assert_eq!(whole_number(f64::NAN), None);
        assert_eq!(whole_number(1e300), None);
    }

    #[test]
    fn test_plain_normalization() {
        assert_eq!(normalize_plain(CellValue::Real(5.0)), CellValue::Integer(5));
        assert_eq!(normalize_plain(CellValue::Real(0.0)), CellValue::Integer(0));
        assert_eq!(normalize_plain(CellValue::Real(1.25)), CellValue::Real(1.25));
        assert_eq!(normalize_plain(CellValue::from("12")), CellValue::from("12"));
    }

    #[test]
    fn test_attribute_normalization() {
        assert_eq!(normalize_attribute(CellValue::Real(5.0)), CellValue::Integer(5));
        assert_eq!(normalize_attribute(CellValue::Real(0.15)), CellValue::from("15.0%"));
        assert_eq!(normalize_attribute(CellValue::Real(0.5)), CellValue::from("50.0%"));
        assert_eq!(normalize_attribute(CellValue::Real(0.0)), CellValue::from("0.0%"));
        assert_eq!(normalize_attribute(CellValue::Real(2.75)), CellValue::Real(2.75));
    }

    #[test]
    fn test_attribute_normalization_passes_other_types() {
        assert_eq!(normalize_attribute(CellValue::Integer(0)), CellValue::Integer(0));
        assert_eq!(normalize_attribute(CellValue::from("red")), CellValue::from("red"));
        assert_eq!(normalize_attribute(CellValue::Boolean(true)), CellValue::Boolean(true));
        assert_eq!(normalize_attribute(CellValue::Empty), CellValue::Empty);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.15), "15.0%");
        assert_eq!(format_percentage(0.125), "12.5%");
        assert_eq!(format_percentage(0.123456), "12.3456%");
        assert_eq!(format_percentage(-0.2), "-20.0%");
    }
}
