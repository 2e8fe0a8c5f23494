//! Field normalizers shared by the schema mappers

use chrono::{Duration, NaiveDate};

/// Convert a spreadsheet serial day count to a calendar date.
///
/// Day 0 of the serial convention is 1899-12-30; using that anchor keeps
/// modern serials aligned with the format's 1900 leap-year quirk. Missing,
/// zero, and NaN inputs convert to `None`. Fractional serials carry a
/// time-of-day component, which is dropped.
pub fn excel_serial_date(serial: Option<f64>) -> Option<NaiveDate> {
    let serial = serial?;
    if serial == 0.0 || serial.is_nan() {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Vacant-area cells default to 0 rather than null: no recorded vacancy is
/// treated as fully utilized. Every other numeric field stays nullable.
pub fn available_square_feet(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::types::CellValue;

    #[test]
    fn test_serial_date_known_dates() {
        assert_eq!(
            excel_serial_date(Some(44927.0)),
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
        assert_eq!(
            excel_serial_date(Some(45292.0)),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        // ISO rendering used at the store boundary
        assert_eq!(
            excel_serial_date(Some(45292.0)).map(|d| d.to_string()),
            Some("2024-01-01".to_string())
        );
    }

    #[test]
    fn test_serial_date_time_component_dropped() {
        assert_eq!(
            excel_serial_date(Some(45292.75)),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_serial_date_rejects_missing_zero_nan() {
        assert_eq!(excel_serial_date(None), None);
        assert_eq!(excel_serial_date(Some(0.0)), None);
        assert_eq!(excel_serial_date(Some(f64::NAN)), None);
    }

    #[test]
    fn test_serial_date_from_text_cell() {
        // numeric text parses, garbage does not
        assert_eq!(
            excel_serial_date(CellValue::Text("44927".into()).as_number()),
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
        assert_eq!(
            excel_serial_date(CellValue::Text("not a date".into()).as_number()),
            None
        );
    }

    #[test]
    fn test_available_square_feet_defaults_to_zero() {
        assert_eq!(available_square_feet(None), 0.0);
        assert_eq!(
            available_square_feet(CellValue::Text("abc".into()).as_number()),
            0.0
        );
        assert_eq!(
            available_square_feet(CellValue::Text("1500.5".into()).as_number()),
            1500.5
        );
        assert_eq!(available_square_feet(Some(42.0)), 42.0);
    }
}
