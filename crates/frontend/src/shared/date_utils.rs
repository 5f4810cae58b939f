/// Utilities for date formatting
///
/// Display uses the Brazilian `DD/MM/YYYY` convention; the wire and the
/// `<input type="date">` value use ISO `YYYY-MM-DD`.
use chrono::{Local, NaiveDate};

/// Today's date in the browser's timezone.
///
/// Date filters must be built from the local calendar day; converting a
/// local midnight to UTC shifts it to the previous day west of Greenwich.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Example: 2024-03-15 -> "15/03/2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Value for `<input type="date">`
pub fn to_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parses an `<input type="date">` value; empty or malformed input is `None`.
pub fn from_input_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(d), "05/03/2024");
        assert_eq!(format_date_opt(None), "-");
    }

    #[test]
    fn test_input_value_round_trip() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(to_input_value(Some(d)), "2024-12-31");
        assert_eq!(from_input_value("2024-12-31"), Some(d));
        assert_eq!(from_input_value(""), None);
        assert_eq!(to_input_value(None), "");
    }
}
