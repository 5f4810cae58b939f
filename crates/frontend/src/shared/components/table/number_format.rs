//! Number formatting for tables, Brazilian convention (`1.234,56`)

/// Formats a number with `.` as thousands separator and `,` as decimal mark
///
/// # Examples
///
/// ```
/// use frontend::shared::components::table::format_number_with_decimals;
///
/// let formatted = format_number_with_decimals(1234.567, 2);
/// assert_eq!(formatted, "1.234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    // -0,00 after rounding is shown as 0,00
    let is_negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if is_negative { "-" } else { "" };

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Formats a money value with 2 decimals, no currency symbol
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Formats a money value as Brazilian reais
///
/// ```
/// use frontend::shared::components::table::format_brl;
///
/// assert_eq!(format_brl(1234.5), "R$ 1.234,50");
/// ```
pub fn format_brl(value: f64) -> String {
    if value < 0.0 && format_money(value).starts_with('-') {
        format!("-R$ {}", format_money(-value))
    } else {
        format!("R$ {}", format_money(value.abs()))
    }
}

/// Formats an integer with thousands separator
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1.234,56");
        assert_eq!(format_money(1234567.89), "1.234.567,89");
        assert_eq!(format_money(0.0), "0,00");
        assert_eq!(format_money(-1234.56), "-1.234,56");
        assert_eq!(format_money(-0.001), "0,00");
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(-10.0), "-R$ 10,00");
        assert_eq!(format_brl(0.0), "R$ 0,00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1.235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1.234,6");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1.234,567");
        assert_eq!(format_number_int(999.0), "999");
    }
}
