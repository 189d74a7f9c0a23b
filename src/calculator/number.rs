use crate::error::{CalorieError, Result};

/// Parse a numeral as written in a spreadsheet cell.
///
/// Accepts `,` or `.` as decimal separator. When both appear, `.` is taken as
/// the thousands separator (`"1.234,56"` is `1234.56`). Empty text and
/// `"none"` read as zero.
pub fn parse_number(raw: &str) -> Result<f64> {
    let text = raw.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("none") {
        return Ok(0.0);
    }

    let normalized = if text.contains('.') && text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else if text.contains(',') {
        text.replace(',', ".")
    } else {
        text.to_string()
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CalorieError::InvalidNumberFormat(raw.to_string()))
}

/// [`parse_number`] rounded to the nearest integer.
pub fn safe_int(raw: &str) -> Result<i64> {
    Ok(parse_number(raw)?.round() as i64)
}
