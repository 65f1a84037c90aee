/// Significant digits of every number written to a geometry file
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Format a value the way C-style stream output does by default.
///
/// Six significant digits, trailing zeros removed, scientific notation when the
/// decimal exponent is below -4 or at least six. Negative zero prints as `0`, so
/// negated zero angles do not leak a sign into the file.
///
/// ```
/// use pixgear::gear::format_decimal;
///
/// assert_eq!(format_decimal(100.0 * 0.05), "5");
/// assert_eq!(format_decimal(0.05 / 12f64.sqrt()), "0.0144338");
/// assert_eq!(format_decimal(-0.0), "0");
/// ```
pub fn format_decimal(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exponent)) = scientific
        .split_once('e')
        .and_then(|(m, e)| Some((m, e.parse::<i32>().ok()?)))
    else {
        return value.to_string();
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
