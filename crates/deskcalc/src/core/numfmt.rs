//! Number text conversion for the calculator display
//!
//! The display is text, so every unary key reads it back as a number and
//! writes a new string. Reading is lenient prefix parsing (`"1."` is `1`,
//! `"Error"` is NaN); writing is the shortest round-trip form, switching to
//! exponent notation outside `[1e-6, 1e21)`.

/// Parses the longest numeric prefix of `text`
///
/// Leading whitespace is skipped, an optional sign is accepted, and
/// `Infinity` is recognised. Text without a numeric prefix yields NaN.
#[must_use]
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Formats a number the way the display shows it
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    // Covers negative zero too
    if value == 0.0 {
        return "0".to_string();
    }

    if (1e-6..1e21).contains(&value.abs()) {
        return format!("{value}");
    }

    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}
