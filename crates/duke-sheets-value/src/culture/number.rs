//! Number ⇄ text

use super::{is_space_like, Culture};
use lazy_regex::regex_captures;

/// Format a number the way a cell displays it without a number format
///
/// Uses the shortest representation that round-trips, the culture's decimal separator, and
/// scientific notation (`1E+15`, `1E-05`) for very large or very small magnitudes.
pub fn format_number(value: f64, culture: &Culture) -> String {
    // Avoid displaying negative zero
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    let s = if abs >= 1e15 || abs < 1e-4 {
        let sci = format!("{:E}", value);
        match sci.split_once('E') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}E{sign}{:02}", exp.abs())
            }
            None => sci,
        }
    } else {
        value.to_string()
    };

    if culture.decimal_separator == '.' {
        s
    } else {
        s.replace('.', &culture.decimal_separator.to_string())
    }
}

/// Parse a plain decimal number
///
/// Accepts an optional sign, an integer part grouped in threes by the culture's group
/// separator, the culture's decimal separator, and an exponent. Surrounding whitespace is
/// ignored. Results that overflow to infinity are rejected.
pub fn parse_number(text: &str, culture: &Culture) -> Option<f64> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = match mantissa.split_once(culture.decimal_separator) {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };

    let int_digits = strip_groups(int_part, culture)?;
    if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if int_digits.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(text.len() + 4);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_digits.is_empty() { "0" } else { &int_digits });
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }
    if let Some(exp) = exponent {
        let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        normalized.push('e');
        normalized.push_str(exp);
    }

    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Remove group separators, checking that groups after the first have three digits
fn strip_groups(int_part: &str, culture: &Culture) -> Option<String> {
    let group = culture.group_separator;
    let is_group = |ch: char| ch == group || (is_space_like(group) && is_space_like(ch));

    let chunks: Vec<&str> = int_part.split(is_group).collect();
    if let Some((first, rest)) = chunks.split_first() {
        let misplaced = first.is_empty() || first.len() > 3 || rest.iter().any(|c| c.len() != 3);
        if !rest.is_empty() && misplaced {
            return None;
        }
    }
    if !chunks.iter().all(|c| c.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    Some(chunks.concat())
}

/// Parse a mixed fraction such as `"1 1/4"` (1.25) or `"-2 1/2"` (-2.5)
pub fn parse_fraction(text: &str) -> Option<f64> {
    let (_, sign, whole, numerator, denominator) =
        regex_captures!(r"^([+-])?(\d+)\s+(\d+)/(\d+)$", text.trim())?;

    let whole: f64 = whole.parse().ok()?;
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }

    let value = whole + numerator / denominator;
    Some(if sign == "-" { -value } else { value }).filter(|n| n.is_finite())
}

/// Parse a number followed by a percent sign (`"50%"` is 0.5)
pub fn parse_percent(text: &str, culture: &Culture) -> Option<f64> {
    let number = text.trim().strip_suffix('%')?;
    parse_number(number, culture).map(|n| n / 100.0)
}
