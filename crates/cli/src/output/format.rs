//! Number and currency formatting.

use serde_json::Value;

/// `"{currency} {amount}"` with thousands separators and two decimals, or
/// `N/A` when there is no amount.
pub fn format_currency(amount: Option<f64>, currency: &str) -> String {
    match amount {
        Some(amount) => format!("{currency} {}", group_thousands(&format!("{amount:.2}"))),
        None => "N/A".to_string(),
    }
}

/// Format a quantity for display.
///
/// Integers get thousands separators; floats get up to four decimals with
/// trailing zeros removed. Numeric strings are parsed as floats, other
/// strings pass through. Zero, empty and null values format as "".
pub fn format_number(value: &Value) -> String {
    if !is_truthy(value) {
        return String::new();
    }

    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().map(format_float).unwrap_or_default(),
        Value::Number(n) => group_thousands(&n.to_string()),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => format_float(f),
            _ => s.clone(),
        },
        other => other.to_string(),
    }
}

fn format_float(value: f64) -> String {
    let fixed = group_thousands(&format!("{value:.4}"));
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Insert `,` separators into the integer part of a decimal string.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// JSON truthiness: null, false, zero and empty strings or containers are
/// falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Text of a scalar JSON value, without quotes for strings.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Capitalise the first letter of each word and lowercase the rest.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
