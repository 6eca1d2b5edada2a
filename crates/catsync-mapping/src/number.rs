// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unit-stripping numeric coercion for dimension attributes.

use serde_json::Value;

/// Coerces an attribute value into a plain number, dropping any units.
///
/// - integers convert directly
/// - strings keep only `[0-9.]` and parse what remains, e.g. `"12.5kg"` is `12.5`
/// - anything else (null, booleans, floats, arrays, objects) is `0.0`
///
/// Unparsable leftovers such as `"1.2.3"` also yield `0.0`.
pub fn clean_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i as f64,
            (None, Some(u)) => u as f64,
            _ => 0.0,
        },
        Value::String(s) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
            digits.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}
