//! Lenient field readers for untyped collaborator JSON

use serde_json::Value;

pub(crate) fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a number, accepting numeric strings such as `"1e3"` or `"$1,200"`
pub(crate) fn number(value: &Value, key: &str) -> Option<f64> {
    let parsed = match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount(s),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn parse_amount(s: &str) -> Option<f64> {
    if let Ok(parsed) = s.trim().parse::<f64>() {
        return Some(parsed);
    }
    let cleaned: String = s
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.chars().any(char::is_alphabetic) {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

pub(crate) fn items<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|entry| entry.is_object())
}
