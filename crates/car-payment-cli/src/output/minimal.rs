use serde_json::Value;

use super::plain;

/// Result fields worth printing on their own, best first.
const HEADLINE_KEYS: [&str; 2] = ["rounded_payment", "monthly_payment"];

/// Print only the headline figure of the result.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        let headline = HEADLINE_KEYS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()));
        if let Some(v) = headline {
            println!("{}", plain(v));
            return;
        }
        if let Some((key, v)) = map.iter().next() {
            println!("{key}: {}", plain(v));
            return;
        }
    }

    println!("{}", plain(result));
}
