use serde_json::Value;
use std::io;

use super::plain;

/// Write the result as a two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let fields = value
        .as_object()
        .and_then(|m| m.get("result"))
        .and_then(Value::as_object)
        .or_else(|| value.as_object());

    match fields {
        Some(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &plain(val)]);
            }
        }
        None => {
            let _ = wtr.write_record([&plain(value)]);
        }
    }

    let _ = wtr.flush();
}
