use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::plain;

/// Print the result as a field/value table followed by warnings and
/// methodology.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{}", plain(value));
        return;
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => {
            println!("{}", field_table(result));
            print_notes(envelope);
        }
        _ => println!("{}", field_table(envelope)),
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &plain(val)]);
    }
    Table::from(builder)
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}
