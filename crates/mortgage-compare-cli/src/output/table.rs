use serde_json::{Map, Value};
use tabled::{builder::Builder, settings::Style, Table};

use super::{format_value, headers, payload, rows, ROW_KEYS};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let data = payload(value);

    match rows(data) {
        Some(rows) => print_rows(&rows),
        None => match data {
            Value::Object(map) => print_fields(map),
            other => println!("{}", format_value(other)),
        },
    }

    // Scalar fields that sit alongside the rows (best term, current payment)
    if let Value::Object(map) = data {
        let has_rows = ROW_KEYS.iter().any(|k| map.get(*k).is_some_and(Value::is_array));
        let summary: Map<String, Value> = map
            .iter()
            .filter(|(_, v)| !v.is_array() && !v.is_object())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if has_rows && !summary.is_empty() {
            println!();
            print_fields(&summary);
        }
    }

    if let Value::Object(envelope) = value {
        if envelope.contains_key("result") {
            print_envelope_notes(envelope);
        }
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{table}");
}

fn print_rows(rows: &[Map<String, Value>]) {
    let headers = headers(rows);
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for row in rows {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(format_value).unwrap_or_default()),
        );
    }
    let mut table: Table = builder.build();
    table.with(Style::rounded());
    println!("{table}");
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
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
