pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Keys under which a payload carries its row data.
pub(crate) const ROW_KEYS: [&str; 4] = ["results", "rows", "trajectory", "payments"];

/// The payload of a command: the `result` of an envelope, or the value itself.
pub(crate) fn payload(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Row-shaped data inside a payload, if any.
///
/// Comparison output keeps its rows under `results`, balance charts under
/// `rows`; bank lists are bare arrays.
pub(crate) fn rows(payload: &Value) -> Option<Vec<Map<String, Value>>> {
    let arr = match payload {
        Value::Array(arr) => arr,
        Value::Object(map) => ROW_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))?,
        _ => return None,
    };
    let flattened: Vec<Map<String, Value>> = arr.iter().filter_map(flatten_row).collect();
    (!flattened.is_empty()).then_some(flattened)
}

/// Headers in first-seen order across all rows.
pub(crate) fn headers(rows: &[Map<String, Value>]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

fn flatten_row(item: &Value) -> Option<Map<String, Value>> {
    let map = item.as_object()?;
    // {"shorter_term": {...}} -> {...}
    if map.len() == 1 {
        if let Some(Value::Object(inner)) = map.values().next() {
            return flatten_row(&Value::Object(inner.clone()));
        }
    }

    let mut out = Map::new();
    for (key, val) in map {
        match val {
            // balance chart series: [{term, balance}, ...] -> one column per term
            Value::Array(series) if series.iter().all(is_series_point) => {
                for point in series {
                    if let (Some(term), Some(balance)) = (point.get("term"), point.get("balance")) {
                        let column = term.as_str().map(str::to_string).unwrap_or_else(|| term.to_string());
                        out.insert(column, balance.clone());
                    }
                }
            }
            // bank rate card: {"1y": 6.5, ...} -> rates.1y
            Value::Object(inner) => {
                for (inner_key, inner_val) in inner {
                    out.insert(format!("{key}.{inner_key}"), inner_val.clone());
                }
            }
            _ => {
                out.insert(key.clone(), val.clone());
            }
        }
    }
    Some(out)
}

fn is_series_point(v: &Value) -> bool {
    v.get("term").is_some() && v.get("balance").is_some()
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
