use serde_json::Value;

use super::{format_value, payload};

/// Fields that answer each command, in priority order.
const PRIORITY_KEYS: [&str; 9] = [
    "monthly_payment",
    "term_months",
    "balance",
    "years_saved",
    "total_interest_saved",
    "best_term",
    "converted",
    "file_name",
    "name",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let data = payload(value);

    if let Value::Object(map) = data {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", format_value(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{key}: {}", format_value(val));
            return;
        }
    }

    if let Value::Array(arr) = data {
        // trajectory: last balance; bank list: names
        if let Some(last) = arr.last().and_then(|v| v.get("balance")) {
            println!("{}", format_value(last));
            return;
        }
        for name in arr.iter().filter_map(|v| v.get("name")) {
            println!("{}", format_value(name));
        }
        return;
    }

    println!("{}", format_value(data));
}
