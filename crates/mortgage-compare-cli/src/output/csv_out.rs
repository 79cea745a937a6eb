use serde_json::Value;
use std::io;

use super::{format_value, headers, payload, rows};

/// Write output as CSV to stdout.
///
/// Row-shaped payloads (comparison results, chart rows, trajectories) get one
/// record per row; everything else becomes `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let data = payload(value);

    if let Some(rows) = rows(data) {
        let headers = headers(&rows);
        let _ = wtr.write_record(&headers);
        for row in &rows {
            let record: Vec<String> = headers
                .iter()
                .map(|h| row.get(h).map(format_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    } else if let Value::Object(map) = data {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_value(data)]);
    }

    let _ = wtr.flush();
}
