use serde_json::Value;
use std::io;

use super::{display_value, result_payload};

/// Write output as CSV to stdout: one record per schedule period, or
/// field/value pairs for non-schedule payloads.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let payload = result_payload(value);

    if let Some(rows) = payload.get("summary_list").and_then(Value::as_array) {
        write_schedule(&mut wtr, rows);
    } else if let Value::Object(fields) = payload {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in fields {
            let _ = wtr.write_record([key.as_str(), &display_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&display_value(payload)]);
    }

    let _ = wtr.flush();
}

fn write_schedule(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(display_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}
