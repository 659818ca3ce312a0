use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{display_value, result_payload};

const SCHEDULE_COLUMNS: [(&str, &str); 6] = [
    ("period", "period"),
    ("principal_initial_balance", "opening"),
    ("pmt", "pmt"),
    ("interest_paid", "interest"),
    ("principal_paid", "principal"),
    ("principal_final_balance", "closing"),
];

/// Render the schedule envelope as tables: one row per period, followed
/// by totals, warnings and methodology.
pub fn print_table(value: &Value) {
    let payload = result_payload(value);

    if let Some(rows) = payload.get("summary_list").and_then(Value::as_array) {
        print_schedule_rows(rows);
        if let Some(Value::Object(totals)) = payload.get("totals") {
            println!();
            print_field_rows(totals);
        }
    } else if let Value::Object(fields) = payload {
        print_field_rows(fields);
    } else {
        println!("{}", payload);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for warning in warnings {
                if let Value::String(s) = warning {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = value.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_schedule_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty schedule)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_COLUMNS.map(|(_, header)| header));
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(SCHEDULE_COLUMNS.map(|(key, _)| {
                map.get(key).map(display_value).unwrap_or_default()
            }));
        }
    }
    println!("{}", Table::from(builder));
}

fn print_field_rows(fields: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.as_str(), &display_value(val)]);
    }
    println!("{}", Table::from(builder));
}
