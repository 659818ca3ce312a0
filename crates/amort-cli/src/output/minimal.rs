use serde_json::Value;

use super::{display_value, result_payload};

/// Print just the headline figures: the first-period repayment and the
/// lifetime totals. Non-schedule payloads fall back to their first field.
pub fn print_minimal(value: &Value) {
    let payload = result_payload(value);

    if let Some(rows) = payload.get("summary_list").and_then(Value::as_array) {
        if let Some(pmt) = rows.first().and_then(|row| row.get("pmt")) {
            println!("pmt: {}", display_value(pmt));
        }
        if let Some(totals) = payload.get("totals") {
            if let Some(total_pmt) = totals.get("pmt") {
                println!("total pmt: {}", display_value(total_pmt));
            }
            if let Some(interest) = totals.get("interest_paid") {
                println!("total interest: {}", display_value(interest));
            }
        }
        return;
    }

    if let Value::Object(fields) = payload {
        if let Some((key, val)) = fields.iter().next() {
            println!("{}: {}", key, display_value(val));
            return;
        }
    }

    println!("{}", display_value(payload));
}
