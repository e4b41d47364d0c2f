use serde_json::Value;

use super::format_cell;

/// Headline fields, in priority order.
const PRIORITY_KEYS: [&str; 5] = [
    "recommendation",
    "interest_savings",
    "net_savings",
    "total_interest",
    "term_months",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in priority order, first at the top of
/// the result and then inside its `summary`, falling back to the first field.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return format_cell(result_obj);
    };

    let summary = map.get("summary").and_then(Value::as_object);
    for key in &PRIORITY_KEYS {
        let found = map
            .get(*key)
            .or_else(|| summary.and_then(|s| s.get(*key)));
        if let Some(val) = found {
            if !val.is_null() {
                return format_cell(val);
            }
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, format_cell(val)),
        None => String::new(),
    }
}
