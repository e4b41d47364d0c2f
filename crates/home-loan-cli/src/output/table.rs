use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_cell, is_nested_section, is_row_set};

/// Format output as tables using the tabled crate.
///
/// Scalar fields go into a Field/Value table; schedules and option lists get
/// their own row tables; nested results (e.g. the parts of a full analysis)
/// are printed section by section.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_section(None, result);
                print_envelope_notes(map);
            } else {
                print_section(None, value);
            }
        }
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_section(title: Option<&str>, value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", format_cell(value));
        return;
    };

    if let Some(title) = title {
        println!("\n{}:", title);
    }
    print_fields(map);

    for (key, val) in map {
        let heading = match title {
            Some(t) => format!("{}.{}", t, key),
            None => key.clone(),
        };
        if is_row_set(val) {
            if let Value::Array(rows) = val {
                println!("\n{} ({} rows):", heading, rows.len());
                print_rows(rows);
            }
        } else if is_nested_section(val) {
            print_section(Some(&heading), val);
        }
    }
}

/// Field/Value table of everything that fits in a single cell.
fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut any = false;
    for (key, val) in map {
        if is_row_set(val) || is_nested_section(val) {
            continue;
        }
        builder.push_record([key.as_str(), &format_cell(val)]);
        any = true;
    }
    if any {
        println!("{}", Table::from(builder));
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_cell).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_cell(item));
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
