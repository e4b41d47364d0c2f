use serde_json::{Map, Value};
use std::io;

use super::{format_cell, is_nested_section, is_row_set};

/// Write output as CSV to stdout.
///
/// A result holding a single schedule or option list is written as plain
/// rows. Otherwise the scalar fields come first as field/value pairs (nested
/// sections flattened to dotted names), followed by one block per row set,
/// each introduced by a one-cell line naming it.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());
    write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            let mut fields = Vec::new();
            let mut row_sets = Vec::new();
            collect(None, map, &mut fields, &mut row_sets);

            if let [(_, rows)] = row_sets.as_slice() {
                write_rows(wtr, rows);
                return;
            }

            if !fields.is_empty() {
                let _ = wtr.write_record(["field", "value"]);
                for (name, cell) in &fields {
                    let _ = wtr.write_record([name, cell]);
                }
            }
            for (name, rows) in row_sets {
                let _ = wtr.write_record([name.as_str()]);
                write_rows(wtr, rows);
            }
        }
        Value::Array(arr) => write_rows(wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_cell(result)]);
        }
    }
}

/// Split a result into single-cell fields and row sets, descending into
/// nested sections.
fn collect<'a>(
    prefix: Option<&str>,
    map: &'a Map<String, Value>,
    fields: &mut Vec<(String, String)>,
    row_sets: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let name = match prefix {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        match val {
            Value::Array(rows) if is_row_set(val) => {
                row_sets.push((name, rows.as_slice()));
            }
            Value::Object(inner) if is_nested_section(val) => {
                collect(Some(&name), inner, fields, row_sets);
            }
            _ => fields.push((name, format_cell(val))),
        }
    }
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&format_cell(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_cell).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        write_csv(&mut wtr, value);
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_schedule_rows_written_with_headers() {
        let rows = json!([
            {"month": 1, "payment": "10000", "balance": "997083.33"},
            {"month": 2, "payment": "10000", "balance": "994145.83"}
        ]);
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, rows.as_array().unwrap());
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("balance,month,payment"));
        assert_eq!(lines.next(), Some("997083.33,1,10000"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_single_schedule_is_plain_rows() {
        let envelope = json!({
            "result": {
                "state": {"status": "paid_off"},
                "summary": {
                    "principal": "500",
                    "term_months": 1,
                    "paid_off": true,
                    "total_interest": "5"
                },
                "schedule": [{"month": 1, "payment": "505"}]
            },
            "warnings": []
        });
        assert_eq!(render(&envelope), "month,payment\n1,505\n");
    }

    #[test]
    fn test_both_schedules_of_a_comparison_are_written() {
        let envelope = json!({
            "result": {
                "net_savings": "89246.23",
                "breakeven": {"status": "months", "months": 7},
                "current_schedule": [
                    {"month": 1, "balance": "997083.33"},
                    {"month": 2, "balance": "994145.83"}
                ],
                "new_schedule": [{"month": 1, "balance": "996666.67"}]
            }
        });
        let text = render(&envelope);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            [
                "field,value",
                "breakeven,\"months=7, status=months\"",
                "net_savings,89246.23",
                "current_schedule",
                "balance,month",
                "997083.33,1",
                "994145.83,2",
                "new_schedule",
                "balance,month",
                "996666.67,1",
            ]
        );
    }

    #[test]
    fn test_nested_sections_are_flattened() {
        let envelope = json!({
            "result": {
                "recommendation": "prepay",
                "options": [{"name": "Do nothing"}],
                "rate_change": {
                    "net_savings": "1",
                    "new_schedule": [{"month": 1}]
                }
            }
        });
        let text = render(&envelope);

        assert!(text.contains("recommendation,prepay\n"), "{}", text);
        assert!(text.contains("rate_change.net_savings,1\n"), "{}", text);
        assert!(text.contains("options\nname\nDo nothing\n"), "{}", text);
        assert!(text.contains("rate_change.new_schedule\nmonth\n1\n"), "{}", text);
    }
}
