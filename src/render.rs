//! Text rendering of backend results.
//!
//! Lists of objects become aligned tables, single objects become
//! `key: value` field lists, and anything else is printed as-is.

use serde_json::{Map, Value};

pub const NO_RESULTS: &str = "(no results)";

/// Render a result for the terminal.
pub fn render(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => NO_RESULTS.to_string(),
        Value::Array(items) if items.iter().all(Value::is_object) => table(items),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("\n"),
        Value::Object(map) if map.is_empty() => NO_RESULTS.to_string(),
        Value::Object(map) => field_list(map),
        other => cell(other),
    }
}

/// Render as pretty JSON, for `--json`.
pub fn render_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Scalar fields first, then one titled table per nested list of objects.
fn field_list(map: &Map<String, Value>) -> String {
    let mut fields = Vec::new();
    let mut sections = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                sections.push(format!("{}:\n{}", key, table(items)));
            }
            _ => fields.push((key.as_str(), cell(value))),
        }
    }

    let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut blocks = Vec::new();
    if !fields.is_empty() {
        let lines: Vec<String> = fields
            .iter()
            .map(|(key, value)| format!("{:<width$}  {}", format!("{}:", key), value, width = width + 1))
            .collect();
        blocks.push(lines.join("\n"));
    }
    blocks.extend(sections);
    blocks.join("\n\n")
}

fn table(rows: &[Value]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|col| row.get(*col).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(col.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = vec![
        line(columns.clone()),
        line(rules.iter().map(String::as_str).collect()),
    ];
    for row in &cells {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

/// Strings unquoted, nested values as compact JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
