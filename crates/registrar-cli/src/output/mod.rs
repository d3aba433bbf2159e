use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            Ok(render_table(
                &serde_json::to_value(value)?,
                table::TableOptions {
                    max_width: prefs.term_width,
                    color: prefs.table_color,
                },
            ))
        }
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table(value: &Value, options: table::TableOptions) -> String {
    match value {
        Value::Array(items) => render_rows(items, options),
        Value::Object(map) => {
            // Nested objects flatten to dotted keys.
            let mut rows = Vec::with_capacity(map.len());
            flatten_into("", value, &mut rows);
            table::render_table(&["field", "value"], &rows, options)
        }
        scalar => table::render_table(&["value"], &[vec![cell(scalar)]], options),
    }
}

fn render_rows(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    // Columns are the union of every row's fields.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options);
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, options)
}

fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<Vec<String>>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&key, nested, rows);
            }
        }
        other => rows.push(vec![prefix.to_string(), cell(other)]),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(" "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use registrar_core::entities::CurrentCourse;
    use serde_json::json;

    use super::*;

    const PLAIN: table::TableOptions = table::TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn json_is_pretty_and_raw_is_compact() {
        let course = CurrentCourse {
            course_id: "CS201".into(),
            name: "Data Structures".into(),
        };
        let pretty = render(&course, OutputFormat::Json).unwrap();
        let raw = render(&course, OutputFormat::Raw).unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(raw, r#"{"course_id":"CS201","name":"Data Structures"}"#);
    }

    #[test]
    fn arrays_render_one_row_per_item() {
        let value = json!([
            {"course_id": "CS201", "grade": null},
            {"course_id": "MATH100", "grade": "B"},
        ]);
        let rendered = render_table(&value, PLAIN);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("course_id"));
        assert!(lines[2].starts_with("CS201"));
        assert!(lines[2].ends_with('-'));
        assert!(lines[3].ends_with('B'));
    }

    #[test]
    fn empty_arrays_say_so() {
        assert_eq!(render_table(&json!([]), PLAIN), "(no rows)");
    }

    #[test]
    fn nested_objects_flatten_to_dotted_keys() {
        let value = json!({"kind": "enroll", "offering": {"course_id": "CS201"}});
        let rendered = render_table(&value, PLAIN);
        assert!(rendered.contains("offering.course_id"));
        assert!(rendered.contains("CS201"));
    }

    #[test]
    fn list_cells_are_space_joined() {
        assert_eq!(cell(&json!(["MATH100", "PHYS100"])), "MATH100 PHYS100");
    }
}
