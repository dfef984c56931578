//! HTML table rendering of a JSON value tree.

use serde_json::Value;

use super::{escape_text, scalar_text};

/// Render a value as a standalone HTML document containing a nested table.
///
/// Mappings become two-column rows (key, value), nested mappings become
/// nested tables, sequences become `<ul>` lists. All text is escaped.
pub fn to_html(value: &Value, encoding: &str) -> String {
    let table = render_table(value);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"{}\">\n<title>collate</title>\n</head>\n<body>\n{}\n</body>\n</html>",
        encoding, table
    )
}

fn render_table(value: &Value) -> String {
    let mut html = vec![r#"<table border="1" cellpadding="5" cellspacing="0">"#.to_string()];

    match value.as_object() {
        Some(map) => {
            for (key, nested) in map {
                html.push("<tr>".to_string());
                html.push(format!("<td><strong>{}</strong></td>", escape_text(key)));
                match nested {
                    Value::Object(_) => {
                        html.push(format!("<td>{}</td>", render_table(nested)));
                    }
                    Value::Array(items) => {
                        html.push("<td>".to_string());
                        html.push("<ul>".to_string());
                        for item in items {
                            html.push(format!("<li>{}</li>", escape_text(&scalar_text(item))));
                        }
                        html.push("</ul>".to_string());
                        html.push("</td>".to_string());
                    }
                    scalar => {
                        html.push(format!("<td>{}</td>", escape_text(&scalar_text(scalar))));
                    }
                }
                html.push("</tr>".to_string());
            }
        }
        None => {
            html.push(format!(
                "<tr><td colspan=\"2\">{}</td></tr>",
                escape_text(&scalar_text(value))
            ));
        }
    }

    html.push("</table>".to_string());
    html.join("\n")
}
