//! Console previews of data files and values.
//!
//! Input classification happens exactly once, at the boundary: a preview
//! argument resolves to one [`Source`] variant and every later step
//! dispatches on that closed set. `preview` returns the formatted string;
//! deciding whether (and where) to print is the caller's business.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{PrintError, PrintResult};

/// What a preview argument turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// An existing `.csv` file.
    CsvFile(PathBuf),
    /// An existing `.json` file.
    JsonFile(PathBuf),
    /// Anything else: inline JSON text, or a plain string value.
    Inline(Value),
}

impl Source {
    /// Classify a preview argument.
    ///
    /// An existing file resolves by extension; non-file arguments parse as
    /// JSON when possible and fall back to a plain string value.
    pub fn resolve(arg: &str) -> Source {
        let path = Path::new(arg);
        if path.is_file() {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase());
            match ext.as_deref() {
                Some("csv") => return Source::CsvFile(path.to_path_buf()),
                Some("json") => return Source::JsonFile(path.to_path_buf()),
                _ => {}
            }
        }
        match serde_json::from_str(arg) {
            Ok(value) => Source::Inline(value),
            Err(_) => Source::Inline(Value::String(arg.to_string())),
        }
    }
}

/// Build a preview string, showing at most `max_rows` rows or items.
pub fn preview(source: &Source, max_rows: usize) -> PrintResult<String> {
    match source {
        Source::CsvFile(path) => preview_csv(path, max_rows),
        Source::JsonFile(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| PrintError::Io {
                path: path.clone(),
                source,
            })?;
            let value: Value =
                serde_json::from_str(&text).map_err(|source| PrintError::Json {
                    path: path.clone(),
                    source,
                })?;
            Ok(pretty(&value, max_rows))
        }
        Source::Inline(value) => Ok(pretty(value, max_rows)),
    }
}

/// Header plus the first `max_rows` data rows of a CSV file.
fn preview_csv(path: &Path, max_rows: usize) -> PrintResult<String> {
    let document = crate::parser::parse_file(path).map_err(|e| PrintError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut out = format!("CSV Header: {:?}", document.headers);
    for (i, row) in document.rows.iter().take(max_rows).enumerate() {
        let cells: Vec<String> = document
            .headers
            .iter()
            .map(|h| {
                row.get(h)
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        out.push_str(&format!("\nRow {}: {:?}", i + 1, cells));
    }
    let remaining = document.rows.len().saturating_sub(max_rows);
    if remaining > 0 {
        out.push_str(&format!("\n… (+{} more rows)", remaining));
    }
    Ok(out)
}

/// Pretty-print a value, truncating top-level arrays to `max_items`.
fn pretty(value: &Value, max_items: usize) -> String {
    match value.as_array() {
        Some(items) if items.len() > max_items => {
            let head = Value::Array(items[..max_items].to_vec());
            let mut out =
                serde_json::to_string_pretty(&head).unwrap_or_else(|_| head.to_string());
            out.push_str(&format!("\n… (+{} more items)", items.len() - max_items));
            out
        }
        _ => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_inline_json() {
        assert_eq!(
            Source::resolve(r#"{"a": 1}"#),
            Source::Inline(json!({"a": 1}))
        );
    }

    #[test]
    fn test_resolve_plain_string() {
        assert_eq!(
            Source::resolve("not json at all"),
            Source::Inline(json!("not json at all"))
        );
    }

    #[test]
    fn test_resolve_files_by_extension() {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("t.csv");
        let json_file = dir.path().join("t.json");
        std::fs::write(&csv, "a\n1\n").unwrap();
        std::fs::write(&json_file, "{}").unwrap();

        assert_eq!(Source::resolve(csv.to_str().unwrap()), Source::CsvFile(csv));
        assert_eq!(
            Source::resolve(json_file.to_str().unwrap()),
            Source::JsonFile(json_file)
        );
    }

    #[test]
    fn test_csv_preview_caps_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "name;age\nAlice;30\nBob;25\nEve;99\n").unwrap();

        let out = preview(&Source::CsvFile(path), 2).unwrap();
        assert!(out.starts_with("CSV Header:"));
        assert!(out.contains("Row 1:"));
        assert!(out.contains("Row 2:"));
        assert!(!out.contains("Eve"));
        assert!(out.contains("+1 more rows"));
    }

    #[test]
    fn test_array_preview_truncates() {
        let value = json!([1, 2, 3, 4, 5]);
        let out = preview(&Source::Inline(value), 3).unwrap();
        assert!(out.contains("+2 more items"));
        assert!(!out.contains('5'));
    }

    #[test]
    fn test_object_preview_pretty_prints() {
        let out = preview(&Source::Inline(json!({"a": {"b": 1}})), 10).unwrap();
        assert!(out.contains("\"a\""));
        assert!(out.contains('\n'));
    }
}
