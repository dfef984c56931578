//! CSV file writing (and reading, via the auto-detecting parser).
//!
//! Rows are JSON objects; the first row's keys become the header. When
//! appending to an existing file the header is not repeated, mirroring a
//! dialogue-log style of use where rows accumulate over many calls.

use serde_json::Value;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::error::{FileError, FileResult};

/// Save mapping rows to a CSV file.
///
/// The header comes from the first row's keys in insertion order; later
/// rows are projected onto those columns (missing keys become empty
/// cells, extra keys are dropped). Parent directories are created. The
/// header is written unless appending to a file that already exists.
pub fn save_csv(rows: &[Value], path: &Path, append: bool) -> FileResult<()> {
    let headers: Vec<String> = match rows.first() {
        Some(first) => match first.as_object() {
            Some(map) => map.keys().cloned().collect(),
            None => return Err(FileError::NotAMapping(0)),
        },
        None => Vec::new(),
    };

    let file_existed = path.exists();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| FileError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options.open(path).map_err(|e| FileError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    if !headers.is_empty() && !(append && file_existed) {
        writer.write_record(&headers)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let map = row.as_object().ok_or(FileError::NotAMapping(i))?;
        let record: Vec<String> = headers
            .iter()
            .map(|header| cell_text(map.get(header)))
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush().map_err(|e| FileError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a CSV file as a list of row mappings.
///
/// Always returns mapping rows (even for single-column files); use the
/// parser directly when the flat-list view is wanted.
pub fn read_csv(path: &Path) -> FileResult<Vec<Value>> {
    if !path.is_file() {
        return Err(FileError::NotFound(path.to_path_buf()));
    }
    let document = crate::parser::parse_file(path).map_err(|e| FileError::InvalidCsv {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(document.rows)
}

/// Convert a CSV file to a pretty-printed JSON file, returning the rows.
pub fn csv_to_json_file(csv_path: &Path, json_path: &Path) -> FileResult<Vec<Value>> {
    let rows = read_csv(csv_path)?;
    let text = serde_json::to_string_pretty(&rows).map_err(|e| FileError::InvalidCsv {
        path: json_path.to_path_buf(),
        message: e.to_string(),
    })?;
    super::save_text(&text, json_path, false)?;
    Ok(rows)
}

/// Render one cell.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        // Nested containers are embedded as compact JSON.
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_read_round() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");

        let rows = vec![
            json!({"role": "user", "content": "Hello"}),
            json!({"role": "assistant", "content": "Hi there!"}),
        ];
        save_csv(&rows, &path, false).unwrap();

        let read_back = read_csv(&path).unwrap();
        assert_eq!(read_back, rows);
    }

    #[test]
    fn test_append_skips_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");

        save_csv(&[json!({"a": "1"})], &path, true).unwrap();
        save_csv(&[json!({"a": "2"})], &path, true).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        // One header line, two data lines.
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.lines().next(), Some("a"));

        let rows = read_csv(&path).unwrap();
        assert_eq!(rows, vec![json!({"a": "1"}), json!({"a": "2"})]);
    }

    #[test]
    fn test_missing_keys_become_empty_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.csv");

        let rows = vec![
            json!({"a": "1", "b": "2"}),
            json!({"a": "3"}),
        ];
        save_csv(&rows, &path, false).unwrap();

        let read_back = read_csv(&path).unwrap();
        assert_eq!(read_back[1], json!({"a": "3", "b": ""}));
    }

    #[test]
    fn test_scalar_cells_rendered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typed.csv");

        save_csv(&[json!({"n": 42, "b": true, "x": null})], &path, false).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("42,true,"));
    }

    #[test]
    fn test_non_mapping_row_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");

        let result = save_csv(&[json!([1, 2])], &path, false);
        assert!(matches!(result, Err(FileError::NotAMapping(0))));
    }

    #[test]
    fn test_csv_to_json_file() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("in.csv");
        let json_path = dir.path().join("out.json");
        std::fs::write(&csv_path, "name,age\nAlice,30\n").unwrap();

        let rows = csv_to_json_file(&csv_path, &json_path).unwrap();
        assert_eq!(rows, vec![json!({"name": "Alice", "age": "30"})]);

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(written, json!([{"name": "Alice", "age": "30"}]));
    }
}
