//! CSV to JSON parser with encoding and delimiter auto-detection.
//!
//! The header row defines the keys; each subsequent row becomes one JSON
//! object of header → cell string. A document with exactly one header
//! column can instead be viewed as a flat list of scalar strings (see
//! [`CsvDocument::into_value`]) — callers that feed the merger must be
//! able to distinguish the two shapes.

use serde_json::{json, Map, Value};
use std::path::Path;

/// CSV parsing error with line context.
#[derive(Debug, Clone)]
pub struct CsvError {
    pub line: usize,
    pub column: Option<String>,
    pub value: Option<String>,
    pub message: String,
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.column, &self.value) {
            (Some(col), Some(val)) => {
                write!(f, "Line {}, column '{}' (value '{}'): {}", self.line, col, val, self.message)
            }
            (Some(col), None) => {
                write!(f, "Line {}, column '{}': {}", self.line, col, self.message)
            }
            _ => {
                write!(f, "Line {}: {}", self.line, self.message)
            }
        }
    }
}

impl std::error::Error for CsvError {}

impl CsvError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// A parsed CSV document with detection metadata.
#[derive(Debug, Clone)]
pub struct CsvDocument {
    /// One JSON object per data row, keyed by header.
    pub rows: Vec<Value>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

impl CsvDocument {
    /// True when the document has exactly one column.
    pub fn is_single_column(&self) -> bool {
        self.headers.len() == 1
    }

    /// Collapse the document to a JSON value.
    ///
    /// Multi-column documents become a list of row mappings. A
    /// single-column document becomes a flat list of its cell strings —
    /// the header row is always treated as a header, never sniffed as
    /// data.
    pub fn into_value(self) -> Value {
        if !self.is_single_column() {
            return Value::Array(self.rows);
        }
        let column = &self.headers[0];
        let cells = self
            .rows
            .into_iter()
            .map(|row| row.get(column.as_str()).cloned().unwrap_or(Value::Null))
            .collect();
        Value::Array(cells)
    }
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding.
pub fn decode(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        // UTF-8, ASCII, and anything unrecognized: lossy UTF-8
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Detect the delimiter by counting occurrences in the header row.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text into JSON row objects with an explicit delimiter.
///
/// # Example
/// ```ignore
/// let rows = collate::parser::parse_rows("name;age\nAlice;30", ';').unwrap();
/// assert_eq!(rows[0]["name"], "Alice");
/// assert_eq!(rows[0]["age"], "30");
/// ```
pub fn parse_rows(content: &str, delimiter: char) -> Result<Vec<Value>, CsvError> {
    Ok(parse_str(content, delimiter, "utf-8".to_string())?.rows)
}

/// Parse CSV text with an explicit delimiter, returning metadata.
pub fn parse_str(
    content: &str,
    delimiter: char,
    encoding: String,
) -> Result<CsvDocument, CsvError> {
    let mut lines = content.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| CsvError::new(1, "Empty CSV file"))?;

    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|cell| cell.trim().trim_matches('"').to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::new(1, "No headers found"));
    }

    let mut rows = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(delimiter).collect();
        let mut row = Map::new();

        for (i, header) in headers.iter().enumerate() {
            // Short rows pad with ""; extra cells are ignored.
            let cell = cells
                .get(i)
                .map(|c| c.trim().trim_matches('"'))
                .unwrap_or("");

            row.insert(header.clone(), json!(cell));
        }

        rows.push(Value::Object(row));
    }

    Ok(CsvDocument {
        rows,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_auto(bytes: &[u8]) -> Result<CsvDocument, CsvError> {
    let encoding = detect_encoding(bytes);
    let content = decode(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    parse_str(&content, delimiter, encoding)
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<CsvDocument, CsvError> {
    let bytes = std::fs::read(path.as_ref())
        .map_err(|e| CsvError::new(0, format!("Cannot read file: {}", e)))?;
    parse_auto(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let rows = parse_rows("name;age\nAlice;30\nBob;25", ';').unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Alice");
        assert_eq!(rows[0]["age"], "30");
        assert_eq!(rows[1]["name"], "Bob");
        assert_eq!(rows[1]["age"], "25");
    }

    #[test]
    fn test_quoted_cells() {
        let rows = parse_rows("name;value\n\"Alice\";\"Hello World\"", ';').unwrap();
        assert_eq!(rows[0]["name"], "Alice");
        assert_eq!(rows[0]["value"], "Hello World");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let rows = parse_rows("a;b\n1;2\n\n3;4\n", ';').unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_short_rows_padded() {
        let rows = parse_rows("a;b;c\n1;;3", ';').unwrap();
        assert_eq!(rows[0]["a"], "1");
        assert_eq!(rows[0]["b"], "");
        assert_eq!(rows[0]["c"], "3");
    }

    #[test]
    fn test_extra_cells_ignored() {
        let rows = parse_rows("a;b\n1;2;3;4", ';').unwrap();
        assert_eq!(rows[0]["a"], "1");
        assert_eq!(rows[0]["b"], "2");
        assert!(rows[0].get("c").is_none());
    }

    #[test]
    fn test_empty_input_is_error() {
        let result = parse_rows("", ';');
        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("Empty"));
    }

    #[test]
    fn test_error_message_format() {
        let err = CsvError::new(5, "Invalid value")
            .with_column("age")
            .with_value("abc");

        let msg = err.to_string();
        assert!(msg.contains("Line 5"));
        assert!(msg.contains("column 'age'"));
        assert!(msg.contains("value 'abc'"));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("a|b|c"), '|');
    }

    #[test]
    fn test_parse_auto() {
        let doc = parse_auto(b"name;age\nAlice;30\nBob;25").unwrap();
        assert_eq!(doc.delimiter, ';');
        assert_eq!(doc.headers, vec!["name", "age"]);
        assert_eq!(doc.rows.len(), 2);
        assert!(!doc.is_single_column());
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode(bytes, "iso-8859-1");
        assert!(decoded.starts_with("Soci"));
    }

    #[test]
    fn test_single_column_flattens_to_scalar_list() {
        let doc = parse_auto(b"id\nalpha\nbeta\n").unwrap();
        assert!(doc.is_single_column());
        assert_eq!(doc.into_value(), serde_json::json!(["alpha", "beta"]));
    }

    #[test]
    fn test_multi_column_into_value_keeps_mappings() {
        let doc = parse_auto(b"a;b\n1;2\n").unwrap();
        assert_eq!(
            doc.into_value(),
            serde_json::json!([{"a": "1", "b": "2"}])
        );
    }
}
