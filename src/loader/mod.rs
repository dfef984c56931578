//! Loading JSON and CSV data from strings, files, and directories.
//!
//! A directory load parses every recognized file (`.json`, `.csv`) in
//! sorted path order, then hands the collected structures to
//! [`crate::transform::merge`]: same-shaped mappings come back as one
//! merged mapping, anything else as the unmerged list. A file that fails
//! to parse is skipped and recorded in the [`LoadReport`] — one bad file
//! never aborts a directory load.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, LoadResult};
use crate::models::NsValue;
use crate::transform::{merge, ns, rekey, MergeOutcome};

/// The data outcome of a load.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    /// Structures shared a shape and merged into one mapping, or the load
    /// produced a single structure.
    Merged(Value),
    /// Structures were incompatible; each is returned as loaded.
    List(Vec<Value>),
}

impl Loaded {
    /// Collapse to a JSON value; an unmerged list becomes an array.
    pub fn into_value(self) -> Value {
        match self {
            Loaded::Merged(value) => value,
            Loaded::List(values) => Value::Array(values),
        }
    }
}

/// A file skipped during a directory walk, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Per-file accounting for a directory load or tree rekey.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Recognized files seen.
    pub files_seen: usize,
    /// Files loaded (or rewritten) successfully.
    pub loaded: usize,
    /// Files skipped, with reasons.
    pub skipped: Vec<SkippedFile>,
}

impl LoadReport {
    fn skip(&mut self, path: &Path, reason: impl Into<String>) {
        self.skipped.push(SkippedFile {
            path: path.to_path_buf(),
            reason: reason.into(),
        });
    }
}

/// Result of a load with its report.
#[derive(Debug, Clone)]
pub struct DirLoad {
    pub data: Loaded,
    pub report: LoadReport,
}

/// Parse a JSON value from a string.
///
/// Leading and trailing whitespace is stripped; an all-whitespace string
/// is rejected rather than handed to the JSON parser.
pub fn load_str(text: &str) -> LoadResult<Value> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return Err(LoadError::EmptyInput);
    }
    Ok(serde_json::from_str(cleaned)?)
}

/// Load a single JSON or CSV file into a JSON value.
///
/// CSV files go through the auto-detecting parser; a single-column CSV
/// loads as a flat list of strings, a multi-column one as a list of row
/// mappings.
pub fn load_file(path: &Path) -> LoadResult<Value> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    match extension(path).as_deref() {
        Some("json") => {
            let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
        Some("csv") => {
            let document = crate::parser::parse_file(path).map_err(|e| LoadError::Csv {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            Ok(document.into_value())
        }
        _ => Err(LoadError::Unsupported(path.to_path_buf())),
    }
}

/// Load a file or a whole directory.
///
/// Files yield a single-structure [`DirLoad`] with a trivial report;
/// directories go through [`load_dir`] (non-recursive).
pub fn load(path: &Path) -> LoadResult<DirLoad> {
    if path.is_dir() {
        return load_dir(path, false);
    }
    let value = load_file(path)?;
    Ok(DirLoad {
        data: Loaded::Merged(value),
        report: LoadReport {
            files_seen: 1,
            loaded: 1,
            skipped: Vec::new(),
        },
    })
}

/// Load every recognized data file in a directory and merge the results.
///
/// Files are visited in sorted path order so the accumulation order of
/// merged scalars is deterministic across platforms. A JSON file
/// contributes one structure; a CSV file contributes each of its rows.
/// Unparseable files are skipped and reported.
pub fn load_dir(path: &Path, recursive: bool) -> LoadResult<DirLoad> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(LoadError::NotADirectory(path.to_path_buf()));
    }

    let files = data_files(path, recursive)?;
    let mut report = LoadReport {
        files_seen: files.len(),
        ..LoadReport::default()
    };

    let mut structures: Vec<Value> = Vec::new();
    for file in &files {
        match load_file(file) {
            Ok(Value::Array(rows)) if is_csv(file) => {
                // CSV rows extend the sequence individually so that rows
                // from several files can merge with each other.
                report.loaded += 1;
                structures.extend(rows);
            }
            Ok(value) => {
                report.loaded += 1;
                structures.push(value);
            }
            Err(err) => report.skip(file, err.to_string()),
        }
    }

    let data = if structures.is_empty() {
        Loaded::List(Vec::new())
    } else {
        match merge(structures) {
            MergeOutcome::Merged(value) => Loaded::Merged(value),
            MergeOutcome::Unmerged(values) => Loaded::List(values),
        }
    };

    Ok(DirLoad { data, report })
}

/// Load a file or directory and project the result into a namespace.
pub fn load_ns(path: &Path) -> LoadResult<NsValue> {
    let loaded = load(path)?;
    Ok(ns::to_namespace(loaded.data.into_value()))
}

/// Rename a key throughout one JSON file, rewriting it in place.
pub fn rekey_json_file(path: &Path, old_key: &str, new_key: &str) -> LoadResult<()> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut value = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    rekey::replace_key(&mut value, old_key, new_key);
    let out = serde_json::to_string_pretty(&value).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, out).map_err(|source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Rename a key throughout every `*.json` file under a directory tree.
///
/// Files that cannot be read or parsed are skipped and reported.
pub fn rekey_json_tree(dir: &Path, old_key: &str, new_key: &str) -> LoadResult<LoadReport> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }

    let files: Vec<PathBuf> = walk(dir, true)?
        .into_iter()
        .filter(|p| extension(p).as_deref() == Some("json"))
        .collect();

    let mut report = LoadReport {
        files_seen: files.len(),
        ..LoadReport::default()
    };

    for file in &files {
        match rekey_json_file(file, old_key, new_key) {
            Ok(()) => report.loaded += 1,
            Err(err) => report.skip(file, err.to_string()),
        }
    }

    Ok(report)
}

/// Lowercased file extension.
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn is_csv(path: &Path) -> bool {
    extension(path).as_deref() == Some("csv")
}

/// Recognized data files under `dir`, sorted by path.
fn data_files(dir: &Path, recursive: bool) -> LoadResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = walk(dir, recursive)?
        .into_iter()
        .filter(|p| matches!(extension(p).as_deref(), Some("json") | Some("csv")))
        .collect();
    files.sort();
    Ok(files)
}

/// All files under `dir`, sorted, optionally descending into subdirectories.
fn walk(dir: &Path, recursive: bool) -> LoadResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|source| LoadError::Io {
            path: current.clone(),
            source,
        })?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            } else if recursive && path.is_dir() {
                pending.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
