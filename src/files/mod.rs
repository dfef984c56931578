//! Text-file and directory helpers.
//!
//! Thin wrappers over `std::fs` with path context on every error:
//! saving/reading text (whole strings or line lists), and listing file or
//! directory names with an extension filter. CSV writing lives in the
//! `csv` submodule.

pub mod csv;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{FileError, FileResult};

pub use csv::{csv_to_json_file, read_csv, save_csv};

fn io_err(path: &Path, source: std::io::Error) -> FileError {
    FileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write a string to a file, creating parent directories as needed.
///
/// With `append` set, the content is appended instead of overwriting.
pub fn save_text(text: &str, path: &Path, append: bool) -> FileResult<()> {
    let mut file = open_for_write(path, append)?;
    file.write_all(text.as_bytes()).map_err(|e| io_err(path, e))
}

/// Write lines to a file, one per line, creating parent directories as
/// needed.
pub fn save_lines<S: AsRef<str>>(lines: &[S], path: &Path, append: bool) -> FileResult<()> {
    let mut file = open_for_write(path, append)?;
    for line in lines {
        writeln!(file, "{}", line.as_ref()).map_err(|e| io_err(path, e))?;
    }
    Ok(())
}

fn open_for_write(path: &Path, append: bool) -> FileResult<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_err(path, e))?;
        }
    }
    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    options.open(path).map_err(|e| io_err(path, e))
}

/// Read a file's content as one string.
pub fn read_text(path: &Path) -> FileResult<String> {
    if !path.is_file() {
        return Err(FileError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| io_err(path, e))
}

/// Read a file's content as trimmed lines.
pub fn read_lines(path: &Path) -> FileResult<Vec<String>> {
    let text = read_text(path)?;
    Ok(text.lines().map(|line| line.trim().to_string()).collect())
}

/// File names in a directory, optionally filtered by extension, sorted.
///
/// Extensions may be given with or without the leading dot; an empty
/// filter list returns every file.
pub fn file_names(dir: &Path, extensions: &[&str]) -> FileResult<Vec<String>> {
    let normalized: Vec<String> = extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .collect();

    let mut names = Vec::new();
    for entry in read_dir(dir)? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = normalized.is_empty()
            || path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| normalized.contains(&e.to_lowercase()));
        if matches {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Directory names in a directory, sorted.
pub fn dir_names(dir: &Path) -> FileResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in read_dir(dir)? {
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

fn read_dir(dir: &Path) -> FileResult<Vec<fs::DirEntry>> {
    if !dir.is_dir() {
        return Err(FileError::NotADirectory(dir.to_path_buf()));
    }
    let entries = fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    Ok(entries.flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_read_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/notes.txt");

        save_text("Hello, World!", &path, false).unwrap();
        assert_eq!(read_text(&path).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");

        save_text("one\n", &path, false).unwrap();
        save_text("two\n", &path, true).unwrap();
        assert_eq!(read_text(&path).unwrap(), "one\ntwo\n");

        // Overwrite drops previous content.
        save_text("three\n", &path, false).unwrap();
        assert_eq!(read_text(&path).unwrap(), "three\n");
    }

    #[test]
    fn test_save_and_read_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.txt");

        save_lines(&["Line 1", "Line 2", "Line 3"], &path, false).unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["Line 1", "Line 2", "Line 3"]);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_text(Path::new("/no/such/file.txt")),
            Err(FileError::NotFound(_))
        ));
    }

    #[test]
    fn test_file_names_with_filter() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("c.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        // Leading dot optional, results sorted, directories ignored.
        assert_eq!(file_names(dir.path(), &["json"]).unwrap(), vec!["a.json", "b.json"]);
        assert_eq!(file_names(dir.path(), &[".json"]).unwrap(), vec!["a.json", "b.json"]);
        assert_eq!(
            file_names(dir.path(), &[]).unwrap(),
            vec!["a.json", "b.json", "c.txt"]
        );
    }

    #[test]
    fn test_dir_names() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("zeta")).unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::write(dir.path().join("file.txt"), "x").unwrap();

        assert_eq!(dir_names(dir.path()).unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_listing_requires_directory() {
        assert!(matches!(
            file_names(Path::new("/no/such/dir"), &[]),
            Err(FileError::NotADirectory(_))
        ));
    }
}
