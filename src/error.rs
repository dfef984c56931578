//! Error types for the collate conversion utilities.
//!
//! This module defines one error enum per boundary concern:
//!
//! - [`LoadError`] - JSON/CSV loading errors (files, directories, strings)
//! - [`FileError`] - text and CSV file I/O errors
//! - [`RenderError`] - XML/HTML rendering errors
//! - [`FetchError`] - download errors
//! - [`PrintError`] - preview/pretty-print errors
//! - [`CollateError`] - top-level CLI errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! The pure transforms in [`crate::transform`] have no error type: they are
//! total over well-formed JSON values and signal non-merge outcomes through
//! [`crate::transform::MergeOutcome`] instead of failing.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors while loading JSON or CSV data from strings, files, or directories.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not exist.
    #[error("Path does not exist: {0}")]
    NotFound(PathBuf),

    /// Expected a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The file extension is not one of the recognized data formats.
    #[error("Unsupported file type: {0}")]
    Unsupported(PathBuf),

    /// Empty input string.
    #[error("Empty JSON string provided")]
    EmptyInput,

    /// Failed to read a file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON content.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid JSON text (no file involved).
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid CSV content.
    #[error("Invalid CSV in {path}: {message}")]
    Csv { path: PathBuf, message: String },
}

// =============================================================================
// File Errors
// =============================================================================

/// Errors during text and CSV file operations.
#[derive(Debug, Error)]
pub enum FileError {
    /// The path is not an existing file.
    #[error("File does not exist: {0}")]
    NotFound(PathBuf),

    /// Expected a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// I/O failure with path context.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV rows must be mappings.
    #[error("Row {0} is not a mapping; cannot write CSV")]
    NotAMapping(usize),

    /// CSV serialization failure.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// CSV content failed to parse.
    #[error("Invalid CSV in {path}: {message}")]
    InvalidCsv { path: PathBuf, message: String },
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors while rendering a value tree as XML.
#[derive(Debug, Error)]
pub enum RenderError {
    /// XML documents need exactly one root element.
    #[error("Only one root node allowed, got {0}")]
    MultipleRoots(usize),

    /// The XML root must be a mapping.
    #[error("XML root must be a mapping")]
    NonMappingRoot,
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors from the download helpers.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connection, status, or body stream).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Local I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The download completed but the file on disk is empty.
    #[error("Downloaded file is empty: {0}")]
    EmptyDownload(PathBuf),

    /// The file to read back does not exist.
    #[error("File does not exist: {0}")]
    NotFound(PathBuf),
}

// =============================================================================
// Print Errors
// =============================================================================

/// Errors while building a console preview.
#[derive(Debug, Error)]
pub enum PrintError {
    /// Failed to read the previewed file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The previewed file is not valid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The previewed file is not valid CSV.
    #[error("Invalid CSV in {path}: {message}")]
    Csv { path: PathBuf, message: String },
}

// =============================================================================
// Top-level Errors
// =============================================================================

/// Top-level error type returned by the CLI command handlers.
///
/// Wraps all lower-level errors and adds CLI-specific variants.
#[derive(Debug, Error)]
pub enum CollateError {
    /// Loading error.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// File error.
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Render error.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Fetch error.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Print error.
    #[error("Print error: {0}")]
    Print(#[from] PrintError),

    /// The input had the wrong shape for the requested command.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for preview operations.
pub type PrintResult<T> = Result<T, PrintError>;

/// Result type for CLI operations.
pub type CollateResult<T> = Result<T, CollateError>;
