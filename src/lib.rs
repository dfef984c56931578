//! # Collate - convert, merge, and reshape structured data files
//!
//! Collate is a grab-bag of utilities for everyday data plumbing: loading
//! JSON/CSV files and whole directories into one JSON value tree, merging
//! same-shaped mappings, renaming keys at any depth, projecting values
//! into an attribute-style namespace, rendering XML/HTML, and downloading
//! remote files.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  JSON / CSV │────▶│   Loader    │────▶│    Merge    │────▶│ One mapping │
//! │ (dir/files) │     │ (auto-enc)  │     │ (or a list) │     │  (or list)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use collate::transform::{merge, MergeOutcome};
//! use serde_json::json;
//!
//! let outcome = merge(vec![json!({"a": 1}), json!({"a": 2})]);
//! assert_eq!(outcome, MergeOutcome::Merged(json!({"a": [1, 2]})));
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per boundary concern
//! - [`models`] - `Namespace` / `NsValue` domain types
//! - [`transform`] - pure transforms: namespace conversion, merge, rekey
//! - [`parser`] - CSV parsing with auto-detection
//! - [`loader`] - file/directory loading and merging
//! - [`files`] - text and CSV file helpers
//! - [`render`] - XML and HTML rendering
//! - [`fetch`] - async downloads
//! - [`printer`] - console previews
//! - [`logs`] - boundary logging

// Core modules
pub mod error;
pub mod models;

// Pure transforms
pub mod transform;

// Parsing
pub mod parser;

// Loading
pub mod loader;

// File helpers
pub mod files;

// Rendering
pub mod render;

// Downloads
pub mod fetch;

// Previews
pub mod printer;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    CollateError,
    FetchError,
    FileError,
    LoadError,
    PrintError,
    RenderError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Namespace, NsValue};

// =============================================================================
// Re-exports - Transforms
// =============================================================================

pub use transform::{merge, replace_key, same_structure, to_namespace, to_value, MergeOutcome};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    detect_delimiter,
    detect_encoding,
    parse_auto,
    parse_file,
    parse_rows,
    CsvDocument,
    CsvError,
};

// =============================================================================
// Re-exports - Loading
// =============================================================================

pub use loader::{
    load, load_dir, load_file, load_ns, load_str, rekey_json_file, rekey_json_tree, DirLoad,
    LoadReport, Loaded, SkippedFile,
};

// =============================================================================
// Re-exports - Files
// =============================================================================

pub use files::{csv_to_json_file, read_csv, save_csv};

// =============================================================================
// Re-exports - Rendering
// =============================================================================

pub use render::{to_html, to_xml, to_xml_with_encoding};

// =============================================================================
// Re-exports - Fetch
// =============================================================================

pub use fetch::{file_bytes, save_from_url};

// =============================================================================
// Re-exports - Previews
// =============================================================================

pub use printer::{preview, Source};
