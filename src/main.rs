//! Collate CLI - convert, merge, and reshape structured data files
//!
//! # Commands
//!
//! ```bash
//! collate load data/              # Load a file or directory, merge, emit JSON
//! collate merge a.json b.json    # Merge JSON documents
//! collate rekey cfg.json name id # Rename a key at every depth
//! collate csv2json in.csv        # CSV → JSON with auto-detection
//! collate json2csv rows.json out.csv
//! collate xml doc.json           # Value → XML on stdout
//! collate html doc.json          # Value → HTML on stdout
//! collate show data.csv          # Pretty preview
//! collate fetch URL dest.png     # Download to disk
//! ```

use clap::{Parser, Subcommand};
use collate::error::{CollateError, CollateResult};
use collate::logs::{log_error, log_info, log_success, log_warning};
use collate::transform::MergeOutcome;
use collate::{files, loader, printer, render};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "collate")]
#[command(about = "Convert, merge, and reshape structured data files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a JSON/CSV file or a whole directory and emit merged JSON
    Load {
        /// Input file or directory
        input: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge JSON documents that share a structure
    Merge {
        /// Input JSON files
        inputs: Vec<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rename a key at every nesting depth in a JSON file or tree
    Rekey {
        /// JSON file, or directory of JSON files
        input: PathBuf,

        /// Key to rename
        old_key: String,

        /// New key name
        new_key: String,
    },

    /// Parse a CSV file (auto-detected encoding/delimiter) and emit JSON
    Csv2json {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write JSON row mappings to a CSV file
    Json2csv {
        /// Input JSON file (array of mappings)
        input: PathBuf,

        /// Output CSV file
        output: PathBuf,

        /// Append rows instead of overwriting
        #[arg(long)]
        append: bool,
    },

    /// Render a JSON file as XML
    Xml {
        /// Input JSON file
        input: PathBuf,
    },

    /// Render a JSON file as an HTML table document
    Html {
        /// Input JSON file
        input: PathBuf,

        /// Charset for the document header
        #[arg(long, default_value = "UTF-8")]
        encoding: String,
    },

    /// Pretty-print a file or inline value
    Show {
        /// CSV/JSON file path, inline JSON, or plain text
        source: String,

        /// Maximum rows/items to show
        #[arg(long, default_value = "10")]
        max_rows: usize,
    },

    /// Download a remote file to disk
    Fetch {
        /// Source URL
        url: String,

        /// Destination path
        dest: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli.command).await {
        log_error(err.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> CollateResult<()> {
    match command {
        Commands::Load { input, recursive, output } => run_load(&input, recursive, output.as_deref()),
        Commands::Merge { inputs, output } => run_merge(&inputs, output.as_deref()),
        Commands::Rekey { input, old_key, new_key } => run_rekey(&input, &old_key, &new_key),
        Commands::Csv2json { input, output } => run_csv2json(&input, output.as_deref()),
        Commands::Json2csv { input, output, append } => run_json2csv(&input, &output, append),
        Commands::Xml { input } => {
            let value = loader::load_file(&input)?;
            println!("{}", render::to_xml(&value)?);
            Ok(())
        }
        Commands::Html { input, encoding } => {
            let value = loader::load_file(&input)?;
            println!("{}", render::to_html(&value, &encoding));
            Ok(())
        }
        Commands::Show { source, max_rows } => {
            let source = printer::Source::resolve(&source);
            println!("{}", printer::preview(&source, max_rows)?);
            Ok(())
        }
        Commands::Fetch { url, dest } => {
            log_info(format!("Downloading {}...", url));
            let path = collate::fetch::save_from_url(&url, &dest).await?;
            log_success(format!("Saved {}", path.display()));
            Ok(())
        }
    }
}

fn run_load(input: &Path, recursive: bool, output: Option<&Path>) -> CollateResult<()> {
    let loaded = if input.is_dir() {
        loader::load_dir(input, recursive)?
    } else {
        loader::load(input)?
    };

    log_info(format!(
        "Loaded {}/{} file(s)",
        loaded.report.loaded, loaded.report.files_seen
    ));
    for skipped in &loaded.report.skipped {
        log_warning(format!("Skipped {}: {}", skipped.path.display(), skipped.reason));
    }
    if let collate::loader::Loaded::List(items) = &loaded.data {
        if loaded.report.loaded > 0 {
            log_warning(format!("Structures differ; emitting a {}-item list", items.len()));
        }
    }

    emit(&loaded.data.into_value(), output)
}

fn run_merge(inputs: &[PathBuf], output: Option<&Path>) -> CollateResult<()> {
    let mut structures = Vec::with_capacity(inputs.len());
    for path in inputs {
        structures.push(loader::load_file(path)?);
    }

    match collate::transform::merge(structures) {
        MergeOutcome::Merged(value) => {
            log_success(format!("Merged {} document(s)", inputs.len()));
            emit(&value, output)
        }
        MergeOutcome::Unmerged(values) => {
            log_warning("Structures differ; emitting the unmerged list");
            emit(&Value::Array(values), output)
        }
    }
}

fn run_rekey(input: &Path, old_key: &str, new_key: &str) -> CollateResult<()> {
    if input.is_dir() {
        let report = loader::rekey_json_tree(input, old_key, new_key)?;
        log_success(format!(
            "Rewrote {}/{} file(s)",
            report.loaded, report.files_seen
        ));
        for skipped in &report.skipped {
            log_warning(format!("Skipped {}: {}", skipped.path.display(), skipped.reason));
        }
    } else {
        loader::rekey_json_file(input, old_key, new_key)?;
        log_success(format!("Rewrote {}", input.display()));
    }
    Ok(())
}

fn run_csv2json(input: &Path, output: Option<&Path>) -> CollateResult<()> {
    let document = collate::parser::parse_file(input).map_err(|e| {
        CollateError::Load(collate::error::LoadError::Csv {
            path: input.to_path_buf(),
            message: e.to_string(),
        })
    })?;

    log_info(format!("Detected encoding: {}", document.encoding));
    log_info(format!("Detected delimiter: '{}'", document.delimiter));
    log_success(format!("Read {} row(s)", document.rows.len()));

    emit(&document.into_value(), output)
}

fn run_json2csv(input: &Path, output: &Path, append: bool) -> CollateResult<()> {
    let value = loader::load_file(input)?;
    let rows = value
        .as_array()
        .ok_or_else(|| CollateError::InvalidInput(format!("{} is not an array of records", input.display())))?;

    files::save_csv(rows, output, append)?;
    log_success(format!("Wrote {} row(s) to {}", rows.len(), output.display()));
    Ok(())
}

/// Emit a value as pretty JSON to a file or stdout.
fn emit(value: &Value, output: Option<&Path>) -> CollateResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CollateError::InvalidInput(e.to_string()))?;
    match output {
        Some(path) => {
            files::save_text(&text, path, false)?;
            log_success(format!("Wrote {}", path.display()));
        }
        None => println!("{}", text),
    }
    Ok(())
}
