//! # Satchel Core
//!
//! General-purpose helpers shared across projects, including:
//! - A depth-bounded text searcher over arbitrary object graphs
//! - A thread-safe one-shot action gate
//! - Dictionary, list and set extension traits
//! - String helpers and a compiled regex cache
//! - A plain-text table printer
//! - A framework-independent selection model
//!
//! Nothing in here owns a runtime; every helper is usable on its own.

#![warn(clippy::all)]

pub mod collections;
pub mod fs;
pub mod once;
pub mod search;
pub mod selection;
pub mod strings;
pub mod table;
pub mod timer;
pub mod validate;

use std::path::{Path, PathBuf};

use serde::Deserialize;

// Re-export commonly used types
pub use collections::{IteratorExt, ListExt, MapExt, MultiMapExt, SetExt, TwoLevelExt};
pub use once::{GateStatus, OnceGate};
pub use search::{
    find_matches, search, Field, FieldValue, Matches, ObjectTextSearcher, Query, SearchTerm,
    Searchable,
};
pub use selection::{SearchableSelection, SelectionChange, SelectionModel};
pub use strings::{smart_combine, StrExt};
pub use table::TablePrinter;
pub use timer::PerformanceTimer;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static TRACING: OnceGate = OnceGate::new();

/// Initialize tracing for satchel components
pub fn init_tracing() {
    init_tracing_at("info");
}

/// Initialize tracing with `level` for the satchel crates. Logs go to stderr.
/// Only the first call installs a subscriber.
pub fn init_tracing_at(level: &str) {
    TRACING.ensure_infallible(|| {
        let mut filter = tracing_subscriber::EnvFilter::from_default_env();
        for target in ["satchel_core", "satchel_cli"] {
            match format!("{target}={level}").parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(_) => filter = filter.add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
            }
        }

        // A subscriber installed by the host application takes precedence
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Search settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Deepest nesting level the searcher descends to, counted from the root item
    pub max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: search::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Table printing settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Maximum number of rows rendered; `None` shows every row
    pub sample: Option<usize>,
    /// Fractional digits kept when formatting decimal cells
    pub decimal_places: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sample: None,
            decimal_places: table::DEFAULT_DECIMAL_PLACES,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SatchelConfig {
    pub search: SearchConfig,
    pub table: TableConfig,
    /// Enable debug mode
    pub debug: bool,
}

impl SatchelConfig {
    /// Load configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: SatchelConfig = serde_json::from_str(&raw)
            .map_err(|e| SatchelError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

/// Error types for satchel operations
#[derive(thiserror::Error, Debug)]
pub enum SatchelError {
    /// A required argument was absent or blank
    #[error("Missing argument: {param}")]
    MissingArgument { param: String },

    /// Two items produced the same dictionary key
    #[error("Duplicate key found: {key}")]
    DuplicateKey { key: String },

    /// An index or count fell outside the valid range
    #[error("Out of range: {what} is {value}, limit is {limit}")]
    OutOfRange {
        what: String,
        value: usize,
        limit: usize,
    },

    /// The call is not valid for the current arguments or state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Regex compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file operation failed on `path`
    #[error("Failed to {action} {}: {source}", .path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SatchelError {
    /// Create a missing argument error
    pub fn missing_argument(param: &str) -> Self {
        Self::MissingArgument {
            param: param.to_string(),
        }
    }

    /// Create a file error for `action` on `path`
    pub fn file(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::File {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create an out of range error
    pub fn out_of_range(what: &str, value: usize, limit: usize) -> Self {
        Self::OutOfRange {
            what: what.to_string(),
            value,
            limit,
        }
    }
}

/// Result type for satchel operations
pub type Result<T> = std::result::Result<T, SatchelError>;
