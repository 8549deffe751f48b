//! Error types for glossary lookups.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures a lookup can report back to the command line.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The query does not compile as a regular expression.
    #[error("Invalid query: {query}\n    {source}")]
    InvalidQuery {
        query: String,
        #[source]
        source: regex::Error,
    },

    /// The glossary text or cache could not be opened, read or decoded.
    #[error("Error reading data from: {}\n{source}", .path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// None of the data files for the requested direction exist.
    #[error("{language} data not found:{}", list_paths(.paths))]
    MissingData {
        language: &'static str,
        paths: Vec<PathBuf>,
    },
}

impl LookupError {
    pub fn invalid_file(path: &Path, source: io::Error) -> Self {
        LookupError::InvalidFile {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn list_paths(paths: &[PathBuf]) -> String {
    match paths {
        [single] => format!(" {}", single.display()),
        _ => paths
            .iter()
            .map(|p| format!("\n    {}", p.display()))
            .collect(),
    }
}

/// A convenience `Result` type alias using the crate's `LookupError` type.
pub type Result<T> = std::result::Result<T, LookupError>;
