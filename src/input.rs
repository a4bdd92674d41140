//! Resolution of the data string to encode
//!
//! The payload comes from exactly one of: a literal `--data` value, a
//! `--data-file` path, or standard input when `--data-file` is `-`.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Marker value for `--data-file` that selects standard input
pub const STDIN_MARKER: &str = "-";

const UTF8_BOM: char = '\u{feff}';

/// Where the payload is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Literal value given on the command line
    Literal(String),
    /// Path to a UTF-8 text file
    File(PathBuf),
    /// The whole of standard input
    Stdin,
}

impl DataSource {
    /// Build a source from the two mutually exclusive command-line options.
    pub fn from_options(data: Option<String>, data_file: Option<String>) -> Result<Self> {
        match (data, data_file) {
            (Some(data), None) => Ok(Self::Literal(data)),
            (None, Some(file)) if file == STDIN_MARKER => Ok(Self::Stdin),
            (None, Some(file)) => Ok(Self::File(PathBuf::from(file))),
            (Some(_), Some(_)) | (None, None) => Err(Error::Usage(
                "exactly one of --data or --data-file must be provided".to_string(),
            )),
        }
    }

    /// Check that a file source exists before any processing starts.
    pub fn check_exists(&self) -> Result<()> {
        match self {
            Self::File(path) => require_file(path),
            Self::Literal(_) | Self::Stdin => Ok(()),
        }
    }

    /// Produce the payload string.
    pub fn resolve(&self) -> Result<String> {
        match self {
            Self::Literal(data) => Ok(data.clone()),
            Self::File(path) => {
                require_file(path)?;
                let file = File::open(path)?;
                read_text(file)
            }
            Self::Stdin => read_text(io::stdin().lock()),
        }
    }

    /// Short label for logs and reports.
    pub fn describe(&self) -> String {
        match self {
            Self::Literal(_) => "literal".to_string(),
            Self::File(path) => format!("file {}", path.display()),
            Self::Stdin => "stdin".to_string(),
        }
    }
}

/// Read an entire stream as UTF-8 text, dropping a leading byte-order mark.
///
/// Line breaks and trailing whitespace are kept verbatim.
pub fn read_text<R: Read>(mut reader: R) -> Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    if let Some(stripped) = text.strip_prefix(UTF8_BOM) {
        text = stripped.to_string();
    }
    Ok(text)
}

/// Fail with [`Error::ResourceNotFound`] unless `path` is an existing regular file.
pub fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::ResourceNotFound(path.to_path_buf()))
    }
}
