//! Common types for the convert module

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// Conversion error types
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Converter unavailable: {0}")]
    Unavailable(String),

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("Converter produced invalid output: {0}")]
    InvalidOutput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

// ============================================================
// Formats
// ============================================================

/// Formats exchanged with the external converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Word document
    Docx,
    /// HTML
    Html,
    /// LaTeX
    Latex,
}

impl Format {
    /// Format name as understood by pandoc's `-f`/`-t`
    pub fn pandoc_name(&self) -> &'static str {
        match self {
            Format::Docx => "docx",
            Format::Html => "html",
            Format::Latex => "latex",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pandoc_name())
    }
}
