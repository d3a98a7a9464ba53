//! posterbook - LaTeX poster booklets from templated abstract submissions
//!
//! Each submitter sends a Word document built from the abstract template
//! (title, authors, affiliations and body in fixed tables) plus an optional
//! figure named like the document. posterbook converts every document with
//! pandoc, reads the template fields, and appends one LaTeX macro call per
//! submission to a single output file, sorted by file name.
//!
//! # Modules
//!
//! - [`symbols`] - Unicode to LaTeX symbol fixes
//! - [`convert`] - pandoc wrapper and per-paragraph text conversion
//! - [`extract`] - template table reading
//! - [`assemble`] - LaTeX block rendering
//! - [`batch`] - directory scan, figure matching and the batch loop
//! - [`config`] - TOML configuration and CLI overrides
//! - [`progress`] - progress reporting
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use posterbook::{locate_converter, BatchDriver, BookletConfig, NoProgress};
//!
//! let config = BookletConfig::default();
//! let pandoc = locate_converter(&config).unwrap();
//! let report = BatchDriver::new(&pandoc, &config)
//!     .run_dir(Path::new("submissions"), &NoProgress)
//!     .unwrap();
//! println!("{} abstracts written", report.appended());
//! ```

pub mod assemble;
pub mod batch;
pub mod cli;
pub mod config;
pub mod convert;
pub mod extract;
pub mod progress;
pub mod symbols;

#[cfg(test)]
mod testing;

// Re-export public API
pub use assemble::{MarkupAssembler, TemplateOptions, BLOCK_SEPARATOR};
pub use batch::{
    discover_inputs, locate_converter, BatchDriver, BatchError, BatchReport, FileOutcome,
    FileReport, SubmissionInput,
};
pub use cli::{Cli, Commands, ConvertArgs};
pub use config::{BookletConfig, CliOverrides, Config, ConfigError, PosterNumbering};
pub use convert::{ConvertError, Format, MarkupConverter, Pandoc, TextConverter};
pub use extract::{
    AuthorRecord, ExtractError, FieldExtractor, NameOptions, Submission, TableSlot,
};
pub use progress::{
    BatchSummary, NoProgress, OutputMode, ProblemFile, ProcessingStage, ProgressCallback,
    ProgressTracker,
};
pub use symbols::{SymbolTable, SymbolTableError};

/// Process exit codes
pub mod exit_codes {
    /// Every submission was appended
    pub const SUCCESS: i32 = 0;
    /// Configuration, output or other fatal error
    pub const GENERAL_ERROR: i32 = 1;
    /// Input directory missing or holds no documents
    pub const INPUT_NOT_FOUND: i32 = 3;
    /// pandoc could not be found
    pub const CONVERTER_NOT_FOUND: i32 = 4;
    /// Batch finished but some submissions were skipped
    pub const PARTIAL_FAILURE: i32 = 5;
}
