//! Field extraction module
//!
//! Reads the converted HTML of one submission and builds a [`Submission`].
//!
//! # Template
//!
//! | Table | Content                                        |
//! |-------|------------------------------------------------|
//! | 0     | Title                                          |
//! | 1     | Header row, then number / name / affiliations  |
//! | 2     | Affiliation number / institution name          |
//! | 3     | Abstract body                                  |
//! | 4     | Optional references, number / text             |
//!
//! # Example
//!
//! ```rust,no_run
//! use posterbook::{FieldExtractor, NameOptions, Pandoc, SymbolTable};
//!
//! let pandoc = Pandoc::locate(None).unwrap();
//! let names = NameOptions::default();
//! let extractor = FieldExtractor::new(&pandoc, SymbolTable::builtin(), &names);
//!
//! let html = std::fs::read_to_string("Doe_Jane.html").unwrap();
//! let submission = extractor.extract_html(&html).unwrap();
//! println!("{} authors", submission.authors().len());
//! ```

pub mod document;
mod extractor;
mod schema;
mod types;

// Re-export public API
pub use document::HtmlDocument;
pub use extractor::{capitalize, digit_groups, digits_only, AuthorRow, FieldExtractor};
pub use schema::{TableSlot, TemplateTables};
pub use types::{
    AffiliationRef, AffiliationTable, AuthorRecord, ExtractError, NameOptions, ReferenceTable,
    Result, Submission, POSTER_NUMBER_PLACEHOLDER, PRESENTING_MARKER,
};
