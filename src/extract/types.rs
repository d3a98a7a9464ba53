//! Common types for the extract module

use std::collections::BTreeMap;
use thiserror::Error;

use super::schema::TableSlot;
use crate::convert::ConvertError;

// ============================================================
// Constants
// ============================================================

/// Poster number used until numbers are assigned
pub const POSTER_NUMBER_PLACEHOLDER: &str = "0";

/// Marker flagging the presenting author
pub const PRESENTING_MARKER: char = '*';

// ============================================================
// Error Types
// ============================================================

/// Extraction error types
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No tables found; the submitter likely did not use the abstract template")]
    NoTables,

    #[error("Expected at least 4 tables, found {found}")]
    MissingTables { found: usize },

    #[error("Malformed {slot} table: {reason}")]
    MalformedTable { slot: TableSlot, reason: String },

    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConvertError),
}

impl ExtractError {
    /// Structural mismatch with the template, as opposed to a converter failure
    pub fn is_malformed(&self) -> bool {
        !matches!(self, ExtractError::Conversion(_))
    }

    pub(crate) fn malformed(slot: TableSlot, reason: impl Into<String>) -> Self {
        ExtractError::MalformedTable {
            slot,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

// ============================================================
// Core Data Structures
// ============================================================

/// One author row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    /// Flagged with the presenting marker
    pub presenting: bool,
    /// Name tokens as written, marker removed
    pub name_parts: Vec<String>,
    /// Converted LaTeX name, bold when presenting
    pub display_name: String,
}

/// Affiliation numbers cited by one author, as written
pub type AffiliationRef = Vec<String>;

/// Affiliation number to converted institution name
pub type AffiliationTable = BTreeMap<u32, String>;

/// Reference number to converted reference text
pub type ReferenceTable = BTreeMap<u32, String>;

/// One submitter's abstract, ready for assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Converted title
    pub title: String,
    authors: Vec<AuthorRecord>,
    affiliation_refs: Vec<AffiliationRef>,
    /// Converted institution names
    pub affiliations: AffiliationTable,
    /// Converted body text
    pub body_text: String,
    /// Converted references (empty unless the fifth table was present)
    pub references: ReferenceTable,
    /// Figure filename, when a matching figure exists
    pub figure_file: Option<String>,
    /// Poster number
    pub poster_number: String,
}

impl Submission {
    /// Create a submission with no authors or affiliations
    pub fn new(title: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            affiliation_refs: Vec::new(),
            affiliations: AffiliationTable::new(),
            body_text: body_text.into(),
            references: ReferenceTable::new(),
            figure_file: None,
            poster_number: POSTER_NUMBER_PLACEHOLDER.to_string(),
        }
    }

    /// Add an author together with the affiliation numbers it cites
    pub fn push_author(&mut self, author: AuthorRecord, refs: AffiliationRef) {
        self.authors.push(author);
        self.affiliation_refs.push(refs);
    }

    /// Insert an affiliation, returning the name it replaced
    pub fn insert_affiliation(&mut self, number: u32, name: impl Into<String>) -> Option<String> {
        self.affiliations.insert(number, name.into())
    }

    /// Authors in row order
    pub fn authors(&self) -> &[AuthorRecord] {
        &self.authors
    }

    /// Affiliation references, index-aligned with [`Submission::authors`]
    pub fn affiliation_refs(&self) -> &[AffiliationRef] {
        &self.affiliation_refs
    }

    /// Authors paired with their affiliation numbers
    pub fn authors_with_refs(&self) -> impl Iterator<Item = (&AuthorRecord, &AffiliationRef)> {
        self.authors.iter().zip(self.affiliation_refs.iter())
    }

    /// Figure filename, if any and non-empty
    pub fn figure(&self) -> Option<&str> {
        self.figure_file.as_deref().filter(|f| !f.is_empty())
    }

    #[must_use]
    pub fn with_figure(mut self, figure: impl Into<String>) -> Self {
        self.figure_file = Some(figure.into());
        self
    }

    #[must_use]
    pub fn with_poster_number(mut self, number: impl Into<String>) -> Self {
        self.poster_number = number.into();
        self
    }
}

// ============================================================
// Options
// ============================================================

/// Author name formatting options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameOptions {
    /// Tokens left as written instead of capitalized
    pub no_capitalize: Vec<String>,
    /// Match `no_capitalize` ignoring case
    pub case_insensitive: bool,
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            no_capitalize: vec!["van".to_string(), "der".to_string(), "van't".to_string()],
            case_insensitive: false,
        }
    }
}

impl NameOptions {
    /// Whether `token` is a particle that keeps its spelling
    pub fn is_particle(&self, token: &str) -> bool {
        if self.case_insensitive {
            self.no_capitalize.iter().any(|p| p.eq_ignore_ascii_case(token))
        } else {
            self.no_capitalize.iter().any(|p| p == token)
        }
    }
}

// ============================================================
// Tests
// ============================================================
