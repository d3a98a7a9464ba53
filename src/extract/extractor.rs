//! Field extractor
//!
//! Pulls title, authors, affiliations, body and references out of the
//! template tables and converts them to LaTeX.

use scraper::ElementRef;
use tracing::{debug, warn};

use super::document::{self, CellKind, HtmlDocument};
use super::schema::{TableSlot, TemplateTables};
use super::types::{
    AffiliationRef, AuthorRecord, ExtractError, NameOptions, ReferenceTable, Result, Submission,
    PRESENTING_MARKER,
};
use crate::convert::{MarkupConverter, TextConverter};
use crate::symbols::SymbolTable;

/// Author row after parsing, before name conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRow {
    /// Author sequence number, digits only
    pub number: String,
    pub presenting: bool,
    pub name_parts: Vec<String>,
    pub affiliation_refs: AffiliationRef,
}

impl AuthorRow {
    /// Parse the three author cells.
    ///
    /// Returns `None` for rows without a number or without a name, which are
    /// blank or separator rows in practice.
    pub fn parse(number_cell: &str, name_cell: &str, affiliation_cell: &str) -> Option<Self> {
        let number = digits_only(number_cell);
        if number.is_empty() {
            return None;
        }

        let presenting = name_cell.contains(PRESENTING_MARKER);
        let name: String = name_cell.chars().filter(|&c| c != PRESENTING_MARKER).collect();
        let name_parts: Vec<String> = name.split_whitespace().map(str::to_string).collect();
        if name_parts.is_empty() {
            return None;
        }

        Some(Self {
            number,
            presenting,
            name_parts,
            affiliation_refs: digit_groups(affiliation_cell),
        })
    }
}

/// Extracts a [`Submission`] from a converted document
pub struct FieldExtractor<'a, C: MarkupConverter + ?Sized> {
    text: TextConverter<'a, C>,
    names: &'a NameOptions,
    include_references: bool,
}

impl<'a, C: MarkupConverter + ?Sized> FieldExtractor<'a, C> {
    pub fn new(converter: &'a C, symbols: &'a SymbolTable, names: &'a NameOptions) -> Self {
        Self {
            text: TextConverter::new(converter, symbols),
            names,
            include_references: false,
        }
    }

    /// Read the optional fifth table as references.
    ///
    /// Off by default; an extra table is then ignored whatever it holds.
    pub fn with_references(mut self, include: bool) -> Self {
        self.include_references = include;
        self
    }

    /// Extract from HTML markup
    pub fn extract_html(&self, markup: &str) -> Result<Submission> {
        self.extract(&HtmlDocument::parse(markup))
    }

    /// Extract from a parsed document
    pub fn extract(&self, document: &HtmlDocument) -> Result<Submission> {
        let tables = TemplateTables::locate(document)?;

        let title = self.first_cell_markup(TableSlot::Title, tables.title)?;
        let body = self.first_cell_markup(TableSlot::Body, tables.body)?;
        let mut submission = Submission::new(title, body);

        self.extract_authors(tables.authors, &mut submission)?;
        self.extract_affiliations(tables.affiliations, &mut submission)?;
        match tables.references {
            Some(references) if self.include_references => {
                submission.references = self.extract_references(references)?;
            }
            Some(_) => debug!("references table present but not rendered"),
            None => {}
        }

        debug!(
            authors = submission.authors().len(),
            affiliations = submission.affiliations.len(),
            references = submission.references.len(),
            "extracted submission"
        );
        Ok(submission)
    }

    /// Converted content of a table's first cell
    fn first_cell_markup(&self, slot: TableSlot, table: ElementRef<'_>) -> Result<String> {
        let cell = document::first_cell(table)
            .ok_or_else(|| ExtractError::malformed(slot, "table has no cells"))?;
        self.convert_children(cell)
    }

    fn convert_children(&self, cell: ElementRef<'_>) -> Result<String> {
        let mut out = String::new();
        for fragment in document::child_fragments(cell) {
            out.push_str(&self.text.convert(&fragment)?);
        }
        Ok(out)
    }

    fn extract_authors(&self, table: ElementRef<'_>, submission: &mut Submission) -> Result<()> {
        // First row is the column header
        for (i, row) in document::rows(table).into_iter().enumerate().skip(1) {
            let row_number = i + 1;
            let cells = document::cells(row, CellKind::Data);
            let number = cell_text(&cells, 0, TableSlot::Authors, row_number, "number")?;
            if digits_only(&number).is_empty() {
                continue;
            }
            let name = cell_text(&cells, 1, TableSlot::Authors, row_number, "name")?;
            let affiliations = cell_text(&cells, 2, TableSlot::Authors, row_number, "affiliation")?;

            let Some(parsed) = AuthorRow::parse(&number, &name, &affiliations) else {
                continue;
            };

            let display_name = self.format_author_name(&parsed.name_parts, parsed.presenting)?;
            submission.push_author(
                AuthorRecord {
                    presenting: parsed.presenting,
                    name_parts: parsed.name_parts,
                    display_name,
                },
                parsed.affiliation_refs,
            );
        }
        Ok(())
    }

    /// Capitalize and convert each name token, bold the whole name if presenting
    pub fn format_author_name(&self, name_parts: &[String], presenting: bool) -> Result<String> {
        let mut tokens = Vec::with_capacity(name_parts.len());
        for part in name_parts {
            let token = if self.names.is_particle(part) {
                part.clone()
            } else {
                capitalize(part)
            };
            tokens.push(self.text.convert_plain(&token)?);
        }

        let name = tokens.join(" ");
        if presenting {
            Ok(format!(r"\textbf{{{}}}", name))
        } else {
            Ok(name)
        }
    }

    fn extract_affiliations(&self, table: ElementRef<'_>, submission: &mut Submission) -> Result<()> {
        for (i, row) in document::rows(table).into_iter().enumerate() {
            let row_number = i + 1;
            let cells = document::cells(row, CellKind::Any);
            let number = cell_text(&cells, 0, TableSlot::Affiliations, row_number, "number")?;
            let Some(number) = parse_number(&number, TableSlot::Affiliations, row_number) else {
                continue;
            };

            let name_cell = cells.get(1).copied().ok_or_else(|| {
                missing_cell(TableSlot::Affiliations, row_number, "name", cells.len())
            })?;
            let name = document::first_paragraph(name_cell)
                .map(document::text)
                .unwrap_or_else(|| document::text(name_cell));
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            let converted = self.text.convert_plain(name)?;
            if let Some(previous) = submission.insert_affiliation(number, converted) {
                warn!(
                    number,
                    previous = %previous,
                    "duplicate affiliation number; keeping the last one"
                );
            }
        }
        Ok(())
    }

    fn extract_references(&self, table: ElementRef<'_>) -> Result<ReferenceTable> {
        let mut references = ReferenceTable::new();
        for (i, row) in document::rows(table).into_iter().enumerate() {
            let row_number = i + 1;
            let cells = document::cells(row, CellKind::Any);
            let number = cell_text(&cells, 0, TableSlot::References, row_number, "number")?;
            let Some(number) = parse_number(&number, TableSlot::References, row_number) else {
                continue;
            };

            let text_cell = cells.get(1).copied().ok_or_else(|| {
                missing_cell(TableSlot::References, row_number, "text", cells.len())
            })?;
            let text = self.convert_children(text_cell)?;
            if !text.trim().is_empty() {
                references.insert(number, text.trim().to_string());
            }
        }
        Ok(references)
    }
}

// ============================================================
// Helpers
// ============================================================

fn missing_cell(slot: TableSlot, row: usize, what: &str, found: usize) -> ExtractError {
    ExtractError::malformed(
        slot,
        format!("row {} has no {} cell ({} cells)", row, what, found),
    )
}

fn cell_text(
    cells: &[ElementRef<'_>],
    index: usize,
    slot: TableSlot,
    row: usize,
    what: &str,
) -> Result<String> {
    cells
        .get(index)
        .map(|cell| document::text(*cell))
        .ok_or_else(|| missing_cell(slot, row, what, cells.len()))
}

/// Positive number of an affiliation or reference row.
///
/// `None` skips the row: no digits, zero, or too large for `u32`.
fn parse_number(cell: &str, slot: TableSlot, row: usize) -> Option<u32> {
    let digits = digits_only(cell);
    if digits.is_empty() {
        return None;
    }
    match digits.parse::<u32>() {
        Ok(0) => {
            debug!(table = %slot, row, "row numbered 0; skipping");
            None
        }
        Ok(number) => Some(number),
        Err(_) => {
            warn!(table = %slot, row, number = %digits, "row number too large; skipping");
            None
        }
    }
}

/// Keep ASCII digits only
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Runs of ASCII digits, in order
pub fn digit_groups(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect()
}

/// Upper-case the first character, lower-case the rest
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ============================================================
// Tests
// ============================================================
