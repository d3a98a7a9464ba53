//! Abstract template schema
//!
//! The submission template is a sequence of tables with fixed meanings.
//! [`TemplateTables::locate`] validates the document against that layout
//! once, so later stages address tables by name instead of by index.

use std::fmt;

use scraper::ElementRef;
use tracing::warn;

use super::document::HtmlDocument;
use super::types::{ExtractError, Result};

/// Named table positions of the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSlot {
    /// Abstract title
    Title,
    /// Author numbers, names and affiliation numbers (first row is a header)
    Authors,
    /// Affiliation numbers and institution names
    Affiliations,
    /// Abstract body
    Body,
    /// Numbered references (optional)
    References,
}

impl TableSlot {
    /// Slots every submission must fill
    pub const REQUIRED: [TableSlot; 4] = [
        TableSlot::Title,
        TableSlot::Authors,
        TableSlot::Affiliations,
        TableSlot::Body,
    ];

    /// Position of the table in document order
    pub fn index(&self) -> usize {
        match self {
            TableSlot::Title => 0,
            TableSlot::Authors => 1,
            TableSlot::Affiliations => 2,
            TableSlot::Body => 3,
            TableSlot::References => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TableSlot::Title => "title",
            TableSlot::Authors => "authors",
            TableSlot::Affiliations => "affiliations",
            TableSlot::Body => "body",
            TableSlot::References => "references",
        }
    }
}

impl fmt::Display for TableSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Template tables of one document
#[derive(Debug, Clone, Copy)]
pub struct TemplateTables<'a> {
    pub title: ElementRef<'a>,
    pub authors: ElementRef<'a>,
    pub affiliations: ElementRef<'a>,
    pub body: ElementRef<'a>,
    pub references: Option<ElementRef<'a>>,
}

impl<'a> TemplateTables<'a> {
    /// Assign the document's tables to slots, failing if any required one is missing
    pub fn locate(document: &'a HtmlDocument) -> Result<Self> {
        let tables = document.tables();
        match tables.len() {
            0 => return Err(ExtractError::NoTables),
            found if found < TableSlot::REQUIRED.len() => {
                return Err(ExtractError::MissingTables { found })
            }
            found if found > TableSlot::References.index() + 1 => {
                warn!(found, "ignoring tables after the references table");
            }
            _ => {}
        }

        Ok(Self {
            title: tables[TableSlot::Title.index()],
            authors: tables[TableSlot::Authors.index()],
            affiliations: tables[TableSlot::Affiliations.index()],
            body: tables[TableSlot::Body.index()],
            references: tables.get(TableSlot::References.index()).copied(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::document::text;

    fn doc_with_tables(n: usize) -> HtmlDocument {
        let tables: String = (0..n)
            .map(|i| format!("<table><tr><td>t{}</td></tr></table>", i))
            .collect();
        HtmlDocument::parse(&format!("<html><body>{}</body></html>", tables))
    }

    #[test]
    fn test_slot_indices_follow_template_order() {
        for (i, slot) in TableSlot::REQUIRED.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
        assert_eq!(TableSlot::References.index(), 4);
    }

    #[test]
    fn test_no_tables() {
        let doc = HtmlDocument::parse("<p>Just text, no template</p>");
        assert!(matches!(TemplateTables::locate(&doc), Err(ExtractError::NoTables)));
    }

    #[test]
    fn test_too_few_tables() {
        for n in 1..4 {
            let doc = doc_with_tables(n);
            match TemplateTables::locate(&doc) {
                Err(ExtractError::MissingTables { found }) => assert_eq!(found, n),
                other => panic!("expected MissingTables, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_locate_required_tables() {
        let doc = doc_with_tables(4);
        let tables = TemplateTables::locate(&doc).unwrap();
        assert_eq!(text(tables.title), "t0");
        assert_eq!(text(tables.body), "t3");
        assert!(tables.references.is_none());
    }

    #[test]
    fn test_locate_references_table() {
        let doc = doc_with_tables(6);
        let tables = TemplateTables::locate(&doc).unwrap();
        let references = tables.references.unwrap();
        assert_eq!(text(references), "t4");
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(TableSlot::Affiliations.to_string(), "affiliations");
    }
}
