//! Parsed HTML tree
//!
//! Read-only queries over the converter's HTML output: tables in document
//! order, the rows and cells of a table, text content and child fragments.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

use crate::convert::escape_html;

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static ANY_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td, th"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Which cells a row query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// `td` only
    Data,
    /// `td` and `th`
    Any,
}

/// HTML document produced by the external converter
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse converter output (never fails; the parser recovers from bad markup)
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// All tables, nested ones included, in document order
    pub fn tables(&self) -> Vec<ElementRef<'_>> {
        self.html.select(&TABLE).collect()
    }
}

/// All rows below `table`, in document order
pub fn rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    table.select(&ROW).collect()
}

/// Cells below `row`, in document order
pub fn cells(row: ElementRef<'_>, kind: CellKind) -> Vec<ElementRef<'_>> {
    match kind {
        CellKind::Data => row.select(&DATA_CELL).collect(),
        CellKind::Any => row.select(&ANY_CELL).collect(),
    }
}

/// First `td`/`th` anywhere below `table`
pub fn first_cell(table: ElementRef<'_>) -> Option<ElementRef<'_>> {
    table.select(&ANY_CELL).next()
}

/// First `p` below `element`
pub fn first_paragraph(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.select(&PARAGRAPH).next()
}

/// Concatenated text content
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Direct children serialized as HTML fragments.
///
/// Elements keep their markup; text nodes are re-escaped so they stay
/// character data when handed back to an HTML reader. Comments are dropped.
pub fn child_fragments(element: ElementRef<'_>) -> Vec<String> {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(t) => Some(escape_html(t)),
            Node::Element(_) => ElementRef::wrap(child).map(|e| e.html()),
            _ => None,
        })
        .collect()
}

// ============================================================
// Tests
// ============================================================
