//! Text converter
//!
//! Converts one rich-text (HTML) fragment to LaTeX. The fragment is split
//! into paragraphs on embedded newlines, each paragraph goes through the
//! external converter on its own, then through the symbol table. The
//! converter strips surrounding whitespace, so the original leading and
//! trailing runs are measured and put back.

use tracing::trace;

use super::external::MarkupConverter;
use super::types::{Format, Result};
use crate::symbols::SymbolTable;

/// LaTeX line break joining converted paragraphs
pub const LINE_BREAK: &str = r"\\";

/// HTML-to-LaTeX fragment converter
pub struct TextConverter<'a, C: MarkupConverter + ?Sized> {
    converter: &'a C,
    symbols: &'a SymbolTable,
}

impl<'a, C: MarkupConverter + ?Sized> TextConverter<'a, C> {
    pub fn new(converter: &'a C, symbols: &'a SymbolTable) -> Self {
        Self { converter, symbols }
    }

    /// Convert a fragment, joining its paragraphs with [`LINE_BREAK`]
    pub fn convert(&self, fragment: &str) -> Result<String> {
        let paragraphs = fragment
            .split('\n')
            .map(|p| self.convert_paragraph(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(paragraphs.join(LINE_BREAK))
    }

    /// Convert plain text (not markup) by escaping it first
    pub fn convert_plain(&self, text: &str) -> Result<String> {
        self.convert(&escape_html(text))
    }

    fn convert_paragraph(&self, paragraph: &str) -> Result<String> {
        let leading = paragraph.chars().take_while(|c| c.is_whitespace()).count();
        let content = paragraph.trim();
        if content.is_empty() {
            return Ok(" ".repeat(leading));
        }
        let trailing = paragraph.chars().rev().take_while(|c| c.is_whitespace()).count();

        let converted = self
            .converter
            .convert_text(paragraph, Format::Html, Format::Latex)?;
        let fixed = self.symbols.normalize(converted.trim());
        trace!(paragraph, converted = %fixed, "converted paragraph");

        let mut out = String::with_capacity(fixed.len() + leading + trailing);
        out.push_str(&" ".repeat(leading));
        out.push_str(&fixed);
        out.push_str(&" ".repeat(trailing));
        Ok(out.replace('\n', " "))
    }
}

/// Escape text for use as HTML character data
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================
// Tests
// ============================================================
