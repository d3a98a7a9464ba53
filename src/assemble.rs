//! Markup assembler
//!
//! Turns a [`Submission`] into one LaTeX block:
//!
//! ```text
//! \posterAbstractWithFigure{number}{title}{authors}{affiliations}{figure}{body}
//! \posterAbstractSansFigure{number}{title}{authors}{affiliations}{body}
//! ```
//!
//! followed by a blank line. Assembly is pure; writing the block is the
//! caller's job.

use crate::convert::LINE_BREAK;
use crate::extract::{AffiliationRef, AffiliationTable, AuthorRecord, ReferenceTable, Submission};

/// Separator written after every block
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Default macro for submissions with a figure
pub const WITH_FIGURE_MACRO: &str = r"\posterAbstractWithFigure";

/// Default macro for submissions without a figure
pub const SANS_FIGURE_MACRO: &str = r"\posterAbstractSansFigure";

// ============================================================
// Options
// ============================================================

/// Template macros and optional groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Macro opening a block that has a figure group
    pub with_figure: String,
    /// Macro opening a block without one
    pub sans_figure: String,
    /// Append a references group after the body
    pub include_references: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            with_figure: WITH_FIGURE_MACRO.to_string(),
            sans_figure: SANS_FIGURE_MACRO.to_string(),
            include_references: false,
        }
    }
}

// ============================================================
// Markup Assembler
// ============================================================

/// Builds LaTeX blocks from submissions
#[derive(Debug, Clone, Default)]
pub struct MarkupAssembler {
    options: TemplateOptions,
}

impl MarkupAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TemplateOptions) -> Self {
        Self { options }
    }

    /// Full block for one submission, separator included
    pub fn assemble(&self, submission: &Submission) -> String {
        let figure = submission.figure();

        let mut block = String::new();
        block.push_str(self.choose_template(figure.is_some()));
        block.push_str(&brace(&submission.poster_number));
        block.push_str(&brace(&submission.title));
        block.push_str(&self.render_authors(submission));
        block.push_str(&self.render_affiliations(&submission.affiliations));
        if let Some(figure) = figure {
            block.push_str(&brace(figure));
        }
        block.push_str(&brace(&submission.body_text));
        if self.options.include_references {
            block.push_str(&self.render_references(&submission.references));
        }
        block.push_str(BLOCK_SEPARATOR);
        block
    }

    /// Template macro for a block with or without a figure
    pub fn choose_template(&self, has_figure: bool) -> &str {
        if has_figure {
            &self.options.with_figure
        } else {
            &self.options.sans_figure
        }
    }

    /// Author group: names with superscript affiliation numbers, space separated
    pub fn render_authors(&self, submission: &Submission) -> String {
        let authors: Vec<String> = submission
            .authors_with_refs()
            .map(|(author, refs)| render_author(author, refs))
            .collect();
        brace(&authors.join(" "))
    }

    /// Affiliation group in ascending number order, one per line
    pub fn render_affiliations(&self, affiliations: &AffiliationTable) -> String {
        let entries: Vec<String> = affiliations
            .iter()
            .map(|(number, name)| format!("$^{}${}", number, name))
            .collect();
        brace(&entries.join(&format!("{} ", LINE_BREAK)))
    }

    /// References group in ascending number order, one per line
    pub fn render_references(&self, references: &ReferenceTable) -> String {
        let entries: Vec<String> = references
            .iter()
            .map(|(number, text)| format!("{{[{}]}} {}", number, text))
            .collect();
        brace(&entries.join(LINE_BREAK))
    }
}

/// One author: name, then `,$^{1,2}$` unless no affiliation is cited
pub fn render_author(author: &AuthorRecord, refs: &AffiliationRef) -> String {
    if refs.is_empty() {
        author.display_name.clone()
    } else {
        format!("{},$^{{{}}}$", author.display_name, refs.join(","))
    }
}

/// Wrap in a LaTeX group
pub fn brace(text: &str) -> String {
    format!("{{{}}}", text)
}

// ============================================================
// Tests
// ============================================================
