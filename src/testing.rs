//! Converter doubles for unit tests

use std::cell::Cell;
use std::path::Path;

use crate::convert::{ConvertError, Format, MarkupConverter, Result};

/// Small stand-in for pandoc's HTML reader and LaTeX writer.
///
/// Knows `strong`/`b`, `em`/`i` and `sup`, drops every other tag, maps the
/// three escaped entities, and turns `~` into `\textasciitilde{}` the way
/// pandoc does. Whole-file conversions copy the input unchanged, so test
/// documents are written as HTML.
#[derive(Debug, Default)]
pub struct FakePandoc {
    keep_whitespace: bool,
    calls: Cell<usize>,
}

impl FakePandoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant that does not strip surrounding whitespace
    pub fn keeping_whitespace() -> Self {
        Self {
            keep_whitespace: true,
            ..Self::default()
        }
    }

    /// Number of text conversions performed
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

fn tag_replacement(tag: &str) -> &'static str {
    let closing = tag.starts_with('/');
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match (name.as_str(), closing) {
        ("strong" | "b" | "em" | "i" | "sup", true) => "}",
        ("strong" | "b", false) => r"\textbf{",
        ("em" | "i", false) => r"\emph{",
        ("sup", false) => r"\textsuperscript{",
        _ => "",
    }
}

pub fn html_to_latex(input: &str) -> String {
    let mut out = String::new();
    let mut rest = input;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => {
                out.push_str(tag_replacement(&rest[start + 1..start + end]));
                rest = &rest[start + end + 1..];
            }
            None => {
                rest = &rest[start..];
                break;
            }
        }
    }
    out.push_str(rest);

    out.replace('~', r"\textasciitilde{}")
        .replace("&amp;", r"\&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

impl MarkupConverter for FakePandoc {
    fn convert_text(&self, input: &str, from: Format, to: Format) -> Result<String> {
        assert_eq!((from, to), (Format::Html, Format::Latex));
        self.calls.set(self.calls.get() + 1);
        let converted = html_to_latex(input);
        if self.keep_whitespace {
            Ok(format!("{}\n", converted))
        } else {
            Ok(format!("{}\n", converted.trim()))
        }
    }

    fn convert_file(&self, input: &Path, output: &Path, from: Format, to: Format) -> Result<()> {
        assert_eq!((from, to), (Format::Docx, Format::Html));
        std::fs::copy(input, output)?;
        Ok(())
    }
}

/// Converter that is never available
#[derive(Debug, Default)]
pub struct FailingConverter;

impl MarkupConverter for FailingConverter {
    fn convert_text(&self, _input: &str, _from: Format, _to: Format) -> Result<String> {
        Err(ConvertError::Unavailable("pandoc is not installed".to_string()))
    }

    fn convert_file(&self, _input: &Path, _output: &Path, _from: Format, _to: Format) -> Result<()> {
        Err(ConvertError::Unavailable("pandoc is not installed".to_string()))
    }
}
