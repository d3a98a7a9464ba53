//! Conversion module
//!
//! Wraps the external document converter (pandoc) and turns rich-text
//! fragments into LaTeX.
//!
//! # Features
//!
//! - **External converter** ([`external`]) - `MarkupConverter` trait and the pandoc implementation
//! - **Text converter** ([`text`]) - per-paragraph conversion, symbol fixes and whitespace restoration

pub mod external;
pub mod text;
mod types;

// Re-export public API
pub use external::{MarkupConverter, Pandoc};
pub use text::{escape_html, TextConverter, LINE_BREAK};
pub use types::{ConvertError, Format, Result};
