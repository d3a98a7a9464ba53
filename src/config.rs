//! Configuration
//!
//! Settings come from a TOML file (explicit path, `./posterbook.toml`, or the
//! user config directory) and are then overridden by command-line flags.
//!
//! ```toml
//! [output]
//! file = "abstracts.tex"
//!
//! [converter]
//! program = "/usr/local/bin/pandoc"
//!
//! [names]
//! no_capitalize = ["van", "der", "van't", "de"]
//!
//! [template]
//! number_posters = true
//! poster_prefix = "P"
//!
//! [symbols]
//! "ℓ" = "$\\ell$"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::assemble::{TemplateOptions, SANS_FIGURE_MACRO, WITH_FIGURE_MACRO};
use crate::extract::{NameOptions, POSTER_NUMBER_PLACEHOLDER};
use crate::symbols::{SymbolTable, SymbolTableError};

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "posterbook.toml";

// ============================================================
// Error Types
// ============================================================

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid [symbols] entry: {0}")]
    Symbols(#[from] SymbolTableError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// ============================================================
// File Format
// ============================================================

/// `[output]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// LaTeX file the blocks are written to
    pub file: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            file: PathBuf::from("output.tex"),
        }
    }
}

/// `[converter]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConverterSection {
    /// pandoc executable; searched on `PATH` when unset
    pub program: Option<PathBuf>,
    /// Keep intermediate HTML here instead of a temporary directory
    pub intermediate_dir: Option<PathBuf>,
}

/// `[input]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Extension of submission documents
    pub document_extension: String,
    /// Extensions accepted as figures
    pub figure_extensions: Vec<String>,
    /// Similarity (0..1) above which a non-matching figure name is reported
    pub figure_suggest_threshold: f64,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            document_extension: "docx".to_string(),
            figure_extensions: ["png", "jpg", "jpeg", "tiff", "pdf"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            figure_suggest_threshold: 0.85,
        }
    }
}

/// `[names]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NamesSection {
    pub no_capitalize: Vec<String>,
    pub case_insensitive_particles: bool,
}

impl Default for NamesSection {
    fn default() -> Self {
        let defaults = NameOptions::default();
        Self {
            no_capitalize: defaults.no_capitalize,
            case_insensitive_particles: defaults.case_insensitive,
        }
    }
}

/// `[template]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemplateSection {
    pub with_figure: String,
    pub sans_figure: String,
    /// Poster number written when numbering is off
    pub poster_placeholder: String,
    /// Number posters sequentially in output order
    pub number_posters: bool,
    pub poster_prefix: String,
    pub include_references: bool,
}

impl Default for TemplateSection {
    fn default() -> Self {
        Self {
            with_figure: WITH_FIGURE_MACRO.to_string(),
            sans_figure: SANS_FIGURE_MACRO.to_string(),
            poster_placeholder: POSTER_NUMBER_PLACEHOLDER.to_string(),
            number_posters: false,
            poster_prefix: String::new(),
            include_references: false,
        }
    }
}

/// Configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputSection,
    pub converter: ConverterSection,
    pub input: InputSection,
    pub names: NamesSection,
    pub template: TemplateSection,
    /// Extra symbol fixes on top of the built-in table
    pub symbols: BTreeMap<String, String>,
}

impl Config {
    /// Load from `./posterbook.toml` or the user config file, if either exists
    pub fn load() -> Result<Self> {
        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load a specific file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Candidate config files, in lookup order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(user) = Self::user_config_path() {
            paths.push(user);
        }
        paths
    }

    /// `<config dir>/posterbook/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("posterbook").join("config.toml"))
    }

    /// Apply command-line overrides and build the runtime configuration
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> Result<BookletConfig> {
        let symbols = if self.symbols.is_empty() {
            SymbolTable::builtin().clone()
        } else {
            SymbolTable::with_extra(self.symbols.clone())?
        };
        Ok(self.build(cli, symbols))
    }

    fn build(&self, cli: &CliOverrides, symbols: SymbolTable) -> BookletConfig {
        let number_posters = cli.number_posters.unwrap_or(self.template.number_posters);
        let poster_numbering = if number_posters {
            PosterNumbering::Sequential {
                prefix: cli
                    .poster_prefix
                    .clone()
                    .unwrap_or_else(|| self.template.poster_prefix.clone()),
            }
        } else {
            PosterNumbering::Placeholder(self.template.poster_placeholder.clone())
        };

        BookletConfig {
            output_file: cli.output.clone().unwrap_or_else(|| self.output.file.clone()),
            pandoc: cli.pandoc.clone().or_else(|| self.converter.program.clone()),
            intermediate_dir: cli
                .intermediate_dir
                .clone()
                .or_else(|| self.converter.intermediate_dir.clone()),
            document_extension: self.input.document_extension.trim_start_matches('.').to_string(),
            figure_extensions: self
                .input
                .figure_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            figure_suggest_threshold: self.input.figure_suggest_threshold,
            names: NameOptions {
                no_capitalize: self.names.no_capitalize.clone(),
                case_insensitive: cli
                    .case_insensitive_particles
                    .unwrap_or(self.names.case_insensitive_particles),
            },
            template: TemplateOptions {
                with_figure: self.template.with_figure.clone(),
                sans_figure: self.template.sans_figure.clone(),
                include_references: cli
                    .include_references
                    .unwrap_or(self.template.include_references),
            },
            poster_numbering,
            symbols,
        }
    }
}

// ============================================================
// CLI Overrides
// ============================================================

/// Values set on the command line; `None` keeps the file's value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output: Option<PathBuf>,
    pub pandoc: Option<PathBuf>,
    pub intermediate_dir: Option<PathBuf>,
    pub number_posters: Option<bool>,
    pub poster_prefix: Option<String>,
    pub include_references: Option<bool>,
    pub case_insensitive_particles: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================
// Runtime Configuration
// ============================================================

/// How poster numbers are filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterNumbering {
    /// Same placeholder for every submission
    Placeholder(String),
    /// `<prefix>1`, `<prefix>2`, ... in output order
    Sequential { prefix: String },
}

impl PosterNumbering {
    /// Number for the `index`-th (0-based) appended submission
    pub fn number_for(&self, index: usize) -> String {
        match self {
            PosterNumbering::Placeholder(placeholder) => placeholder.clone(),
            PosterNumbering::Sequential { prefix } => format!("{}{}", prefix, index + 1),
        }
    }
}

impl Default for PosterNumbering {
    fn default() -> Self {
        PosterNumbering::Placeholder(POSTER_NUMBER_PLACEHOLDER.to_string())
    }
}

/// Effective settings for one batch
#[derive(Debug, Clone)]
pub struct BookletConfig {
    pub output_file: PathBuf,
    pub pandoc: Option<PathBuf>,
    pub intermediate_dir: Option<PathBuf>,
    /// Without the leading dot
    pub document_extension: String,
    /// Lower-case, without the leading dot
    pub figure_extensions: Vec<String>,
    pub figure_suggest_threshold: f64,
    pub names: NameOptions,
    pub template: TemplateOptions,
    pub poster_numbering: PosterNumbering,
    pub symbols: SymbolTable,
}

impl Default for BookletConfig {
    fn default() -> Self {
        Config::default().build(&CliOverrides::default(), SymbolTable::builtin().clone())
    }
}

// ============================================================
// Tests
// ============================================================
