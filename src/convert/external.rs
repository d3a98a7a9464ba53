//! External converter
//!
//! The converter is a black box: given input text or a file plus explicit
//! source/target formats it returns the converted text synchronously. Pandoc
//! is the production implementation; tests substitute their own.

use std::ffi::OsStr;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use super::types::{ConvertError, Format, Result};

/// Blocking document/markup converter
pub trait MarkupConverter {
    /// Convert a text fragment
    fn convert_text(&self, input: &str, from: Format, to: Format) -> Result<String>;

    /// Convert a whole file, writing the result to `output`
    fn convert_file(&self, input: &Path, output: &Path, from: Format, to: Format) -> Result<()>;
}

impl<T: MarkupConverter + ?Sized> MarkupConverter for &T {
    fn convert_text(&self, input: &str, from: Format, to: Format) -> Result<String> {
        (**self).convert_text(input, from, to)
    }

    fn convert_file(&self, input: &Path, output: &Path, from: Format, to: Format) -> Result<()> {
        (**self).convert_file(input, output, from, to)
    }
}

// ============================================================
// Pandoc
// ============================================================

/// Pandoc invoked as a subprocess, one call per conversion
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: PathBuf,
}

impl Pandoc {
    /// Program name searched on `PATH` when none is configured
    pub const DEFAULT_PROGRAM: &'static str = "pandoc";

    /// Resolve the pandoc executable, from `configured` or `PATH`
    pub fn locate(configured: Option<&Path>) -> Result<Self> {
        let requested: &OsStr = configured
            .map(Path::as_os_str)
            .unwrap_or_else(|| OsStr::new(Self::DEFAULT_PROGRAM));

        which::which(requested)
            .map(|program| Self { program })
            .map_err(|e| {
                ConvertError::Unavailable(format!(
                    "{} not found ({})",
                    Path::new(requested).display(),
                    e
                ))
            })
    }

    /// Use `program` as-is, without checking that it exists
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path of the executable in use
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// First line of `pandoc --version`
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        self.check_status(&output)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn command(&self, from: Format, to: Format) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["-f", from.pandoc_name()])
            .args(["-t", to.pandoc_name()])
            // Wrapped output would put line breaks inside paragraphs
            .arg("--wrap=none");
        command
    }

    fn spawn_error(&self, e: std::io::Error) -> ConvertError {
        if e.kind() == ErrorKind::NotFound {
            ConvertError::Unavailable(format!("{} is not installed", self.program.display()))
        } else {
            ConvertError::Unavailable(format!("failed to run {}: {}", self.program.display(), e))
        }
    }

    fn check_status(&self, output: &Output) -> Result<()> {
        if output.status.success() {
            return Ok(());
        }
        Err(ConvertError::Failed {
            program: self.program.clone(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl MarkupConverter for Pandoc {
    fn convert_text(&self, input: &str, from: Format, to: Format) -> Result<String> {
        let mut child = self
            .command(from, to)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A broken pipe means pandoc quit early; its exit status says why
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        self.check_status(&output)?;

        String::from_utf8(output.stdout).map_err(|e| ConvertError::InvalidOutput(e.to_string()))
    }

    fn convert_file(&self, input: &Path, output: &Path, from: Format, to: Format) -> Result<()> {
        let result = self
            .command(from, to)
            .arg(input)
            .arg("-o")
            .arg(output)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        self.check_status(&result)
    }
}

// ============================================================
// Tests
// ============================================================
