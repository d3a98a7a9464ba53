//! Batch driver
//!
//! Enumerates submission documents, pairs each with an optional figure,
//! converts them one at a time and appends the blocks to a single output
//! file in stem order. A submission that fails is reported and skipped; only
//! problems with the output file or the working directory stop the batch.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::assemble::MarkupAssembler;
use crate::config::BookletConfig;
use crate::convert::{ConvertError, Format, MarkupConverter, Pandoc};
use crate::extract::{ExtractError, FieldExtractor};
use crate::progress::{BatchSummary, ProblemFile, ProcessingStage, ProgressCallback};

// ============================================================
// Error Types
// ============================================================

/// Failures that stop the whole batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Cannot read input directory {path}: {source}")]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("Cannot write {path}: {source}")]
    Output { path: PathBuf, source: io::Error },

    #[error("Cannot prepare intermediate directory: {0}")]
    Workspace(io::Error),

    #[error("Converter unavailable: {0}")]
    Converter(#[from] ConvertError),

    #[error("Cannot serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BatchError>;

// ============================================================
// Input Discovery
// ============================================================

/// One document to process, with its figure if the submitter sent one
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionInput {
    pub document: PathBuf,
    /// File name without extension
    pub stem: String,
    /// Figure file name (not path) matched by stem
    pub figure: Option<String>,
    /// Figure files whose names are close to, but not equal to, the stem
    pub near_misses: Vec<String>,
}

impl SubmissionInput {
    pub fn file_name(&self) -> String {
        self.document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.stem.clone())
    }
}

fn split_name(path: &Path) -> Option<(String, String)> {
    let stem = path.file_stem()?.to_string_lossy().into_owned();
    let extension = path.extension()?.to_string_lossy().to_ascii_lowercase();
    Some((stem, extension))
}

/// List the documents in `dir`, sorted by stem, each paired with its figure.
///
/// A figure matches a document when their stems are equal ignoring case.
/// Figure names within `figure_suggest_threshold` similarity of a document
/// stem are kept as near misses so the submitter's typo can be reported.
pub fn discover_inputs(dir: &Path, config: &BookletConfig) -> Result<Vec<SubmissionInput>> {
    let read_error = |source| BatchError::ReadInput {
        path: dir.to_path_buf(),
        source,
    };

    let mut documents: Vec<(String, PathBuf)> = Vec::new();
    let mut figures: Vec<(String, String)> = Vec::new();

    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() {
            continue;
        }
        let Some((stem, extension)) = split_name(&path) else {
            continue;
        };
        if extension.eq_ignore_ascii_case(&config.document_extension) {
            documents.push((stem, path));
        } else if config.figure_extensions.contains(&extension) {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            figures.push((stem.to_lowercase(), file_name));
        }
    }

    documents.sort();
    figures.sort_by(|a, b| a.1.cmp(&b.1));

    let document_stems: Vec<String> = documents.iter().map(|(s, _)| s.to_lowercase()).collect();

    let inputs = documents
        .into_iter()
        .map(|(stem, document)| {
            let key = stem.to_lowercase();
            let matches: Vec<&String> = figures
                .iter()
                .filter(|(figure_stem, _)| *figure_stem == key)
                .map(|(_, name)| name)
                .collect();
            if matches.len() > 1 {
                warn!(
                    document = %document.display(),
                    candidates = ?matches,
                    "several figures match; using the first"
                );
            }

            let near_misses = figures
                .iter()
                .filter(|(figure_stem, _)| !document_stems.contains(figure_stem))
                .filter(|(figure_stem, _)| {
                    strsim::normalized_levenshtein(figure_stem, &key)
                        >= config.figure_suggest_threshold
                })
                .map(|(_, name)| name.clone())
                .collect();

            SubmissionInput {
                figure: matches.first().map(|name| name.to_string()),
                document,
                stem,
                near_misses,
            }
        })
        .collect();

    Ok(inputs)
}

// ============================================================
// Report
// ============================================================

/// What happened to one document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Block written to the output
    Appended {
        poster_number: String,
        figure: Option<String>,
    },
    /// Document does not follow the template
    Malformed { reason: String },
    /// Converter missing or failed
    ConversionFailed { reason: String },
}

impl FileOutcome {
    pub fn is_appended(&self) -> bool {
        matches!(self, FileOutcome::Appended { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub document: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Per-file outcomes of one batch, in processing order
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Local>,
    pub output_file: PathBuf,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    fn new(output_file: &Path) -> Self {
        Self {
            generated_at: Local::now(),
            output_file: output_file.to_path_buf(),
            files: Vec::new(),
        }
    }

    pub fn appended(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_appended()).count()
    }

    /// Documents that did not follow the template
    pub fn malformed(&self) -> Vec<&Path> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Malformed { .. }))
            .map(|f| f.document.as_path())
            .collect()
    }

    /// Documents the converter could not handle
    pub fn failed(&self) -> Vec<&Path> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::ConversionFailed { .. }))
            .map(|f| f.document.as_path())
            .collect()
    }

    pub fn has_problems(&self) -> bool {
        self.appended() < self.files.len()
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.files.len(),
            appended: self.appended(),
            output: self.output_file.clone(),
            ..Default::default()
        };
        for file in &self.files {
            let (list, reason) = match &file.outcome {
                FileOutcome::Appended { .. } => continue,
                FileOutcome::Malformed { reason } => (&mut summary.malformed, reason),
                FileOutcome::ConversionFailed { reason } => (&mut summary.failed, reason),
            };
            list.push(ProblemFile {
                path: file.document.clone(),
                reason: reason.clone(),
            });
        }
        summary
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?).map_err(|source| BatchError::Output {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ============================================================
// Intermediate Files
// ============================================================

/// Where whole-document conversions are written
enum Workspace {
    /// Removed after the batch
    Temp(TempDir),
    /// User-chosen directory, left in place
    Kept(PathBuf),
}

impl Workspace {
    fn prepare(keep: Option<&Path>) -> Result<Self> {
        match keep {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(BatchError::Workspace)?;
                Ok(Workspace::Kept(dir.to_path_buf()))
            }
            None => tempfile::Builder::new()
                .prefix("posterbook-")
                .tempdir()
                .map(Workspace::Temp)
                .map_err(BatchError::Workspace),
        }
    }

    fn path(&self) -> &Path {
        match self {
            Workspace::Temp(dir) => dir.path(),
            Workspace::Kept(dir) => dir,
        }
    }

    fn intermediate_for(&self, stem: &str) -> PathBuf {
        self.path().join(format!("{}.html", stem))
    }

    fn close(self) {
        if let Workspace::Temp(dir) = self {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!(path = %path.display(), error = %e, "could not remove intermediate files");
            }
        }
    }
}

// ============================================================
// Batch Driver
// ============================================================

/// Locate the configured converter, or pandoc on `PATH`
pub fn locate_converter(config: &BookletConfig) -> Result<Pandoc> {
    Ok(Pandoc::locate(config.pandoc.as_deref())?)
}

/// Runs one batch against a converter
pub struct BatchDriver<'a, C: MarkupConverter + ?Sized> {
    converter: &'a C,
    config: &'a BookletConfig,
    assembler: MarkupAssembler,
}

impl<'a, C: MarkupConverter + ?Sized> BatchDriver<'a, C> {
    pub fn new(converter: &'a C, config: &'a BookletConfig) -> Self {
        Self {
            converter,
            config,
            assembler: MarkupAssembler::with_options(config.template.clone()),
        }
    }

    /// Discover the documents in `input_dir` and process them
    pub fn run_dir(&self, input_dir: &Path, progress: &dyn ProgressCallback) -> Result<BatchReport> {
        let inputs = discover_inputs(input_dir, self.config)?;
        self.run(&inputs, progress)
    }

    /// Process `inputs` in order, appending one block per extracted submission.
    ///
    /// The output file is truncated first, so an empty `inputs` yields an
    /// empty file.
    pub fn run(&self, inputs: &[SubmissionInput], progress: &dyn ProgressCallback) -> Result<BatchReport> {
        let output_path = &self.config.output_file;
        let output_error = |source| BatchError::Output {
            path: output_path.clone(),
            source,
        };

        let mut out = BufWriter::new(File::create(output_path).map_err(output_error)?);
        let workspace = Workspace::prepare(self.config.intermediate_dir.as_deref())?;
        debug!(dir = %workspace.path().display(), "intermediate files");

        let mut report = BatchReport::new(output_path);
        progress.on_batch_start(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            let name = input.file_name();
            info!("Processing {}", name);
            if let Some(figure) = &input.figure {
                info!("Submitter has a figure: {}", figure);
            }
            for near_miss in &input.near_misses {
                warn!(
                    document = %name,
                    figure = %near_miss,
                    "figure name is close to the document name but does not match; rename it to pair them"
                );
            }

            let poster_number = self.config.poster_numbering.number_for(report.appended());
            let outcome = match self.process(index, input, &workspace, &poster_number, progress) {
                Ok(block) => {
                    progress.on_stage(index, &name, ProcessingStage::Appending);
                    out.write_all(block.as_bytes()).map_err(output_error)?;
                    FileOutcome::Appended {
                        poster_number,
                        figure: input.figure.clone(),
                    }
                }
                Err(e) if e.is_malformed() => {
                    warn!("{} is problematic and was skipped: {}", name, e);
                    FileOutcome::Malformed {
                        reason: e.to_string(),
                    }
                }
                Err(e) => {
                    warn!("{} could not be converted and was skipped: {}", name, e);
                    FileOutcome::ConversionFailed {
                        reason: e.to_string(),
                    }
                }
            };

            let ok = outcome.is_appended();
            progress.on_stage(index, &name, ProcessingStage::Completed);
            progress.on_file_complete(index, &name, ok);
            report.files.push(FileReport {
                document: input.document.clone(),
                outcome,
            });
        }

        out.flush().map_err(output_error)?;
        drop(out);
        workspace.close();
        progress.on_batch_complete();

        Ok(report)
    }

    /// Convert, extract and assemble one document
    fn process(
        &self,
        index: usize,
        input: &SubmissionInput,
        workspace: &Workspace,
        poster_number: &str,
        progress: &dyn ProgressCallback,
    ) -> std::result::Result<String, ExtractError> {
        let name = input.file_name();

        progress.on_stage(index, &name, ProcessingStage::ConvertingDocument);
        let html_path = workspace.intermediate_for(&input.stem);
        self.converter
            .convert_file(&input.document, &html_path, Format::Docx, Format::Html)?;
        let markup = fs::read_to_string(&html_path).map_err(ConvertError::from)?;

        progress.on_stage(index, &name, ProcessingStage::ExtractingFields);
        let extractor = FieldExtractor::new(self.converter, &self.config.symbols, &self.config.names)
            .with_references(self.config.template.include_references);
        let mut submission = extractor.extract_html(&markup)?;

        if let Some(figure) = &input.figure {
            submission = submission.with_figure(figure.clone());
        }
        submission = submission.with_poster_number(poster_number);

        progress.on_stage(index, &name, ProcessingStage::Assembling);
        Ok(self.assembler.assemble(&submission))
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PosterNumbering;
    use crate::progress::NoProgress;
    use crate::testing::{FailingConverter, FakePandoc};
    use std::cell::RefCell;
    use tempfile::tempdir;

    const DOC: &str = concat!(
        "<table><tr><td>Title {name}</td></tr></table>",
        "<table><tr><th>No.</th><th>Name</th><th>Aff.</th></tr>",
        "<tr><td>1</td><td>{name}* doe</td><td>1</td></tr></table>",
        "<table><tr><td>1</td><td>MIT</td></tr></table>",
        "<table><tr><td><p>Body.</p></td></tr></table>",
    );

    fn write_doc(dir: &Path, stem: &str) {
        fs::write(dir.join(format!("{}.docx", stem)), DOC.replace("{name}", stem)).unwrap();
    }

    fn config_for(dir: &Path) -> BookletConfig {
        BookletConfig {
            output_file: dir.join("out").join("output.tex"),
            ..Default::default()
        }
    }

    #[test]
    fn test_discover_sorted_with_figures() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "Smith_John");
        write_doc(dir.path(), "Doe_Jane");
        write_doc(dir.path(), "Adams_Ann");
        fs::write(dir.path().join("smith_john.PNG"), b"").unwrap();
        fs::write(dir.path().join("Doe_Jane.gif"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("Zed.docx")).unwrap();

        let inputs = discover_inputs(dir.path(), &BookletConfig::default()).unwrap();
        let stems: Vec<_> = inputs.iter().map(|i| i.stem.as_str()).collect();
        assert_eq!(stems, ["Adams_Ann", "Doe_Jane", "Smith_John"]);
        assert_eq!(inputs[2].figure.as_deref(), Some("smith_john.PNG"));
        assert!(inputs[1].figure.is_none());
        assert!(inputs[0].figure.is_none());
    }

    #[test]
    fn test_discover_multiple_figures_first_wins() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "Doe_Jane");
        fs::write(dir.path().join("Doe_Jane.png"), b"").unwrap();
        fs::write(dir.path().join("Doe_Jane.jpg"), b"").unwrap();

        let inputs = discover_inputs(dir.path(), &BookletConfig::default()).unwrap();
        assert_eq!(inputs[0].figure.as_deref(), Some("Doe_Jane.jpg"));
        assert!(inputs[0].near_misses.is_empty());
    }

    #[test]
    fn test_discover_near_miss() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "Vanderberg_Johan");
        fs::write(dir.path().join("Vandenberg_Johan.png"), b"").unwrap();
        fs::write(dir.path().join("unrelated.png"), b"").unwrap();

        let inputs = discover_inputs(dir.path(), &BookletConfig::default()).unwrap();
        assert!(inputs[0].figure.is_none());
        assert_eq!(inputs[0].near_misses, ["Vandenberg_Johan.png"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let dir = tempdir().unwrap();
        let err = discover_inputs(&dir.path().join("missing"), &BookletConfig::default()).unwrap_err();
        assert!(matches!(err, BatchError::ReadInput { .. }));
    }

    #[test]
    fn test_run_appends_in_order() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "bob");
        write_doc(dir.path(), "amy");
        fs::write(dir.path().join("bob.png"), b"").unwrap();
        let config = config_for(dir.path());
        fs::create_dir(dir.path().join("out")).unwrap();

        let fake = FakePandoc::new();
        let report = BatchDriver::new(&fake, &config)
            .run_dir(dir.path(), &NoProgress)
            .unwrap();
        assert_eq!(report.appended(), 2);
        assert!(!report.has_problems());

        let output = fs::read_to_string(&config.output_file).unwrap();
        let blocks: Vec<_> = output.split_terminator("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with(r"\posterAbstractSansFigure{0}{Title amy}"));
        assert!(blocks[1].starts_with(r"\posterAbstractWithFigure{0}{Title bob}"));
        assert!(blocks[1].contains("{bob.png}{Body.}"));
        assert!(blocks[0].contains(r"{\textbf{Amy Doe},$^{1}$}"));
    }

    #[test]
    fn test_extra_table_only_read_with_references() {
        let dir = tempdir().unwrap();
        let doc = format!("{}<table><tr><td>1. Keywords: foo</td></tr></table>", DOC)
            .replace("{name}", "amy");
        fs::write(dir.path().join("amy.docx"), doc).unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();

        let config = config_for(dir.path());
        let report = BatchDriver::new(&FakePandoc::new(), &config)
            .run_dir(dir.path(), &NoProgress)
            .unwrap();
        assert_eq!(report.appended(), 1);
        assert!(!report.has_problems());

        let mut config = config_for(dir.path());
        config.template.include_references = true;
        let report = BatchDriver::new(&FakePandoc::new(), &config)
            .run_dir(dir.path(), &NoProgress)
            .unwrap();
        assert_eq!(report.appended(), 0);
        assert_eq!(report.malformed().len(), 1);
    }

    #[test]
    fn test_malformed_file_skipped() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "a");
        fs::write(dir.path().join("b.docx"), "<p>No template here</p>").unwrap();
        write_doc(dir.path(), "c");
        let config = config_for(dir.path());
        fs::create_dir(dir.path().join("out")).unwrap();

        let fake = FakePandoc::new();
        let report = BatchDriver::new(&fake, &config)
            .run_dir(dir.path(), &NoProgress)
            .unwrap();

        assert_eq!(report.appended(), 2);
        assert_eq!(report.malformed(), [dir.path().join("b.docx").as_path()]);
        assert!(report.failed().is_empty());
        assert!(report.has_problems());

        let output = fs::read_to_string(&config.output_file).unwrap();
        assert_eq!(output.matches(r"\posterAbstract").count(), 2);
        assert!(output.contains("Title c"));
    }

    #[test]
    fn test_conversion_failure_reported() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "a");
        let config = config_for(dir.path());
        fs::create_dir(dir.path().join("out")).unwrap();

        let report = BatchDriver::new(&FailingConverter, &config)
            .run_dir(dir.path(), &NoProgress)
            .unwrap();
        assert_eq!(report.appended(), 0);
        assert_eq!(report.failed().len(), 1);
        assert_eq!(fs::read_to_string(&config.output_file).unwrap(), "");
    }

    #[test]
    fn test_output_truncated_and_empty_batch() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path());
        fs::create_dir(dir.path().join("out")).unwrap();
        fs::write(&config.output_file, "stale").unwrap();

        let report = BatchDriver::new(&FakePandoc::new(), &config)
            .run(&[], &NoProgress)
            .unwrap();
        assert!(report.files.is_empty());
        assert_eq!(fs::read_to_string(&config.output_file).unwrap(), "");
    }

    #[test]
    fn test_unwritable_output_is_fatal() {
        let dir = tempdir().unwrap();
        let config = BookletConfig {
            output_file: dir.path().join("no_such_dir").join("output.tex"),
            ..Default::default()
        };
        let err = BatchDriver::new(&FakePandoc::new(), &config)
            .run(&[], &NoProgress)
            .unwrap_err();
        assert!(matches!(err, BatchError::Output { .. }));
    }

    #[test]
    fn test_sequential_poster_numbers_skip_failures() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "a");
        fs::write(dir.path().join("b.docx"), "<p>bad</p>").unwrap();
        write_doc(dir.path(), "c");
        let config = BookletConfig {
            poster_numbering: PosterNumbering::Sequential { prefix: "P".into() },
            ..config_for(dir.path())
        };
        fs::create_dir(dir.path().join("out")).unwrap();

        BatchDriver::new(&FakePandoc::new(), &config)
            .run_dir(dir.path(), &NoProgress)
            .unwrap();
        let output = fs::read_to_string(&config.output_file).unwrap();
        assert!(output.contains(r"\posterAbstractSansFigure{P1}{Title a}"));
        assert!(output.contains(r"\posterAbstractSansFigure{P2}{Title c}"));
    }

    #[test]
    fn test_intermediate_dir_kept() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "a");
        let config = BookletConfig {
            intermediate_dir: Some(dir.path().join("html")),
            ..config_for(dir.path())
        };
        fs::create_dir(dir.path().join("out")).unwrap();

        BatchDriver::new(&FakePandoc::new(), &config)
            .run_dir(dir.path(), &NoProgress)
            .unwrap();
        assert!(dir.path().join("html").join("a.html").is_file());
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: RefCell<Vec<String>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_batch_start(&self, total: usize) {
            self.events.borrow_mut().push(format!("start {}", total));
        }

        fn on_file_complete(&self, index: usize, file: &str, ok: bool) {
            self.events.borrow_mut().push(format!("{} {} {}", index, file, ok));
        }

        fn on_batch_complete(&self) {
            self.events.borrow_mut().push("done".to_string());
        }
    }

    #[test]
    fn test_progress_events() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "a");
        fs::write(dir.path().join("b.docx"), "<p>bad</p>").unwrap();
        let config = config_for(dir.path());
        fs::create_dir(dir.path().join("out")).unwrap();

        let progress = RecordingProgress::default();
        BatchDriver::new(&FakePandoc::new(), &config)
            .run_dir(dir.path(), &progress)
            .unwrap();
        assert_eq!(
            *progress.events.borrow(),
            ["start 2", "0 a.docx true", "1 b.docx false", "done"]
        );
    }

    #[test]
    fn test_report_json() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "a");
        fs::write(dir.path().join("a.png"), b"").unwrap();
        fs::write(dir.path().join("b.docx"), "<p>bad</p>").unwrap();
        let config = config_for(dir.path());
        fs::create_dir(dir.path().join("out")).unwrap();

        let report = BatchDriver::new(&FakePandoc::new(), &config)
            .run_dir(dir.path(), &NoProgress)
            .unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let files = json["files"].as_array().unwrap();
        assert_eq!(files[0]["status"], "appended");
        assert_eq!(files[0]["figure"], "a.png");
        assert_eq!(files[1]["status"], "malformed");
        assert!(files[1]["reason"].as_str().unwrap().contains("No tables"));
        assert!(json["generated_at"].is_string());

        let summary = report.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.appended, 1);
        assert_eq!(summary.malformed[0].path, dir.path().join("b.docx"));
        assert!(summary.malformed[0].reason.contains("template"));
        assert!(summary.failed.is_empty());
    }
}
