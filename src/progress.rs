//! Progress tracking for batch conversion.
//!
//! The batch driver reports through [`ProgressCallback`]; the CLI plugs in
//! [`ProgressTracker`], which draws a progress bar and prints the final
//! summary.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Processing stages of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Running the external converter on the document
    ConvertingDocument,
    /// Reading template tables
    ExtractingFields,
    /// Building the LaTeX block
    Assembling,
    /// Writing the block to the output file
    Appending,
    /// Completed
    Completed,
}

impl ProcessingStage {
    pub fn name(&self) -> &'static str {
        match self {
            ProcessingStage::ConvertingDocument => "ConvertingDocument",
            ProcessingStage::ExtractingFields => "ExtractingFields",
            ProcessingStage::Assembling => "Assembling",
            ProcessingStage::Appending => "Appending",
            ProcessingStage::Completed => "Completed",
        }
    }

    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ProcessingStage::ConvertingDocument => "converting document",
            ProcessingStage::ExtractingFields => "reading template tables",
            ProcessingStage::Assembling => "building LaTeX block",
            ProcessingStage::Appending => "writing output",
            ProcessingStage::Completed => "done",
        }
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.description())
    }
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// No output
    Quiet,
    /// Progress bar and summary
    #[default]
    Normal,
    /// Per-file log lines instead of a bar
    Verbose,
    /// Everything, including debug logging
    VeryVerbose,
}

impl OutputMode {
    /// Create OutputMode from verbosity level
    pub fn from_verbosity(level: u8) -> Self {
        match level {
            0 => OutputMode::Normal,
            1 => OutputMode::Verbose,
            _ => OutputMode::VeryVerbose,
        }
    }
}

// ============================================================
// Callback
// ============================================================

/// Receives progress events from the batch driver
pub trait ProgressCallback {
    /// Batch is about to process `total` documents
    fn on_batch_start(&self, _total: usize) {}

    /// Document `index` (0-based) enters `stage`
    fn on_stage(&self, _index: usize, _file: &str, _stage: ProcessingStage) {}

    /// Document finished; `ok` is false when it was skipped
    fn on_file_complete(&self, _index: usize, _file: &str, _ok: bool) {}

    /// All documents processed
    fn on_batch_complete(&self) {}
}

/// Callback that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {}

// ============================================================
// Progress Tracker
// ============================================================

const BAR_TEMPLATE: &str = "{spinner} [{bar:40}] {pos}/{len} {wide_msg}";

/// Progress bar for the CLI
pub struct ProgressTracker {
    bar: ProgressBar,
    output_mode: OutputMode,
    start_time: Instant,
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("position", &self.bar.position())
            .field("output_mode", &self.output_mode)
            .finish()
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(OutputMode::Normal)
    }
}

impl ProgressTracker {
    /// The bar is only drawn in normal mode; verbose modes log per file instead
    pub fn new(output_mode: OutputMode) -> Self {
        let bar = ProgressBar::new(0);
        if output_mode == OutputMode::Normal {
            bar.set_draw_target(ProgressDrawTarget::stderr());
            if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("=> "));
            }
        } else {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }

        Self {
            bar,
            output_mode,
            start_time: Instant::now(),
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Documents completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn total(&self) -> u64 {
        self.bar.length().unwrap_or(0)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Print final summary
    pub fn print_summary(summary: &BatchSummary) {
        println!();
        println!("{}", "=".repeat(80));
        println!("Processing Summary");
        println!("{}", "=".repeat(80));
        println!("  Total files:  {}", summary.total);
        println!("  Appended:     {}", summary.appended);
        println!("  Malformed:    {}", summary.malformed.len());
        println!("  Failed:       {}", summary.failed.len());
        println!("  Output:       {}", summary.output.display());
        if !summary.malformed.is_empty() {
            println!();
            println!("Not following the template (check manually):");
            for problem in &summary.malformed {
                println!("  {}: {}", problem.path.display(), problem.reason);
            }
        }
        if !summary.failed.is_empty() {
            println!();
            println!("Conversion failed:");
            for problem in &summary.failed {
                println!("  {}: {}", problem.path.display(), problem.reason);
            }
        }
        println!("{}", "=".repeat(80));
        println!();
    }
}

impl ProgressCallback for ProgressTracker {
    fn on_batch_start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn on_stage(&self, _index: usize, file: &str, stage: ProcessingStage) {
        self.bar.set_message(format!("{}: {}", file, stage.description()));
        self.bar.tick();
    }

    fn on_file_complete(&self, _index: usize, _file: &str, _ok: bool) {
        self.bar.inc(1);
    }

    fn on_batch_complete(&self) {
        self.bar.finish_and_clear();
    }
}

/// A skipped document and why
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Counts and problem files shown by [`ProgressTracker::print_summary`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub appended: usize,
    pub malformed: Vec<ProblemFile>,
    pub failed: Vec<ProblemFile>,
    pub output: PathBuf,
}
