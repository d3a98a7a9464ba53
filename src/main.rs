//! posterbook - LaTeX poster booklets from abstract submissions
//!
//! CLI entry point

use anyhow::Context;
use clap::Parser;
use tracing::{debug, Level};

use posterbook::config::LOCAL_CONFIG_FILE;
use posterbook::{
    discover_inputs, exit_codes, locate_converter,
    // Batch
    BatchDriver, BookletConfig, SubmissionInput,
    // CLI
    Cli, Commands, ConvertArgs,
    // Config
    Config, PosterNumbering,
    // Converter
    Pandoc,
    // Progress tracking
    OutputMode, ProgressTracker,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => run_convert(&args),
        Commands::Info => run_info().map(|()| exit_codes::SUCCESS),
    };

    std::process::exit(match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

/// Log to stderr; `-v` shows per-file progress, `-vv` shows stage detail
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ============ Convert Command ============

fn run_convert(args: &ConvertArgs) -> anyhow::Result<i32> {
    init_logging(args.verbose, args.quiet);

    // Validate input path
    if !args.input.is_dir() {
        eprintln!("Error: Input directory does not exist: {}", args.input.display());
        return Ok(exit_codes::INPUT_NOT_FOUND);
    }

    // Explicit config file, otherwise ./posterbook.toml or the user config
    let file_config = match &args.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load()?,
    };
    let config = file_config.merge_with_cli(&args.overrides())?;

    let inputs = discover_inputs(&args.input, &config)?;
    if inputs.is_empty() {
        eprintln!(
            "Error: No .{} files found in {}",
            config.document_extension,
            args.input.display()
        );
        return Ok(exit_codes::INPUT_NOT_FOUND);
    }

    if args.dry_run {
        print_execution_plan(args, &inputs, &config);
        return Ok(exit_codes::SUCCESS);
    }

    let pandoc = match locate_converter(&config) {
        Ok(pandoc) => pandoc,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Install pandoc (https://pandoc.org) or pass --pandoc PATH");
            return Ok(exit_codes::CONVERTER_NOT_FOUND);
        }
    };
    debug!(program = %pandoc.program().display(), "using converter");

    let output_mode = if args.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::from_verbosity(args.verbose)
    };
    let tracker = ProgressTracker::new(output_mode);

    let report = BatchDriver::new(&pandoc, &config).run(&inputs, &tracker)?;

    if let Some(path) = &args.report {
        report.write_json(path)?;
    }

    if !args.quiet {
        ProgressTracker::print_summary(&report.summary());
        println!("Total time: {:.2}s", tracker.elapsed().as_secs_f64());
    }

    Ok(if report.has_problems() {
        exit_codes::PARTIAL_FAILURE
    } else {
        exit_codes::SUCCESS
    })
}

/// Print execution plan for dry-run mode
fn print_execution_plan(args: &ConvertArgs, inputs: &[SubmissionInput], config: &BookletConfig) {
    println!("=== Dry Run - Execution Plan ===");
    println!();
    println!("Input: {}", args.input.display());
    println!("Output: {}", config.output_file.display());
    println!(
        "Converter: {}",
        config
            .pandoc
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| format!("{} (from PATH)", Pandoc::DEFAULT_PROGRAM))
    );
    match &config.intermediate_dir {
        Some(dir) => println!("Intermediate files: {}", dir.display()),
        None => println!("Intermediate files: temporary, removed after the batch"),
    }
    println!();
    println!("Template:");
    println!("  With figure:    {}", config.template.with_figure);
    println!("  Without figure: {}", config.template.sans_figure);
    match &config.poster_numbering {
        PosterNumbering::Placeholder(placeholder) => {
            println!("  Poster numbers: placeholder \"{}\"", placeholder)
        }
        PosterNumbering::Sequential { prefix } => {
            println!("  Poster numbers: sequential ({}1, {}2, ...)", prefix, prefix)
        }
    }
    println!(
        "  References:     {}",
        if config.template.include_references { "YES" } else { "NO" }
    );
    println!();
    println!("Files to process: {}", inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        match &input.figure {
            Some(figure) => println!("  {}. {} [figure: {}]", i + 1, input.file_name(), figure),
            None => println!("  {}. {}", i + 1, input.file_name()),
        }
        for near_miss in &input.near_misses {
            println!("       warning: {} looks like a misnamed figure", near_miss);
        }
    }
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("posterbook v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // System Information
    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);

    // External Tools
    println!();
    println!("Converter:");
    let configured = Config::load().ok().and_then(|c| c.converter.program);
    check_converter(configured.as_deref());

    // Config File Locations
    println!();
    println!("Config File Locations:");
    println!("  Local: ./{}", LOCAL_CONFIG_FILE);
    if let Some(path) = Config::user_config_path() {
        println!("  User:  {}", path.display());
    }

    Ok(())
}

fn check_converter(configured: Option<&std::path::Path>) {
    match Pandoc::locate(configured) {
        Ok(pandoc) => match pandoc.version() {
            Ok(version) if !version.is_empty() && version.len() < 80 => {
                println!("  pandoc: {} ({})", version, pandoc.program().display())
            }
            _ => println!("  pandoc: {} (found)", pandoc.program().display()),
        },
        Err(_) => println!("  pandoc: Not found"),
    }
}
