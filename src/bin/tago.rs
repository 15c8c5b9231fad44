//! tago CLI - Emacs TAGS for Go
//!
//! Parses the Go files given on the command line and writes a TAGS file,
//! by default `TAGS` in the current directory.

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tago::{expand_inputs, ParseErrorPolicy, TagsConfig, TagsError, WriteMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Emacs etags for Go: index the top-level declarations of Go sources.
#[derive(Parser, Debug)]
#[command(name = "tago")]
#[command(version = tago::VERSION)]
#[command(about = "Generate an Emacs TAGS file for Go source files")]
#[command(after_help = "EXAMPLES:
  # Index every Go file of a package
  tago *.go

  # Write to a different directory and name
  tago -d /path/to/my/tags/ -n MyTagsFile *.go

  # Add another package to an existing TAGS file
  tago -a ../other/*.go
")]
struct Cli {
    /// Go source files (directories are searched for .go files)
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Change save directory (default: current directory)
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Change TAGS name
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    tags_name: Option<String>,

    /// Append to an existing TAGS file instead of overwriting it
    #[arg(short = 'a', long = "append")]
    append: bool,

    /// Leave out files that fail to parse instead of aborting
    #[arg(long = "skip-errors")]
    skip_errors: bool,

    /// Read each source file once instead of once per tag
    #[arg(long = "cache-lines")]
    cache_lines: bool,

    /// JSON config file; command-line flags take precedence
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Cli {
    /// Merge flags over the config file (or the defaults)
    fn resolve_config(&self) -> tago::Result<TagsConfig> {
        let mut config = match &self.config {
            Some(path) => TagsConfig::load(path)?,
            None => TagsConfig::default(),
        };

        if let Some(dir) = &self.save_dir {
            config.save_dir = dir.clone();
        } else if config.save_dir.as_os_str().is_empty() {
            config.save_dir = std::env::current_dir()?;
        }
        if let Some(name) = &self.tags_name {
            config.tags_name = name.clone();
        }
        if self.append {
            config.mode = WriteMode::Append;
        }
        if self.skip_errors {
            config.on_parse_error = ParseErrorPolicy::Skip;
        }
        if self.cache_lines {
            config.cache_lines = true;
        }
        Ok(config)
    }
}

/// RUST_LOG wins; otherwise warnings, or debug output with --verbose
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "tago=debug" } else { "tago=warn" })
    });
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let files = expand_inputs(&cli.files);
    match tago::tag_files(&config, &files) {
        Ok(summary) => {
            if cli.verbose {
                eprintln!(
                    "{} tags from {} files written to {}",
                    summary.records,
                    summary.files,
                    summary.destination.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(TagsError::AbortedRun { reason, source }) => {
            match source {
                Some(cause) if cause.is_parse_error() => {
                    eprintln!("Parsing errors experienced, aborting...");
                    eprintln!("  {}: {}", reason, cause);
                }
                Some(cause) => {
                    eprintln!("Could not read input, aborting...");
                    eprintln!("  {}", cause);
                }
                None => eprintln!("Aborting: {}", reason),
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
