//! CLI entry point for contextify

use std::path::PathBuf;
use std::process;

use clap::Parser;
use contextify::string_utils::{parse_comma_separated, parse_size};
use contextify::{DEFAULT_MAX_LINE_BYTES, RunConfig, TracingSink};

#[derive(Parser, Debug)]
#[command(name = "contextify")]
#[command(about = "Flatten a directory tree into a single context file")]
#[command(version)]
struct Args {
    /// Input directory path (relative or absolute; empty means the current directory)
    #[arg(long, default_value = ".", env = "CONTEXTIFY_INPUT")]
    input: String,

    /// Output file path (created or truncated)
    #[arg(long, default_value = "context.txt", env = "CONTEXTIFY_OUTPUT")]
    output: PathBuf,

    /// Comma-separated list of directories to exclude (e.g., node_modules,dist)
    /// .git is always excluded
    #[arg(long, default_value = "", env = "CONTEXTIFY_EXCLUDE")]
    exclude: String,

    /// Comma-separated list of file extensions to include (e.g., .ts,.js,.go)
    /// Empty includes every file
    #[arg(long, default_value = "", env = "CONTEXTIFY_EXTENSIONS")]
    extensions: String,

    /// Enable verbose logging
    #[arg(long, env = "CONTEXTIFY_VERBOSE")]
    verbose: bool,

    /// Maximum length of a single line in a transcribed file
    /// Use suffixes: K, M, G (e.g., 8M). Longer lines abort the run
    #[arg(long = "max-line-size", value_name = "SIZE")]
    max_line_size: Option<String>,
}

fn main() {
    let args = Args::parse();

    let max_line_bytes = match args.max_line_size.as_deref() {
        Some(size_str) => parse_size(size_str).unwrap_or_else(|e| {
            eprintln!("contextify: invalid --max-line-size '{}': {}", size_str, e);
            process::exit(1);
        }),
        None => DEFAULT_MAX_LINE_BYTES,
    };

    if let Err(e) = contextify::logging::init_logging(args.verbose) {
        eprintln!("contextify: {}", e);
    }

    let config = match RunConfig::new(
        &args.input,
        args.output,
        parse_comma_separated(&args.exclude),
        parse_comma_separated(&args.extensions),
    ) {
        Ok(config) => config.with_max_line_bytes(max_line_bytes),
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            process::exit(1);
        }
    };

    for ext in config.undotted_extensions() {
        tracing::warn!(
            extension = ext,
            "Extension has no leading dot and will never match (did you mean .{}?)",
            ext
        );
    }

    // Failures are logged by the sink; only the exit status is left to set.
    if contextify::run(&config, &mut TracingSink).is_err() {
        process::exit(1);
    }
}
