//! Rewrite encoded types in a gccgo AST dump into readable Go types.
//!
//! Usage:
//!   demangle_dump [-i FILE] [-o FILE] [-v LEVEL]
//!   demangle_dump < dump.txt > readable.txt
//!
//! Log level comes from RUST_LOG if set, otherwise from -v
//! (0 warn, 1 info, 2 debug, 3+ trace). Logs go to stderr.

use anyhow::Context;
use clap::Parser;
use gotype_demangle::rewrite_stream;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "demangle_dump")]
#[command(about = "Decode gccgo type encodings in AST dumps", long_about = None)]
struct Args {
    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose trace output level
    #[arg(short, long, default_value_t = 0)]
    verbose: u8,
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level_for(verbose))?,
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            info!(path = %path.display(), "opening input");
            Box::new(File::open(path).with_context(|| format!("open {}", path.display()))?)
        }
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &args.output {
        Some(path) => {
            info!(path = %path.display(), "opening output");
            Box::new(File::create(path).with_context(|| format!("create {}", path.display()))?)
        }
        None => Box::new(io::stdout().lock()),
    };

    let stats = rewrite_stream(BufReader::new(input), BufWriter::new(output))
        .context("rewriting input")?;
    info!(
        lines = stats.lines,
        substitutions = stats.substitutions,
        "done"
    );
    Ok(())
}
