//! # segmerge - merge sorted key-value segments
//!
//! Command-line front end for the segment merge engine. Merged records are
//! written to stdout, one per line (`segment=<id> <key>:<value>`); logs go
//! to stderr.
//!
//! ## Commands
//!
//! ```text
//! merge    -s "a:1,b:1" -s "a:2"   Merge inline segments (oldest first)
//! generate [--segments N] ...      Merge randomly generated segments
//! compare  [--segments N] ...      Run both strategies and compare output
//! ```
//!
//! ## Configuration
//!
//! Flags override environment variables, which override built-in defaults:
//!
//! ```text
//! SEGMERGE_STRATEGY  naive | dedup              (default: "dedup")
//! SEGMERGE_VALIDATE  check segment key order    (default: "false")
//! SEGMERGE_SEGMENTS  generated segment count    (default: 15)
//! SEGMERGE_KEYS      generated key pool size    (default: 100)
//! SEGMERGE_KEY_LEN   generated key length       (default: 5)
//! SEGMERGE_WINDOW    max keys per segment       (default: 15)
//! SEGMERGE_SEED      generator seed             (default: random)
//! RUST_LOG           log filter                 (default: "warn")
//! ```
//!
//! ## Example
//!
//! ```text
//! $ segmerge merge -s "a:15,b:15" -s "b:20" -s "a:20"
//! segment=2 a:20
//! segment=1 b:20
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use commands::{GeneratorArgs, MergeArgs};

/// Merge sorted key-value segments, newest segment wins.
#[derive(Parser)]
#[command(name = "segmerge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge segments given on the command line
    Merge {
        /// One segment as comma-separated key:value entries, in key order.
        /// Repeat for each segment, oldest first.
        #[arg(short, long = "segment", value_name = "ENTRIES")]
        segments: Vec<String>,

        #[command(flatten)]
        merge: MergeArgs,

        /// Log run statistics at info level
        #[arg(long)]
        stats: bool,
    },

    /// Generate synthetic segments and merge them
    Generate {
        #[command(flatten)]
        generator: GeneratorArgs,

        #[command(flatten)]
        merge: MergeArgs,

        /// Print the generated segments before the merged output
        #[arg(long)]
        print_segments: bool,
    },

    /// Merge generated segments with both strategies and compare
    Compare {
        #[command(flatten)]
        generator: GeneratorArgs,

        /// Fail fast on unsorted segments
        #[arg(long)]
        validate: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Merge {
            segments,
            merge,
            stats,
        } => commands::merge(&segments, &merge, stats),
        Commands::Generate {
            generator,
            merge,
            print_segments,
        } => commands::generate(&generator, &merge, print_segments),
        Commands::Compare {
            generator,
            validate,
        } => commands::compare(&generator, validate),
    }
}
