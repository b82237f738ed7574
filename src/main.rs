//! CLI entry point for regcollapse.
//!
//! Every subcommand reads one optional input path (stdin when absent or `-`)
//! and writes a tab-separated table to stdout.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use regcollapse::annotator::annotate;
use regcollapse::config::{Config, DEFAULT_MERGE_DISTANCE};
use regcollapse::merger::collapse;
use regcollapse::parser::open_input;
use regcollapse::tally::count;
use regcollapse::types::Layout;
use regcollapse::weights::rewrite;

/// Region annotation and proximity merging for intersectBed output.
#[derive(Parser, Debug)]
#[command(name = "regcollapse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report progress on stderr (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annotate regions from `intersectBed -wao` output
    Annotate {
        /// Input file (default: stdin)
        input: Option<PathBuf>,
    },

    /// Merge sorted annotated regions that overlap or lie within a distance
    Collapse {
        /// Input file sorted by chromosome then start (default: stdin)
        input: Option<PathBuf>,

        /// Maximum gap in bp between regions that still merge
        #[arg(short = 'd', long = "distance", default_value_t = DEFAULT_MERGE_DISTANCE, allow_negative_numbers = true)]
        distance: i64,

        /// Output layout: long (one row per region) or wide (one row per interval)
        #[arg(short = 'l', long = "layout", default_value = "long")]
        layout: String,
    },

    /// Count strand-aware, fragment-deduplicated reads per region
    Count {
        /// Input file of read/region intersections (default: stdin)
        input: Option<PathBuf>,
    },

    /// Replace MAPQ with the NH value and key read names by mate positions (SAM)
    Weights {
        /// Input SAM file (default: stdin)
        input: Option<PathBuf>,
    },
}

fn input_label(input: &Option<PathBuf>) -> String {
    match input {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match args.command {
        Command::Annotate { input } => {
            info!("Annotating regions from {}", input_label(&input));
            let reader = open_input(input.as_deref())?;
            let regions = annotate(reader, &mut writer)
                .with_context(|| format!("Failed to annotate {}", input_label(&input)))?;
            info!("Wrote {} annotated regions", regions);
        }
        Command::Collapse {
            input,
            distance,
            layout,
        } => {
            // Build configuration
            let mut config = Config::new();

            if !config.set_merge_distance(distance) {
                bail!("The merge distance cannot be lower than 0 bps.");
            }

            config.layout = layout
                .parse::<Layout>()
                .context("Layout can only be one of the following: long or wide")?;

            info!("Collapsing regions from {}", input_label(&input));
            let reader = open_input(input.as_deref())?;
            collapse(reader, &mut writer, &config)
                .with_context(|| format!("Failed to collapse {}", input_label(&input)))?;
        }
        Command::Count { input } => {
            info!("Counting reads from {}", input_label(&input));
            let reader = open_input(input.as_deref())?;
            count(reader, &mut writer)
                .with_context(|| format!("Failed to count reads in {}", input_label(&input)))?;
        }
        Command::Weights { input } => {
            info!("Rewriting alignments from {}", input_label(&input));
            let reader = open_input(input.as_deref())?;
            rewrite(reader, &mut writer)
                .with_context(|| format!("Failed to rewrite {}", input_label(&input)))?;
        }
    }

    info!("Done!");
    Ok(())
}
