//! `vstolib`: variant set-algebra and spatial-matching CLI.

use clap::{Parser, Subcommand};

use vstolib::cli;
use vstolib::common;

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Variant set-algebra and spatial-matching toolkit",
    long_about = "Combine and partition genomic variant calls (merge, intersect, subtract, \
                  compare, overlap, filter) using a shared breakpoint-matching oracle."
)]
struct Cli {
    /// Commonly used arguments.
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Union of VariantsList inputs under the match oracle.
    Merge(cli::merge::Args),
    /// Components of the merge that touch every input at least once.
    Intersect(cli::intersect::Args),
    /// Calls in a target list with no match in a query list.
    Subtract(cli::subtract::Args),
    /// Three-way partition of two inputs: shared / a-only / b-only.
    Compare(cli::compare::Args),
    /// Calls whose breakpoints fall within padded genomic ranges.
    Overlap(cli::overlap::Args),
    /// Predicate filtering plus excluded-region and homopolymer passes.
    Filter(cli::filter::Args),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    common::init_tracing(&cli.common);

    let result = match &cli.command {
        Commands::Merge(args) => cli::merge::run(&cli.common, args),
        Commands::Intersect(args) => cli::intersect::run(&cli.common, args),
        Commands::Subtract(args) => cli::subtract::run(&cli.common, args),
        Commands::Compare(args) => cli::compare::run(&cli.common, args),
        Commands::Overlap(args) => cli::overlap::run(&cli.common, args),
        Commands::Filter(args) => cli::filter::run(&cli.common, args),
    };

    common::trace_rss_now();

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    Ok(())
}
