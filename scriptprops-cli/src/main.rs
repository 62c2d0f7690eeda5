//! `scriptprops` command-line entry point

use clap::Parser;
use scriptprops_cli::commands::AnalyzeArgs;

/// Infer script direction, quotation and number style of a text corpus
#[derive(Debug, Parser)]
#[command(name = "scriptprops", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: AnalyzeArgs,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().args.execute()
}
