use clap::Parser;
use pivotql::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    env_logger::builder().format_timestamp(None).init();
    run(Cli::parse())
}
