//! fastgrow CLI: run a growing job and store its hits; use --dry-run to print the command line only.

use anyhow::Result;
use clap::Parser;
use fastgrow::engine::arg_parser::Cli;
use fastgrow::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
