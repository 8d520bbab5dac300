mod bam;
mod cli;
mod consistency;
mod consts;
mod error;
mod output;
mod partition;
mod preflight;
mod records;
mod split;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::partition::Category;
use crate::split::split_reads;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.verbose);

    let config = args.into_config();
    match split_reads(&config) {
        Ok(summary) => {
            info!("split {} records", summary.records);
            for (category, reads) in summary.partition.sets() {
                if category == Category::Mitochondrial && config.mito().is_none() {
                    continue;
                }
                info!(
                    "{category}: {} reads -> {}",
                    reads.len(),
                    summary.outputs.get(category).display()
                );
            }
            if !summary.warnings.is_empty() {
                info!("finished with {} warning(s)", summary.warnings.len());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
