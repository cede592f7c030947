//! Command line front end: pick a mirror, crawl it, write the catalog.
mod cli;

use std::process::ExitCode;

use catalog_harvester::{run, LogObserver};
use engine_logging::engine_error;

fn main() -> ExitCode {
    let args = cli::Args::parse_args();
    engine_logging::initialize(args.log_destination(), args.log_level());

    let config = match args.harvest_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config, &LogObserver) {
        Ok(report) => {
            println!(
                "Harvested {} entries from {} into {}",
                report.entries,
                report.mirror,
                report.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            engine_error!("{}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
