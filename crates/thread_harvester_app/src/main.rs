mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use engine_logging::{engine_error, engine_info};
use thread_harvester_engine::ThreadHarvester;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.log_level());

    let harvester = ThreadHarvester::new(cli.harvester_config());
    if let Err(err) = harvester.initialize() {
        engine_error!("Cannot prepare output directory: {}", err);
        return ExitCode::FAILURE;
    }

    let (success, file_path, metadata) = harvester.fetch_thread_blocking(&cli.url).into_parts();
    match (success, file_path, metadata) {
        (true, Some(path), Some(metadata)) => {
            engine_info!("Wrote {}", path.display());
            match metadata.to_json() {
                Ok(json) => println!("{json}"),
                Err(err) => engine_error!("Could not serialize metadata: {}", err),
            }
            ExitCode::SUCCESS
        }
        _ => ExitCode::FAILURE,
    }
}
