use log::error;
use recipe_harvest::cli::{self, UsageError};
use recipe_harvest::{logging, run_scrape, HarvestConfig};
use std::env;
use std::process;

fn main() {
    let config = match HarvestConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = logging::init(&config.output.log_path) {
        eprintln!("{e}");
        process::exit(1);
    }

    let selection = match cli::parse_selection(env::args_os()) {
        Ok(selection) => selection,
        Err(UsageError::Display(e)) => e.exit(),
        Err(e) => {
            cli::print_help();
            error!("{e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_scrape(&config, &selection) {
        error!("{e}");
        process::exit(1);
    }
}
