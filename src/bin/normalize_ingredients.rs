use log::error;
use recipe_harvest::{logging, run_normalize, HarvestConfig};
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

    if let Err(e) = run_normalize(&config) {
        error!("{e}");
        process::exit(1);
    }
}
