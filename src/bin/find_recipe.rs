use clap::Parser;
use recipe_harvest::{find_recipe, HarvestConfig, HarvestError};
use std::process;

/// Look a stored recipe up by its exact title
#[derive(Parser)]
#[command(name = "find-recipe", version)]
struct Args {
    /// Title as scraped, e.g. "Best Chocolate Chip Cookies"
    title: String,
}

fn main() {
    let args = Args::parse();
    let result = HarvestConfig::load()
        .map_err(HarvestError::from)
        .and_then(|config| find_recipe(&config, &args.title));

    match result {
        Ok(Some(record)) => match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        Ok(None) => {
            eprintln!("No recipe titled {:?}", args.title);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
