use crate::model::{Field, FieldSelection};
use clap::error::{ContextKind, ErrorKind};
use clap::{CommandFactory, Parser};
use thiserror::Error;

/// Program name plus every individual field flag
pub const MAX_ARGS: usize = 10;

#[derive(Parser, Debug, Default)]
#[command(
    name = "recipe-harvest",
    version,
    about = "Scrape data from allrecipes.com",
    args_override_self = true
)]
pub struct Cli {
    /// Scrape recipe title
    #[arg(long)]
    pub title: bool,
    /// Scrape recipe ingredients
    #[arg(long)]
    pub ingredients: bool,
    /// Scrape recipe details (prep time, cook time, etc.)
    #[arg(long)]
    pub details: bool,
    /// Scrape number of reviews
    #[arg(long)]
    pub reviews: bool,
    /// Scrape recipe rating
    #[arg(long)]
    pub rating: bool,
    /// Scrape nutrition facts
    #[arg(long)]
    pub nutrition: bool,
    /// Scrape publish date
    #[arg(long)]
    pub published: bool,
    /// Scrape recipe category
    #[arg(long)]
    pub category: bool,
    /// Get the link to the recipe
    #[arg(long)]
    pub link: bool,
    /// Scrape all available data
    #[arg(long)]
    pub all: bool,
}

impl Cli {
    fn flag(&self, field: Field) -> bool {
        match field {
            Field::Title => self.title,
            Field::Ingredients => self.ingredients,
            Field::Details => self.details,
            Field::Reviews => self.reviews,
            Field::Rating => self.rating,
            Field::Nutrition => self.nutrition,
            Field::Published => self.published,
            Field::Category => self.category,
            Field::Link => self.link,
        }
    }

    /// Fields requested by the individual flags, ignoring `--all`
    pub fn requested(&self) -> FieldSelection {
        Field::ALL.into_iter().filter(|f| self.flag(*f)).collect()
    }
}

/// Reasons the command line is rejected
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("No argument was passed")]
    NoArguments,

    #[error("Too many arguments")]
    TooManyArguments,

    #[error("Unrecognized arguments: {0}")]
    Unrecognized(String),

    #[error("--all argument should not be used with other arguments")]
    AllWithOthers,

    /// `--help` or `--version`; clap prints these itself
    #[error("{0}")]
    Display(clap::Error),
}

/// Validates the full argument list (program name first) into a field selection
pub fn parse_selection<I, T>(args: I) -> Result<FieldSelection, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args: Vec<std::ffi::OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Err(UsageError::NoArguments);
    }
    if args.len() > MAX_ARGS {
        return Err(UsageError::TooManyArguments);
    }

    let cli = Cli::try_parse_from(&args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => UsageError::Display(e),
        _ => UsageError::Unrecognized(
            e.get(ContextKind::InvalidArg)
                .map(|arg| arg.to_string())
                .unwrap_or_else(|| e.kind().as_str().unwrap_or("invalid arguments").to_string()),
        ),
    })?;

    let requested = cli.requested();
    if cli.all {
        if !requested.is_empty() {
            return Err(UsageError::AllWithOthers);
        }
        return Ok(FieldSelection::all());
    }
    Ok(requested)
}

/// Prints the `--help` text to stdout
pub fn print_help() {
    let _ = Cli::command().print_help();
    println!();
}
