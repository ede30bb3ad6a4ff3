mod links;
mod request;

pub use links::{discover_links, recipe_links};
pub use request::RequestFetcher;
