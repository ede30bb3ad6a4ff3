use crate::config::SourceConfig;
use crate::error::ScrapeError;
use crate::fetchers::RequestFetcher;
use log::info;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Collects the recipe candidates linked from an index page.
///
/// Relative hrefs are resolved against `base_url`. Only links starting with
/// `recipe_prefix` are kept, deduplicated in document order.
pub fn recipe_links(html: &str, base_url: &str, recipe_prefix: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let base = Url::parse(base_url).ok();

    let mut seen = HashSet::new();
    document
        .select(&anchor)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| match &base {
            Some(base) => base.join(href).ok().map(String::from),
            None => Url::parse(href).ok().map(String::from),
        })
        .filter(|link| link.starts_with(recipe_prefix))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

/// Returns the links a run should visit: the configured list, or whatever
/// the index page links to.
pub fn discover_links(
    fetcher: &RequestFetcher,
    config: &SourceConfig,
) -> Result<Vec<String>, ScrapeError> {
    if !config.links.is_empty() {
        info!("Using {} configured recipe links", config.links.len());
        return Ok(config.links.clone());
    }

    let html = fetcher.fetch(&config.index_url)?;
    let links = recipe_links(&html, &config.index_url, &config.recipe_prefix);
    info!("Discovered {} recipe links on {}", links.len(), config.index_url);
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::time::Duration;

    const INDEX: &str = r#"
        <html><body>
            <a href="/recipe/1/pancakes/">Pancakes</a>
            <a href="https://example.com/recipe/2/waffles/">Waffles</a>
            <a href="/recipe/1/pancakes/">Pancakes again</a>
            <a href="/about">About</a>
            <a>No href</a>
        </body></html>
    "#;

    #[test]
    fn test_recipe_links_resolves_and_dedupes() {
        let links = recipe_links(INDEX, "https://example.com/index", "https://example.com/recipe/");
        assert_eq!(
            links,
            vec![
                "https://example.com/recipe/1/pancakes/".to_string(),
                "https://example.com/recipe/2/waffles/".to_string(),
            ]
        );
    }

    #[test]
    fn test_configured_links_skip_discovery() {
        let config = SourceConfig {
            links: vec!["https://example.com/recipe/9".to_string()],
            index_url: "http://127.0.0.1:1/never-fetched".to_string(),
            ..SourceConfig::default()
        };
        let fetcher = RequestFetcher::new(Some(Duration::from_secs(1)), "test").unwrap();
        let links = discover_links(&fetcher, &config).unwrap();
        assert_eq!(links, config.links);
    }

    #[test]
    fn test_discover_links_from_index() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/index")
            .with_status(200)
            .with_body(INDEX)
            .create();

        let config = SourceConfig {
            index_url: format!("{}/index", server.url()),
            recipe_prefix: format!("{}/recipe/", server.url()),
            ..SourceConfig::default()
        };
        let fetcher = RequestFetcher::from_config(&config).unwrap();
        let links = discover_links(&fetcher, &config).unwrap();

        assert_eq!(links, vec![format!("{}/recipe/1/pancakes/", server.url())]);
        mock.assert();
    }
}
