// src/search/google.rs
use std::collections::HashSet;

use scraper::{Html, Selector};
use tracing::info;

use super::SearchClient;
use crate::models::{Result, SearchItem, Source};

impl SearchClient {
    /// Scrape one page of Google results. Selectors are best-effort; layout
    /// drift just shrinks the result list.
    pub async fn search_google(&self, query: &str, max_results: usize) -> Result<Vec<SearchItem>> {
        let enhanced_query = format!("{} USA contact email phone address", query);
        let num = max_results.to_string();
        let html = self
            .fetch_html(
                "https://www.google.com/search",
                &[("q", enhanced_query.as_str()), ("num", num.as_str())],
            )
            .await?;

        let document = Html::parse_document(&html);
        let container_selector = Selector::parse("div.g").unwrap();
        let title_selector = Selector::parse("h3").unwrap();
        let link_selector = Selector::parse("a[href]").unwrap();
        let snippet_selector = Selector::parse("div.VwiC3b, span.aCOpRe").unwrap();

        let mut processed_urls = HashSet::new();
        let mut results = Vec::new();

        for container in document.select(&container_selector).take(max_results) {
            let title = match container.select(&title_selector).next() {
                Some(el) => el.text().collect::<String>().trim().to_string(),
                None => continue,
            };
            let link = match container
                .select(&link_selector)
                .next()
                .and_then(|el| el.value().attr("href"))
            {
                Some(href) => href.to_string(),
                None => continue,
            };

            if !link.starts_with("http") || !processed_urls.insert(link.clone()) {
                continue;
            }

            let snippet = container
                .select(&snippet_selector)
                .next()
                .map(|el| el.text().collect::<String>())
                .unwrap_or_default();

            results.push(self.item_from_hit(&title, &link, &snippet, Source::GoogleSearch));
        }

        info!("Google Search: {} results for '{}'", results.len(), query);
        Ok(results)
    }
}
