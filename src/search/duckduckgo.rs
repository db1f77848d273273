// src/search/duckduckgo.rs
use scraper::{Html, Selector};
use tracing::info;

use super::SearchClient;
use crate::models::{Result, SearchItem, Source};

impl SearchClient {
    /// Scrape the DuckDuckGo HTML endpoint, which serves results without
    /// JavaScript.
    pub async fn search_duckduckgo(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchItem>> {
        let enhanced_query = format!("{} USA contact email phone", query);
        let html = self
            .fetch_html(
                "https://duckduckgo.com/html/",
                &[("q", enhanced_query.as_str())],
            )
            .await?;

        let document = Html::parse_document(&html);
        let result_selector = Selector::parse("div.result").unwrap();
        let title_selector = Selector::parse("a.result__a").unwrap();
        let snippet_selector = Selector::parse("a.result__snippet").unwrap();

        let mut results = Vec::new();

        for container in document.select(&result_selector).take(max_results) {
            let title_el = match container.select(&title_selector).next() {
                Some(el) => el,
                None => continue,
            };
            let title = title_el.text().collect::<String>().trim().to_string();
            let link = title_el.value().attr("href").unwrap_or("").to_string();

            if !link.starts_with("http") {
                continue;
            }

            let snippet = container
                .select(&snippet_selector)
                .next()
                .map(|el| el.text().collect::<String>())
                .unwrap_or_default();

            results.push(self.item_from_hit(&title, &link, &snippet, Source::DuckDuckGoSearch));
        }

        info!(
            "DuckDuckGo: {} results for '{}'",
            results.len(),
            query
        );
        Ok(results)
    }
}
