// src/search/thomasnet.rs
use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use super::{company_name_from_title, SearchClient};
use crate::models::{Result, SearchItem, Source};

const LISTINGS_PER_QUERY: usize = 5;

impl SearchClient {
    /// Scrape ThomasNet directory listings for one commodity across three
    /// supplier-flavored queries.
    pub async fn search_thomasnet(&self, commodity: &str) -> Result<Vec<SearchItem>> {
        let queries = [
            format!("{} suppliers", commodity),
            format!("{} manufacturers", commodity),
            format!("{} companies", commodity),
        ];

        let mut all_results = Vec::new();

        for query in &queries {
            match self.scrape_thomasnet_page(query, commodity).await {
                Ok(results) => all_results.extend(results),
                Err(e) => warn!("ThomasNet query '{}' failed: {}", query, e),
            }

            tokio::time::sleep(std::time::Duration::from_millis(fastrand::u64(2000..4000)))
                .await;
        }

        info!(
            "ThomasNet: {} results for '{}'",
            all_results.len(),
            commodity
        );
        Ok(all_results)
    }

    async fn scrape_thomasnet_page(
        &self,
        query: &str,
        commodity: &str,
    ) -> Result<Vec<SearchItem>> {
        let html = self
            .fetch_html(
                "https://www.thomasnet.com/search.html",
                &[("cov", "NA"), ("what", query)],
            )
            .await?;

        let document = Html::parse_document(&html);
        let listing_selector = Selector::parse(
            "div[class*='supplier'], li[class*='supplier'], \
             div[class*='company'], li[class*='company'], \
             div[class*='listing'], li[class*='listing']",
        )
        .unwrap();
        let name_selector =
            Selector::parse("h3, h4, [class*='name'], [class*='title'], a").unwrap();
        let link_selector = Selector::parse("a[href]").unwrap();

        let base = Url::parse("https://www.thomasnet.com")?;
        let mut results = Vec::new();

        for listing in document.select(&listing_selector).take(LISTINGS_PER_QUERY) {
            let name = match listing.select(&name_selector).next() {
                Some(el) => el.text().collect::<String>().trim().to_string(),
                None => continue,
            };
            if name.is_empty() {
                continue;
            }

            let listing_text = listing.text().collect::<Vec<_>>().join(" ");
            let website = listing
                .select(&link_selector)
                .next()
                .and_then(|el| el.value().attr("href"))
                .and_then(|href| {
                    if href.starts_with("http") {
                        Some(href.to_string())
                    } else {
                        base.join(href).ok().map(|u| u.to_string())
                    }
                });

            results.push(SearchItem {
                company_name: company_name_from_title(&name),
                website,
                snippet: format!("ThomasNet supplier for {}", commodity),
                emails: self.extractor().extract_emails(&listing_text),
                phones: self.extractor().extract_phones(&listing_text),
                source: Source::ThomasNetDirectory,
            });
        }

        Ok(results)
    }
}
