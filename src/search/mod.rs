// src/search/mod.rs
//
// Thin fetch-and-parse glue over the search sources. This layer only turns
// web pages into SearchItem blobs for the pipeline; it carries no scoring
// or dedup logic, does not retry, and degrades to empty result lists on
// HTTP failures.
pub mod deep_scrape;
pub mod duckduckgo;
pub mod google;
pub mod thomasnet;

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::extractor::ContactExtractor;
use crate::models::{Result, SearchItem, Source};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

pub struct SearchClient {
    client: Client,
    extractor: ContactExtractor,
}

impl SearchClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            extractor: ContactExtractor::new(),
        })
    }

    pub(crate) async fn fetch_html(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        debug!("Fetching: {}", url);

        let response = self.client.get(url).query(query).send().await?;
        if !response.status().is_success() {
            return Err(format!("HTTP error {} for {}", response.status(), url).into());
        }

        let html = response.text().await?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }

    /// Build one SearchItem from a result's title/link/snippet, running the
    /// extractor over the combined text.
    pub(crate) fn item_from_hit(
        &self,
        title: &str,
        link: &str,
        snippet: &str,
        source: Source,
    ) -> SearchItem {
        let full_text = format!("{} {}", title, snippet);

        SearchItem {
            company_name: company_name_from_title(title),
            website: Some(link.to_string()),
            snippet: snippet.chars().take(300).collect(),
            emails: self.extractor.extract_emails(&full_text),
            phones: self.extractor.extract_phones(&full_text),
            source,
        }
    }

    pub(crate) fn extractor(&self) -> &ContactExtractor {
        &self.extractor
    }
}

/// Company names arrive embedded in page titles like
/// "Acme Bearings - Industrial Supplier | Ohio"; keep the part before the
/// first separator.
pub(crate) fn company_name_from_title(title: &str) -> String {
    let name = title
        .split(" - ")
        .next()
        .unwrap_or(title)
        .split(" | ")
        .next()
        .unwrap_or(title)
        .split(" : ")
        .next()
        .unwrap_or(title);

    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_separators_are_stripped_in_order() {
        assert_eq!(
            company_name_from_title("Acme Bearings - Industrial Supplier | Ohio"),
            "Acme Bearings"
        );
        assert_eq!(
            company_name_from_title("Midwest  Steel | Fabrication"),
            "Midwest Steel"
        );
        assert_eq!(company_name_from_title("Plain Title"), "Plain Title");
    }
}
