// src/search/deep_scrape.rs
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use super::SearchClient;
use crate::models::{Result, SupplierRecord};
use crate::pipeline::record_builder::build_deep_scrape_record;

const CONTACT_KEYWORDS: [&str; 6] = ["contact", "about", "reach", "connect", "info", "support"];
const MAX_CONTACT_PAGES: usize = 3;
const MAX_EMAILS_PER_SITE: usize = 2;

fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document.root_element().text().collect::<Vec<_>>().join(" ")
}

impl SearchClient {
    /// Visit a discovered supplier website and lift contacts straight off
    /// the page text, plus up to a few contact-ish subpages. One GET per
    /// page, failures skip the page.
    pub async fn deep_scrape_site(
        &self,
        website: &str,
        commodity: &str,
    ) -> Result<Vec<SupplierRecord>> {
        if !website.starts_with("http") {
            return Ok(Vec::new());
        }

        let html = self.fetch_html(website, &[]).await?;
        let page_text = visible_text(&html);

        let mut emails = self.extractor().extract_emails(&page_text);
        let mut phones = self.extractor().extract_phones(&page_text);

        for contact_url in contact_page_links(&html, website) {
            debug!("Following contact page: {}", contact_url);
            match self.fetch_html(&contact_url, &[]).await {
                Ok(contact_html) => {
                    let contact_text = visible_text(&contact_html);
                    for email in self.extractor().extract_emails(&contact_text) {
                        if !emails.contains(&email) {
                            emails.push(email);
                        }
                    }
                    for phone in self.extractor().extract_phones(&contact_text) {
                        if !phones.contains(&phone) {
                            phones.push(phone);
                        }
                    }
                }
                Err(e) => debug!("Contact page fetch failed: {}", e),
            }

            tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
        }

        if emails.is_empty() && phones.is_empty() {
            return Ok(Vec::new());
        }

        let company_name = format!("Contact from {}", website);
        let best_phone = phones.first().cloned();
        let records: Vec<SupplierRecord> = emails
            .iter()
            .take(MAX_EMAILS_PER_SITE)
            .map(|email| {
                build_deep_scrape_record(
                    &company_name,
                    Some(email.clone()),
                    best_phone.clone(),
                    website,
                    commodity,
                )
            })
            .collect();

        // Phone-only sites still yield one record.
        let records = if records.is_empty() {
            vec![build_deep_scrape_record(
                &company_name,
                None,
                best_phone,
                website,
                commodity,
            )]
        } else {
            records
        };

        info!(
            "Deep scrape of {}: {} emails, {} phones",
            website,
            emails.len(),
            phones.len()
        );
        Ok(records)
    }
}

/// Links whose href or text mention a contact keyword, same-site only.
fn contact_page_links(html: &str, base: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").unwrap();
    let base_url = match Url::parse(base) {
        Ok(u) => u,
        Err(_) => return Vec::new(),
    };

    let mut links = Vec::new();
    for el in document.select(&link_selector) {
        let href = el.value().attr("href").unwrap_or("");
        let text = el.text().collect::<String>().to_lowercase();
        let href_lower = href.to_lowercase();

        if !CONTACT_KEYWORDS
            .iter()
            .any(|k| href_lower.contains(k) || text.contains(k))
        {
            continue;
        }

        if let Ok(full) = base_url.join(href) {
            let full = full.to_string();
            if full != base && full.starts_with("http") && !links.contains(&full) {
                links.push(full);
            }
        }

        if links.len() >= MAX_CONTACT_PAGES {
            break;
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_links_are_discovered_and_resolved() {
        let html = r#"
            <html><body>
                <a href="/contact-us">Contact Us</a>
                <a href="/products">Products</a>
                <a href="https://acme.com/about">About</a>
            </body></html>
        "#;
        let links = contact_page_links(html, "https://acme.com");
        assert_eq!(
            links,
            vec![
                "https://acme.com/contact-us".to_string(),
                "https://acme.com/about".to_string(),
            ]
        );
    }

    #[test]
    fn visible_text_flattens_markup() {
        let text = visible_text("<html><body><p>Call <b>555-123-4567</b> now</p></body></html>");
        assert!(text.contains("555-123-4567"));
    }
}
