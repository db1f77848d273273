// src/pipeline/record_builder.rs
use chrono::Utc;
use std::collections::HashSet;
use tracing::debug;

use crate::models::{SearchItem, Source, SupplierRecord};

pub const MAX_COMPANY_NAME_LEN: usize = 150;
pub const MAX_SNIPPET_LEN: usize = 250;

/// Quality assigned to records lifted straight off a supplier's own site.
pub const DEEP_SCRAPE_QUALITY: u8 = 75;

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn join_overflow(rest: &[String]) -> String {
    rest.iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build one normalized record from a search item, or nothing when the item
/// carries no contact signal at all.
///
/// Best email/phone is the first candidate in extraction order; the
/// extractor guarantees that order is deterministic.
pub fn build_record(item: &SearchItem, commodity: &str) -> Option<SupplierRecord> {
    let best_email = item.emails.first().map(|e| e.to_lowercase());
    let best_phone = item.phones.first().cloned();
    let website = item.website.clone().filter(|w| !w.is_empty());

    if best_email.is_none() && best_phone.is_none() && website.is_none() {
        return None;
    }

    let additional_emails = if item.emails.len() > 1 {
        join_overflow(&item.emails[1..])
    } else {
        String::new()
    };
    let additional_phones = if item.phones.len() > 1 {
        join_overflow(&item.phones[1..])
    } else {
        String::new()
    };

    let mut record = SupplierRecord {
        company_name: truncate_chars(
            &collapse_whitespace(&item.company_name),
            MAX_COMPANY_NAME_LEN,
        ),
        email: best_email,
        phone: best_phone,
        website,
        snippet: truncate_chars(item.snippet.trim(), MAX_SNIPPET_LEN),
        commodity: commodity.to_string(),
        source: item.source,
        collection_date: Utc::now(),
        quality_score: 0,
        additional_emails,
        additional_phones,
    };
    record.quality_score = score_quality(&record);

    Some(record)
}

/// Collection-side quality rubric. Additive, order-independent, capped at
/// 100. The validator pipeline has its own rubric with different weights;
/// the two are intentionally separate functions.
pub fn score_quality(record: &SupplierRecord) -> u8 {
    let mut score: u32 = 0;

    if let Some(email) = record.email.as_deref().filter(|e| !e.is_empty()) {
        score += 40;
        let email_lower = email.to_lowercase();
        if [".com", ".net", ".org"]
            .iter()
            .any(|d| email_lower.contains(d))
        {
            score += 5;
        }
    }

    if record.phone.as_deref().map_or(false, |p| !p.is_empty()) {
        score += 30;
    }

    if let Some(website) = record.website.as_deref().filter(|w| !w.is_empty()) {
        score += 20;
        if website.starts_with("https") {
            score += 5;
        }
    }

    if record.snippet.len() > 100 {
        score += 10;
    }

    if !record.additional_emails.is_empty() {
        score += 5;
    }

    score.min(100) as u8
}

/// Turn one commodity's raw search items into scored records.
///
/// A batch-level pre-filter on lowercased company + commodity drops repeat
/// companies before anything is scored; the first occurrence claims the key
/// even when it ends up discarded for lacking contacts. Cross-batch
/// deduplication is the dedup module's job, not this one's.
pub fn process_search_items(items: &[SearchItem], commodity: &str) -> Vec<SupplierRecord> {
    let mut seen_combinations = HashSet::new();
    let mut records = Vec::new();

    for item in items {
        let unique_key = format!("{}_{}", item.company_name.trim().to_lowercase(), commodity);
        if !seen_combinations.insert(unique_key) {
            continue;
        }

        if let Some(record) = build_record(item, commodity) {
            records.push(record);
        }
    }

    debug!(
        "Processed {} search items into {} records for '{}'",
        items.len(),
        records.len(),
        commodity
    );
    records
}

/// Record for a contact lifted directly from a supplier website. These skip
/// the additive rubric and carry a fixed quality.
pub fn build_deep_scrape_record(
    company_name: &str,
    email: Option<String>,
    phone: Option<String>,
    website: &str,
    commodity: &str,
) -> SupplierRecord {
    SupplierRecord {
        company_name: truncate_chars(&collapse_whitespace(company_name), MAX_COMPANY_NAME_LEN),
        email: email.map(|e| e.to_lowercase()),
        phone,
        website: Some(website.to_string()),
        snippet: format!("Deep scraped contact from {}", website),
        commodity: commodity.to_string(),
        source: Source::WebsiteDeepScrape,
        collection_date: Utc::now(),
        quality_score: DEEP_SCRAPE_QUALITY,
        additional_emails: String::new(),
        additional_phones: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn item(
        company: &str,
        website: Option<&str>,
        emails: &[&str],
        phones: &[&str],
    ) -> SearchItem {
        SearchItem {
            company_name: company.to_string(),
            website: website.map(String::from),
            snippet: "snippet".to_string(),
            emails: emails.iter().map(|s| s.to_string()).collect(),
            phones: phones.iter().map(|s| s.to_string()).collect(),
            source: Source::DuckDuckGoSearch,
        }
    }

    #[test]
    fn item_without_any_contact_signal_is_discarded() {
        assert!(build_record(&item("Acme", None, &[], &[]), "Bearings").is_none());
    }

    #[test]
    fn website_alone_is_enough_contact_signal() {
        let record = build_record(
            &item("Acme", Some("https://acme.com"), &[], &[]),
            "Bearings",
        )
        .unwrap();
        assert!(record.email.is_none());
        assert_eq!(record.website.as_deref(), Some("https://acme.com"));
    }

    #[test]
    fn best_email_is_first_in_extraction_order_and_lowercased() {
        let record = build_record(
            &item(
                "Acme",
                None,
                &["Sales@Acme.com", "info@acme.com", "x@acme.com", "y@acme.com"],
                &[],
            ),
            "Bearings",
        )
        .unwrap();
        assert_eq!(record.email.as_deref(), Some("sales@acme.com"));
        // Overflow keeps at most two, in order.
        assert_eq!(record.additional_emails, "info@acme.com, x@acme.com");
    }

    #[test]
    fn company_name_is_cleaned_and_truncated() {
        let long_name = format!("Acme   Industrial\t Supply {}", "x".repeat(200));
        let record = build_record(
            &item(&long_name, Some("https://acme.com"), &[], &[]),
            "Bearings",
        )
        .unwrap();
        assert!(record.company_name.starts_with("Acme Industrial Supply"));
        assert_eq!(record.company_name.chars().count(), MAX_COMPANY_NAME_LEN);
    }

    #[test]
    fn score_covers_every_bonus_and_stays_capped() {
        let mut record = build_record(
            &item(
                "Acme",
                Some("https://acme.com"),
                &["sales@acme.com", "info@acme.com"],
                &["555-123-4567"],
            ),
            "Bearings",
        )
        .unwrap();
        record.snippet = "s".repeat(150);
        // 40 + 5 + 30 + 20 + 5 + 10 + 5 = 115, capped.
        assert_eq!(score_quality(&record), 100);
    }

    #[test]
    fn score_is_zero_only_for_empty_signal() {
        let record = SupplierRecord {
            company_name: "Acme".to_string(),
            email: None,
            phone: None,
            website: None,
            snippet: String::new(),
            commodity: "Bearings".to_string(),
            source: Source::GoogleSearch,
            collection_date: chrono::Utc::now(),
            quality_score: 0,
            additional_emails: String::new(),
            additional_phones: String::new(),
        };
        assert_eq!(score_quality(&record), 0);
    }

    #[test]
    fn batch_prefilter_is_first_seen_wins_not_score_wins() {
        // First occurrence has no email, second has one; the second is
        // dropped before scoring ever matters.
        let items = vec![
            item("Acme", Some("https://acme.com"), &[], &[]),
            item("Acme", Some("https://acme.com"), &["b@acme.com"], &[]),
        ];
        let records = process_search_items(&items, "Bearings");
        assert_eq!(records.len(), 1);
        assert!(records[0].email.is_none());
    }

    #[test]
    fn prefilter_key_claimed_even_by_discarded_items() {
        let items = vec![
            item("Acme", None, &[], &[]), // no signal, discarded
            item("Acme", Some("https://acme.com"), &["b@acme.com"], &[]),
        ];
        let records = process_search_items(&items, "Bearings");
        assert!(records.is_empty());
    }

    #[test]
    fn deep_scrape_records_carry_fixed_quality() {
        let record = build_deep_scrape_record(
            "Contact from https://acme.com",
            Some("Sales@acme.com".to_string()),
            None,
            "https://acme.com",
            "Bearings",
        );
        assert_eq!(record.quality_score, DEEP_SCRAPE_QUALITY);
        assert_eq!(record.email.as_deref(), Some("sales@acme.com"));
        assert_eq!(record.source, Source::WebsiteDeepScrape);
    }
}
