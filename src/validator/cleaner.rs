// src/validator/cleaner.rs
use tracing::{debug, info};

use super::checks::{clean_company_name, DataValidator};
use super::types::{DatasetRow, ValidatedRecord};

/// Validation-side quality rubric. Deliberately separate from the
/// collection rubric in the record builder: the weights differ even where
/// the signals overlap, and the two must not be unified.
pub fn score_validated(record: &ValidatedRecord) -> u8 {
    let mut score: u32 = 0;

    if record.email_valid {
        score += 30;
        if record.email_validation_reason.contains("business domain") {
            score += 10;
        } else if !record.email.is_empty() {
            score += 5;
        }
    }

    if record.phone_valid {
        score += 20;
        if record.phone_cleaned.len() > 10 {
            score += 5;
        }
    }

    if record.website_valid {
        score += 15;
        if record.website.starts_with("https") {
            score += 5;
        }
    }

    let company_lower = record.company_name.to_lowercase();
    if record.company_name.len() > 3 {
        score += 5;
    }
    if ["inc", "llc", "corp", "ltd", "company"]
        .iter()
        .any(|s| company_lower.contains(s))
    {
        score += 5;
    }

    if record.snippet.len() > 50 {
        score += 5;
    }

    score.min(100) as u8
}

/// Re-validate one dataset row. No field ever errors: absence and malformed
/// input both collapse into invalid-with-reason verdicts.
pub async fn validate_row(
    validator: &DataValidator,
    row: &DatasetRow,
    use_network: bool,
) -> ValidatedRecord {
    let email_raw = row.email.as_deref().unwrap_or("").trim().to_lowercase();

    let (email_valid, email_reason) = if email_raw.is_empty() {
        (false, "No email provided".to_string())
    } else {
        let syntax = validator.validate_email_syntax(&email_raw);
        if !syntax.valid {
            (false, syntax.reason)
        } else if use_network {
            let domain = validator.check_email_domain(&email_raw).await;
            (domain.valid, domain.reason)
        } else {
            let domain = validator.simple_domain_check(&email_raw);
            (domain.valid, domain.reason)
        }
    };

    let phone_raw = row.phone.as_deref().unwrap_or("");
    let phone_check = validator.validate_phone(phone_raw);

    let website_raw = row.website.as_deref().unwrap_or("");
    let website_check = validator.validate_website(website_raw);

    let mut record = ValidatedRecord {
        company_name: clean_company_name(row.company_name.as_deref().unwrap_or("")),
        email: email_raw,
        email_valid,
        email_validation_reason: email_reason,
        phone: phone_raw.to_string(),
        phone_cleaned: phone_check.cleaned,
        phone_valid: phone_check.valid,
        phone_validation_reason: phone_check.reason,
        website: website_raw.to_string(),
        website_cleaned: website_check.cleaned,
        website_valid: website_check.valid,
        website_validation_reason: website_check.reason,
        commodity: row.commodity.clone().unwrap_or_default(),
        snippet: row.snippet.clone().unwrap_or_default(),
        source: row.source.clone().unwrap_or_default(),
        collection_date: row.collection_date.clone().unwrap_or_default(),
        original_quality_score: row.data_quality_score.unwrap_or(0),
        final_quality_score: 0,
    };
    record.final_quality_score = score_validated(&record);

    record
}

/// Run the whole dataset through validation, chunked purely for progress
/// reporting. Single-threaded and sequential by design.
pub async fn validate_and_clean(
    validator: &DataValidator,
    rows: &[DatasetRow],
    use_network: bool,
    batch_size: usize,
) -> Vec<ValidatedRecord> {
    let batch_size = batch_size.max(1);
    let total_batches = rows.len().div_ceil(batch_size);
    info!(
        "Validating {} records in {} batches of {}",
        rows.len(),
        total_batches,
        batch_size
    );
    if use_network {
        info!("Network domain checks enabled (slower, more accurate)");
    }

    let mut results = Vec::with_capacity(rows.len());

    for (batch_num, batch) in rows.chunks(batch_size).enumerate() {
        debug!("Processing batch {}/{}", batch_num + 1, total_batches);

        for row in batch {
            results.push(validate_row(validator, row, use_network).await);
        }

        if (batch_num + 1) % 5 == 0 || batch_num + 1 == total_batches {
            let progress = ((batch_num + 1) as f64 / total_batches as f64) * 100.0;
            info!(
                "Validation progress: {:.1}% ({} records processed)",
                progress,
                results.len()
            );
        }
    }

    results
}

/// Order and dedup the cleaned dataset for export. This call site sorts
/// quality-first (final score desc, commodity asc) — the opposite precedence
/// of the collection export — then runs the same two drop-duplicate passes
/// in their fixed order: by email, then by company+commodity.
pub fn finalize_validated(mut records: Vec<ValidatedRecord>) -> Vec<ValidatedRecord> {
    records.sort_by(|a, b| {
        b.final_quality_score
            .cmp(&a.final_quality_score)
            .then_with(|| a.commodity.cmp(&b.commodity))
    });

    let mut seen_emails = std::collections::HashSet::new();
    let records: Vec<ValidatedRecord> = records
        .into_iter()
        .filter(|r| r.email.is_empty() || seen_emails.insert(r.email.clone()))
        .collect();

    let mut seen_companies = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|r| seen_companies.insert((r.company_name.clone(), r.commodity.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn validator() -> DataValidator {
        DataValidator::new(Duration::from_secs(5))
    }

    fn row(email: Option<&str>, phone: Option<&str>, website: Option<&str>) -> DatasetRow {
        DatasetRow {
            company_name: Some("acme industrial inc.".to_string()),
            email: email.map(String::from),
            phone: phone.map(String::from),
            website: website.map(String::from),
            commodity: Some("Bearings".to_string()),
            snippet: Some("snippet".to_string()),
            source: Some("DuckDuckGo Search".to_string()),
            collection_date: Some("2024-12-20 14:30:22".to_string()),
            data_quality_score: Some(75),
        }
    }

    #[tokio::test]
    async fn validated_record_does_not_mutate_originals() {
        let input = row(
            Some("Sales@Acme.com"),
            Some("(212) 555-0147"),
            Some("acme.com"),
        );
        let record = validate_row(&validator(), &input, false).await;

        // Original website travels alongside its cleaned form.
        assert_eq!(record.website, "acme.com");
        assert_eq!(record.website_cleaned, "https://acme.com");
        assert_eq!(record.phone, "(212) 555-0147");
        assert_eq!(record.phone_cleaned, "2125550147");
        assert_eq!(record.company_name, "Acme Industrial Inc.");
        assert_eq!(record.original_quality_score, 75);
    }

    #[tokio::test]
    async fn missing_fields_collapse_to_invalid_not_errors() {
        let record = validate_row(&validator(), &DatasetRow::default(), false).await;
        assert!(!record.email_valid);
        assert_eq!(record.email_validation_reason, "No email provided");
        assert!(!record.phone_valid);
        assert!(!record.website_valid);
        assert_eq!(record.final_quality_score, 0);
    }

    #[tokio::test]
    async fn disposable_email_flagged_in_full_row() {
        let input = row(Some("john@10minutemail.com"), None, None);
        let record = validate_row(&validator(), &input, false).await;
        assert!(!record.email_valid);
        assert_eq!(record.email_validation_reason, "Disposable email");
    }

    #[tokio::test]
    async fn validation_score_hits_the_cap_with_every_bonus() {
        let mut record = validate_row(
            &validator(),
            &row(
                Some("someone@gmail.com"),
                Some("+1 (212) 555-0147"),
                Some("https://acme.com"),
            ),
            false,
        )
        .await;
        record.website = "https://acme.com".to_string();
        record.snippet = "s".repeat(60);
        // 30+10 email, 20+5 phone, 15+5 website, 5+5 company, 5 snippet.
        assert_eq!(score_validated(&record), 100);
    }

    #[tokio::test]
    async fn the_two_rubrics_weigh_email_differently() {
        // Same email-only signal: collection rubric gives 40+5, the
        // validation rubric 30+5. They are distinct functions on purpose.
        let record = validate_row(&validator(), &row(Some("sales@acme.com"), None, None), false)
            .await;
        assert!(record.email_valid);
        let email_component = 30 + 5;
        let company_component = 5 + 5; // length + "inc" suffix
        assert_eq!(
            record.final_quality_score,
            email_component + company_component
        );
    }

    #[tokio::test]
    async fn finalize_validated_dedups_after_quality_sort() {
        let mut a = validate_row(&validator(), &row(Some("sales@acme.com"), None, None), false)
            .await;
        a.final_quality_score = 40;
        let mut b = a.clone();
        b.final_quality_score = 90;

        let out = finalize_validated(vec![a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].final_quality_score, 90);
    }

    #[tokio::test]
    async fn batches_cover_every_row() {
        let rows: Vec<DatasetRow> = (0..7)
            .map(|_| row(Some("sales@acme.com"), None, None))
            .collect();
        let out = validate_and_clean(&validator(), &rows, false, 3).await;
        assert_eq!(out.len(), 7);
    }
}
