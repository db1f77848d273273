// src/pipeline/dedup.rs
//
// Cross-record deduplication as an ordered pipeline of named passes. Each
// pass takes and returns a full sequence. The email pass runs before the
// company+commodity pass, and the second pass only sees survivors of the
// first; callers must not reorder them.
use std::collections::HashSet;

use crate::models::SupplierRecord;

/// Stable descending sort on quality; ties keep their prior relative order,
/// which is what makes "first occurrence" in the passes below mean
/// "highest quality".
pub fn sort_by_quality_desc(records: &mut [SupplierRecord]) {
    records.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));
}

/// Keep the first occurrence per distinct email. Records without an email
/// never collide with each other and all survive this pass.
pub fn dedup_by_email(records: Vec<SupplierRecord>) -> Vec<SupplierRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| match record.email.as_deref() {
            Some(email) if !email.is_empty() => seen.insert(email.to_string()),
            _ => true,
        })
        .collect()
}

/// Keep the first occurrence per (company name, commodity) pair.
pub fn dedup_by_company_commodity(records: Vec<SupplierRecord>) -> Vec<SupplierRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert((record.company_name.clone(), record.commodity.clone())))
        .collect()
}

/// Full dedup pipeline: quality sort, then the two drop-duplicate passes in
/// their fixed order. Output order is the quality-sorted order; callers pick
/// a final presentation with [`presentation_order`] or [`report_order`].
pub fn finalize(mut records: Vec<SupplierRecord>) -> Vec<SupplierRecord> {
    sort_by_quality_desc(&mut records);
    let records = dedup_by_email(records);
    dedup_by_company_commodity(records)
}

/// Quality desc, commodity asc — used for the cleaned-database export.
pub fn presentation_order(records: &mut [SupplierRecord]) {
    records.sort_by(|a, b| {
        b.quality_score
            .cmp(&a.quality_score)
            .then_with(|| a.commodity.cmp(&b.commodity))
    });
}

/// Commodity asc, quality desc — used for the comprehensive report export.
pub fn report_order(records: &mut [SupplierRecord]) {
    records.sort_by(|a, b| {
        a.commodity
            .cmp(&b.commodity)
            .then_with(|| b.quality_score.cmp(&a.quality_score))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use chrono::Utc;

    fn record(company: &str, commodity: &str, email: Option<&str>, score: u8) -> SupplierRecord {
        SupplierRecord {
            company_name: company.to_string(),
            email: email.map(String::from),
            phone: None,
            website: Some("https://example.com".to_string()),
            snippet: String::new(),
            commodity: commodity.to_string(),
            source: Source::GoogleSearch,
            collection_date: Utc::now(),
            quality_score: score,
            additional_emails: String::new(),
            additional_phones: String::new(),
        }
    }

    #[test]
    fn email_pass_keeps_highest_quality_duplicate() {
        let records = vec![
            record("Low Co", "Bearings", Some("a@x.com"), 40),
            record("High Co", "Bearings", Some("a@x.com"), 80),
        ];
        let out = finalize(records);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].quality_score, 80);
        assert_eq!(out[0].company_name, "High Co");
    }

    #[test]
    fn records_without_email_all_survive_the_email_pass() {
        let records = vec![
            record("A", "Bearings", None, 50),
            record("B", "Bearings", None, 50),
            record("C", "Bearings", Some(""), 50),
        ];
        let out = dedup_by_email(records);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn company_pass_runs_on_survivors_of_email_pass() {
        // The highest-quality Acme record loses the email pass to a
        // different company, so a lower-quality Acme record ends up winning
        // the company pass. This ordering dependency is intentional.
        let records = vec![
            record("Beta", "Bearings", Some("a@x.com"), 95),
            record("Acme", "Bearings", Some("a@x.com"), 90),
            record("Acme", "Bearings", None, 50),
        ];
        let out = finalize(records);
        assert_eq!(out.len(), 2);
        let acme = out.iter().find(|r| r.company_name == "Acme").unwrap();
        assert_eq!(acme.quality_score, 50);
    }

    #[test]
    fn finalize_is_idempotent() {
        let records = vec![
            record("Acme", "Bearings", Some("a@x.com"), 80),
            record("Acme", "Bearings", Some("a@x.com"), 40),
            record("Beta", "Spices", None, 60),
            record("Beta", "Spices", None, 55),
        ];
        let once = finalize(records);
        let twice = finalize(once.clone());
        let key = |r: &SupplierRecord| {
            (
                r.company_name.clone(),
                r.commodity.clone(),
                r.email.clone(),
                r.quality_score,
            )
        };
        let mut a: Vec<_> = once.iter().map(key).collect();
        let mut b: Vec<_> = twice.iter().map(key).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn the_two_final_orders_disagree_on_precedence() {
        let mut for_presentation = vec![
            record("A", "Spices", None, 90),
            record("B", "Bearings", None, 60),
            record("C", "Spices", None, 60),
        ];
        let mut for_report = for_presentation.clone();

        presentation_order(&mut for_presentation);
        let scores: Vec<u8> = for_presentation.iter().map(|r| r.quality_score).collect();
        assert_eq!(scores, vec![90, 60, 60]);
        // Tie on 60 broken by commodity.
        assert_eq!(for_presentation[1].commodity, "Bearings");

        report_order(&mut for_report);
        let commodities: Vec<&str> =
            for_report.iter().map(|r| r.commodity.as_str()).collect();
        assert_eq!(commodities, vec!["Bearings", "Spices", "Spices"]);
        // Within Spices, quality desc.
        assert_eq!(for_report[1].quality_score, 90);
    }

    #[test]
    fn stable_sort_preserves_tie_order() {
        let mut records = vec![
            record("First", "Bearings", None, 70),
            record("Second", "Bearings", None, 70),
        ];
        sort_by_quality_desc(&mut records);
        assert_eq!(records[0].company_name, "First");
    }
}
