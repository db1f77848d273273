// src/validator/report.rs
use std::collections::HashMap;

use serde::Serialize;

use super::types::ValidatedRecord;
use crate::models::{HIGH_TIER_MIN, MEDIUM_TIER_MIN};

#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub total_records: usize,
    pub valid_emails: usize,
    pub valid_phones: usize,
    pub valid_websites: usize,
    pub email_validation_rate: f64,
    pub phone_validation_rate: f64,
    pub website_validation_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceStats {
    pub source: String,
    pub records: usize,
    pub valid_emails: usize,
    pub valid_phones: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub summary: ValidationSummary,
    pub quality: QualityDistribution,
    /// Email failure/success reasons with counts, most common first.
    pub email_reasons: Vec<(String, usize)>,
    pub top_commodities: Vec<(String, usize)>,
    pub source_stats: Vec<SourceStats>,
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn counted_desc(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

pub fn build_report(records: &[ValidatedRecord]) -> ValidationReport {
    let total = records.len();
    let valid_emails = records.iter().filter(|r| r.email_valid).count();
    let valid_phones = records.iter().filter(|r| r.phone_valid).count();
    let valid_websites = records.iter().filter(|r| r.website_valid).count();

    let high = records
        .iter()
        .filter(|r| r.final_quality_score >= HIGH_TIER_MIN)
        .count();
    let medium = records
        .iter()
        .filter(|r| {
            r.final_quality_score >= MEDIUM_TIER_MIN && r.final_quality_score < HIGH_TIER_MIN
        })
        .count();
    let low = total - high - medium;

    let average_score = if total == 0 {
        0.0
    } else {
        records
            .iter()
            .map(|r| r.final_quality_score as f64)
            .sum::<f64>()
            / total as f64
    };

    let mut reason_counts: HashMap<String, usize> = HashMap::new();
    let mut commodity_counts: HashMap<String, usize> = HashMap::new();
    let mut per_source: HashMap<String, (usize, usize, usize, u64)> = HashMap::new();
    for record in records {
        *reason_counts
            .entry(record.email_validation_reason.clone())
            .or_insert(0) += 1;
        *commodity_counts
            .entry(record.commodity.clone())
            .or_insert(0) += 1;

        let entry = per_source.entry(record.source.clone()).or_insert((0, 0, 0, 0));
        entry.0 += 1;
        entry.1 += record.email_valid as usize;
        entry.2 += record.phone_valid as usize;
        entry.3 += record.final_quality_score as u64;
    }

    let mut source_stats: Vec<SourceStats> = per_source
        .into_iter()
        .map(|(source, (records, valid_emails, valid_phones, score_sum))| SourceStats {
            source,
            records,
            valid_emails,
            valid_phones,
            average_score: score_sum as f64 / records as f64,
        })
        .collect();
    source_stats.sort_by(|a, b| b.records.cmp(&a.records).then_with(|| a.source.cmp(&b.source)));

    let mut top_commodities = counted_desc(commodity_counts);
    top_commodities.truncate(10);

    ValidationReport {
        summary: ValidationSummary {
            total_records: total,
            valid_emails,
            valid_phones,
            valid_websites,
            email_validation_rate: rate(valid_emails, total),
            phone_validation_rate: rate(valid_phones, total),
            website_validation_rate: rate(valid_websites, total),
        },
        quality: QualityDistribution {
            high,
            medium,
            low,
            average_score,
        },
        email_reasons: counted_desc(reason_counts),
        top_commodities,
        source_stats,
    }
}

pub fn print_validation_summary(report: &ValidationReport) {
    println!("\n📊 Data Validation & Cleaning Summary");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let s = &report.summary;
    println!("📦 Total records processed: {}", s.total_records);
    println!(
        "📧 Valid emails: {} ({:.1}%)",
        s.valid_emails, s.email_validation_rate
    );
    println!(
        "📞 Valid phones: {} ({:.1}%)",
        s.valid_phones, s.phone_validation_rate
    );
    println!(
        "🌐 Valid websites: {} ({:.1}%)",
        s.valid_websites, s.website_validation_rate
    );

    let q = &report.quality;
    println!("\n📈 Quality distribution:");
    println!("   High (70-100): {}", q.high);
    println!("   Medium (40-69): {}", q.medium);
    println!("   Low (0-39): {}", q.low);
    println!("   Average score: {:.1}/100", q.average_score);

    if !report.email_reasons.is_empty() {
        println!("\n🔎 Email validation outcomes:");
        for (reason, count) in &report.email_reasons {
            println!("   {}: {}", reason, count);
        }
    }

    if !report.source_stats.is_empty() {
        println!("\n🔍 Source performance:");
        for stats in &report.source_stats {
            println!(
                "   {}: {} records, {} valid emails, avg quality {:.1}",
                stats.source, stats.records, stats.valid_emails, stats.average_score
            );
        }
    }
}
