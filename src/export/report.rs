// src/export/report.rs
use std::collections::{HashMap, HashSet};

use crate::models::{SupplierRecord, HIGH_TIER_MIN, MEDIUM_TIER_MIN};

fn pct(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Comprehensive collection report, printed after a run or export.
pub fn print_collection_report(records: &[SupplierRecord]) {
    let total = records.len();

    println!("\n📊 Supplier Database Report");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if total == 0 {
        println!("No records collected yet.");
        return;
    }

    let unique_companies: HashSet<&str> =
        records.iter().map(|r| r.company_name.as_str()).collect();
    let commodities: HashSet<&str> = records.iter().map(|r| r.commodity.as_str()).collect();
    let with_email = records.iter().filter(|r| r.has_email()).count();
    let with_phone = records
        .iter()
        .filter(|r| r.phone.as_deref().map_or(false, |p| !p.is_empty()))
        .count();
    let with_website = records
        .iter()
        .filter(|r| r.website.as_deref().map_or(false, |w| !w.is_empty()))
        .count();
    let average_quality =
        records.iter().map(|r| r.quality_score as f64).sum::<f64>() / total as f64;

    println!("📦 Total records: {}", total);
    println!("🏢 Unique companies: {}", unique_companies.len());
    println!("🗂️  Commodities covered: {}", commodities.len());
    println!("📧 With email: {} ({:.1}%)", with_email, pct(with_email, total));
    println!("📞 With phone: {} ({:.1}%)", with_phone, pct(with_phone, total));
    println!(
        "🌐 With website: {} ({:.1}%)",
        with_website,
        pct(with_website, total)
    );
    println!("⭐ Average quality score: {:.1}/100", average_quality);

    // Quality tiers
    let high = records
        .iter()
        .filter(|r| r.quality_score >= HIGH_TIER_MIN)
        .count();
    let medium = records
        .iter()
        .filter(|r| r.quality_score >= MEDIUM_TIER_MIN && r.quality_score < HIGH_TIER_MIN)
        .count();
    let low = total - high - medium;
    println!("\n📈 Quality distribution:");
    println!("   High (70-100): {} ({:.1}%)", high, pct(high, total));
    println!("   Medium (40-69): {} ({:.1}%)", medium, pct(medium, total));
    println!("   Low (0-39): {} ({:.1}%)", low, pct(low, total));

    // Top commodities by record count
    let mut commodity_counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *commodity_counts.entry(record.commodity.as_str()).or_insert(0) += 1;
    }
    let mut top: Vec<(&str, usize)> = commodity_counts.into_iter().collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    println!("\n🏆 Top commodities:");
    for (commodity, count) in top.iter().take(10) {
        println!("   {}: {} records", commodity, count);
    }

    // Source performance
    let mut source_counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for record in records {
        let entry = source_counts.entry(record.source.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += record.has_email() as usize;
    }
    let mut sources: Vec<(&str, (usize, usize))> = source_counts.into_iter().collect();
    sources.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
    println!("\n🔍 Source performance:");
    for (source, (count, emails)) in sources {
        println!(
            "   {}: {} records ({:.1}%), {} with email",
            source,
            count,
            pct(count, total),
            emails
        );
    }

    // Outreach readiness
    let complete = records
        .iter()
        .filter(|r| {
            r.has_email()
                && r.phone.as_deref().map_or(false, |p| !p.is_empty())
                && r.website.as_deref().map_or(false, |w| !w.is_empty())
        })
        .count();
    println!("\n💼 Business value:");
    println!("   Complete contacts (email+phone+website): {}", complete);
    println!("   Ready to contact (email): {}", with_email);
}
