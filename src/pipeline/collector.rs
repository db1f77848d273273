// src/pipeline/collector.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::models::SupplierRecord;

/// Accumulator for one collection run. Owns the growing record list so every
/// pipeline step receives it explicitly instead of reaching for shared
/// state, and carries the cooperative cancellation flag that the run loop
/// checks between work units.
pub struct Collector {
    records: Vec<SupplierRecord>,
    completed_commodities: Vec<String>,
    cancel: Arc<AtomicBool>,
}

impl Collector {
    pub fn new(cancel: Arc<AtomicBool>) -> Self {
        Self {
            records: Vec::new(),
            completed_commodities: Vec::new(),
            cancel,
        }
    }

    pub fn append(&mut self, record: SupplierRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: Vec<SupplierRecord>) {
        for record in records {
            self.append(record);
        }
    }

    pub fn records(&self) -> &[SupplierRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    pub fn mark_completed(&mut self, commodity: &str) {
        self.completed_commodities.push(commodity.to_string());
    }

    pub fn completed_commodities(&self) -> &[String] {
        &self.completed_commodities
    }

    /// Seed the accumulator from a checkpoint backup.
    pub fn resume_with(&mut self, records: Vec<SupplierRecord>, completed: Vec<String>) {
        self.records = records;
        self.completed_commodities = completed;
    }

    pub fn progress(&self, total_commodities: usize, current: &str) -> ProgressSnapshot {
        let average_quality = if self.is_empty() {
            0.0
        } else {
            self.records
                .iter()
                .map(|r| r.quality_score as f64)
                .sum::<f64>()
                / self.records.len() as f64
        };

        ProgressSnapshot {
            completed: self.completed_commodities.len(),
            total: total_commodities,
            total_records: self.len(),
            current_commodity: current.to_string(),
            average_quality,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub total_records: usize,
    pub current_commodity: String,
    pub average_quality: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use chrono::Utc;

    fn record(score: u8) -> SupplierRecord {
        SupplierRecord {
            company_name: "Acme".to_string(),
            email: None,
            phone: None,
            website: Some("https://acme.com".to_string()),
            snippet: String::new(),
            commodity: "Bearings".to_string(),
            source: Source::DuckDuckGoSearch,
            collection_date: Utc::now(),
            quality_score: score,
            additional_emails: String::new(),
            additional_phones: String::new(),
        }
    }

    #[test]
    fn cancellation_flag_is_observed() {
        let cancel = Arc::new(AtomicBool::new(false));
        let collector = Collector::new(cancel.clone());
        assert!(!collector.is_cancelled());
        cancel.store(true, Ordering::Relaxed);
        assert!(collector.is_cancelled());
    }

    #[test]
    fn progress_reports_average_quality() {
        let mut collector = Collector::new(Arc::new(AtomicBool::new(false)));
        collector.append(record(80));
        collector.append(record(40));
        collector.mark_completed("Bearings");

        let snapshot = collector.progress(100, "Spices");
        assert_eq!(snapshot.completed, 1);
        assert_eq!(snapshot.total_records, 2);
        assert!((snapshot.average_quality - 60.0).abs() < f64::EPSILON);
    }
}
