// src/validator/types.rs
use serde::{Deserialize, Serialize};

/// One row of a previously collected dataset. Everything is optional; the
/// checks turn absence into a verdict instead of an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetRow {
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub commodity: Option<String>,
    pub snippet: Option<String>,
    pub source: Option<String>,
    pub collection_date: Option<String>,
    pub data_quality_score: Option<i64>,
}

/// Verdict for a single field: validity plus a short machine-readable
/// reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub valid: bool,
    pub reason: String,
}

impl CheckResult {
    pub fn ok(reason: &str) -> Self {
        Self {
            valid: true,
            reason: reason.to_string(),
        }
    }

    pub fn fail(reason: &str) -> Self {
        Self {
            valid: false,
            reason: reason.to_string(),
        }
    }
}

/// Phone verdict carries the digit-stripped form alongside validity.
#[derive(Debug, Clone)]
pub struct PhoneCheck {
    pub valid: bool,
    pub cleaned: String,
    pub reason: String,
}

/// Website verdict carries the scheme-normalized URL.
#[derive(Debug, Clone)]
pub struct WebsiteCheck {
    pub valid: bool,
    pub cleaned: String,
    pub reason: String,
}

/// The enriched, re-scored record produced for every dataset row. The input
/// row is never mutated; originals travel alongside the cleaned forms.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedRecord {
    pub company_name: String,
    pub email: String,
    pub email_valid: bool,
    pub email_validation_reason: String,
    pub phone: String,
    pub phone_cleaned: String,
    pub phone_valid: bool,
    pub phone_validation_reason: String,
    pub website: String,
    pub website_cleaned: String,
    pub website_valid: bool,
    pub website_validation_reason: String,
    pub commodity: String,
    pub snippet: String,
    pub source: String,
    pub collection_date: String,
    pub original_quality_score: i64,
    pub final_quality_score: u8,
}
