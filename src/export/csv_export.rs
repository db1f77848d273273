// src/export/csv_export.rs
use chrono::Utc;
use std::io::Write;

use crate::models::SupplierRecord;
use crate::validator::ValidatedRecord;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Final score floor for the priority-contacts export.
const PRIORITY_MIN_SCORE: u8 = 60;

/// Quote a field when it would break the row; snippets routinely carry
/// commas and quotes.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row(file: &mut std::fs::File, fields: &[&str]) -> std::io::Result<()> {
    let row: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
    writeln!(file, "{}", row.join(","))
}

pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Main supplier database. Callers apply the dedup pipeline and their
    /// sort order before handing records over.
    pub fn export_suppliers(&self, records: &[SupplierRecord], filename: &str) -> Result<()> {
        if let Some(parent) = std::path::Path::new(filename).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::File::create(filename)?;
        write_row(
            &mut file,
            &[
                "company_name",
                "email",
                "phone",
                "website",
                "snippet",
                "commodity",
                "source",
                "collection_date",
                "quality_score",
                "additional_emails",
                "additional_phones",
            ],
        )?;

        for record in records {
            let collection_date = record
                .collection_date
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            let quality = record.quality_score.to_string();
            write_row(
                &mut file,
                &[
                    &record.company_name,
                    record.email.as_deref().unwrap_or(""),
                    record.phone.as_deref().unwrap_or(""),
                    record.website.as_deref().unwrap_or(""),
                    &record.snippet,
                    &record.commodity,
                    record.source.as_str(),
                    &collection_date,
                    &quality,
                    &record.additional_emails,
                    &record.additional_phones,
                ],
            )?;
        }

        Ok(())
    }

    /// Cleaned database with validation verdicts alongside the originals.
    pub fn export_validated(&self, records: &[ValidatedRecord], filename: &str) -> Result<()> {
        if let Some(parent) = std::path::Path::new(filename).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::File::create(filename)?;
        write_row(
            &mut file,
            &[
                "company_name",
                "email",
                "email_valid",
                "email_validation_reason",
                "phone",
                "phone_cleaned",
                "phone_valid",
                "website",
                "website_cleaned",
                "website_valid",
                "commodity",
                "snippet",
                "source",
                "collection_date",
                "original_quality_score",
                "final_quality_score",
            ],
        )?;

        for record in records {
            let email_valid = record.email_valid.to_string();
            let phone_valid = record.phone_valid.to_string();
            let website_valid = record.website_valid.to_string();
            let original = record.original_quality_score.to_string();
            let final_score = record.final_quality_score.to_string();
            write_row(
                &mut file,
                &[
                    &record.company_name,
                    &record.email,
                    &email_valid,
                    &record.email_validation_reason,
                    &record.phone,
                    &record.phone_cleaned,
                    &phone_valid,
                    &record.website,
                    &record.website_cleaned,
                    &website_valid,
                    &record.commodity,
                    &record.snippet,
                    &record.source,
                    &record.collection_date,
                    &original,
                    &final_score,
                ],
            )?;
        }

        Ok(())
    }

    /// Contacts ready for immediate outreach: valid email and a final score
    /// of at least 60. Returns how many made the cut.
    pub fn export_priority_contacts(
        &self,
        records: &[ValidatedRecord],
        filename: &str,
    ) -> Result<usize> {
        let priority: Vec<&ValidatedRecord> = records
            .iter()
            .filter(|r| r.email_valid && r.final_quality_score >= PRIORITY_MIN_SCORE)
            .collect();

        if priority.is_empty() {
            return Ok(0);
        }

        if let Some(parent) = std::path::Path::new(filename).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::File::create(filename)?;
        write_row(
            &mut file,
            &[
                "company_name",
                "email",
                "phone_cleaned",
                "website_cleaned",
                "commodity",
                "final_quality_score",
            ],
        )?;

        for record in &priority {
            let final_score = record.final_quality_score.to_string();
            write_row(
                &mut file,
                &[
                    &record.company_name,
                    &record.email,
                    &record.phone_cleaned,
                    &record.website_cleaned,
                    &record.commodity,
                    &final_score,
                ],
            )?;
        }

        Ok(priority.len())
    }

    pub fn supplier_filename(&self, directory: &str) -> String {
        format!(
            "{}/supplier_database_{}.csv",
            directory,
            Utc::now().format("%Y%m%d_%H%M%S")
        )
    }

    pub fn high_quality_filename(&self, directory: &str) -> String {
        format!(
            "{}/high_quality_contacts_{}.csv",
            directory,
            Utc::now().format("%Y%m%d_%H%M%S")
        )
    }

    pub fn cleaned_filename(&self, directory: &str) -> String {
        format!(
            "{}/cleaned_supplier_data_{}.csv",
            directory,
            Utc::now().format("%Y%m%d_%H%M%S")
        )
    }

    pub fn priority_filename(&self, directory: &str) -> String {
        format!(
            "{}/priority_contacts_{}.csv",
            directory,
            Utc::now().format("%Y%m%d_%H%M%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_with_separators_get_quoted() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a, b"), "\"a, b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
