// src/cli/run_validation.rs
use std::time::Duration;

use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::info;

use crate::database::load_dataset_rows;
use crate::export::CsvExporter;
use crate::models::{CliApp, Result};
use crate::validator::{
    build_report, finalize_validated, report::print_validation_summary, validate_and_clean,
    DataValidator,
};

impl CliApp {
    /// Re-validate and re-clean everything in the suppliers table, print
    /// the report, and export the cleaned dataset plus priority contacts.
    pub async fn run_validation(&self) -> Result<()> {
        let rows = load_dataset_rows(&self.db_pool).await?;
        if rows.is_empty() {
            println!("\n⚠️  No collected data to validate. Run a collection first.");
            return Ok(());
        }

        println!("\n📂 Loaded {} records from the database", rows.len());

        let use_network = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Enable network domain checks? (slower, more accurate)")
            .default(self.config.validation.enable_network_checks)
            .interact()?;

        let validator = DataValidator::new(Duration::from_secs(
            self.config.validation.domain_check_timeout_seconds,
        ));

        let cleaned = validate_and_clean(
            &validator,
            &rows,
            use_network,
            self.config.validation.batch_size,
        )
        .await;

        let report = build_report(&cleaned);
        print_validation_summary(&report);

        let finalized = finalize_validated(cleaned);
        info!("{} records after deduplication", finalized.len());

        let exporter = CsvExporter::new();
        let directory = &self.config.output.directory;

        let cleaned_file = exporter.cleaned_filename(directory);
        exporter.export_validated(&finalized, &cleaned_file)?;
        println!("✅ Cleaned database exported: {}", cleaned_file);

        let priority_file = exporter.priority_filename(directory);
        let priority_count = exporter.export_priority_contacts(&finalized, &priority_file)?;
        if priority_count > 0 {
            println!(
                "🎯 Priority contacts exported: {} ({} contacts)",
                priority_file, priority_count
            );
        } else {
            println!("⚠️  No contacts met the priority threshold");
        }

        Ok(())
    }
}
