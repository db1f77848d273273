// src/cli/run_export.rs
use crate::database::load_suppliers;
use crate::export::{print_collection_report, CsvExporter};
use crate::models::{CliApp, Result};
use crate::pipeline::dedup::{finalize, presentation_order, report_order};

/// Records at or above this score make the high-quality export.
const HIGH_QUALITY_EXPORT_MIN: u8 = 60;

impl CliApp {
    /// Export the deduplicated supplier database in commodity-first report
    /// order, plus a quality-first file of the strongest contacts, then
    /// print the comprehensive report.
    pub async fn run_export(&self) -> Result<()> {
        let records = load_suppliers(&self.db_pool).await?;
        if records.is_empty() {
            println!("\n⚠️  Nothing to export yet. Run a collection first.");
            return Ok(());
        }

        let mut records = finalize(records);
        report_order(&mut records);

        let exporter = CsvExporter::new();
        let directory = &self.config.output.directory;

        let filename = exporter.supplier_filename(directory);
        exporter.export_suppliers(&records, &filename)?;
        println!("✅ Supplier database exported: {}", filename);

        let mut high_quality: Vec<_> = records
            .iter()
            .filter(|r| r.quality_score >= HIGH_QUALITY_EXPORT_MIN)
            .cloned()
            .collect();
        if !high_quality.is_empty() {
            presentation_order(&mut high_quality);
            let hq_filename = exporter.high_quality_filename(directory);
            exporter.export_suppliers(&high_quality, &hq_filename)?;
            println!(
                "🏆 High-quality contacts exported: {} ({} records)",
                hq_filename,
                high_quality.len()
            );
        }

        print_collection_report(&records);

        Ok(())
    }
}
