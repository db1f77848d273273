// src/cli/run_collection.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::{info, warn};

use crate::database::insert_suppliers;
use crate::export::print_collection_report;
use crate::models::{CliApp, Result, SearchItem, SupplierRecord};
use crate::pipeline::checkpoint::{
    backup_records, load_backup, load_progress, save_progress, BACKUP_FILE, PROGRESS_FILE,
};
use crate::pipeline::{process_search_items, Collector};
use crate::search::SearchClient;

impl CliApp {
    /// Live collection over every commodity that hasn't been completed yet.
    /// Ctrl-C flips a cooperative flag; the loop notices between
    /// commodities, checkpoints, and exits cleanly.
    pub async fn run_collection(&self) -> Result<()> {
        let progress_path = format!("{}/{}", self.config.output.directory, PROGRESS_FILE);
        let backup_path = format!("{}/{}", self.config.output.directory, BACKUP_FILE);

        let cancel = Arc::new(AtomicBool::new(false));
        let mut collector = Collector::new(cancel.clone());

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                println!("\n⏸️  Ctrl-C received, finishing current commodity...");
                cancel.store(true, Ordering::Relaxed);
            }
        });

        // Offer to resume when a previous run left a checkpoint behind.
        if let Some(progress) = load_progress(&progress_path).await {
            if progress.completed_count > 0 {
                let resume = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!(
                        "Resume from checkpoint? ({}/{} commodities done)",
                        progress.completed_count, progress.total_commodities
                    ))
                    .default(true)
                    .interact()?;

                if resume {
                    let records = load_backup(&backup_path).await.unwrap_or_default();
                    collector.resume_with(records, progress.completed_commodities);
                }
            }
        }

        let completed: Vec<String> = collector.completed_commodities().to_vec();
        let remaining: Vec<String> = self
            .catalog
            .commodities
            .iter()
            .filter(|c| !completed.contains(*c))
            .cloned()
            .collect();

        if remaining.is_empty() {
            println!("🎉 All commodities already completed!");
            return Ok(());
        }

        info!(
            "Processing {} remaining commodities ({} already done)",
            remaining.len(),
            completed.len()
        );

        let search = SearchClient::new(Duration::from_secs(
            self.config.scraping.request_timeout_seconds,
        ))?;
        let total = self.catalog.len();
        let interval = self.config.scraping.checkpoint_interval.max(1);

        for (i, commodity) in remaining.iter().enumerate() {
            if collector.is_cancelled() {
                info!("Cancellation requested, stopping before '{}'", commodity);
                break;
            }

            info!(
                "Processing [{}/{}]: {}",
                i + 1,
                remaining.len(),
                commodity
            );

            let records = self.collect_commodity(&search, commodity).await;
            info!("Completed {}: {} records", commodity, records.len());

            if let Err(e) = insert_suppliers(&self.db_pool, &records).await {
                warn!("Failed to persist records for {}: {}", commodity, e);
            }

            collector.extend(records);
            collector.mark_completed(commodity);

            let snapshot = collector.progress(total, commodity);
            info!(
                "Running totals: {} records, {}/{} commodities, avg quality {:.1}",
                snapshot.total_records, snapshot.completed, snapshot.total, snapshot.average_quality
            );

            if (i + 1) % interval == 0 || i + 1 == remaining.len() || collector.is_cancelled() {
                save_progress(&progress_path, collector.completed_commodities(), total).await?;
                backup_records(&backup_path, collector.records()).await?;
            }

            if i + 1 < remaining.len() && !collector.is_cancelled() {
                self.polite_delay().await;
            }
        }

        print_collection_report(collector.records());
        Ok(())
    }

    /// All sources for one commodity: both search engines per term, the
    /// directory once, then deep scrapes of the most promising websites.
    async fn collect_commodity(
        &self,
        search: &SearchClient,
        commodity: &str,
    ) -> Vec<SupplierRecord> {
        let max_results = self.config.scraping.max_results_per_search;
        let mut items: Vec<SearchItem> = Vec::new();

        for term in self.catalog.search_terms_for(commodity) {
            match search.search_google(&term, max_results).await {
                Ok(results) => items.extend(results),
                Err(e) => warn!("Google search failed for '{}': {}", term, e),
            }
            self.polite_delay().await;

            match search.search_duckduckgo(&term, max_results).await {
                Ok(results) => items.extend(results),
                Err(e) => warn!("DuckDuckGo search failed for '{}': {}", term, e),
            }
            self.polite_delay().await;
        }

        match search.search_thomasnet(commodity).await {
            Ok(results) => items.extend(results),
            Err(e) => warn!("ThomasNet search failed for '{}': {}", commodity, e),
        }

        let mut records = process_search_items(&items, commodity);

        let websites: Vec<String> = records
            .iter()
            .filter_map(|r| r.website.clone())
            .filter(|w| w.starts_with("http"))
            .take(self.config.scraping.max_deep_scrape_sites)
            .collect();

        if !websites.is_empty() {
            info!("Deep scraping {} websites...", websites.len());
        }
        for website in websites {
            match search.deep_scrape_site(&website, commodity).await {
                Ok(deep_records) => records.extend(deep_records),
                Err(e) => warn!("Deep scrape failed for {}: {}", website, e),
            }
            self.polite_delay().await;
        }

        records
    }

    async fn polite_delay(&self) {
        let min = self.config.scraping.min_delay_ms;
        let max = self.config.scraping.max_delay_ms.max(min + 1);
        tokio::time::sleep(Duration::from_millis(fastrand::u64(min..max))).await;
    }
}
