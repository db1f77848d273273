use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    cli::cli::MenuAction,
    models::{CliApp, Result},
};
use tracing::error;

impl CliApp {
    pub async fn run(&self) -> Result<()> {
        println!("\n🚀 Welcome to Supplier Scraper!");
        println!("═══════════════════════════════════════");

        // Show initial stats
        self.show_database_stats().await?;

        loop {
            let actions = vec![
                MenuAction::CollectSuppliers,
                MenuAction::ValidateDataset,
                MenuAction::ExportDatabase,
                MenuAction::ShowStats,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::CollectSuppliers => {
                    if let Err(e) = self.run_collection().await {
                        error!("Collection failed: {}", e);
                    }
                }
                MenuAction::ValidateDataset => {
                    if let Err(e) = self.run_validation().await {
                        error!("Validation failed: {}", e);
                    }
                }
                MenuAction::ExportDatabase => {
                    if let Err(e) = self.run_export().await {
                        error!("Export failed: {}", e);
                    }
                }
                MenuAction::ShowStats => {
                    if let Err(e) = self.show_database_stats().await {
                        error!("Failed to show stats: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using Supplier Scraper!");
                    break;
                }
            }
        }

        Ok(())
    }
}
