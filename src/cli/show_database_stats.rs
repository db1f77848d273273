use crate::{database::get_database_stats, models::CliApp};
use tracing::error;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

impl CliApp {
    pub async fn show_database_stats(&self) -> Result<()> {
        println!("\n📊 Database Statistics");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let stats = match get_database_stats(&self.db_pool).await {
            Ok(stats) => stats,
            Err(e) => {
                error!("Failed to read database stats: {}", e);
                return Err(e);
            }
        };

        println!("🏢 Suppliers: {}", stats.total_suppliers);
        println!("📧 With email: {}", stats.with_email);
        println!("📞 With phone: {}", stats.with_phone);
        println!("🌐 With website: {}", stats.with_website);
        println!(
            "🗂️  Commodities covered: {}/{}",
            stats.commodities_covered,
            self.catalog.len()
        );
        println!("⭐ Average quality: {:.1}/100", stats.average_quality);

        Ok(())
    }
}
