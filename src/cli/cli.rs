use tracing::info;

use crate::commodities::load_commodities_from_yaml;
use crate::config::Config;
use crate::database::DbPool;
use crate::models::CliApp;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub enum MenuAction {
    CollectSuppliers,
    ValidateDataset,
    ExportDatabase,
    ShowStats,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::CollectSuppliers => {
                write!(f, "🔍 Collect supplier contacts (search + directory scrape)")
            }
            MenuAction::ValidateDataset => {
                write!(f, "🔧 Validate & clean the collected dataset")
            }
            MenuAction::ExportDatabase => write!(f, "📤 Export supplier database to CSV"),
            MenuAction::ShowStats => write!(f, "📊 Show database statistics"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl CliApp {
    pub async fn new(config: Config, db_pool: DbPool) -> Result<Self> {
        info!("Loading commodity catalog...");
        let catalog = load_commodities_from_yaml("commodities.yml").await?;
        info!("Loaded {} commodities from configuration", catalog.len());

        Ok(Self {
            config,
            db_pool,
            catalog,
        })
    }
}
