use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub scraping: ScrapingConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapingConfig {
    pub request_timeout_seconds: u64,
    /// Random pause between search requests, in milliseconds.
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub max_results_per_search: usize,
    pub max_deep_scrape_sites: usize,
    /// Progress/backup files are written every N commodities.
    pub checkpoint_interval: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// When false, email domains are only checked syntactically.
    pub enable_network_checks: bool,
    pub domain_check_timeout_seconds: u64,
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub progress_interval: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraping: ScrapingConfig {
                request_timeout_seconds: 15,
                min_delay_ms: 2000,
                max_delay_ms: 4000,
                max_results_per_search: 15,
                max_deep_scrape_sites: 6,
                checkpoint_interval: 5,
            },
            validation: ValidationConfig {
                enable_network_checks: false,
                domain_check_timeout_seconds: 5,
                batch_size: 100,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                progress_interval: 5,
            },
            output: OutputConfig {
                directory: "out".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
