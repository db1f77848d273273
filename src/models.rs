use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{commodities::CommodityCatalog, config::Config, database::DbPool};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Quality tier cutoffs shared by both scoring rubrics.
pub const HIGH_TIER_MIN: u8 = 70;
pub const MEDIUM_TIER_MIN: u8 = 40;

/// Collection channel a record came from. The string forms are what gets
/// persisted and exported, so they stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "Google Search")]
    GoogleSearch,
    #[serde(rename = "DuckDuckGo Search")]
    DuckDuckGoSearch,
    #[serde(rename = "ThomasNet Directory")]
    ThomasNetDirectory,
    #[serde(rename = "Website Deep Scrape")]
    WebsiteDeepScrape,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::GoogleSearch => "Google Search",
            Source::DuckDuckGoSearch => "DuckDuckGo Search",
            Source::ThomasNetDirectory => "ThomasNet Directory",
            Source::WebsiteDeepScrape => "Website Deep Scrape",
        }
    }

    pub fn parse(s: &str) -> Option<Source> {
        match s {
            "Google Search" => Some(Source::GoogleSearch),
            "DuckDuckGo Search" => Some(Source::DuckDuckGoSearch),
            "ThomasNet Directory" => Some(Source::ThomasNetDirectory),
            "Website Deep Scrape" => Some(Source::WebsiteDeepScrape),
            _ => None,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One raw search hit together with the contacts pulled out of its text.
/// Produced by the search layer, consumed once by the record builder.
#[derive(Debug, Clone)]
pub struct SearchItem {
    /// Cleaned from the raw page title; separators and site taglines gone.
    pub company_name: String,
    pub website: Option<String>,
    pub snippet: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub source: Source,
}

/// The persisted unit: one supplier contact for one commodity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub company_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub snippet: String,
    pub commodity: String,
    pub source: Source,
    pub collection_date: DateTime<Utc>,
    pub quality_score: u8,
    /// Overflow contacts beyond the best candidate, comma-joined.
    pub additional_emails: String,
    pub additional_phones: String,
}

impl SupplierRecord {
    pub fn has_email(&self) -> bool {
        self.email.as_deref().map_or(false, |e| !e.is_empty())
    }
}

pub struct CliApp {
    pub config: Config,
    pub db_pool: DbPool,
    pub catalog: CommodityCatalog,
}
