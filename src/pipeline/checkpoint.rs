// src/pipeline/checkpoint.rs
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{Result, SupplierRecord};

pub const PROGRESS_FILE: &str = "scraping_progress.json";
pub const BACKUP_FILE: &str = "supplier_data_backup.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub completed_commodities: Vec<String>,
    pub completed_count: usize,
    pub total_commodities: usize,
    pub last_updated: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Backup {
    data: Vec<SupplierRecord>,
    count: usize,
    backup_time: String,
}

pub async fn save_progress(
    path: &str,
    completed: &[String],
    total_commodities: usize,
) -> Result<()> {
    let progress = Progress {
        completed_commodities: completed.to_vec(),
        completed_count: completed.len(),
        total_commodities,
        last_updated: Utc::now().to_rfc3339(),
    };

    let json = serde_json::to_string_pretty(&progress)?;
    tokio::fs::write(path, json).await?;
    info!(
        "Progress saved: {}/{} commodities",
        completed.len(),
        total_commodities
    );
    Ok(())
}

/// Missing or unreadable progress files resolve to a fresh start rather
/// than an error.
pub async fn load_progress(path: &str) -> Option<Progress> {
    let content = tokio::fs::read_to_string(path).await.ok()?;
    match serde_json::from_str::<Progress>(&content) {
        Ok(progress) => {
            info!(
                "Loaded progress: {}/{} commodities completed",
                progress.completed_count, progress.total_commodities
            );
            Some(progress)
        }
        Err(e) => {
            warn!("Could not parse progress file {}: {}", path, e);
            None
        }
    }
}

pub async fn backup_records(path: &str, records: &[SupplierRecord]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let backup = Backup {
        data: records.to_vec(),
        count: records.len(),
        backup_time: Utc::now().to_rfc3339(),
    };

    let json = serde_json::to_string_pretty(&backup)?;
    tokio::fs::write(path, json).await?;
    info!("Data backed up: {} records", records.len());
    Ok(())
}

pub async fn load_backup(path: &str) -> Option<Vec<SupplierRecord>> {
    let content = tokio::fs::read_to_string(path).await.ok()?;
    match serde_json::from_str::<Backup>(&content) {
        Ok(backup) => {
            info!("Loaded backup data: {} records", backup.data.len());
            Some(backup.data)
        }
        Err(e) => {
            warn!("Could not parse backup file {}: {}", path, e);
            None
        }
    }
}
