//! JSON backup export and restore

use crate::context::AppContext;
use crate::inventory::InventoryStats;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::{Container, Item};
use tracing::{info, instrument};

/// Backup document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub export_date: DateTime<Utc>,
    /// Email of the exporting user
    #[serde(default)]
    pub user: Option<String>,
    pub stats: InventoryStats,
    pub tubs: Vec<Container>,
    pub items: Vec<Item>,
}

/// Serialized backup ready to save
#[derive(Debug, Clone)]
pub struct BackupFile {
    pub file_name: String,
    pub contents: String,
}

/// `boxedup-backup-YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("boxedup-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Counts restored from a backup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSummary {
    pub tubs: usize,
    pub items: usize,
}

impl AppContext {
    /// Export every container and item as pretty-printed JSON
    #[instrument(skip(self))]
    pub async fn export_backup(&self) -> AppResult<BackupFile> {
        let records = &self.backend().records;
        let tubs = records.list_containers(self.session()).await?;
        let items = records.list_all_items(self.session()).await?;

        let now = Utc::now();
        let backup = Backup {
            export_date: now,
            user: self.session().email().map(str::to_string),
            stats: InventoryStats {
                total_tubs: tubs.len(),
                total_items: items.len(),
            },
            tubs,
            items,
        };

        let contents = serde_json::to_string_pretty(&backup)
            .map_err(|e| AppError::internal(format!("Failed to serialize backup: {}", e)))?;
        info!(
            tubs = backup.stats.total_tubs,
            items = backup.stats.total_items,
            "Backup exported"
        );

        Ok(BackupFile {
            file_name: backup_file_name(now.date_naive()),
            contents,
        })
    }

    /// Restore a backup, inserting or replacing rows by id
    #[instrument(skip(self, json))]
    pub async fn import_backup(&self, json: &str) -> AppResult<RestoreSummary> {
        let backup: Backup = serde_json::from_str(json).map_err(|e| {
            AppError::with_message(shared::ErrorCode::InvalidFormat, format!("Invalid backup: {}", e))
        })?;

        let records = &self.backend().records;
        for tub in &backup.tubs {
            records.upsert_container(self.session(), tub).await?;
        }
        for item in &backup.items {
            records.upsert_item(self.session(), item).await?;
        }

        info!(tubs = backup.tubs.len(), items = backup.items.len(), "Backup restored");
        Ok(RestoreSummary {
            tubs: backup.tubs.len(),
            items: backup.items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(backup_file_name(date), "boxedup-backup-2024-03-07.json");
    }

    #[test]
    fn test_backup_shape() {
        let backup = Backup {
            export_date: Utc::now(),
            user: Some("me@home.test".into()),
            stats: InventoryStats {
                total_tubs: 1,
                total_items: 0,
            },
            tubs: vec![Container::named("t1", "Tools")],
            items: Vec::new(),
        };
        let value = serde_json::to_value(&backup).unwrap();
        assert!(value.get("exportDate").is_some());
        assert_eq!(value["stats"]["totalTubs"], 1);
        assert_eq!(value["stats"]["totalItems"], 0);
        assert_eq!(value["tubs"][0]["name"], "Tools");
    }
}
