use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::common::constants::{CURRENT_DRIVE_VERSION, DEFAULT_DATABASE_FILE, SUBSCRIPTION_VALIDITY_SECS};
use crate::common::key::KeyStrategy;

/// Top-level structure of the `drive.json` configuration file.
//
// // `drive.json` 配置文件的顶层结构。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveConfig {
    /// Name of the drive.
    pub name: String,
    /// Configuration format version.
    pub version: u32,
    /// Path of the ledger database, relative to the drive root.
    pub database: PathBuf,
    /// Lifetime of a subscription granted by `add_subscribers` or `subscribe`, in seconds.
    #[serde(default = "default_subscription_validity")]
    pub subscription_validity_secs: i64,
    /// How keys of new directories are chosen.
    #[serde(default)]
    pub key_strategy: KeyStrategy,
}

fn default_subscription_validity() -> i64 {
    SUBSCRIPTION_VALIDITY_SECS
}

impl DriveConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            name: "blockdrive".to_string(),
            version: CURRENT_DRIVE_VERSION,
            database: PathBuf::from(DEFAULT_DATABASE_FILE),
            subscription_validity_secs: SUBSCRIPTION_VALIDITY_SECS,
            key_strategy: KeyStrategy::default(),
        }
    }
}
