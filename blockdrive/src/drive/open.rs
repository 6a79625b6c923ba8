use std::fs;
use std::path::{Path, PathBuf};
use crate::common::constants::{CONFIG_FILE_NAME, CURRENT_DRIVE_VERSION};
use crate::drive::Drive;
use crate::drive::config::DriveConfig;
use crate::ledger::{LedgerError, SqliteLedger};

/// Defines errors that can occur when opening an existing drive.
//
// // 定义在打开一个已存在的网盘时可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The specified path does not exist or is not a directory.
    //
    // // 指定的路径不存在或不是一个目录。
    #[error("Drive path does not exist or is not a directory: {0}")]
    PathNotFound(PathBuf),

    /// The `drive.json` file is missing from the drive directory.
    //
    // // 网盘目录中缺少 `drive.json` 文件。
    #[error("Configuration file 'drive.json' not found in drive.")]
    ConfigNotFound,

    /// The ledger database named in the config is missing.
    //
    // // 配置中指定的账本数据库丢失。
    #[error("Ledger database specified in config not found.")]
    DatabaseNotFound,

    /// An I/O error occurred while reading the configuration file.
    //
    // // 读取配置文件时发生 I/O 错误。
    #[error("Failed to read configuration file: {0}")]
    ConfigReadError(#[from] std::io::Error),

    /// Failed to parse the `drive.json` configuration file.
    //
    // // 解析 `drive.json` 配置文件失败。
    #[error("Failed to parse configuration file: {0}")]
    ConfigParseError(#[from] serde_json::Error),

    /// Failed to open the ledger database.
    //
    // // 打开账本数据库失败。
    #[error("Failed to open ledger: {0}")]
    LedgerOpenError(#[from] LedgerError),

    /// The config version is not supported by this library version.
    //
    // // 配置版本不受此库版本支持。
    #[error("Unsupported drive version: found {found}, but this library supports version {supported}.")]
    UnsupportedVersion { supported: u32, found: u32 },
}

/// Opens an existing drive.
pub(crate) fn open_drive(drive_path: &Path) -> Result<Drive, OpenError> {
    if !drive_path.is_dir() {
        return Err(OpenError::PathNotFound(drive_path.to_path_buf()));
    }

    let config_path = drive_path.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Err(OpenError::ConfigNotFound);
    }

    let config_content = fs::read_to_string(config_path)?;
    let config: DriveConfig = serde_json::from_str(&config_content)?;
    if config.version != CURRENT_DRIVE_VERSION {
        return Err(OpenError::UnsupportedVersion {
            supported: CURRENT_DRIVE_VERSION,
            found: config.version,
        });
    }

    let db_path = drive_path.join(&config.database);
    if !db_path.exists() {
        return Err(OpenError::DatabaseNotFound);
    }
    let ledger = SqliteLedger::open(&db_path)?;
    tracing::debug!(path = %drive_path.display(), "opened drive");

    Ok(Drive {
        root_path: Some(drive_path.to_path_buf()),
        config,
        ledger: Box::new(ledger),
    })
}
