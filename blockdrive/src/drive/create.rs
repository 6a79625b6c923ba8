use std::fs;
use std::path::{Path, PathBuf};
use crate::common::constants::CONFIG_FILE_NAME;
use crate::drive::Drive;
use crate::drive::config::DriveConfig;
use crate::ledger::{LedgerError, SqliteLedger};

/// Defines errors that can occur during drive creation.
//
// // 定义在创建网盘期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    /// The target directory already exists and is not empty.
    //
    // // 目标目录已存在且不为空。
    #[error("Drive directory already exists at {0}")]
    DriveAlreadyExists(PathBuf),

    /// An I/O error occurred while creating directories or writing files.
    //
    // // 在创建目录或写入文件时发生 I/O 错误。
    #[error("Failed to create drive directory: {0}")]
    DirectoryCreationError(#[from] std::io::Error),

    /// Failed to serialize the `drive.json` configuration file.
    //
    // // 序列化 `drive.json` 配置文件失败。
    #[error("Failed to serialize configuration: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// An error occurred while initializing the ledger database.
    //
    // // 初始化账本数据库时发生错误。
    #[error("Failed to init ledger: {0}")]
    LedgerInitError(#[from] LedgerError),
}

/// Creates a new drive at `drive_path` with the given configuration.
pub(crate) fn create_drive(drive_path: &Path, config: DriveConfig) -> Result<Drive, CreateError> {
    if drive_path.exists() && fs::read_dir(drive_path)?.next().is_some() {
        return Err(CreateError::DriveAlreadyExists(drive_path.to_path_buf()));
    }
    fs::create_dir_all(drive_path)?;

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(drive_path.join(CONFIG_FILE_NAME), config_json)?;

    let ledger = SqliteLedger::open(&drive_path.join(&config.database))?;
    tracing::info!(path = %drive_path.display(), name = %config.name, "created drive");

    Ok(Drive {
        root_path: Some(drive_path.to_path_buf()),
        config,
        ledger: Box::new(ledger),
    })
}
