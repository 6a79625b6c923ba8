mod common;

use std::fs;
use blockdrive::common::constants::CONFIG_FILE_NAME;
use blockdrive::common::key::KeyStrategy;
use blockdrive::directory::{FileMeta, Visibility};
use blockdrive::drive::{CreateError, Drive, DriveConfig, OpenError};
use common::{alice, bob, setup_drive};
use tempfile::tempdir;

#[test]
fn test_create_writes_config_and_database() {
    let dir = tempdir().unwrap();
    let (drive_path, drive) = setup_drive(&dir);

    assert_eq!(drive.root_path.as_deref(), Some(drive_path.as_path()));
    assert!(drive_path.join(CONFIG_FILE_NAME).exists());
    assert!(drive_path.join(&drive.config.database).exists());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(drive_path.join(CONFIG_FILE_NAME)).unwrap()).unwrap();
    assert_eq!(json["name"].as_str(), Some("test-drive"));
    assert_eq!(json["keyStrategy"].as_str(), Some("disambiguated"));
}

#[test]
fn test_create_refuses_non_empty_directory() {
    let dir = tempdir().unwrap();
    let (drive_path, drive) = setup_drive(&dir);
    drop(drive);

    let result = Drive::create_drive(&drive_path, "again");
    assert!(matches!(result, Err(CreateError::DriveAlreadyExists(_))));
}

#[test]
fn test_reopen_keeps_records_and_history() {
    let dir = tempdir().unwrap();
    let (drive_path, mut drive) = setup_drive(&dir);
    let key = drive.create_directory(&alice(1000), "Docs", Visibility::Private).unwrap();
    drive.add_files(&alice(1100), &key, vec![FileMeta::new("notes.md")]).unwrap();
    drive
        .add_cooperators(&alice(1200), &key, &["u2".to_string()], false)
        .unwrap();
    drop(drive);

    let drive = Drive::open_drive(&drive_path).unwrap();
    let profile = drive.read_user_profile(&alice(1300)).unwrap();
    assert_eq!(profile.name, "Alice");

    let docs = drive.read_directory(&bob(1300), &key).unwrap();
    assert!(docs.file("notes.md").is_some());
    assert!(docs.is_cooperator("u2"));

    let history = drive.read_history(&alice(1300), &key).unwrap();
    let dates: Vec<i64> = history.iter().map(|d| d.last_modified).collect();
    assert_eq!(dates, vec![1000, 1100, 1200]);
}

#[test]
fn test_open_uses_stored_config() {
    let dir = tempdir().unwrap();
    let drive_path = dir.path().join("legacy-drive");
    let mut config = DriveConfig::new("legacy-drive");
    config.key_strategy = KeyStrategy::Legacy;
    config.subscription_validity_secs = 60;
    drop(Drive::create_drive_with_config(&drive_path, config.clone()).unwrap());

    let drive = Drive::open_drive(&drive_path).unwrap();
    assert_eq!(drive.config, config);
}

#[test]
fn test_open_missing_drive_fails() {
    let dir = tempdir().unwrap();
    let result = Drive::open_drive(&dir.path().join("nowhere"));
    assert!(matches!(result, Err(OpenError::PathNotFound(_))));

    let result = Drive::open_drive(dir.path());
    assert!(matches!(result, Err(OpenError::ConfigNotFound)));
}

#[test]
fn test_open_rejects_unknown_version() {
    let dir = tempdir().unwrap();
    let (drive_path, drive) = setup_drive(&dir);
    let mut config = drive.config.clone();
    drop(drive);
    config.version = 99;
    fs::write(drive_path.join(CONFIG_FILE_NAME), serde_json::to_string(&config).unwrap()).unwrap();

    let result = Drive::open_drive(&drive_path);
    assert!(matches!(result, Err(OpenError::UnsupportedVersion { supported: 1, found: 99 })));
}

#[test]
fn test_open_without_database_fails() {
    let dir = tempdir().unwrap();
    let (drive_path, drive) = setup_drive(&dir);
    let database = drive_path.join(&drive.config.database);
    drop(drive);
    fs::remove_file(database).unwrap();

    let result = Drive::open_drive(&drive_path);
    assert!(matches!(result, Err(OpenError::DatabaseNotFound)));
}
