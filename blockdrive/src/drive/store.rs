use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::common::context::RequestContext;
use crate::common::key::{DirectoryKey, KeyAllocator};
use crate::directory::{Directory, Privilege};
use crate::drive::{Drive, DriveError};

/// Loads the record stored under `key`, if any.
pub(crate) fn load_record<T: DeserializeOwned>(drive: &Drive, key: &str) -> Result<Option<T>, DriveError> {
    match drive.ledger.get(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub(crate) fn put_record<T: Serialize>(
    drive: &mut Drive,
    key: &str,
    record: &T,
    timestamp: i64,
) -> Result<(), DriveError> {
    let bytes = serde_json::to_vec(record)?;
    drive.ledger.put(key, &bytes, timestamp)?;
    Ok(())
}

/// Loads a directory without any privilege check.
pub(crate) fn load_directory(drive: &Drive, key: &DirectoryKey) -> Result<Directory, DriveError> {
    load_record(drive, key.as_str())?.ok_or_else(|| DriveError::NotFound(key.to_string()))
}

/// Loads a directory and checks that the acting user holds `privilege` on it.
pub(crate) fn load_directory_as(
    drive: &Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    privilege: Privilege,
) -> Result<Directory, DriveError> {
    let directory = load_directory(drive, key)?;
    require_privilege(&directory, ctx, privilege)?;
    Ok(directory)
}

pub(crate) fn require_privilege(
    directory: &Directory,
    ctx: &RequestContext,
    privilege: Privilege,
) -> Result<(), DriveError> {
    if directory.check_privilege(&ctx.actor_id, ctx.timestamp, privilege) {
        Ok(())
    } else {
        Err(DriveError::Unauthorized)
    }
}

/// Stamps the directory with the acting user and time, then writes it.
pub(crate) fn save_directory(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    directory: &mut Directory,
) -> Result<(), DriveError> {
    directory.stamp(ctx);
    put_record(drive, key.as_str(), directory, ctx.timestamp)
}

pub(crate) fn key_allocator(drive: &Drive) -> KeyAllocator {
    KeyAllocator::new(drive.config.key_strategy)
}

/// Picks the key for a new directory named `name` created by the acting user.
pub(crate) fn allocate_key(
    drive: &Drive,
    keys: &mut KeyAllocator,
    ctx: &RequestContext,
    name: &str,
) -> Result<DirectoryKey, DriveError> {
    keys.allocate(&ctx.actor_id, ctx.timestamp, name, |key| {
        drive.ledger.contains(key.as_str()).map_err(DriveError::from)
    })
}
