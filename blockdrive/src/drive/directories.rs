use std::collections::{BTreeMap, HashSet};
use crate::common::context::RequestContext;
use crate::common::key::DirectoryKey;
use crate::directory::{Directory, Privilege, Visibility};
use crate::drive::profile::read_user_name;
use crate::drive::store::{
    allocate_key, key_allocator, load_directory, load_directory_as, save_directory,
};
use crate::drive::{Drive, DriveError};

/// Creates a standalone directory owned by the acting user and returns its key.
///
/// The directory is not attached anywhere; use `add_child_directories` for that.
pub(crate) fn create_directory(
    drive: &mut Drive,
    ctx: &RequestContext,
    name: &str,
    visibility: Visibility,
) -> Result<DirectoryKey, DriveError> {
    let creator_name = read_user_name(drive, &ctx.actor_id)?;
    let mut directory = Directory::new(name, &ctx.actor_id, &creator_name, visibility, ctx.timestamp);

    let mut keys = key_allocator(drive);
    let key = allocate_key(drive, &mut keys, ctx, name)?;
    save_directory(drive, ctx, &key, &mut directory)?;

    tracing::info!(actor = %ctx.actor_id, %key, name, "created directory");
    Ok(key)
}

pub(crate) fn read_directory(
    drive: &Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
) -> Result<Directory, DriveError> {
    load_directory_as(drive, ctx, key, Privilege::Subscriber)
}

/// Reads every key the acting user may read. Missing and unreadable keys are left
/// out of the result; ledger failures still abort.
pub(crate) fn read_directories(
    drive: &Drive,
    ctx: &RequestContext,
    keys: &[DirectoryKey],
) -> Result<BTreeMap<DirectoryKey, Directory>, DriveError> {
    let mut result = BTreeMap::new();
    for key in keys {
        match read_directory(drive, ctx, key) {
            Ok(directory) => {
                result.insert(key.clone(), directory);
            }
            Err(e @ (DriveError::NotFound(_) | DriveError::Unauthorized)) => {
                tracing::debug!(%key, error = %e, "skipping unreadable directory");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(result)
}

/// Attaches existing directories under `parent`.
///
/// The acting user must be able to read every incoming directory. Keys already
/// attached are left alone. Fails with `Conflict` if a newly attached directory has
/// the same name as a current child. Incoming directories are not checked against
/// each other, and no cycle check is made; the recursive engines guard against
/// cycles instead.
pub(crate) fn add_child_directories(
    drive: &mut Drive,
    ctx: &RequestContext,
    parent_key: &DirectoryKey,
    keys: &[DirectoryKey],
) -> Result<Directory, DriveError> {
    let mut parent = load_directory_as(drive, ctx, parent_key, Privilege::Cooperator)?;

    // 1. 新目录必须存在且可读
    let mut incoming_names = Vec::with_capacity(keys.len());
    for key in keys {
        let directory = load_directory_as(drive, ctx, key, Privilege::Subscriber)?;
        if !parent.child_directory_keys.contains(key) {
            incoming_names.push(directory.name);
        }
    }

    // 2. 与现有子目录比较名称
    let existing_names = child_names(drive, &parent)?;
    let conflicts: Vec<&str> = incoming_names
        .iter()
        .filter(|name| existing_names.contains(name.as_str()))
        .map(String::as_str)
        .collect();
    if !conflicts.is_empty() {
        return Err(DriveError::Conflict(conflicts.join(", ")));
    }

    parent.add_child_directories(keys);
    save_directory(drive, ctx, parent_key, &mut parent)?;
    tracing::info!(actor = %ctx.actor_id, parent = %parent_key, count = keys.len(), "attached directories");
    Ok(parent)
}

/// Names of the children of `parent` that still resolve. Dangling keys are skipped.
fn child_names(drive: &Drive, parent: &Directory) -> Result<HashSet<String>, DriveError> {
    let mut names = HashSet::new();
    for key in &parent.child_directory_keys {
        match load_directory(drive, key) {
            Ok(child) => {
                names.insert(child.name);
            }
            Err(DriveError::NotFound(_)) => {
                tracing::warn!(%key, "child directory key does not resolve");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(names)
}

pub(crate) fn remove_child_directories(
    drive: &mut Drive,
    ctx: &RequestContext,
    parent_key: &DirectoryKey,
    keys: &[DirectoryKey],
) -> Result<Directory, DriveError> {
    let mut parent = load_directory_as(drive, ctx, parent_key, Privilege::Cooperator)?;
    parent.remove_child_directories(keys);
    save_directory(drive, ctx, parent_key, &mut parent)?;
    tracing::info!(actor = %ctx.actor_id, parent = %parent_key, count = keys.len(), "detached directories");
    Ok(parent)
}

pub(crate) fn rename_directory(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    name: &str,
) -> Result<Directory, DriveError> {
    let mut directory = load_directory_as(drive, ctx, key, Privilege::Cooperator)?;
    directory.name = name.to_string();
    save_directory(drive, ctx, key, &mut directory)?;
    tracing::info!(actor = %ctx.actor_id, %key, name, "renamed directory");
    Ok(directory)
}

/// Renames `key`, a child of `parent_key`, refusing names used by its siblings.
///
/// Requires `Cooperator` on the child and `Subscriber` on the parent, both checked
/// before the parent's children are looked at.
pub(crate) fn rename_child_directory(
    drive: &mut Drive,
    ctx: &RequestContext,
    parent_key: &DirectoryKey,
    key: &DirectoryKey,
    name: &str,
) -> Result<Directory, DriveError> {
    // 1. 检查权限
    let mut directory = load_directory_as(drive, ctx, key, Privilege::Cooperator)?;
    let parent = load_directory_as(drive, ctx, parent_key, Privilege::Subscriber)?;
    if !parent.child_directory_keys.contains(key) {
        return Err(DriveError::NotFound(key.to_string()));
    }

    // 2. 检查同级目录名称
    for sibling_key in parent.child_directory_keys.iter().filter(|k| *k != key) {
        match load_directory(drive, sibling_key) {
            Ok(sibling) if sibling.name == name => {
                return Err(DriveError::Conflict(name.to_string()));
            }
            Ok(_) | Err(DriveError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }
    }

    directory.name = name.to_string();
    save_directory(drive, ctx, key, &mut directory)?;
    tracing::info!(actor = %ctx.actor_id, parent = %parent_key, %key, name, "renamed child directory");
    Ok(directory)
}

pub(crate) fn set_visibility(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    visibility: Visibility,
) -> Result<Directory, DriveError> {
    let mut directory = load_directory_as(drive, ctx, key, Privilege::Cooperator)?;
    directory.visibility = visibility;
    save_directory(drive, ctx, key, &mut directory)?;
    tracing::info!(actor = %ctx.actor_id, %key, %visibility, "changed visibility");
    Ok(directory)
}

/// Every saved version of the directory, oldest first. The privilege check uses the
/// current version.
pub(crate) fn read_history(
    drive: &Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
) -> Result<Vec<Directory>, DriveError> {
    load_directory_as(drive, ctx, key, Privilege::Subscriber)?;
    drive
        .ledger
        .history(key.as_str())?
        .iter()
        .map(|version| serde_json::from_slice(&version.value).map_err(DriveError::from))
        .collect()
}
