use serde::{Deserialize, Serialize};
use crate::common::constants::{
    PROFILE_KEY_PREFIX, ROOT_DIRECTORY_NAME, SHARE_DIRECTORY_NAME, SUBSCRIPTION_DIRECTORY_NAME,
};
use crate::common::context::RequestContext;
use crate::common::key::DirectoryKey;
use crate::directory::{Directory, Member, Visibility};
use crate::drive::store::{allocate_key, key_allocator, load_record, put_record, save_directory};
use crate::drive::{Drive, DriveError};

/// Per-user record anchoring the user's own directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    /// Display name shown in directory ACLs.
    pub name: String,
    /// Key of the user's root directory ("All Files").
    #[serde(rename = "private")]
    pub root_directory_key: DirectoryKey,
}

fn profile_key(id: &str) -> String {
    format!("{PROFILE_KEY_PREFIX}{id}")
}

pub(crate) fn load_profile(drive: &Drive, id: &str) -> Result<Option<UserProfile>, DriveError> {
    load_record(drive, &profile_key(id))
}

/// Returns the acting user's profile, creating it on first call.
///
/// A new profile comes with three private directories: the root "All Files" holding
/// "Share" and "Subscription". An existing profile is returned unchanged and `name` is
/// ignored.
pub(crate) fn initiate_user_profile(
    drive: &mut Drive,
    ctx: &RequestContext,
    name: &str,
) -> Result<UserProfile, DriveError> {
    if let Some(profile) = load_profile(drive, &ctx.actor_id)? {
        return Ok(profile);
    }

    let id = ctx.actor_id.as_str();
    let mut keys = key_allocator(drive);

    // 1. 创建三个默认目录
    let mut root = Directory::new(ROOT_DIRECTORY_NAME, id, name, Visibility::Private, ctx.timestamp);
    let root_key = allocate_key(drive, &mut keys, ctx, ROOT_DIRECTORY_NAME)?;
    let mut share = Directory::new(SHARE_DIRECTORY_NAME, id, name, Visibility::Private, ctx.timestamp);
    let share_key = allocate_key(drive, &mut keys, ctx, SHARE_DIRECTORY_NAME)?;
    let mut subscription =
        Directory::new(SUBSCRIPTION_DIRECTORY_NAME, id, name, Visibility::Private, ctx.timestamp);
    let subscription_key = allocate_key(drive, &mut keys, ctx, SUBSCRIPTION_DIRECTORY_NAME)?;

    root.add_child_directories(&[share_key.clone(), subscription_key.clone()]);

    // 2. 先保存子目录，再保存根目录
    save_directory(drive, ctx, &share_key, &mut share)?;
    save_directory(drive, ctx, &subscription_key, &mut subscription)?;
    save_directory(drive, ctx, &root_key, &mut root)?;

    // 3. 保存用户资料
    let profile = UserProfile {
        id: id.to_string(),
        name: name.to_string(),
        root_directory_key: root_key,
    };
    put_record(drive, &profile_key(id), &profile, ctx.timestamp)?;
    tracing::info!(actor = %id, root = %profile.root_directory_key, "initiated user profile");

    Ok(profile)
}

pub(crate) fn read_user_profile(drive: &Drive, ctx: &RequestContext) -> Result<UserProfile, DriveError> {
    load_profile(drive, &ctx.actor_id)?.ok_or_else(|| DriveError::ProfileNotFound(ctx.actor_id.clone()))
}

pub(crate) fn read_user_name(drive: &Drive, id: &str) -> Result<String, DriveError> {
    load_profile(drive, id)?
        .map(|p| p.name)
        .ok_or_else(|| DriveError::ProfileNotFound(id.to_string()))
}

/// Looks up the display name of every id. Fails on the first id without a profile.
pub(crate) fn resolve_members(drive: &Drive, ids: &[String]) -> Result<Vec<Member>, DriveError> {
    ids.iter()
        .map(|id| Ok(Member::new(id.clone(), read_user_name(drive, id)?)))
        .collect()
}
