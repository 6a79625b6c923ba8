use std::collections::HashSet;
use crate::common::context::RequestContext;
use crate::common::key::{DirectoryKey, KeyAllocator};
use crate::directory::{Directory, Privilege};
use crate::drive::profile::read_user_name;
use crate::drive::store::{
    allocate_key, key_allocator, load_directory, load_directory_as, require_privilege,
    save_directory,
};
use crate::drive::{Drive, DriveError};

/// State shared by every node of one copy operation.
struct Copier<'a> {
    ctx: &'a RequestContext,
    actor_name: String,
    keys: KeyAllocator,
    /// Source keys on the current path, for cycle detection.
    on_path: HashSet<DirectoryKey>,
}

/// Clones the subtree at `source_key` under `destination_key` and returns the key of
/// the new top-level clone.
///
/// Every clone is owned by the acting user, keeps the source's name, visibility and
/// file metadata, and takes its cooperators and subscribers from the directory it is
/// attached to. Children are saved before their parent and the destination is saved
/// last, so a failure never leaves the destination pointing at a missing clone.
pub(crate) fn copy_subtree(
    drive: &mut Drive,
    ctx: &RequestContext,
    source_key: &DirectoryKey,
    destination_key: &DirectoryKey,
) -> Result<DirectoryKey, DriveError> {
    let mut destination = load_directory_as(drive, ctx, destination_key, Privilege::Subscriber)?;
    let mut copier = Copier {
        ctx,
        actor_name: read_user_name(drive, &ctx.actor_id)?,
        keys: key_allocator(drive),
        on_path: HashSet::new(),
    };

    let clone_key = copier.copy_into(drive, source_key, &mut destination)?;
    save_directory(drive, ctx, destination_key, &mut destination)?;

    tracing::info!(
        actor = %ctx.actor_id,
        source = %source_key,
        destination = %destination_key,
        clone = %clone_key,
        "copied directory tree"
    );
    Ok(clone_key)
}

impl Copier<'_> {
    fn copy_into(
        &mut self,
        drive: &mut Drive,
        source_key: &DirectoryKey,
        destination: &mut Directory,
    ) -> Result<DirectoryKey, DriveError> {
        if self.on_path.contains(source_key) {
            tracing::warn!(key = %source_key, "cycle in source tree");
            return Err(DriveError::CycleDetected(source_key.to_string()));
        }

        // 1. 检查权限
        let source = load_directory(drive, source_key)?;
        require_privilege(&source, self.ctx, Privilege::Subscriber)?;
        require_privilege(destination, self.ctx, Privilege::Subscriber)?;

        // 2. 构造副本
        let mut clone = Directory::new(
            &source.name,
            &self.ctx.actor_id,
            &self.actor_name,
            source.visibility,
            self.ctx.timestamp,
        );
        clone.files = source.files.clone();
        clone.inherit_access_from(destination);
        let clone_key = allocate_key(drive, &mut self.keys, self.ctx, &source.name)?;

        // 3. 递归复制子目录
        self.on_path.insert(source_key.clone());
        for child_key in &source.child_directory_keys {
            self.copy_into(drive, child_key, &mut clone)?;
        }
        self.on_path.remove(source_key);

        // 4. 挂载并保存
        destination.add_child_directories(std::slice::from_ref(&clone_key));
        save_directory(drive, self.ctx, &clone_key, &mut clone)?;
        tracing::debug!(source = %source_key, clone = %clone_key, "cloned directory");
        Ok(clone_key)
    }
}
