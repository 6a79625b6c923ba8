use crate::common::context::RequestContext;
use crate::common::key::DirectoryKey;
use crate::directory::{Directory, FileMeta, Privilege};
use crate::drive::store::{load_directory_as, save_directory};
use crate::drive::{Drive, DriveError};

/// Adds file metadata to a directory. Colliding names are suffixed, never rejected.
pub(crate) fn add_files(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    files: Vec<FileMeta>,
) -> Result<Directory, DriveError> {
    let mut directory = load_directory_as(drive, ctx, key, Privilege::Cooperator)?;
    let names = directory.add_files(files);
    save_directory(drive, ctx, key, &mut directory)?;
    tracing::info!(actor = %ctx.actor_id, %key, files = ?names, "added files");
    Ok(directory)
}

pub(crate) fn remove_files(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    names: &[String],
) -> Result<Directory, DriveError> {
    let mut directory = load_directory_as(drive, ctx, key, Privilege::Cooperator)?;
    directory.remove_files(names);
    save_directory(drive, ctx, key, &mut directory)?;
    tracing::info!(actor = %ctx.actor_id, %key, files = ?names, "removed files");
    Ok(directory)
}
