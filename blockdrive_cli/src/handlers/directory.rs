use blockdrive::common::context::RequestContext;
use blockdrive::common::key::DirectoryKey;
use blockdrive::directory::{FileMeta, Visibility};
use blockdrive::drive::Drive;
use crate::errors::CliError;
use crate::handlers::print_json;

pub fn handle_mkdir(drive: &mut Drive, ctx: &RequestContext, name: &str, public: bool) -> Result<(), CliError> {
    let visibility = if public { Visibility::Public } else { Visibility::Private };
    let key = drive.create_directory(ctx, name, visibility)?;
    println!("{}", key);
    Ok(())
}

pub fn handle_show(drive: &Drive, ctx: &RequestContext, key: &DirectoryKey) -> Result<(), CliError> {
    print_json(&drive.read_directory(ctx, key)?)
}

pub fn handle_list(drive: &Drive, ctx: &RequestContext, keys: &[DirectoryKey]) -> Result<(), CliError> {
    print_json(&drive.read_directories(ctx, keys)?)
}

pub fn handle_attach(
    drive: &mut Drive,
    ctx: &RequestContext,
    parent: &DirectoryKey,
    keys: &[DirectoryKey],
) -> Result<(), CliError> {
    print_json(&drive.add_child_directories(ctx, parent, keys)?)
}

pub fn handle_detach(
    drive: &mut Drive,
    ctx: &RequestContext,
    parent: &DirectoryKey,
    keys: &[DirectoryKey],
) -> Result<(), CliError> {
    print_json(&drive.remove_child_directories(ctx, parent, keys)?)
}

/// 处理重命名命令；给定父目录时检查同级名称冲突
pub fn handle_rename(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    name: &str,
    parent: Option<&DirectoryKey>,
) -> Result<(), CliError> {
    let directory = match parent {
        Some(parent) => drive.rename_child_directory(ctx, parent, key, name)?,
        None => drive.rename_directory(ctx, key, name)?,
    };
    print_json(&directory)
}

pub fn handle_add_file(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    name: String,
    hash: Option<String>,
    size: Option<u64>,
) -> Result<(), CliError> {
    let file = FileMeta::with_content(name, hash.unwrap_or_default(), size.unwrap_or_default());
    print_json(&drive.add_files(ctx, key, vec![file])?)
}

pub fn handle_remove_files(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    names: &[String],
) -> Result<(), CliError> {
    print_json(&drive.remove_files(ctx, key, names)?)
}

pub fn handle_visibility(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    visibility: Visibility,
) -> Result<(), CliError> {
    print_json(&drive.set_visibility(ctx, key, visibility)?)
}

pub fn handle_copy(
    drive: &mut Drive,
    ctx: &RequestContext,
    source: &DirectoryKey,
    destination: &DirectoryKey,
) -> Result<(), CliError> {
    let key = drive.copy_subtree(ctx, source, destination)?;
    println!("{}", key);
    Ok(())
}

pub fn handle_history(drive: &Drive, ctx: &RequestContext, key: &DirectoryKey) -> Result<(), CliError> {
    print_json(&drive.read_history(ctx, key)?)
}
