mod access;
mod directory;
mod profile;

use blockdrive::common::context::RequestContext;
use blockdrive::drive::Drive;
use serde::Serialize;
use crate::cli::{DriveCommand, ProfileCommand};
use crate::errors::CliError;

pub fn dispatch(drive: &mut Drive, ctx: &RequestContext, command: &DriveCommand) -> Result<(), CliError> {
    match command {
        DriveCommand::Profile { command } => match command {
            ProfileCommand::Init { name } => profile::handle_profile_init(drive, ctx, name),
            ProfileCommand::Show => profile::handle_profile_show(drive, ctx),
        },
        DriveCommand::Mkdir { name, public } => directory::handle_mkdir(drive, ctx, name, *public),
        DriveCommand::Show { key } => directory::handle_show(drive, ctx, key),
        DriveCommand::List { keys } => directory::handle_list(drive, ctx, keys),
        DriveCommand::Attach { parent, keys } => directory::handle_attach(drive, ctx, parent, keys),
        DriveCommand::Detach { parent, keys } => directory::handle_detach(drive, ctx, parent, keys),
        DriveCommand::Rename { key, name, parent } => {
            directory::handle_rename(drive, ctx, key, name, parent.as_ref())
        }
        DriveCommand::AddFile { key, name, hash, size } => {
            directory::handle_add_file(drive, ctx, key, name.clone(), hash.clone(), *size)
        }
        DriveCommand::RmFile { key, names } => directory::handle_remove_files(drive, ctx, key, names),
        DriveCommand::Visibility { key, visibility } => {
            directory::handle_visibility(drive, ctx, key, *visibility)
        }
        DriveCommand::Copy { source, destination } => {
            directory::handle_copy(drive, ctx, source, destination)
        }
        DriveCommand::History { key } => directory::handle_history(drive, ctx, key),
        DriveCommand::Grant { key, ids, role, recursive } => {
            access::handle_grant(drive, ctx, key, ids, *role, *recursive)
        }
        DriveCommand::Revoke { key, ids, role, recursive } => {
            access::handle_revoke(drive, ctx, key, ids, *role, *recursive)
        }
        DriveCommand::Subscribe { key } => access::handle_subscribe(drive, ctx, key),
    }
}

/// 以格式化 JSON 打印一条记录
fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
