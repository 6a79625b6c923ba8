use blockdrive::common::context::RequestContext;
use blockdrive::common::key::DirectoryKey;
use blockdrive::drive::{Drive, PropagationReport};
use crate::cli::Role;
use crate::errors::CliError;
use crate::handlers::print_json;

pub fn handle_grant(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    ids: &[String],
    role: Role,
    recursive: bool,
) -> Result<(), CliError> {
    let report = match role {
        Role::Cooperator => drive.add_cooperators(ctx, key, ids, recursive)?,
        Role::Subscriber => drive.add_subscribers(ctx, key, ids, recursive)?,
    };
    print_report(&report);
    Ok(())
}

pub fn handle_revoke(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    ids: &[String],
    role: Role,
    recursive: bool,
) -> Result<(), CliError> {
    let report = match role {
        Role::Cooperator => drive.remove_cooperators(ctx, key, ids, recursive)?,
        Role::Subscriber => drive.remove_subscribers(ctx, key, ids, recursive)?,
    };
    print_report(&report);
    Ok(())
}

pub fn handle_subscribe(drive: &mut Drive, ctx: &RequestContext, key: &DirectoryKey) -> Result<(), CliError> {
    print_json(&drive.subscribe(ctx, key)?)
}

/// 每行打印一个被更新的目录键
fn print_report(report: &PropagationReport) {
    for key in &report.updated {
        println!("{}", key);
    }
}
