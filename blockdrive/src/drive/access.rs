use crate::common::context::RequestContext;
use crate::common::key::DirectoryKey;
use crate::directory::{Directory, Member, Visibility};
use crate::drive::profile::{read_user_name, resolve_members};
use crate::drive::propagate::{PropagationReport, propagate};
use crate::drive::store::{load_directory, save_directory};
use crate::drive::{Drive, DriveError};
use crate::utils::time::format_unix_seconds;

/// An ACL change that can be pushed down a directory subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessChange {
    AddCooperators(Vec<Member>),
    RemoveCooperators(Vec<String>),
    AddSubscribers { members: Vec<Member>, due_date: i64 },
    RemoveSubscribers(Vec<String>),
}

impl AccessChange {
    pub fn apply(&self, directory: &mut Directory) {
        match self {
            AccessChange::AddCooperators(members) => directory.add_cooperators(members),
            AccessChange::RemoveCooperators(ids) => directory.remove_cooperators(ids),
            AccessChange::AddSubscribers { members, due_date } => {
                directory.add_subscribers(members, *due_date)
            }
            AccessChange::RemoveSubscribers(ids) => directory.remove_subscribers(ids),
        }
    }
}

/// Applies `change` at `key` (and below, if `recursive`). No role is required at the
/// entry directory.
pub(crate) fn update_directory_access(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    change: &AccessChange,
    recursive: bool,
) -> Result<PropagationReport, DriveError> {
    let report = propagate(drive, ctx, key, recursive, &|directory: &mut Directory| {
        change.apply(directory)
    })?;
    tracing::info!(
        actor = %ctx.actor_id,
        %key,
        recursive,
        updated = report.updated.len(),
        change = ?change,
        "updated directory access"
    );
    Ok(report)
}

pub(crate) fn add_cooperators(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    ids: &[String],
    recursive: bool,
) -> Result<PropagationReport, DriveError> {
    let members = resolve_members(drive, ids)?;
    update_directory_access(drive, ctx, key, &AccessChange::AddCooperators(members), recursive)
}

pub(crate) fn remove_cooperators(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    ids: &[String],
    recursive: bool,
) -> Result<PropagationReport, DriveError> {
    update_directory_access(drive, ctx, key, &AccessChange::RemoveCooperators(ids.to_vec()), recursive)
}

/// Due date of a subscription granted now. Saturates at `i64::MAX`.
fn subscription_due_date(drive: &Drive, ctx: &RequestContext) -> i64 {
    ctx.timestamp.saturating_add(drive.config.subscription_validity_secs)
}

/// Grants subscriptions valid until `ctx.timestamp` plus the configured validity.
pub(crate) fn add_subscribers(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    ids: &[String],
    recursive: bool,
) -> Result<PropagationReport, DriveError> {
    let members = resolve_members(drive, ids)?;
    let due_date = subscription_due_date(drive, ctx);
    update_directory_access(
        drive,
        ctx,
        key,
        &AccessChange::AddSubscribers { members, due_date },
        recursive,
    )
}

pub(crate) fn remove_subscribers(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    ids: &[String],
    recursive: bool,
) -> Result<PropagationReport, DriveError> {
    update_directory_access(drive, ctx, key, &AccessChange::RemoveSubscribers(ids.to_vec()), recursive)
}

/// Subscribes the acting user to `key`.
///
/// An active subscriber gets the directory back unchanged. Otherwise the user must be
/// the creator, a cooperator, or the directory must be public.
pub(crate) fn subscribe(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
) -> Result<Directory, DriveError> {
    let name = read_user_name(drive, &ctx.actor_id)?;
    let mut directory = load_directory(drive, key)?;

    if directory.is_active_subscriber(&ctx.actor_id, ctx.timestamp) {
        return Ok(directory);
    }

    let allowed = directory.is_creator(&ctx.actor_id)
        || directory.is_cooperator(&ctx.actor_id)
        || directory.visibility == Visibility::Public;
    if !allowed {
        return Err(DriveError::PrivateDirectory(key.to_string()));
    }

    let due_date = subscription_due_date(drive, ctx);
    directory.add_subscribers(&[Member::new(ctx.actor_id.clone(), name)], due_date);
    save_directory(drive, ctx, key, &mut directory)?;
    tracing::info!(actor = %ctx.actor_id, %key, due = %format_unix_seconds(due_date), "subscribed");
    Ok(directory)
}
