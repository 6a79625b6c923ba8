use std::collections::HashSet;
use crate::common::context::RequestContext;
use crate::common::key::DirectoryKey;
use crate::directory::Directory;
use crate::drive::store::{load_directory, save_directory};
use crate::drive::{Drive, DriveError};

/// Keys touched by a propagation, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    pub updated: Vec<DirectoryKey>,
}

#[derive(Default)]
struct Walk {
    /// Ancestors of the node being visited.
    on_path: HashSet<DirectoryKey>,
    /// Nodes already mutated; a node shared by several parents is mutated once.
    done: HashSet<DirectoryKey>,
    report: PropagationReport,
}

/// Applies `mutation` to the directory at `key` and, if `recursive`, to every
/// descendant, parent before children, depth first.
///
/// No privilege is checked here; callers gate once before starting. Each node is
/// saved on its own, so an error part way down leaves the nodes already visited
/// committed. The ledger keeps their previous versions for reconciliation.
pub(crate) fn propagate<F>(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    recursive: bool,
    mutation: &F,
) -> Result<PropagationReport, DriveError>
where
    F: Fn(&mut Directory),
{
    let mut walk = Walk::default();
    visit(drive, ctx, key, recursive, mutation, &mut walk)?;
    Ok(walk.report)
}

fn visit<F>(
    drive: &mut Drive,
    ctx: &RequestContext,
    key: &DirectoryKey,
    recursive: bool,
    mutation: &F,
    walk: &mut Walk,
) -> Result<(), DriveError>
where
    F: Fn(&mut Directory),
{
    if walk.on_path.contains(key) {
        tracing::warn!(%key, "cycle in directory tree");
        return Err(DriveError::CycleDetected(key.to_string()));
    }
    if walk.done.contains(key) {
        return Ok(());
    }

    let mut directory = load_directory(drive, key)?;
    mutation(&mut directory);
    save_directory(drive, ctx, key, &mut directory)?;
    tracing::debug!(%key, "propagated update");
    walk.done.insert(key.clone());
    walk.report.updated.push(key.clone());

    if recursive {
        walk.on_path.insert(key.clone());
        for child_key in &directory.child_directory_keys {
            visit(drive, ctx, child_key, recursive, mutation, walk)?;
        }
        walk.on_path.remove(key);
    }
    Ok(())
}
