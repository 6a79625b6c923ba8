mod access_test;

use crate::common::context::RequestContext;
use crate::common::key::DirectoryKey;
use crate::directory::Visibility;
use crate::drive::Drive;

/// In-memory drive with profiles for u1 (Alice), u2 (Bob) and u3 (Carol).
pub(crate) fn drive_with_users() -> Drive {
    let mut drive = Drive::in_memory();
    for (id, name) in [("u1", "Alice"), ("u2", "Bob"), ("u3", "Carol")] {
        drive
            .initiate_user_profile(&RequestContext::new(id, 1), name)
            .unwrap();
    }
    drive
}

pub(crate) fn mkdir(drive: &mut Drive, ctx: &RequestContext, name: &str) -> DirectoryKey {
    drive.create_directory(ctx, name, Visibility::Private).unwrap()
}

/// Builds `root -> child -> grandchild`, all created by `ctx`'s actor.
pub(crate) fn three_levels(drive: &mut Drive, ctx: &RequestContext) -> [DirectoryKey; 3] {
    let root = mkdir(drive, ctx, "root");
    let child = mkdir(drive, ctx, "child");
    let grandchild = mkdir(drive, ctx, "grandchild");
    drive.add_child_directories(ctx, &child, &[grandchild.clone()]).unwrap();
    drive.add_child_directories(ctx, &root, &[child.clone()]).unwrap();
    [root, child, grandchild]
}

pub(crate) fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
