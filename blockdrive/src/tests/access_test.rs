use crate::common::constants::SUBSCRIPTION_VALIDITY_SECS;
use crate::common::context::RequestContext;
use crate::common::key::DirectoryKey;
use crate::directory::{Directory, Member, Privilege, Visibility};
use crate::drive::{AccessChange, Drive, DriveConfig, DriveError};
use crate::ledger::{LedgerError, MemoryLedger};
use crate::tests::{drive_with_users, ids, mkdir, three_levels};

fn users(drive: &mut Drive) {
    for (id, name) in [("u1", "Alice"), ("u2", "Bob"), ("u3", "Carol")] {
        drive.initiate_user_profile(&RequestContext::new(id, 1), name).unwrap();
    }
}

fn is_cooperator(drive: &Drive, ctx: &RequestContext, key: &DirectoryKey, id: &str) -> bool {
    drive.read_directory(ctx, key).unwrap().is_cooperator(id)
}

#[test]
fn test_recursive_cooperator_addition_reaches_every_level() {
    let mut drive = drive_with_users();
    let ctx = RequestContext::new("u1", 1000);
    let keys = three_levels(&mut drive, &ctx);

    let report = drive.add_cooperators(&ctx, &keys[0], &ids(&["u2"]), true).unwrap();

    assert_eq!(report.updated, keys.to_vec());
    let bob = ctx.as_actor("u2");
    for key in &keys {
        let dir = drive.read_directory(&bob, key).unwrap();
        assert!(dir.check_privilege("u2", 1000, Privilege::Cooperator));
        assert_eq!(dir.id_to_display_name.get("u2").map(String::as_str), Some("Bob"));
    }
}

#[test]
fn test_non_recursive_addition_only_touches_root() {
    let mut drive = drive_with_users();
    let ctx = RequestContext::new("u1", 1000);
    let keys = three_levels(&mut drive, &ctx);

    let report = drive.add_cooperators(&ctx, &keys[0], &ids(&["u2"]), false).unwrap();

    assert_eq!(report.updated, vec![keys[0].clone()]);
    assert!(is_cooperator(&drive, &ctx, &keys[0], "u2"));
    assert!(!is_cooperator(&drive, &ctx, &keys[1], "u2"));
    assert!(!is_cooperator(&drive, &ctx, &keys[2], "u2"));
}

#[test]
fn test_remove_cooperators_recursively() {
    let mut drive = drive_with_users();
    let ctx = RequestContext::new("u1", 1000);
    let keys = three_levels(&mut drive, &ctx);
    drive.add_cooperators(&ctx, &keys[0], &ids(&["u2"]), true).unwrap();

    drive.remove_cooperators(&ctx, &keys[0], &ids(&["u2"]), true).unwrap();

    for key in &keys {
        let dir = drive.read_directory(&ctx, key).unwrap();
        assert!(!dir.is_cooperator("u2"));
        assert!(!dir.id_to_display_name.contains_key("u2"));
    }
}

#[test]
fn test_unknown_member_aborts_before_any_write() {
    let mut drive = drive_with_users();
    let ctx = RequestContext::new("u1", 1000);
    let key = mkdir(&mut drive, &ctx, "Docs");

    let result = drive.add_cooperators(&ctx, &key, &ids(&["u2", "ghost"]), false);

    assert!(matches!(result, Err(DriveError::ProfileNotFound(id)) if id == "ghost"));
    assert!(!is_cooperator(&drive, &ctx, &key, "u2"));
    assert_eq!(drive.read_history(&ctx, &key).unwrap().len(), 1);
}

#[test]
fn test_access_changes_are_not_gated() {
    let mut drive = drive_with_users();
    let alice = RequestContext::new("u1", 1000);
    let key = mkdir(&mut drive, &alice, "Docs");

    let carol = alice.as_actor("u3");
    drive.add_cooperators(&carol, &key, &ids(&["u3"]), false).unwrap();

    let dir = drive.read_directory(&carol, &key).unwrap();
    assert!(dir.is_cooperator("u3"));
    assert_eq!(dir.editor_id, "u3");
}

#[test]
fn test_removed_creator_loses_edit_rights() {
    let mut drive = drive_with_users();
    let alice = RequestContext::new("u1", 1000);
    let key = mkdir(&mut drive, &alice, "Docs");
    drive.add_cooperators(&alice, &key, &ids(&["u2"]), false).unwrap();
    drive.remove_cooperators(&alice, &key, &ids(&["u1"]), false).unwrap();

    assert!(matches!(
        drive.rename_directory(&alice, &key, "Mine"),
        Err(DriveError::Unauthorized)
    ));
    let dir = drive.read_directory(&alice.as_actor("u2"), &key).unwrap();
    assert!(dir.is_creator("u1"));
    // the creator's display name survives while it is still the creator
    assert!(dir.id_to_display_name.contains_key("u1"));
}

#[test]
fn test_subscription_due_date_uses_configured_validity() {
    let mut config = DriveConfig::default();
    config.subscription_validity_secs = 100;
    let mut drive = Drive::with_ledger(Box::new(MemoryLedger::new()), config);
    users(&mut drive);
    let alice = RequestContext::new("u1", 1000);
    let key = mkdir(&mut drive, &alice, "Docs");

    drive.add_subscribers(&alice, &key, &ids(&["u2"]), false).unwrap();

    let bob = RequestContext::new("u2", 1099);
    let dir = drive.read_directory(&bob, &key).unwrap();
    assert_eq!(dir.subscribers[0].due_date, 1100);
    assert!(matches!(drive.read_directory(&bob.at(1100), &key), Err(DriveError::Unauthorized)));
}

#[test]
fn test_earlier_subscription_does_not_shorten_existing_one() {
    let mut config = DriveConfig::default();
    config.subscription_validity_secs = 100;
    let mut drive = Drive::with_ledger(Box::new(MemoryLedger::new()), config);
    users(&mut drive);
    let alice = RequestContext::new("u1", 1000);
    let key = mkdir(&mut drive, &alice, "Docs");

    drive.add_subscribers(&alice.at(2000), &key, &ids(&["u2"]), false).unwrap();
    drive.add_subscribers(&alice.at(1500), &key, &ids(&["u2"]), false).unwrap();
    let dir = drive.read_directory(&alice, &key).unwrap();
    assert_eq!(dir.subscribers.len(), 1);
    assert_eq!(dir.subscribers[0].due_date, 2100);

    drive.add_subscribers(&alice.at(3000), &key, &ids(&["u2"]), false).unwrap();
    let dir = drive.read_directory(&alice, &key).unwrap();
    assert_eq!(dir.subscribers.len(), 1);
    assert_eq!(dir.subscribers[0].due_date, 3100);
}

#[test]
fn test_remove_subscribers_revokes_read_access() {
    let mut drive = drive_with_users();
    let alice = RequestContext::new("u1", 1000);
    let keys = three_levels(&mut drive, &alice);
    drive.add_subscribers(&alice, &keys[0], &ids(&["u3"]), true).unwrap();

    let carol = alice.as_actor("u3");
    assert_eq!(drive.read_directories(&carol, &keys).unwrap().len(), 3);

    drive.remove_subscribers(&alice, &keys[0], &ids(&["u3"]), true).unwrap();
    assert!(drive.read_directories(&carol, &keys).unwrap().is_empty());
}

#[test]
fn test_custom_access_change() {
    let mut drive = drive_with_users();
    let alice = RequestContext::new("u1", 1000);
    let keys = three_levels(&mut drive, &alice);
    let change = AccessChange::AddSubscribers {
        members: vec![Member::new("u9", "Guest")],
        due_date: 5000,
    };

    let report = drive.update_directory_access(&alice, &keys[1], &change, true).unwrap();

    assert_eq!(report.updated, keys[1..].to_vec());
    let guest = alice.as_actor("u9");
    assert!(drive.read_directory(&guest, &keys[0]).is_err());
    assert!(drive.read_directory(&guest, &keys[2]).is_ok());
}

#[test]
fn test_shared_descendant_is_updated_once() {
    let mut drive = drive_with_users();
    let ctx = RequestContext::new("u1", 1000);
    let top = mkdir(&mut drive, &ctx, "Top");
    let left = mkdir(&mut drive, &ctx, "Left");
    let right = mkdir(&mut drive, &ctx, "Right");
    let shared = mkdir(&mut drive, &ctx, "Shared");
    drive.add_child_directories(&ctx, &left, &[shared.clone()]).unwrap();
    drive.add_child_directories(&ctx, &right, &[shared.clone()]).unwrap();
    drive.add_child_directories(&ctx, &top, &[left.clone(), right.clone()]).unwrap();

    let report = drive.add_cooperators(&ctx, &top, &ids(&["u2"]), true).unwrap();

    assert_eq!(report.updated, vec![top, left, shared.clone(), right]);
    // one version from creation, one from the propagation
    assert_eq!(drive.read_history(&ctx, &shared).unwrap().len(), 2);
}

#[test]
fn test_cycle_is_detected() {
    let mut drive = drive_with_users();
    let ctx = RequestContext::new("u1", 1000);
    let a = mkdir(&mut drive, &ctx, "A");
    let b = mkdir(&mut drive, &ctx, "B");
    drive.add_child_directories(&ctx, &a, &[b.clone()]).unwrap();
    drive.add_child_directories(&ctx, &b, &[a.clone()]).unwrap();

    let result = drive.add_cooperators(&ctx, &a, &ids(&["u2"]), true);
    assert!(matches!(result, Err(DriveError::CycleDetected(key)) if key == a.to_string()));

    // non-recursive updates never walk the loop
    let report = drive.add_cooperators(&ctx, &a, &ids(&["u3"]), false).unwrap();
    assert_eq!(report.updated, vec![a]);
}

#[test]
fn test_failure_mid_walk_keeps_earlier_writes() {
    let ledger = MemoryLedger::new();
    let mut drive = Drive::with_ledger(Box::new(ledger.clone()), DriveConfig::default());
    users(&mut drive);
    let ctx = RequestContext::new("u1", 1000);
    let keys = three_levels(&mut drive, &ctx);
    ledger.fail_writes_to(keys[2].as_str()).unwrap();

    let result = drive.add_cooperators(&ctx, &keys[0], &ids(&["u2"]), true);

    assert!(matches!(result, Err(DriveError::Ledger(LedgerError::Unavailable(_)))));
    assert!(is_cooperator(&drive, &ctx, &keys[0], "u2"));
    assert!(is_cooperator(&drive, &ctx, &keys[1], "u2"));
    assert!(!is_cooperator(&drive, &ctx, &keys[2], "u2"));

    // retrying after the fault clears completes the walk
    ledger.clear_failures().unwrap();
    drive.add_cooperators(&ctx, &keys[0], &ids(&["u2"]), true).unwrap();
    assert!(is_cooperator(&drive, &ctx, &keys[2], "u2"));
}

#[test]
fn test_subscribe_to_public_directory() {
    let mut drive = drive_with_users();
    let alice = RequestContext::new("u1", 1000);
    let key = drive.create_directory(&alice, "Open", Visibility::Public).unwrap();

    let bob = RequestContext::new("u2", 1200);
    let dir = drive.subscribe(&bob, &key).unwrap();

    assert!(dir.is_active_subscriber("u2", 1200));
    assert_eq!(dir.subscribers[0].due_date, 1200 + SUBSCRIPTION_VALIDITY_SECS);
    assert_eq!(dir.id_to_display_name.get("u2").map(String::as_str), Some("Bob"));
    assert_eq!(dir.editor_id, "u2");
}

#[test]
fn test_subscribe_to_private_directory_is_refused() {
    let mut drive = drive_with_users();
    let alice = RequestContext::new("u1", 1000);
    let key = mkdir(&mut drive, &alice, "Closed");

    let result = drive.subscribe(&alice.as_actor("u3"), &key);
    assert!(matches!(result, Err(DriveError::PrivateDirectory(_))));

    // cooperators may subscribe to private directories
    drive.add_cooperators(&alice, &key, &ids(&["u2"]), false).unwrap();
    let dir = drive.subscribe(&alice.as_actor("u2"), &key).unwrap();
    assert!(dir.is_active_subscriber("u2", 1000));
}

#[test]
fn test_subscribe_when_already_active_writes_nothing() {
    let mut drive = drive_with_users();
    let alice = RequestContext::new("u1", 1000);
    let key = drive.create_directory(&alice, "Open", Visibility::Public).unwrap();
    let bob = RequestContext::new("u2", 1100);
    let first: Directory = drive.subscribe(&bob, &key).unwrap();

    let second = drive.subscribe(&bob.at(1200), &key).unwrap();

    assert_eq!(first, second);
    assert_eq!(drive.read_history(&alice, &key).unwrap().len(), 2);
}

#[test]
fn test_due_date_saturates_near_end_of_time() {
    let mut drive = drive_with_users();
    let alice = RequestContext::new("u1", 1000);
    let key = drive.create_directory(&alice, "Open", Visibility::Public).unwrap();

    let late = RequestContext::new("u2", i64::MAX - 10);
    let dir = drive.subscribe(&late, &key).unwrap();
    assert_eq!(dir.subscribers[0].due_date, i64::MAX);
    assert!(dir.is_active_subscriber("u2", i64::MAX - 1));

    let report = drive
        .add_subscribers(&alice.at(i64::MAX - 5), &key, &ids(&["u3"]), false)
        .unwrap();
    assert_eq!(report.updated, vec![key.clone()]);
    let dir = drive.read_directory(&alice, &key).unwrap();
    assert!(dir.subscribers.iter().all(|s| s.due_date == i64::MAX));
}

#[test]
fn test_huge_configured_validity_does_not_wrap() {
    let mut config = DriveConfig::default();
    config.subscription_validity_secs = i64::MAX;
    let mut drive = Drive::with_ledger(Box::new(MemoryLedger::new()), config);
    users(&mut drive);
    let alice = RequestContext::new("u1", 1000);
    let key = mkdir(&mut drive, &alice, "Docs");

    drive.add_subscribers(&alice, &key, &ids(&["u2"]), false).unwrap();

    let dir = drive.read_directory(&alice, &key).unwrap();
    assert_eq!(dir.subscribers[0].due_date, i64::MAX);
    assert!(drive.read_directory(&RequestContext::new("u2", 5000), &key).is_ok());
}
