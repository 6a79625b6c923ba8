#![allow(dead_code)]

use std::path::PathBuf;
use blockdrive::common::context::RequestContext;
use blockdrive::drive::Drive;
use tempfile::TempDir;

/// 辅助函数：在临时目录下创建一个网盘，并为 u1 (Alice) 与 u2 (Bob) 初始化资料。
pub fn setup_drive(dir: &TempDir) -> (PathBuf, Drive) {
    let drive_path = dir.path().join("test-drive");
    let mut drive = Drive::create_drive(&drive_path, "test-drive").unwrap();
    for (id, name) in [("u1", "Alice"), ("u2", "Bob")] {
        drive.initiate_user_profile(&RequestContext::new(id, 1), name).unwrap();
    }
    (drive_path, drive)
}

pub fn alice(timestamp: i64) -> RequestContext {
    RequestContext::new("u1", timestamp)
}

pub fn bob(timestamp: i64) -> RequestContext {
    RequestContext::new("u2", timestamp)
}
