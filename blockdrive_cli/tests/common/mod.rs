//!
//! # Test Common Utilities
//!
//! Helpers for driving the `blockdrive` binary against a drive in a temporary directory.
//!
//
// // # 测试通用工具
// //
// // 在临时目录中的网盘上运行 `blockdrive` 二进制文件的辅助工具。
// //
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// An initialised drive with profiles for `u1` (Alice) and `u2` (Bob).
///
/// The temporary directory is removed when the context is dropped.
pub struct TestContext {
    pub _temp_dir: TempDir,
    pub drive_path: PathBuf,
}

impl TestContext {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempdir()?;
        let drive_path = temp_dir.path().join("test-drive");

        Command::new(env!("CARGO_BIN_EXE_blockdrive"))
            .arg("--drive")
            .arg(&drive_path)
            .args(["init", "test-drive"])
            .assert()
            .success();

        let context = TestContext {
            _temp_dir: temp_dir,
            drive_path,
        };
        context.run("u1", 1, &["profile", "init", "Alice"])?;
        context.run("u2", 1, &["profile", "init", "Bob"])?;
        Ok(context)
    }

    /// A command for `actor` at `time`, ready for more arguments.
    pub fn command(&self, actor: &str, time: i64) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_blockdrive"));
        cmd.arg("--drive")
            .arg(&self.drive_path)
            .args(["--actor", actor, "--time", &time.to_string()]);
        cmd
    }

    /// Runs a command that must succeed and returns its trimmed stdout.
    pub fn run(&self, actor: &str, time: i64, args: &[&str]) -> anyhow::Result<String> {
        let output = self.command(actor, time).args(args).assert().success().get_output().stdout.clone();
        Ok(String::from_utf8(output)?.trim().to_string())
    }

    /// Runs a command that must succeed and parses its stdout as JSON.
    pub fn run_json(&self, actor: &str, time: i64, args: &[&str]) -> anyhow::Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.run(actor, time, args)?)?)
    }

    pub fn path(&self) -> &Path {
        self._temp_dir.path()
    }
}
