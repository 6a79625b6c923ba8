use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use crate::common::context::RequestContext;
use crate::common::key::DirectoryKey;
use crate::directory::{Directory, FileMeta, Visibility};
use crate::ledger::{Ledger, MemoryLedger};

pub mod config;
mod access;
mod copy;
mod create;
mod directories;
mod error;
mod files;
mod open;
mod profile;
mod propagate;
mod store;

pub use access::AccessChange;
pub use config::DriveConfig;
pub use create::CreateError;
pub use error::DriveError;
pub use open::OpenError;
pub use profile::UserProfile;
pub use propagate::PropagationReport;

/// A directory tree stored in a versioned ledger.
///
/// Every operation takes the acting user and the reference time through a
/// `RequestContext`. Writes need `&mut self`, so operations on one handle never
/// interleave.
//
// // 代表一个打开的网盘：持有配置与账本。
#[derive(Debug)]
pub struct Drive {
    /// Root directory of an on-disk drive; `None` for in-memory drives.
    pub root_path: Option<PathBuf>,
    /// The drive configuration (contents of `drive.json`).
    pub config: DriveConfig,
    ledger: Box<dyn Ledger>,
}

impl Drive {
    /// Creates a new drive with default settings in the empty directory `path`.
    pub fn create_drive(path: &Path, name: &str) -> Result<Self, CreateError> {
        create::create_drive(path, DriveConfig::new(name))
    }

    pub fn create_drive_with_config(path: &Path, config: DriveConfig) -> Result<Self, CreateError> {
        create::create_drive(path, config)
    }

    pub fn open_drive(path: &Path) -> Result<Self, OpenError> {
        open::open_drive(path)
    }

    /// A drive backed by a fresh `MemoryLedger`.
    pub fn in_memory() -> Self {
        Self::with_ledger(Box::new(MemoryLedger::new()), DriveConfig::default())
    }

    pub fn with_ledger(ledger: Box<dyn Ledger>, config: DriveConfig) -> Self {
        Self {
            root_path: None,
            config,
            ledger,
        }
    }

    // --- 用户资料 ---

    pub fn initiate_user_profile(&mut self, ctx: &RequestContext, name: &str) -> Result<UserProfile, DriveError> {
        profile::initiate_user_profile(self, ctx, name)
    }

    pub fn read_user_profile(&self, ctx: &RequestContext) -> Result<UserProfile, DriveError> {
        profile::read_user_profile(self, ctx)
    }

    pub fn read_user_name(&self, id: &str) -> Result<String, DriveError> {
        profile::read_user_name(self, id)
    }

    // --- 目录 ---

    pub fn create_directory(
        &mut self,
        ctx: &RequestContext,
        name: &str,
        visibility: Visibility,
    ) -> Result<DirectoryKey, DriveError> {
        directories::create_directory(self, ctx, name, visibility)
    }

    pub fn read_directory(&self, ctx: &RequestContext, key: &DirectoryKey) -> Result<Directory, DriveError> {
        directories::read_directory(self, ctx, key)
    }

    pub fn read_directories(
        &self,
        ctx: &RequestContext,
        keys: &[DirectoryKey],
    ) -> Result<BTreeMap<DirectoryKey, Directory>, DriveError> {
        directories::read_directories(self, ctx, keys)
    }

    pub fn add_child_directories(
        &mut self,
        ctx: &RequestContext,
        parent: &DirectoryKey,
        keys: &[DirectoryKey],
    ) -> Result<Directory, DriveError> {
        directories::add_child_directories(self, ctx, parent, keys)
    }

    pub fn remove_child_directories(
        &mut self,
        ctx: &RequestContext,
        parent: &DirectoryKey,
        keys: &[DirectoryKey],
    ) -> Result<Directory, DriveError> {
        directories::remove_child_directories(self, ctx, parent, keys)
    }

    pub fn rename_directory(&mut self, ctx: &RequestContext, key: &DirectoryKey, name: &str) -> Result<Directory, DriveError> {
        directories::rename_directory(self, ctx, key, name)
    }

    pub fn rename_child_directory(
        &mut self,
        ctx: &RequestContext,
        parent: &DirectoryKey,
        key: &DirectoryKey,
        name: &str,
    ) -> Result<Directory, DriveError> {
        directories::rename_child_directory(self, ctx, parent, key, name)
    }

    pub fn set_visibility(
        &mut self,
        ctx: &RequestContext,
        key: &DirectoryKey,
        visibility: Visibility,
    ) -> Result<Directory, DriveError> {
        directories::set_visibility(self, ctx, key, visibility)
    }

    pub fn read_history(&self, ctx: &RequestContext, key: &DirectoryKey) -> Result<Vec<Directory>, DriveError> {
        directories::read_history(self, ctx, key)
    }

    pub fn copy_subtree(
        &mut self,
        ctx: &RequestContext,
        source: &DirectoryKey,
        destination: &DirectoryKey,
    ) -> Result<DirectoryKey, DriveError> {
        copy::copy_subtree(self, ctx, source, destination)
    }

    // --- 文件 ---

    pub fn add_files(&mut self, ctx: &RequestContext, key: &DirectoryKey, files: Vec<FileMeta>) -> Result<Directory, DriveError> {
        files::add_files(self, ctx, key, files)
    }

    pub fn remove_files(&mut self, ctx: &RequestContext, key: &DirectoryKey, names: &[String]) -> Result<Directory, DriveError> {
        files::remove_files(self, ctx, key, names)
    }

    // --- 权限 ---

    pub fn add_cooperators(
        &mut self,
        ctx: &RequestContext,
        key: &DirectoryKey,
        ids: &[String],
        recursive: bool,
    ) -> Result<PropagationReport, DriveError> {
        access::add_cooperators(self, ctx, key, ids, recursive)
    }

    pub fn remove_cooperators(
        &mut self,
        ctx: &RequestContext,
        key: &DirectoryKey,
        ids: &[String],
        recursive: bool,
    ) -> Result<PropagationReport, DriveError> {
        access::remove_cooperators(self, ctx, key, ids, recursive)
    }

    pub fn add_subscribers(
        &mut self,
        ctx: &RequestContext,
        key: &DirectoryKey,
        ids: &[String],
        recursive: bool,
    ) -> Result<PropagationReport, DriveError> {
        access::add_subscribers(self, ctx, key, ids, recursive)
    }

    pub fn remove_subscribers(
        &mut self,
        ctx: &RequestContext,
        key: &DirectoryKey,
        ids: &[String],
        recursive: bool,
    ) -> Result<PropagationReport, DriveError> {
        access::remove_subscribers(self, ctx, key, ids, recursive)
    }

    /// Applies an arbitrary ACL change at `key`, and below it if `recursive`.
    pub fn update_directory_access(
        &mut self,
        ctx: &RequestContext,
        key: &DirectoryKey,
        change: &AccessChange,
        recursive: bool,
    ) -> Result<PropagationReport, DriveError> {
        access::update_directory_access(self, ctx, key, change, recursive)
    }

    pub fn subscribe(&mut self, ctx: &RequestContext, key: &DirectoryKey) -> Result<Directory, DriveError> {
        access::subscribe(self, ctx, key)
    }
}
