use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::common::constants::FILE_SUFFIX_LEN;
use crate::common::context::RequestContext;
use crate::common::key::DirectoryKey;
use crate::utils::random::random_suffix;

pub mod privilege;
pub use privilege::{check_privilege, Privilege};

/// Who may self-subscribe to a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Anyone may subscribe.
    Public,
    /// Only the creator and cooperators may subscribe.
    #[default]
    Private,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid visibility '{0}': expected 'public' or 'private'")]
pub struct VisibilityParseError(String);

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => f.write_str("Public"),
            Visibility::Private => f.write_str("Private"),
        }
    }
}

impl FromStr for Visibility {
    type Err = VisibilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("public") {
            Ok(Visibility::Public)
        } else if s.eq_ignore_ascii_case("private") {
            Ok(Visibility::Private)
        } else {
            Err(VisibilityParseError(s.to_string()))
        }
    }
}

/// A subscription entry: `id` may read the directory while `due_date` is in the future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberMeta {
    pub id: String,
    pub due_date: i64,
}

/// Metadata of a file listed in a directory. The content itself lives elsewhere.
//
// // 目录中文件的元数据。文件内容本身不在账本中存储。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// File name, unique inside its directory.
    pub name: String,
    /// Hex digest of the file content, if known.
    #[serde(default)]
    pub hash: String,
    /// Content size in bytes, if known.
    #[serde(default)]
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash: String::new(),
            size: 0,
        }
    }

    pub fn with_content(name: impl Into<String>, hash: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            hash: hash.into(),
            size,
        }
    }
}

/// An actor id together with the name shown for it in a directory's ACL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub display_name: String,
}

impl Member {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// A node of the directory tree as stored in the ledger.
///
/// Children are referenced by key and live in their own ledger records. All
/// operations below are pure: they mutate the in-memory record and leave persistence
/// to the caller.
//
// // 目录树中的一个节点（即账本中的一条记录）。
// // 子目录按键引用，各自是独立的账本记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    /// Display name, unique among direct siblings only.
    pub name: String,
    /// Keys of the child directories, in insertion order.
    #[serde(rename = "directories")]
    pub child_directory_keys: Vec<DirectoryKey>,
    /// File metadata; names are unique inside the directory.
    pub files: Vec<FileMeta>,
    #[serde(rename = "creator")]
    creator_id: String,
    /// Actor of the most recent save.
    #[serde(rename = "editor")]
    pub editor_id: String,
    /// Timestamp (seconds) of the most recent save.
    #[serde(rename = "date")]
    pub last_modified: i64,
    /// Actors with edit rights. No duplicates.
    pub cooperators: Vec<String>,
    /// Time-limited readers. At most one entry per id; expired entries stay until
    /// removed or replaced.
    pub subscribers: Vec<SubscriberMeta>,
    /// Soft-delete marker. Stored for compatibility; no read path filters on it.
    pub deleted: bool,
    /// Display names of the actors that appear in this directory's ACL.
    #[serde(rename = "idNameMap")]
    pub id_to_display_name: BTreeMap<String, String>,
    pub visibility: Visibility,
}

impl Directory {
    /// Creates a directory owned by `creator_id`, who is also its first cooperator.
    pub fn new(
        name: &str,
        creator_id: &str,
        creator_name: &str,
        visibility: Visibility,
        date: i64,
    ) -> Self {
        Self {
            name: name.to_string(),
            child_directory_keys: Vec::new(),
            files: Vec::new(),
            creator_id: creator_id.to_string(),
            editor_id: creator_id.to_string(),
            last_modified: date,
            cooperators: vec![creator_id.to_string()],
            subscribers: Vec::new(),
            deleted: false,
            id_to_display_name: BTreeMap::from([(creator_id.to_string(), creator_name.to_string())]),
            visibility,
        }
    }

    /// The actor that created this directory. Never changes.
    pub fn creator_id(&self) -> &str {
        &self.creator_id
    }

    // --- 谓词 ---

    pub fn is_creator(&self, id: &str) -> bool {
        self.creator_id == id
    }

    pub fn is_cooperator(&self, id: &str) -> bool {
        self.cooperators.iter().any(|c| c == id)
    }

    /// True while `id` holds a subscription whose due date is strictly after `timestamp`.
    pub fn is_active_subscriber(&self, id: &str, timestamp: i64) -> bool {
        self.subscribers
            .iter()
            .any(|s| s.id == id && s.due_date > timestamp)
    }

    /// Subscriptions still valid at `timestamp`.
    pub fn active_subscribers(&self, timestamp: i64) -> impl Iterator<Item = &SubscriberMeta> {
        self.subscribers.iter().filter(move |s| s.due_date > timestamp)
    }

    pub fn check_privilege(&self, actor_id: &str, timestamp: i64, required: Privilege) -> bool {
        check_privilege(self, actor_id, timestamp, required)
    }

    // --- ACL ---

    pub fn add_cooperators(&mut self, members: &[Member]) {
        for member in members {
            if !self.is_cooperator(&member.id) {
                self.cooperators.push(member.id.clone());
            }
        }
        self.merge_display_names(members);
    }

    pub fn remove_cooperators(&mut self, ids: &[String]) {
        let removed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        self.cooperators.retain(|c| !removed.contains(c.as_str()));
        self.prune_display_names(ids);
    }

    /// Grants each member a subscription until `due_date`.
    ///
    /// An existing entry that expires later than `due_date` is kept as is; otherwise
    /// the member's entry is replaced.
    pub fn add_subscribers(&mut self, members: &[Member], due_date: i64) {
        for member in members {
            let has_later = self
                .subscribers
                .iter()
                .any(|s| s.id == member.id && s.due_date > due_date);
            if has_later {
                continue;
            }
            self.subscribers.retain(|s| s.id != member.id);
            self.subscribers.push(SubscriberMeta {
                id: member.id.clone(),
                due_date,
            });
        }
        self.merge_display_names(members);
    }

    /// Removes the subscriptions of `ids`, expired or not.
    pub fn remove_subscribers(&mut self, ids: &[String]) {
        let removed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        self.subscribers.retain(|s| !removed.contains(s.id.as_str()));
        self.prune_display_names(ids);
    }

    /// Replaces this directory's cooperators, subscribers and display names with
    /// those of `other`.
    pub fn inherit_access_from(&mut self, other: &Directory) {
        self.cooperators = other.cooperators.clone();
        self.subscribers = other.subscribers.clone();
        self.id_to_display_name = other.id_to_display_name.clone();
    }

    fn merge_display_names(&mut self, members: &[Member]) {
        for member in members {
            self.id_to_display_name
                .insert(member.id.clone(), member.display_name.clone());
        }
    }

    /// Drops the names of `ids` that no longer appear anywhere in the ACL.
    fn prune_display_names(&mut self, ids: &[String]) {
        for id in ids {
            let still_listed = self.is_creator(id)
                || self.is_cooperator(id)
                || self.subscribers.iter().any(|s| &s.id == id);
            if !still_listed {
                self.id_to_display_name.remove(id);
            }
        }
    }

    // --- 子目录 ---

    /// Appends the keys not already present, keeping the existing order.
    pub fn add_child_directories(&mut self, keys: &[DirectoryKey]) {
        for key in keys {
            if !self.child_directory_keys.contains(key) {
                self.child_directory_keys.push(key.clone());
            }
        }
    }

    pub fn remove_child_directories(&mut self, keys: &[DirectoryKey]) {
        let removed: HashSet<&DirectoryKey> = keys.iter().collect();
        self.child_directory_keys.retain(|k| !removed.contains(k));
    }

    // --- 文件 ---

    /// Appends `files`, renaming any whose name is already taken.
    ///
    /// A colliding name gets a short random suffix appended (`report.pdf` becomes
    /// e.g. `report.pdf3fa1`). Names are checked against the existing files and the
    /// files earlier in the same batch. Returns the final names in input order.
    pub fn add_files(&mut self, files: Vec<FileMeta>) -> Vec<String> {
        let mut taken: HashSet<String> = self.files.iter().map(|f| f.name.clone()).collect();
        let mut added = Vec::with_capacity(files.len());

        for mut file in files {
            if taken.contains(&file.name) {
                let base = file.name.clone();
                loop {
                    let candidate = format!("{}{}", base, random_suffix(FILE_SUFFIX_LEN));
                    if !taken.contains(&candidate) {
                        file.name = candidate;
                        break;
                    }
                }
            }
            taken.insert(file.name.clone());
            added.push(file.name.clone());
            self.files.push(file);
        }
        added
    }

    pub fn remove_files(&mut self, names: &[String]) {
        let removed: HashSet<&str> = names.iter().map(String::as_str).collect();
        self.files.retain(|f| !removed.contains(f.name.as_str()));
    }

    pub fn file(&self, name: &str) -> Option<&FileMeta> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Records who saved the directory and when.
    pub(crate) fn stamp(&mut self, ctx: &RequestContext) {
        self.editor_id = ctx.actor_id.clone();
        self.last_modified = ctx.timestamp;
    }
}
