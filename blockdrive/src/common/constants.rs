/// The current version of the drive configuration file format.
pub const CURRENT_DRIVE_VERSION: u32 = 1;

/// File name of the drive configuration, stored at the drive root.
pub const CONFIG_FILE_NAME: &str = "drive.json";

/// Default file name of the SQLite ledger, relative to the drive root.
pub const DEFAULT_DATABASE_FILE: &str = "drive.db";

// --- 订阅 ---
/// How long a subscription granted through the drive stays valid, in seconds (ten years).
pub const SUBSCRIPTION_VALIDITY_SECS: i64 = 315_532_800;

// --- 文件名 ---
/// Length of the random suffix appended to a colliding file name.
pub const FILE_SUFFIX_LEN: usize = 4;

// --- 身份 ---
/// Number of hex characters kept from a certificate digest to form an actor id.
pub const ACTOR_ID_LEN: usize = 8;

/// Ledger key prefix under which user profiles are stored.
pub const PROFILE_KEY_PREFIX: &str = "profile/";

// --- 用户根目录 ---
/// Name of the root directory created with every user profile.
pub const ROOT_DIRECTORY_NAME: &str = "All Files";

/// Name of the share directory created under the root.
pub const SHARE_DIRECTORY_NAME: &str = "Share";

/// Name of the subscription directory created under the root.
pub const SUBSCRIPTION_DIRECTORY_NAME: &str = "Subscription";
