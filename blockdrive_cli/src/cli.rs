use std::path::PathBuf;
use blockdrive::common::key::DirectoryKey;
use blockdrive::directory::Visibility;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Shared directory trees over a versioned ledger", long_about = None)]
pub struct Cli {
    /// Path of the drive directory
    #[arg(short = 'd', long, global = true, default_value = ".")]
    pub drive: PathBuf,

    /// Acting user id
    #[arg(short = 'a', long, global = true, conflicts_with = "cert")]
    pub actor: Option<String>,

    /// Certificate file the acting user id is derived from
    #[arg(long, global = true)]
    pub cert: Option<PathBuf>,

    /// Transaction time in Unix seconds (defaults to now)
    #[arg(short = 't', long, global = true)]
    pub time: Option<i64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 在 --drive 路径创建一个新网盘
    Init {
        name: String,
    },
    #[command(flatten)]
    Drive(DriveCommand),
}

/// 在已有网盘上以某个用户身份执行的命令
#[derive(Subcommand, Debug)]
pub enum DriveCommand {
    /// 用户资料
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// 创建一个独立目录并打印其键
    Mkdir {
        name: String,
        /// 允许任何人订阅
        #[arg(long)]
        public: bool,
    },
    /// 显示一个目录
    Show {
        key: DirectoryKey,
    },
    /// 显示多个目录，跳过无权读取或不存在的目录
    #[command(visible_alias = "ls")]
    List {
        #[arg(required = true)]
        keys: Vec<DirectoryKey>,
    },
    /// 将已有目录挂载到父目录下
    Attach {
        parent: DirectoryKey,
        #[arg(required = true)]
        keys: Vec<DirectoryKey>,
    },
    /// 从父目录中移除子目录
    Detach {
        parent: DirectoryKey,
        #[arg(required = true)]
        keys: Vec<DirectoryKey>,
    },
    /// 重命名目录
    Rename {
        key: DirectoryKey,
        name: String,
        /// 检查该父目录下的同级目录名称
        #[arg(short = 'p', long)]
        parent: Option<DirectoryKey>,
    },
    /// 向目录添加文件元数据
    AddFile {
        key: DirectoryKey,
        name: String,
        #[arg(long)]
        hash: Option<String>,
        #[arg(long)]
        size: Option<u64>,
    },
    /// 从目录移除文件
    #[command(visible_alias = "rm")]
    RmFile {
        key: DirectoryKey,
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// 设置目录可见性 (public | private)
    Visibility {
        key: DirectoryKey,
        visibility: Visibility,
    },
    /// 将源目录树复制到目标目录下，并打印新目录的键
    Copy {
        source: DirectoryKey,
        destination: DirectoryKey,
    },
    /// 授予协作者或订阅者权限
    Grant {
        key: DirectoryKey,
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(short = 'r', long, value_enum)]
        role: Role,
        #[arg(long)]
        recursive: bool,
    },
    /// 撤销协作者或订阅者权限
    Revoke {
        key: DirectoryKey,
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(short = 'r', long, value_enum)]
        role: Role,
        #[arg(long)]
        recursive: bool,
    },
    /// 以当前用户身份订阅目录
    Subscribe {
        key: DirectoryKey,
    },
    /// 显示目录的所有历史版本（从旧到新）
    History {
        key: DirectoryKey,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// 初始化当前用户的资料与默认目录
    Init {
        name: String,
    },
    /// 显示当前用户的资料
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Cooperator,
    Subscriber,
}
