use std::io;
use thiserror::Error;
use blockdrive::drive::{CreateError, DriveError, OpenError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No acting user: pass --actor or --cert.")]
    MissingActor,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to create drive: {0}")]
    Create(#[from] CreateError),

    #[error("Failed to open drive: {0}")]
    Open(#[from] OpenError),

    #[error("{0}")]
    Drive(#[from] DriveError),

    #[error("Failed to format output: {0}")]
    Output(#[from] serde_json::Error),
}
