mod cli;
mod errors;
mod handlers;

use std::fs;
use std::process::ExitCode;
use blockdrive::common::context::RequestContext;
use blockdrive::common::identity::actor_id_from_certificate;
use blockdrive::drive::Drive;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use crate::cli::{Cli, Command};
use crate::errors::CliError;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockdrive=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let command = match &cli.command {
        Command::Init { name } => {
            let drive = Drive::create_drive(&cli.drive, name)?;
            println!("Drive '{}' created at {}", drive.config.name, cli.drive.display());
            return Ok(());
        }
        Command::Drive(command) => command,
    };

    let ctx = request_context(&cli)?;
    tracing::debug!(actor = %ctx.actor_id, timestamp = ctx.timestamp, "resolved request context");
    let mut drive = Drive::open_drive(&cli.drive)?;
    handlers::dispatch(&mut drive, &ctx, command)
}

/// 从 --actor 或 --cert 得到操作者，从 --time 或系统时钟得到时间戳
fn request_context(cli: &Cli) -> Result<RequestContext, CliError> {
    let actor_id = match (&cli.actor, &cli.cert) {
        (Some(actor), _) => actor.clone(),
        (None, Some(cert)) => actor_id_from_certificate(&fs::read(cert)?),
        (None, None) => return Err(CliError::MissingActor),
    };
    Ok(match cli.time {
        Some(timestamp) => RequestContext::new(actor_id, timestamp),
        None => RequestContext::now(actor_id),
    })
}
