use blockdrive::common::context::RequestContext;
use blockdrive::drive::Drive;
use crate::errors::CliError;
use crate::handlers::print_json;

pub fn handle_profile_init(drive: &mut Drive, ctx: &RequestContext, name: &str) -> Result<(), CliError> {
    let profile = drive.initiate_user_profile(ctx, name)?;
    print_json(&profile)
}

pub fn handle_profile_show(drive: &Drive, ctx: &RequestContext) -> Result<(), CliError> {
    let profile = drive.read_user_profile(ctx)?;
    print_json(&profile)
}
