//! Device ID command implementation

use crate::cli::Target;
use crate::context::certificate_identity;
use crate::error::{CliError, Result};

/// Print the identity derived from `--cert`.
pub fn run_device_id(target: &Target) -> Result<()> {
    let cert = target
        .cert
        .as_deref()
        .ok_or_else(|| CliError::user("device-id needs --cert <path>"))?;
    println!("{}", certificate_identity(cert)?);
    Ok(())
}
