//! Init command implementation

use colored::Colorize;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Write a fresh configuration to the context location.
pub fn run_init(ctx: &Context, force: bool) -> Result<()> {
    if ctx.location.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists; use --force to overwrite",
            ctx.location.display()
        )));
    }

    let store = ctx.store();
    let cfg = store.create(&ctx.location);
    store.save(&cfg)?;

    println!(
        "{} Configuration initialized at {}",
        "OK".green().bold(),
        ctx.location.display().to_string().cyan()
    );
    println!("   Device: {}", ctx.device_id.to_string().yellow());
    Ok(())
}
