//! Migrate command implementation

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// Load the configuration and save it back at the current schema version.
pub fn run_migrate(ctx: &Context) -> Result<()> {
    let store = ctx.store();
    let before = mesh_fs::io::read_text(&ctx.location)?;
    let cfg = store.load(&ctx.location)?;
    store.save(&cfg)?;
    let after = mesh_fs::io::read_text(&ctx.location)?;

    if before == after {
        println!("{} Already up to date.", "OK".green().bold());
    } else {
        println!(
            "{} Rewrote {} at version {}",
            "OK".green().bold(),
            ctx.location.display().to_string().cyan(),
            cfg.version
        );
    }
    Ok(())
}
