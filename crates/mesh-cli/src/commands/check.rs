//! Check command implementation
//!
//! Loads the configuration the way a node would and reports what it found.

use colored::Colorize;

use mesh_config::{Configuration, LoadError};
use mesh_protocol::DeviceId;

use crate::context::Context;
use crate::error::Result;

/// Load and summarize the configuration. Fails if the file cannot be read or
/// decoded; a decode failure still prints what was recovered.
pub fn run_check(ctx: &Context) -> Result<()> {
    let store = ctx.store();
    match store.load(&ctx.location) {
        Ok(cfg) => {
            print_summary(&cfg, store.my_id());
            let invalid = cfg.folders.iter().filter(|f| f.is_invalid()).count();
            if invalid == 0 {
                println!("{} Configuration is consistent.", "OK".green().bold());
            } else {
                println!(
                    "{} {} folder(s) disabled.",
                    "WARN".yellow().bold(),
                    invalid
                );
            }
            Ok(())
        }
        Err(err @ LoadError::Decode { .. }) => {
            if let Some(cfg) = err.recovered() {
                println!("{}", "Recovered configuration:".bold());
                print_summary(cfg, store.my_id());
            }
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn print_summary(cfg: &Configuration, my_id: DeviceId) {
    println!(
        "{} {} (version {})",
        "Config".blue().bold(),
        cfg.location.display().to_string().cyan(),
        cfg.version
    );
    println!("   Local device: {}", my_id.short());
    println!("   Folders: {}", cfg.folders.len());
    println!("   Devices: {}", cfg.devices.len());

    for folder in cfg.folders.iter().filter(|f| f.is_invalid()) {
        println!(
            "   {} {}: {}",
            "!".red().bold(),
            folder.id.yellow(),
            folder.invalid
        );
    }
}
