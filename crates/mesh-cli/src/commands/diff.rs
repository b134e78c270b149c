//! Diff command implementation
//!
//! Compares two configurations after normalizing both for the same device,
//! and reports whether switching to the second needs a restart.

use std::path::Path;

use colored::Colorize;
use serde_json::json;
use similar::{ChangeTag, TextDiff};

use mesh_config::{Configuration, change_requires_restart, encode};

use crate::context::Context;
use crate::error::Result;

pub fn run_diff(ctx: &Context, other: &Path, json: bool) -> Result<()> {
    let store = ctx.store();
    let from = store.load(&ctx.location)?;
    let to = store.load(other)?;
    let requires_restart = change_requires_restart(&from, &to);

    if json {
        let json_output = json!({
            "requires_restart": requires_restart,
        });
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    let old = encode(&from)?;
    let new = encode(&to)?;
    print_diff_output(&from, &to, &old, &new);

    if requires_restart {
        println!("{} Change requires a restart.", "RESTART".yellow().bold());
    } else {
        println!("{} Change applies without a restart.", "OK".green().bold());
    }
    Ok(())
}

fn print_diff_output(from: &Configuration, to: &Configuration, old: &str, new: &str) {
    if old == new {
        println!("{} No differences.", "OK".green().bold());
        return;
    }

    println!(
        "{} {} -> {}",
        "Diff".blue().bold(),
        from.location.display().to_string().yellow(),
        to.location.display().to_string().yellow()
    );
    println!();

    let diff = TextDiff::from_lines(old, new);
    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches('\n');
        match change.tag() {
            ChangeTag::Delete => println!("{}", format!("-{line}").red()),
            ChangeTag::Insert => println!("{}", format!("+{line}").green()),
            ChangeTag::Equal => {}
        }
    }
    println!();
}
