// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Show the effective configuration

use super::CommandContext;
use anyhow::{Context, Result};

/// Print the whole configuration, or one dotted key
pub fn run(ctx: &CommandContext, key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => {
            let value = ctx.config.get(key)?;
            if ctx.json {
                ctx.print_json(&serde_json::json!({ key: value }))?;
            } else {
                println!("{value}");
            }
        }
        None if ctx.json => ctx.print_json(&ctx.config)?,
        None => {
            let text = toml::to_string_pretty(&ctx.config)
                .context("Failed to render configuration")?;
            print!("{text}");
        }
    }
    Ok(())
}
