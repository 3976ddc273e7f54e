// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Version range management commands

use super::{required, CommandContext};
use crate::data::VersionManagementData;
use crate::types::{Version, VersionComponent, VersionRange, VersionRangeEdit};
use anyhow::Result;

/// Range settings given on the command line
#[derive(Debug, Default, Clone)]
pub struct RangeArgs {
    /// Range name
    pub name: Option<String>,
    /// Range id
    pub id: Option<i64>,
    /// Start version
    pub start: Option<Version>,
    /// Next version
    pub next: Option<Version>,
    /// End version
    pub end: Option<Version>,
    /// Component to advance
    pub increment_by: Option<VersionComponent>,
}

/// Run range command
pub async fn run(ctx: &CommandContext, action: &str, args: RangeArgs) -> Result<()> {
    let data = ctx.open_data().await?;

    match action {
        "create" | "new" => {
            let edit = VersionRangeEdit {
                name: required(args.name, "Range name")?,
                increment_by: args.increment_by.unwrap_or_default(),
                start_version: required(args.start, "--start")?,
                next_version: args.next,
                end_version: required(args.end, "--end")?,
            };
            let range = data.create_version_range(edit).await?;
            if ctx.json {
                ctx.print_json(&range)?;
            } else {
                println!("Created version range: {} (id {})", ctx.highlight(&range.to_string()), range.id);
            }
        }

        "update" | "edit" => {
            let id = required(args.id, "--id")?;
            let current = data
                .get_version_range_by_id(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Version range not found: id {}", id))?;

            let edit = VersionRangeEdit {
                name: args.name.unwrap_or(current.name),
                increment_by: args.increment_by.unwrap_or(current.increment_by),
                start_version: args.start.unwrap_or(current.start_version),
                next_version: Some(args.next.unwrap_or(current.next_version)),
                end_version: args.end.unwrap_or(current.end_version),
            };
            let range = data
                .update_version_range(id, edit)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Version range not found: id {}", id))?;
            if ctx.json {
                ctx.print_json(&range)?;
            } else {
                println!("Updated version range: {}", ctx.highlight(&range.to_string()));
            }
        }

        "delete" | "rm" => {
            let range = resolve(&data, args.name.as_deref(), args.id).await?;
            data.delete_version_range(range.id).await?;
            if ctx.json {
                ctx.print_json(&range)?;
            } else {
                println!("Deleted version range: {} (and its releases)", range.name);
            }
        }

        "list" | "ls" => {
            let ranges = data.list_version_ranges().await?;
            if ctx.json {
                ctx.print_json(&ranges)?;
            } else if ranges.is_empty() {
                println!("No version ranges defined. Use 'version-management range create <name> --start <v> --end <v>' to create one.");
            } else {
                println!("Version ranges ({}):", ranges.len());
                for range in &ranges {
                    println!(
                        "  {} {}",
                        range,
                        ctx.dim(&format!("[{}] by {}, {} left", range.id, range.increment_by, range.remaining()))
                    );
                }
            }
        }

        "show" => {
            let range = resolve(&data, args.name.as_deref(), args.id).await?;
            let releases = data.list_releases_by_version_range(range.id).await?;
            if ctx.json {
                ctx.print_json(&serde_json::json!({
                    "versionRange": range,
                    "releases": releases,
                }))?;
            } else {
                println!("Version range: {}", ctx.highlight(&range.name));
                println!("  id: {}", range.id);
                println!("  increment by: {}", range.increment_by);
                println!("  start: {}", range.start_version);
                println!("  next: {}", range.next_version);
                println!("  end: {}", range.end_version);
                println!("  remaining: {}", range.remaining());
                println!("  releases ({}):", releases.len());
                for detail in &releases {
                    println!("    {} / {}", detail.product_name, detail.release.name);
                }
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: create, update, delete, list, show", other);
        }
    }

    Ok(())
}

/// Find a range by id, or by name when the name is unambiguous
async fn resolve(data: &VersionManagementData, name: Option<&str>, id: Option<i64>) -> Result<VersionRange> {
    if let Some(id) = id {
        return data
            .get_version_range_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Version range not found: id {}", id));
    }

    let name = required(name, "Range name or --id")?;
    let mut matches: Vec<_> = data
        .list_version_ranges()
        .await?
        .into_iter()
        .filter(|r| r.name == name)
        .collect();

    match matches.len() {
        0 => anyhow::bail!("No version range found: {}", name),
        1 => Ok(matches.remove(0)),
        _ => {
            eprintln!("Multiple version ranges are named '{}':", name);
            for r in &matches {
                eprintln!("  {} [{}]", r, r.id);
            }
            anyhow::bail!("Ambiguous version range name, use --id")
        }
    }
}
