// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Release management commands

use super::{required, CommandContext};
use crate::data::VersionManagementData;
use crate::types::{ReleaseDetail, ReleaseEdit};
use anyhow::Result;

/// Release settings given on the command line
#[derive(Debug, Default, Clone)]
pub struct ReleaseArgs {
    /// Release name
    pub name: Option<String>,
    /// Owning product name
    pub product: Option<String>,
    /// Version range id
    pub range: Option<i64>,
    /// Pre-release suffix
    pub special: Option<String>,
    /// Release id
    pub id: Option<i64>,
}

/// Run release command
pub async fn run(ctx: &CommandContext, action: &str, args: ReleaseArgs) -> Result<()> {
    let data = ctx.open_data().await?;

    match action {
        "create" | "new" => {
            let name = required(args.name, "Release name")?;
            let product_name = required(args.product, "--product")?;
            let product = data
                .get_product_by_name(&product_name)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Product not found: {}", product_name))?;

            let release = data
                .create_release(ReleaseEdit {
                    name,
                    product_id: product.id,
                    version_range_id: required(args.range, "--range")?,
                    special_version: args.special,
                })
                .await?;

            if ctx.json {
                ctx.print_json(&release)?;
            } else {
                println!(
                    "Created release: {} / {} (id {})",
                    release.product_name,
                    ctx.highlight(&release.release.name),
                    release.release.id
                );
            }
        }

        "delete" | "rm" => {
            let release = resolve(&data, &args).await?;
            data.delete_release(release.release.id).await?;
            if ctx.json {
                ctx.print_json(&release)?;
            } else {
                println!(
                    "Deleted release: {} / {}",
                    release.product_name, release.release.name
                );
            }
        }

        "list" | "ls" => {
            let releases = match &args.product {
                Some(product) => data.find_releases(product, args.name.as_deref()).await?,
                None => data.list_releases().await?,
            };
            if ctx.json {
                ctx.print_json(&releases)?;
            } else if releases.is_empty() {
                println!("No releases found.");
            } else {
                println!("Releases ({}):", releases.len());
                for detail in &releases {
                    print_line(ctx, detail);
                }
            }
        }

        "show" => {
            let release = resolve(&data, &args).await?;
            if ctx.json {
                ctx.print_json(&release)?;
            } else {
                println!("Release: {}", ctx.highlight(&release.release.name));
                println!("  id: {}", release.release.id);
                println!("  product: {}", release.product_name);
                if let Some(special) = &release.release.special_version {
                    println!("  special version: {}", special);
                }
                println!("  version range: {}", release.version_range);
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: create, delete, list, show", other);
        }
    }

    Ok(())
}

fn print_line(ctx: &CommandContext, detail: &ReleaseDetail) {
    let special = detail
        .release
        .special_version
        .as_deref()
        .map(|s| format!(" -{s}"))
        .unwrap_or_default();
    println!(
        "  {} / {}{} {}",
        detail.product_name,
        detail.release.name,
        special,
        ctx.dim(&format!("[{}] next {}", detail.release.id, detail.version_range.next_version))
    );
}

/// Find a release by id, or by product and release name
async fn resolve(data: &VersionManagementData, args: &ReleaseArgs) -> Result<ReleaseDetail> {
    if let Some(id) = args.id {
        return data
            .get_release_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Release not found: id {}", id));
    }

    let product = required(args.product.as_deref(), "--product or --id")?;
    let name = required(args.name.as_deref(), "Release name or --id")?;
    data.find_releases(product, Some(name))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Release not found: {} / {}", product, name))
}
