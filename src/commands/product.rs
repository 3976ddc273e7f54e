// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Product management commands

use super::{required, CommandContext};
use crate::data::VersionManagementData;
use crate::types::Product;
use anyhow::Result;

/// Run product command
pub async fn run(
    ctx: &CommandContext,
    action: &str,
    name: Option<String>,
    id: Option<i64>,
) -> Result<()> {
    let data = ctx.open_data().await?;

    match action {
        "create" | "new" => {
            let name = required(name, "Product name")?;
            let product = data.create_product(&name).await?;
            if ctx.json {
                ctx.print_json(&product)?;
            } else {
                println!("Created product: {} (id {})", ctx.highlight(&product.name), product.id);
            }
        }

        "rename" => {
            let id = required(id, "--id")?;
            let name = required(name, "New product name")?;
            let product = data
                .update_product(id, &name)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Product not found: id {}", id))?;
            if ctx.json {
                ctx.print_json(&product)?;
            } else {
                println!("Renamed product {} to {}", id, ctx.highlight(&product.name));
            }
        }

        "delete" | "rm" => {
            let product = resolve(&data, name.as_deref(), id).await?;
            data.delete_product(product.id).await?;
            if ctx.json {
                ctx.print_json(&product)?;
            } else {
                println!("Deleted product: {} (and its releases)", product.name);
            }
        }

        "list" | "ls" => {
            let products = data.list_products().await?;
            if ctx.json {
                ctx.print_json(&products)?;
            } else if products.is_empty() {
                println!("No products defined. Use 'version-management product create <name>' to create one.");
            } else {
                println!("Products ({}):", products.len());
                for product in &products {
                    println!("  {} {}", product.name, ctx.dim(&format!("[{}]", product.id)));
                }
            }
        }

        "show" => {
            let product = resolve(&data, name.as_deref(), id).await?;
            let releases = data.list_releases_by_product(product.id).await?;
            if ctx.json {
                ctx.print_json(&serde_json::json!({
                    "product": product,
                    "releases": releases,
                }))?;
            } else {
                println!("Product: {}", ctx.highlight(&product.name));
                println!("  id: {}", product.id);
                println!("  releases ({}):", releases.len());
                for detail in &releases {
                    println!("    {} -> {}", detail.release.name, detail.version_range);
                }
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: create, rename, delete, list, show", other);
        }
    }

    Ok(())
}

/// Find a product by id or name
async fn resolve(data: &VersionManagementData, name: Option<&str>, id: Option<i64>) -> Result<Product> {
    let product = match (id, name) {
        (Some(id), _) => data.get_product_by_id(id).await?,
        (None, Some(name)) => data.get_product_by_name(name).await?,
        (None, None) => anyhow::bail!("Product name or --id is required"),
    };
    product.ok_or_else(|| {
        anyhow::anyhow!(
            "Product not found: {}",
            id.map_or_else(|| name.unwrap_or_default().to_string(), |id| format!("id {id}"))
        )
    })
}
