// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Look up and allocate commit versions

use super::{required, CommandContext};
use crate::types::{CommitVersion, ReleaseVersion};
use anyhow::Result;

/// Version lookup settings given on the command line
#[derive(Debug, Default, Clone)]
pub struct VersionArgs {
    /// Product name
    pub product: Option<String>,
    /// Release name
    pub release: Option<String>,
    /// Commit id
    pub commit: Option<String>,
    /// Semantic version string
    pub version: Option<String>,
}

/// Run version command
pub async fn run(ctx: &CommandContext, action: &str, args: VersionArgs) -> Result<()> {
    let data = ctx.open_data().await?;
    let product = required(args.product, "--product")?;

    match action {
        "get" => {
            let release = required(args.release, "--release")?;
            let commit = required(args.commit, "--commit")?;
            let rv = data
                .get_release_version(&product, &release, &commit)
                .await?
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "No version has been allocated for commit '{}' in {} / {}",
                        commit,
                        product,
                        release
                    )
                })?;
            print_commit_version(ctx, &CommitVersion::new(&product, &release, &rv))?;
        }

        "allocate" | "next" => {
            let release = required(args.release, "--release")?;
            let commit = required(args.commit, "--commit")?;
            let rv = data
                .get_or_create_release_version(&product, &release, &commit)
                .await?;
            print_commit_version(ctx, &CommitVersion::new(&product, &release, &rv))?;
        }

        "commit" => {
            let commit = required(args.commit, "--commit")?;
            let versions = data
                .get_release_versions_from_commit_id(&product, &commit)
                .await?;
            print_release_versions(ctx, &versions)?;
        }

        "semantic" => {
            let version = required(args.version, "--version")?;
            let versions = data
                .get_release_versions_from_semantic_version(&product, &version)
                .await?;
            print_release_versions(ctx, &versions)?;
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: get, allocate, commit, semantic", other);
        }
    }

    Ok(())
}

fn print_commit_version(ctx: &CommandContext, cv: &CommitVersion) -> Result<()> {
    if ctx.json {
        ctx.print_json(cv)
    } else {
        println!("{}", ctx.highlight(&cv.version));
        Ok(())
    }
}

fn print_release_versions(ctx: &CommandContext, versions: &[ReleaseVersion]) -> Result<()> {
    if ctx.json {
        return ctx.print_json(versions);
    }
    if versions.is_empty() {
        println!("No matching versions.");
    }
    for rv in versions {
        println!(
            "{} {}",
            ctx.highlight(&rv.to_semantic_version()),
            ctx.dim(&format!("commit {} release {}", rv.commit_id, rv.release_id))
        );
    }
    Ok(())
}
