// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod config;
pub mod product;
pub mod range;
pub mod release;
pub mod serve;
pub mod version;

use crate::config::Config;
use crate::data::VersionManagementData;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Effective configuration
    pub config: Config,
    /// Print machine-readable JSON instead of text
    pub json: bool,
    /// Colorize text output
    pub color: bool,
}

impl CommandContext {
    /// Open the configured database
    pub async fn open_data(&self) -> Result<VersionManagementData> {
        if self.config.database.url.is_none() {
            std::fs::create_dir_all(&self.config.data_dir).with_context(|| {
                format!(
                    "Failed to create data directory {}",
                    self.config.data_dir.display()
                )
            })?;
        }

        VersionManagementData::open(&self.config).await.with_context(|| {
            format!(
                "Failed to open database in {}",
                self.config.data_dir.display()
            )
        })
    }

    /// Print a value as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("Failed to serialize output")?
        );
        Ok(())
    }

    /// Emphasize a value in text output
    #[must_use]
    pub fn highlight(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// De-emphasize secondary text
    #[must_use]
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Require an optional argument for an action
pub(crate) fn required<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| anyhow::anyhow!("{} is required", what))
}
