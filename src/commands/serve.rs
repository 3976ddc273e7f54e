// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Run the HTTP API

use super::CommandContext;
use crate::api;
use anyhow::Result;

/// Serve until Ctrl-C, with optional host/port overrides
pub async fn run(ctx: &CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = ctx.config.clone();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let data = ctx.open_data().await?;
    api::serve(&config, data).await
}
