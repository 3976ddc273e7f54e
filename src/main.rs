// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Version management CLI - hand out build versions to commits

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use version_management::commands::{self, range::RangeArgs, release::ReleaseArgs, version::VersionArgs, CommandContext};
use version_management::config;
use version_management::types::{Version, VersionComponent};

#[derive(Parser)]
#[command(name = "version-management")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "VERSION_MANAGEMENT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, env = "VERSION_MANAGEMENT_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON HTTP API
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Manage products
    Product {
        /// Action: list, create, rename, delete, show
        action: String,

        /// Product name
        name: Option<String>,

        /// Product id
        #[arg(long)]
        id: Option<i64>,
    },

    /// Manage version ranges
    Range {
        /// Action: list, create, update, delete, show
        action: String,

        /// Range name
        name: Option<String>,

        /// Range id
        #[arg(long)]
        id: Option<i64>,

        /// First version (e.g. 1.0.0.0)
        #[arg(long)]
        start: Option<Version>,

        /// Next version to hand out (defaults to --start)
        #[arg(long)]
        next: Option<Version>,

        /// Upper bound
        #[arg(long)]
        end: Option<Version>,

        /// Component to advance (major, minor, build, revision)
        #[arg(long)]
        increment_by: Option<VersionComponent>,
    },

    /// Manage releases
    Release {
        /// Action: list, create, delete, show
        action: String,

        /// Release name
        name: Option<String>,

        /// Product name
        #[arg(short, long)]
        product: Option<String>,

        /// Version range id
        #[arg(short, long)]
        range: Option<i64>,

        /// Pre-release suffix (e.g. beta)
        #[arg(short, long)]
        special: Option<String>,

        /// Release id
        #[arg(long)]
        id: Option<i64>,
    },

    /// Look up or allocate versions
    Version {
        /// Action: get, allocate, commit, semantic
        action: String,

        /// Product name
        #[arg(short, long)]
        product: Option<String>,

        /// Release name
        #[arg(short, long)]
        release: Option<String>,

        /// Commit id
        #[arg(long)]
        commit: Option<String>,

        /// Semantic version (for `semantic`)
        #[arg(long = "version", id = "semantic_version")]
        semantic_version: Option<String>,
    },

    /// Show effective configuration
    Config {
        /// Configuration key (e.g. server.port); omit to print everything
        key: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    // Initialize logging; RUST_LOG wins over flags and config
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = CommandContext {
        config,
        json: cli.json,
        color: !cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(&ctx, host, port).await,
        Commands::Product { action, name, id } => {
            commands::product::run(&ctx, &action, name, id).await
        }
        Commands::Range { action, name, id, start, next, end, increment_by } => {
            let args = RangeArgs { name, id, start, next, end, increment_by };
            commands::range::run(&ctx, &action, args).await
        }
        Commands::Release { action, name, product, range, special, id } => {
            let args = ReleaseArgs { name, product, range, special, id };
            commands::release::run(&ctx, &action, args).await
        }
        Commands::Version { action, product, release, commit, semantic_version } => {
            let args = VersionArgs {
                product,
                release,
                commit,
                version: semantic_version,
            };
            commands::version::run(&ctx, &action, args).await
        }
        Commands::Config { key } => commands::config::run(&ctx, key.as_deref()),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
