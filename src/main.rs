// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Dappcanvas CLI - Blueprint editor for visual dapp scaffolding

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use dappcanvas::commands::{self, node::NodeArgs, Context};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dappcanvas")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "DAPPCANVAS_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Data directory override
    #[arg(long, env = "DAPPCANVAS_DATA_DIR", global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new blueprint
    New {
        /// Seed from a library template
        #[arg(short, long)]
        template: Option<String>,

        /// Project name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Manage blocks
    Node {
        /// Action: add, move, set, remove, show, list
        action: String,

        /// Block type for add, node ID (or prefix) otherwise
        target: Option<String>,

        /// X coordinate
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f64>,

        /// Y coordinate
        #[arg(long, allow_hyphen_values = true)]
        y: Option<f64>,

        /// Config keys as a JSON object
        #[arg(long)]
        json: Option<String>,
    },

    /// Manage dependencies between blocks
    Edge {
        /// Action: add, remove, list
        action: String,

        /// Source node ID (or prefix)
        #[arg(long)]
        from: Option<String>,

        /// Target node ID (or prefix)
        #[arg(long)]
        to: Option<String>,

        /// Edge ID (for remove)
        #[arg(long)]
        id: Option<String>,
    },

    /// Re-flow node positions by dependency tier
    Layout,

    /// List templates, or show one
    Templates {
        /// Template ID
        id: Option<String>,
    },

    /// List or activate template suggestions
    Ghost {
        /// Action: list, activate
        #[arg(default_value = "list")]
        action: String,

        /// Suggestion index
        index: Option<usize>,
    },

    /// Export the blueprint
    Export {
        /// Output format (json, dot)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Replace the blueprint with a JSON document
    Import {
        /// Document path
        path: std::path::PathBuf,
    },

    /// Discard the blueprint and start empty
    Reset,

    /// Inspect configuration
    Config {
        /// Action: show, path, network
        #[arg(default_value = "show")]
        action: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = dappcanvas::config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => "error".to_string(),
        0 => config.log_level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context {
        config,
        color: !cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::New { template, name } => commands::new::run(&ctx, template, name),
        Commands::Node { action, target, x, y, json } => {
            commands::node::run(&ctx, &action, NodeArgs { target, x, y, config: json })
        }
        Commands::Edge { action, from, to, id } => {
            commands::edge::run(&ctx, &action, from, to, id)
        }
        Commands::Layout => commands::layout::run(&ctx),
        Commands::Templates { id } => commands::templates::run(&ctx, id),
        Commands::Ghost { action, index } => commands::ghost::run(&ctx, &action, index),
        Commands::Export { format, output } => commands::export::run(&ctx, &format, output),
        Commands::Import { path } => commands::import::run(&ctx, &path),
        Commands::Reset => commands::reset::run(&ctx),
        Commands::Config { action } => commands::config::run(&ctx, &action),
        Commands::Completions { shell } => commands::completions::run(shell, Cli::command()),
    }
}
