// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Node management commands - add, move, configure and remove blocks

use super::{parse_config_object, resolve_node_id, short_id, Context};
use crate::catalog::BuiltinCatalog;
use crate::types::{NodeUpdate, Position};
use anyhow::Result;
use owo_colors::Style;

/// Arguments shared by the node actions
#[derive(Debug, Clone, Default)]
pub struct NodeArgs {
    /// Block kind for `add`, node ID (or prefix) otherwise
    pub target: Option<String>,
    /// X coordinate
    pub x: Option<f64>,
    /// Y coordinate
    pub y: Option<f64>,
    /// JSON object of config keys
    pub config: Option<String>,
}

/// Run node command
pub fn run(ctx: &Context, action: &str, args: NodeArgs) -> Result<()> {
    let mut session = ctx.load_session()?;

    match action {
        "add" | "create" => {
            let block_type = args
                .target
                .ok_or_else(|| anyhow::anyhow!("Block type is required"))?;
            let overrides = args.config.as_deref().map(parse_config_object).transpose()?;

            if !BuiltinCatalog::contains(&block_type) {
                eprintln!("Note: '{}' is not a built-in block; config starts empty", block_type);
            }

            let position = Position::new(args.x.unwrap_or(0.0), args.y.unwrap_or(0.0));
            let node = session.add_node(&block_type, position, overrides);
            ctx.save_session(&session)?;

            println!("Created node: {} ({})", node.id, node.block_type);
        }

        "move" | "mv" => {
            let id = resolve_node_id(&session, &required_target(&args)?)?;
            let current = session
                .node(&id)
                .map(|n| n.position)
                .unwrap_or_default();
            let position = Position::new(args.x.unwrap_or(current.x), args.y.unwrap_or(current.y));

            session.update_node(&id, NodeUpdate::position(position));
            ctx.save_session(&session)?;

            println!("Moved {} to ({}, {})", id, position.x, position.y);
        }

        "set" | "config" => {
            let id = resolve_node_id(&session, &required_target(&args)?)?;
            let text = args
                .config
                .ok_or_else(|| anyhow::anyhow!("--json is required"))?;
            let partial = parse_config_object(&text)?;
            let keys: Vec<String> = partial.keys().cloned().collect();

            session.update_node_config(&id, partial);
            ctx.save_session(&session)?;

            println!("Updated {}: {}", id, keys.join(", "));
        }

        "remove" | "delete" | "rm" => {
            let id = resolve_node_id(&session, &required_target(&args)?)?;
            let edges_before = session.edge_count();

            if let Some(node) = session.remove_node(&id) {
                ctx.save_session(&session)?;
                println!(
                    "Removed node {} ({}) and {} edge(s)",
                    node.id,
                    node.block_type,
                    edges_before - session.edge_count()
                );
            }
        }

        "show" => {
            let id = resolve_node_id(&session, &required_target(&args)?)?;
            if let Some(node) = session.node(&id) {
                println!("{}", serde_json::to_string_pretty(node)?);
            }
        }

        "list" | "ls" => {
            if session.is_empty() {
                println!("No nodes defined. Use 'dappcanvas node add' to create one.");
                return Ok(());
            }

            println!("Nodes ({}):", session.node_count());
            for node in session.nodes() {
                let label = node
                    .config
                    .get("label")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                println!(
                    "  {} {:<22} ({}, {}) {}",
                    ctx.paint(short_id(&node.id), Style::new().dimmed()),
                    ctx.paint(&node.block_type, Style::new().cyan()),
                    node.position.x,
                    node.position.y,
                    label
                );
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: add, move, set, remove, show, list", other);
        }
    }

    Ok(())
}

fn required_target(args: &NodeArgs) -> Result<String> {
    args.target
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Node ID is required"))
}
