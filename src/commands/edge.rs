// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Edge management commands - create and remove dependencies between blocks

use super::{resolve_node_id, short_id, Context};
use anyhow::Result;
use owo_colors::Style;

/// Run edge command
pub fn run(
    ctx: &Context,
    action: &str,
    from: Option<String>,
    to: Option<String>,
    id: Option<String>,
) -> Result<()> {
    let mut session = ctx.load_session()?;

    match action {
        "add" | "create" => {
            let from = from.ok_or_else(|| anyhow::anyhow!("--from is required"))?;
            let to = to.ok_or_else(|| anyhow::anyhow!("--to is required"))?;

            // Resolve node IDs (allow prefixes)
            let from_id = resolve_node_id(&session, &from)?;
            let to_id = resolve_node_id(&session, &to)?;

            match session.add_edge(&from_id, &to_id) {
                Some(edge) => {
                    ctx.save_session(&session)?;
                    println!("Created edge: {} -> {}", from_id, to_id);
                    println!("  id: {}", edge.id);
                }
                None if from_id == to_id => {
                    anyhow::bail!("A node cannot depend on itself");
                }
                None => {
                    println!("Edge already exists: {} -> {}", from_id, to_id);
                }
            }
        }

        "remove" | "delete" | "rm" => {
            let removed = if let Some(id) = id {
                session.remove_edge(&id).map_or(0, |_| 1)
            } else {
                let from = from.ok_or_else(|| anyhow::anyhow!("--id or --from/--to is required"))?;
                let to = to.ok_or_else(|| anyhow::anyhow!("--to is required"))?;
                let from_id = resolve_node_id(&session, &from)?;
                let to_id = resolve_node_id(&session, &to)?;

                let matching: Vec<String> = session
                    .edges()
                    .iter()
                    .filter(|e| e.source == from_id && e.target == to_id)
                    .map(|e| e.id.clone())
                    .collect();
                matching
                    .iter()
                    .filter(|edge_id| session.remove_edge(edge_id).is_some())
                    .count()
            };

            if removed > 0 {
                ctx.save_session(&session)?;
                println!("Removed {} edge(s)", removed);
            } else {
                println!("No matching edges found");
            }
        }

        "list" | "ls" => {
            if session.edge_count() == 0 {
                println!("No edges defined. Use 'dappcanvas edge add' to create one.");
                return Ok(());
            }

            println!("Edges ({}):", session.edge_count());
            for edge in session.edges() {
                let name = |node_id: &str| {
                    session
                        .node(node_id)
                        .map_or_else(|| node_id.to_string(), |n| n.block_type.clone())
                };
                println!(
                    "  {} {} --[{}]--> {}",
                    ctx.paint(short_id(&edge.id), Style::new().dimmed()),
                    ctx.paint(&name(&edge.source), Style::new().cyan()),
                    format!("{:?}", edge.kind).to_lowercase(),
                    ctx.paint(&name(&edge.target), Style::new().cyan())
                );
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: add, remove, list", other);
        }
    }

    Ok(())
}
