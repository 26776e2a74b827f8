// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Ghost commands - list and activate suggested blocks

use super::Context;
use crate::template::GhostOverlay;
use anyhow::Result;
use owo_colors::Style;

/// Run ghost command
pub fn run(ctx: &Context, action: &str, index: Option<usize>) -> Result<()> {
    let Some(mut overlay) = GhostOverlay::load(ctx.data_dir())? else {
        println!("No suggestions. Start from a template with 'dappcanvas new --template <id>'.");
        return Ok(());
    };

    match action {
        "list" | "ls" => {
            println!("Suggestions from {}:", overlay.template_id);
            for (i, ghost) in overlay.nodes.iter().enumerate() {
                let state = match &ghost.activated {
                    Some(id) => format!("active as {}", id),
                    None => "pending".to_string(),
                };
                println!(
                    "  [{}] {:<22} {} ({})",
                    i,
                    ctx.paint(&ghost.block_type, Style::new().cyan()),
                    ghost.label,
                    state
                );
            }
        }

        "activate" | "add" => {
            let index = index.ok_or_else(|| anyhow::anyhow!("Ghost index is required"))?;
            let mut session = ctx.load_session()?;

            match session.activate_ghost(&mut overlay, index)? {
                Some(node) => {
                    ctx.save_session(&session)?;
                    overlay.save(ctx.data_dir())?;
                    println!(
                        "Activated {} as node {} ({} edge(s))",
                        node.block_type,
                        node.id,
                        session.edges_to(&node.id).len() + session.edges_from(&node.id).len()
                    );
                }
                None => println!("Suggestion {} is already active", index),
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: list, activate", other);
        }
    }

    Ok(())
}
