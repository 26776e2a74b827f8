// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Templates command - browse the template library

use super::Context;
use crate::template::Template;
use anyhow::Result;
use owo_colors::Style;

/// Run the templates command
pub fn run(ctx: &Context, id: Option<String>) -> Result<()> {
    match id {
        None => {
            let library = Template::library();
            println!("Templates ({}):", library.len());
            for template in &library {
                println!(
                    "  {:<18} {} [{}]",
                    ctx.paint(&template.id, Style::new().cyan()),
                    template.name,
                    template.category
                );
                println!("    {}", template.description);
            }
        }
        Some(id) => {
            let template = Template::find(&id)?;
            let tiers = template.tiers()?;

            println!("{} ({})", ctx.paint(&template.name, Style::new().bold()), template.id);
            println!("  {}", template.description);
            println!();
            println!("Core:");
            for (index, (node, tier)) in template.nodes.iter().zip(&tiers.core).enumerate() {
                println!("  [{}] tier {} {:<22} {}", index, tier, node.block_type, node.label);
            }
            for edge in &template.edges {
                println!("    {} -> {}", edge.source, edge.target);
            }

            if !template.ghost_nodes.is_empty() {
                println!("Suggested:");
                let offset = template.nodes.len();
                let ghosts = template.ghost_nodes.iter().zip(&tiers.ghost);
                for (index, (node, tier)) in ghosts.enumerate() {
                    println!(
                        "  [{}] tier {} {:<22} {}",
                        index + offset,
                        tier,
                        node.block_type,
                        ctx.paint(&node.label, Style::new().dimmed())
                    );
                }
                for edge in &template.ghost_edges {
                    println!("    {} -> {}", edge.source, edge.target);
                }
            }
        }
    }
    Ok(())
}
