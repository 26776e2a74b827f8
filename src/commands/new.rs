// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! New command - start a blueprint, optionally from a template

use super::Context;
use crate::graph::BlueprintSession;
use crate::template::{GhostOverlay, Template};
use anyhow::{Context as _, Result};
use tracing::info;

/// Run the new command
pub fn run(ctx: &Context, template: Option<String>, name: Option<String>) -> Result<()> {
    let network = ctx.config.network_config()?;

    let (mut session, overlay) = match template.as_deref() {
        Some(id) => {
            let template = Template::find(id)
                .with_context(|| "Run 'dappcanvas templates' to list available templates")?;
            let (session, overlay) = BlueprintSession::from_template(&template)?;
            (session, Some(overlay))
        }
        None => (BlueprintSession::new(), None),
    };

    {
        let config = session.config_mut();
        config.network = network;
        if let Some(name) = name {
            config.project.name = name;
        }
    }

    ctx.save_session(&session)?;
    match &overlay {
        Some(overlay) => overlay.save(ctx.data_dir())?,
        None => GhostOverlay::clear(ctx.data_dir())?,
    }

    let blueprint = session.blueprint();
    info!("Created blueprint {}", blueprint.id);
    println!(
        "Created blueprint {} ({})",
        ctx.paint(&blueprint.config.project.name, owo_colors::Style::new().bold()),
        blueprint.id
    );
    println!("  network: {}", blueprint.config.network.name);
    println!("  nodes: {}, edges: {}", session.node_count(), session.edge_count());
    if let Some(overlay) = overlay {
        println!("  suggestions: {} (see 'dappcanvas ghost list')", overlay.nodes.len());
    }

    Ok(())
}
