// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Layout command - re-flow the working blueprint by dependency tier

use super::{short_id, Context};
use crate::error::Error;
use anyhow::Result;

/// Run the layout command
pub fn run(ctx: &Context) -> Result<()> {
    let mut session = ctx.load_session()?;

    match session.apply_layout() {
        Ok(()) => {}
        Err(Error::CyclicGraph { node }) => {
            let id = session
                .nodes()
                .get(node)
                .map_or_else(|| node.to_string(), |n| n.id.clone());
            anyhow::bail!("Cannot lay out a cyclic graph: node {} is part of a cycle", id);
        }
        Err(e) => return Err(e.into()),
    }

    ctx.save_session(&session)?;

    println!("Laid out {} nodes:", session.node_count());
    for node in session.nodes() {
        println!(
            "  {} {:<22} ({}, {})",
            short_id(&node.id),
            node.block_type,
            node.position.x,
            node.position.y
        );
    }
    Ok(())
}
