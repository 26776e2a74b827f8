// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Import command - replace the working blueprint with a document

use super::Context;
use crate::graph::BlueprintSession;
use crate::template::GhostOverlay;
use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

/// Run the import command
pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    // Validate before touching the stored blueprint
    let mut session = BlueprintSession::new();
    session
        .import(&text)
        .with_context(|| format!("Failed to import {}", path.display()))?;

    ctx.save_session(&session)?;
    GhostOverlay::clear(ctx.data_dir())?;

    println!(
        "Imported blueprint {} ({} nodes, {} edges)",
        session.blueprint().id,
        session.node_count(),
        session.edge_count()
    );
    Ok(())
}
